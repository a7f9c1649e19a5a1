//! CLI argument definitions using clap
//!
//! Commands:
//! - editkit validate --schema <name> [--config <path>] [--input <path>]
//! - editkit schemas [--config <path>]
//! - editkit split --text <text> (--at <n> | --start <a> --end <b>)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// editkit - schema validation and text splitting for editor components
#[derive(Parser, Debug)]
#[command(name = "editkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a component spec against a named schema
    Validate {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Schema name (built-in or loaded from the schema directory)
        #[arg(long)]
        schema: String,

        /// JSON file holding the spec; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// List registered schema names
    Schemas {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Split a text node and print the resulting sibling texts
    Split {
        /// Text of the node to split
        #[arg(long)]
        text: String,

        /// Single cut position (UTF-16 code units)
        #[arg(long, conflicts_with_all = ["start", "end"])]
        at: Option<usize>,

        /// Range start (UTF-16 code units)
        #[arg(long, requires = "end")]
        start: Option<usize>,

        /// Range end (UTF-16 code units)
        #[arg(long, requires = "start")]
        end: Option<usize>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
