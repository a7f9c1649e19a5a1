//! CLI module for editkit
//!
//! Provides command-line interface for:
//! - validate: validate a component spec against a named schema
//! - schemas: list built-in and loaded schemas
//! - split: split a text node and show the resulting siblings

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_registry, run, run_command, schemas, split_report, validate, Config, SplitMode};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_error, write_response};
