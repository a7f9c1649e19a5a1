//! editkit - schema validation and text splitting core for a rich-text editor
//!
//! Two independent leaf utilities:
//! - [`schema`]: validates and normalizes raw component specs
//! - [`split`]: splits text nodes of any tree implementing [`split::Universe`]

pub mod cli;
pub mod components;
pub mod ids;
pub mod observability;
pub mod schema;
pub mod split;
