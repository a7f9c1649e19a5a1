//! Observability events for editkit
//!
//! Every log line the crate emits carries one of these as its `event` field,
//! so logs can be filtered by what happened rather than by message text.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Schema registry
    /// Schema registered under a name
    SchemaRegistered,
    /// Definition directory loaded
    SchemasLoaded,

    // Validation
    /// Input rejected by a schema
    ValidationFailed,
    /// A default could not be produced (FATAL)
    DefaultFailed,

    // Text splitting
    /// Text node split or range isolated
    TextSplit,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaRegistered => "SCHEMA_REGISTERED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::DefaultFailed => "DEFAULT_FAILED",
            Event::TextSplit => "TEXT_SPLIT",
        }
    }

    /// Returns true for events that indicate a broken schema definition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::DefaultFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
