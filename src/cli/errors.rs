//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::fmt;
use std::io;

use crate::schema::SchemaError;
use crate::split::SplitError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/files)
    IoError,
    /// Arguments that parse but make no sense together
    UsageError,
    /// Schema lookup, loading or validation failed
    SchemaError,
    /// Text split rejected
    SplitError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "EK_CLI_CONFIG_ERROR",
            Self::IoError => "EK_CLI_IO_ERROR",
            Self::UsageError => "EK_CLI_USAGE_ERROR",
            Self::SchemaError => "EK_CLI_SCHEMA_ERROR",
            Self::SplitError => "EK_CLI_SPLIT_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Usage error
    pub fn usage_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::UsageError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, e.to_string())
    }
}

impl From<SplitError> for CliError {
    fn from(e: SplitError) -> Self {
        Self::new(CliErrorCode::SplitError, format!("{}: {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::usage_error("pass --at or --start/--end");
        assert_eq!(err.code_str(), "EK_CLI_USAGE_ERROR");
        assert!(err.to_string().starts_with("EK_CLI_USAGE_ERROR: "));
    }

    #[test]
    fn test_split_error_conversion_keeps_code() {
        let err: CliError = SplitError::InvalidOffset { offset: 7, len: 2 }.into();
        assert_eq!(err.code(), &CliErrorCode::SplitError);
        assert!(err.message().contains("EK_SPLIT_INVALID_OFFSET"));
    }
}
