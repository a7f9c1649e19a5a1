//! Logging setup errors

use thiserror::Error;

/// Result type for logging setup
pub type LogResult<T> = Result<T, LogError>;

/// Logging setup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install subscriber: {0}")]
    AlreadyInstalled(String),
}

impl LogError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            LogError::InvalidFilter { .. } => "EK_LOG_INVALID_FILTER",
            LogError::AlreadyInstalled(_) => "EK_LOG_ALREADY_INSTALLED",
        }
    }
}
