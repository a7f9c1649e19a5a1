//! Observability for editkit
//!
//! The library only emits `tracing` events, each tagged with an [`Event`].
//! Installing a subscriber is left to the binary (or to tests).
//!
//! # Usage
//!
//! ```ignore
//! use editkit::observability::init_logging;
//!
//! init_logging("editkit=debug")?;
//! ```

mod errors;
mod events;

pub use errors::{LogError, LogResult};
pub use events::Event;

use tracing_subscriber::EnvFilter;

/// Installs a compact stderr subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. Fails if the filter does not
/// parse or a global subscriber is already installed.
pub fn init_logging(default_filter: &str) -> LogResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| LogError::InvalidFilter {
            filter: default_filter.to_string(),
            reason: e.to_string(),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| LogError::AlreadyInstalled(e.to_string()))
}

/// Logs a lifecycle event at the level its severity calls for.
pub fn log_event(event: Event, detail: &str) {
    if event.is_fatal() {
        tracing::error!(event = %event, "{}", detail);
    } else {
        tracing::info!(event = %event, "{}", detail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_without_subscriber() {
        // This just verifies no panic
        log_event(Event::ConfigLoaded, "config loaded");
        log_event(Event::DefaultFailed, "default failed");
    }

    #[test]
    fn test_second_install_is_rejected() {
        let _ = init_logging("warn");
        let err = init_logging("warn").unwrap_err();
        assert_eq!(err.code(), "EK_LOG_ALREADY_INSTALLED");
    }
}
