//! Observability error types.

use thiserror::Error;

/// Errors from parsing logging settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObservabilityError {
    /// Unknown log level name.
    #[error("Invalid log level '{0}' (expected trace, debug, info, warn or error)")]
    InvalidLevel(String),

    /// Unknown log format name.
    #[error("Invalid log format '{0}' (expected human or json)")]
    InvalidFormat(String),
}
