//! Core error types for `FleetScope`.

use thiserror::Error;

/// Core error type for `FleetScope` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A date string did not match `YYYY-MM-DD`.
    #[error("Invalid date format '{input}': {source}")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// Underlying parse error.
        #[source]
        source: chrono::ParseError,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
