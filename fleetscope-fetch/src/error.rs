//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The host HTTP layer refused or failed the request.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Reading the response body failed.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint path that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The login response carried no token.
    #[error("Token not found in login response")]
    MissingToken,

    /// Invalid response from the API.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core error.
    #[error("{0}")]
    Core(#[from] fleetscope_core::CoreError),

    /// No vehicle carries the requested plate.
    #[error("Plate '{0}' not found")]
    PlateNotFound(String),

    /// The detail endpoint returned nothing usable.
    #[error("Vehicle detail not found for IMEI {0}")]
    DetailNotFound(String),
}

impl FetchError {
    /// Returns true if the error means the service could not log in.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_) | Self::MissingToken)
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
