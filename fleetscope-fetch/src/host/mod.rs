//! Host APIs for FleetScope.
//!
//! - [`http`] - HTTP client with tracing and domain allowlist
//! - [`clock`] - Wall clock, replaceable in tests

pub mod clock;
pub mod http;

// Re-export key types
pub use clock::{Clock, SystemClock};
pub use http::HttpClient;
