// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # FleetScope Fetch
//!
//! Access to the upstream GPS fleet tracking API.
//!
//! ## Host APIs
//!
//! The [`host`] module provides abstractions for system interactions:
//!
//! - [`host::http`] - HTTP client with tracing and domain allowlist
//! - [`host::clock`] - Injectable wall clock
//!
//! ## API Access
//!
//! - [`api::FleetApi`] - Trait over the four upstream endpoints
//! - [`api::GpsApiClient`] - Implementation backed by [`HttpClient`]
//! - [`auth::TokenProvider`] - Caches the bearer token until it expires
//! - [`mileage::MileageRangeFetcher`] - Splits ranges into 7-day windows
//! - [`service::FleetService`] - Token-aware facade used by front ends
//!
//! ## Example
//!
//! ```ignore
//! use fleetscope_fetch::{ApiConfig, FleetService};
//!
//! let service = FleetService::from_config(ApiConfig::from_env()?)?;
//! let report = service.full_mileage("860000000000001", "2024-01-01", "2024-01-31").await?;
//! println!("{} records", report.records.len());
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod host;
pub mod mileage;
pub mod parser;
pub mod service;

#[cfg(test)]
mod testing;

// Re-export key types at crate root

// Errors
pub use error::{FetchError, HttpError};

// Host APIs
pub use host::{
    clock::{Clock, SystemClock},
    http::HttpClient,
};

// Configuration
pub use config::{ApiConfig, Credentials};

// API access
pub use api::{FleetApi, GpsApiClient};
pub use auth::TokenProvider;
pub use mileage::MileageRangeFetcher;
pub use service::FleetService;
