// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `FleetScope` Core
//!
//! Core types and models for the `FleetScope` fleet tracking client.
//!
//! This crate provides the foundational abstractions used across all other
//! `FleetScope` crates, including:
//!
//! - Domain models (tokens, date ranges, vehicles, mileage)
//! - Error types
//!
//! ## Key Types
//!
//! ### Authentication
//! - [`CredentialToken`] - Bearer token with a fixed expiry
//!
//! ### Date Handling
//! - [`DateRange`] - Inclusive range of calendar dates
//! - [`DateWindow`] - Sub-range of at most [`MAX_WINDOW_DAYS`] days
//!
//! ### Fleet Data
//! - [`Vehicle`] - Vehicle entry from the vehicle list
//! - [`VehicleDetail`] - Per-vehicle detail object
//! - [`MileageRecord`] - Opaque mileage entry
//! - [`MileageReport`] - Records aggregated across windows

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Authentication
    CredentialToken,
    TOKEN_LIFETIME_MINUTES,
    // Date handling
    DATE_FORMAT,
    DateRange,
    DateWindow,
    DateWindows,
    MAX_WINDOW_DAYS,
    // Fleet data
    MileageRecord,
    MileageReport,
    Vehicle,
    VehicleDetail,
    WindowOutcome,
    WindowReport,
};
