//! Domain models for `FleetScope`.
//!
//! This module contains all the core data types:
//! - [`token`] - Cached bearer credential
//! - [`dates`] - Date ranges and the 7-day windows they split into
//! - [`vehicle`] - Vehicle list entries and detail objects
//! - [`mileage`] - Mileage records and per-window reports

pub mod dates;
pub mod mileage;
pub mod token;
pub mod vehicle;

pub use dates::{DATE_FORMAT, DateRange, DateWindow, DateWindows, MAX_WINDOW_DAYS};
pub use mileage::{MileageRecord, MileageReport, WindowOutcome, WindowReport};
pub use token::{CredentialToken, TOKEN_LIFETIME_MINUTES};
pub use vehicle::{Vehicle, VehicleDetail};
