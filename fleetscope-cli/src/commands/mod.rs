//! CLI command implementations.

pub mod detail;
pub mod export;
pub mod mileage;
pub mod plates;
pub mod token;
pub mod vehicles;

use anyhow::{Context, Result};
use fleetscope_fetch::{ApiConfig, FleetService};

use crate::ExitCode;

/// Builds a service from the environment configuration.
pub fn connect() -> Result<FleetService> {
    let config = ApiConfig::from_env().context("Failed to read API configuration")?;
    Ok(FleetService::from_config(config)?)
}

/// Prints a "nothing to show" message and exits with [`ExitCode::NoData`].
pub fn exit_no_data(message: &str, quiet: bool) -> ! {
    if !quiet {
        eprintln!("{message}");
    }
    std::process::exit(ExitCode::NoData as i32);
}
