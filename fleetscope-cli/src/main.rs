// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! FleetScope CLI - GPS fleet tracking data from the command line.
//!
//! # Examples
//!
//! ```bash
//! # List plate numbers (default)
//! fleetscope
//!
//! # Vehicle detail by plate
//! fleetscope detail "B 1234 XY"
//!
//! # Mileage over a month, fetched in 7-day windows
//! fleetscope mileage --imei 860000000000001 --start 2024-01-01 --end 2024-01-31
//!
//! # Export every vehicle to a spreadsheet
//! fleetscope export --output vehicles.xlsx
//!
//! # JSON output
//! fleetscope vehicles --format json --pretty
//! ```

mod commands;
mod export;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use fleetscope_fetch::FetchError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{detail, export as export_cmd, mileage, plates, token, vehicles};

// ============================================================================
// CLI Definition
// ============================================================================

/// FleetScope CLI - GPS fleet tracking data.
#[derive(Parser)]
#[command(name = "fleetscope")]
#[command(about = "GPS fleet tracking CLI")]
#[command(long_about = r#"
FleetScope reads vehicle and mileage data from the GPS tracking API.

Credentials are read from the environment:
  GPS_USERNAME, GPS_PASSWORD    service account (required)
  GPS_API_BASE_URL              API base URL (optional)
  GPS_TIMEOUT_SECS              request timeout (optional)

Examples:
  fleetscope                                   # Plate numbers
  fleetscope detail "B 1234 XY"                # Vehicle detail
  fleetscope mileage --plate "B 1234 XY" \
      --start 2024-01-01 --end 2024-01-31      # Mileage history
  fleetscope export                            # Spreadsheet export
"#)]
#[command(version)]
#[command(author = "FleetScope Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'plates' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List plate numbers (default if no command specified).
    #[command(visible_alias = "p")]
    Plates,

    /// Show the detail of one vehicle, looked up by plate.
    #[command(visible_alias = "d")]
    Detail(detail::DetailArgs),

    /// Fetch mileage history over a date range.
    #[command(visible_alias = "m")]
    Mileage(mileage::MileageArgs),

    /// Show every vehicle with all of its fields.
    #[command(visible_alias = "v")]
    Vehicles,

    /// Export the vehicle list to an xlsx spreadsheet.
    Export(export_cmd::ExportArgs),

    /// Check that the service account can log in.
    Token,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Login failed.
    AuthFailed = 2,
    /// The request succeeded but there was nothing to show.
    NoData = 3,
}

impl ExitCode {
    /// Picks the exit code for an error returned by a command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<FetchError>() {
            Some(e) if e.is_auth_failure() => Self::AuthFailed,
            Some(FetchError::PlateNotFound(_) | FetchError::DetailNotFound(_)) => Self::NoData,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("fleetscope=debug,info")
    } else {
        EnvFilter::new("fleetscope=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Plates) | None => plates::run(&cli).await,
        Some(Commands::Detail(args)) => detail::run(args, &cli).await,
        Some(Commands::Mileage(args)) => mileage::run(args, &cli).await,
        Some(Commands::Vehicles) => vehicles::run(&cli).await,
        Some(Commands::Export(args)) => export_cmd::run(args, &cli).await,
        Some(Commands::Token) => token::run(&cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
