//! Mileage command - fetch mileage history over a date range.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use fleetscope_fetch::FetchError;
use tracing::{debug, info};

use super::{connect, exit_no_data};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the mileage command.
#[derive(Args)]
#[command(group(ArgGroup::new("vehicle").required(true).args(["imei", "plate"])))]
pub struct MileageArgs {
    /// Device IMEI.
    #[arg(long)]
    pub imei: Option<String>,

    /// Plate number, resolved to an IMEI through the vehicle list.
    #[arg(long)]
    pub plate: Option<String>,

    /// First day, as YYYY-MM-DD.
    #[arg(long)]
    pub start: String,

    /// Last day (inclusive), as YYYY-MM-DD.
    #[arg(long)]
    pub end: String,
}

/// Runs the mileage command.
pub async fn run(args: &MileageArgs, cli: &Cli) -> Result<()> {
    let service = connect()?;

    let imei = match (&args.imei, &args.plate) {
        (Some(imei), _) => imei.clone(),
        (None, Some(plate)) => {
            let plate = plate.trim().to_uppercase();
            let vehicle = service
                .find_vehicle_by_plate(&plate)
                .await?
                .ok_or_else(|| FetchError::PlateNotFound(plate.clone()))?;
            vehicle
                .imei()
                .with_context(|| format!("Vehicle {plate} has no IMEI"))?
        }
        (None, None) => anyhow::bail!("Select a vehicle with --imei or --plate"),
    };
    debug!(imei = %imei, "Resolved vehicle");

    info!(imei = %imei, start = %args.start, end = %args.end, "Fetching mileage");
    let report = service.full_mileage(&imei, &args.start, &args.end).await?;

    if report.is_empty() {
        if cli.verbose && cli.format == OutputFormat::Text {
            let formatter = TextFormatter::new(!cli.no_color);
            eprintln!("{}", formatter.format_windows(&report));
        }
        exit_no_data("No mileage data found for that date range.", cli.quiet);
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_mileage(&report, cli.verbose));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&report)?);
        }
    }

    Ok(())
}
