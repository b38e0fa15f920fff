//! Export command - write the vehicle list to a spreadsheet.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{connect, exit_no_data};
use crate::export::write_xlsx;
use crate::{Cli, OutputFormat};

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Destination file.
    #[arg(long, short, default_value = "vehicles.xlsx")]
    pub output: PathBuf,
}

/// Runs the export command.
pub async fn run(args: &ExportArgs, cli: &Cli) -> Result<()> {
    info!(path = %args.output.display(), "Exporting vehicles");

    let service = connect()?;
    let vehicles = service.vehicles().await?;

    if vehicles.is_empty() {
        exit_no_data("Vehicle data is empty.", cli.quiet);
    }

    write_xlsx(&vehicles, &args.output)?;

    if cli.quiet {
        return Ok(());
    }
    match cli.format {
        OutputFormat::Text => {
            println!(
                "Exported {} vehicles to {}",
                vehicles.len(),
                args.output.display()
            );
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "path": args.output.display().to_string(),
                    "vehicles": vehicles.len(),
                })
            );
        }
    }

    Ok(())
}
