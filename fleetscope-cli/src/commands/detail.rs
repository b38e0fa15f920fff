//! Detail command - show one vehicle looked up by plate.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the detail command.
#[derive(Args)]
pub struct DetailArgs {
    /// Plate number (case-insensitive).
    pub plate: String,
}

/// Runs the detail command.
pub async fn run(args: &DetailArgs, cli: &Cli) -> Result<()> {
    info!(plate = %args.plate, "Fetching vehicle detail");

    let service = connect()?;
    let detail = service.detail_by_plate(&args.plate).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_detail(&detail));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&detail)?);
        }
    }

    Ok(())
}
