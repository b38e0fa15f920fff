//! Vehicles command - show every vehicle with all fields.

use anyhow::Result;
use tracing::info;

use super::{connect, exit_no_data};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the vehicles command.
pub async fn run(cli: &Cli) -> Result<()> {
    info!("Listing vehicles");

    let service = connect()?;
    let vehicles = service.vehicles().await?;

    if vehicles.is_empty() {
        exit_no_data("Vehicle data is not available.", cli.quiet);
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_vehicles(&vehicles));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&vehicles)?);
        }
    }

    Ok(())
}
