//! Plates command - list plate numbers.

use anyhow::Result;
use tracing::info;

use super::{connect, exit_no_data};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the plates command.
pub async fn run(cli: &Cli) -> Result<()> {
    info!("Listing plates");

    let service = connect()?;
    let vehicles = service.vehicles().await?;

    if vehicles.is_empty() {
        exit_no_data("Vehicle data is not available.", cli.quiet);
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_plates(&vehicles));
        }
        OutputFormat::Json => {
            let plates: Vec<&str> = vehicles.iter().filter_map(|v| v.plate()).collect();
            println!("{}", JsonFormatter::new(cli.pretty).format(&plates)?);
        }
    }

    Ok(())
}
