//! Token command - check that the service account can log in.

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use super::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the token command.
pub async fn run(cli: &Cli) -> Result<()> {
    info!("Checking login");

    let service = connect()?;
    let token = service.token().await?;
    let now = Utc::now();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_token(&token, now));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_token(&token, now)?);
        }
    }

    Ok(())
}
