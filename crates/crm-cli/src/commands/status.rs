//! Identity provider status command.

use serde::Serialize;

use crate::config::OutputFormat;
use crate::output::{error, info, output_json, success};
use crate::CliResult;

use super::Shell;

#[derive(Serialize)]
struct StatusOutput<'a> {
    provider: &'a str,
    reachable: bool,
    message: Option<&'a str>,
}

/// Status command.
pub async fn run_status(shell: &Shell, format: OutputFormat) -> CliResult<()> {
    if format == OutputFormat::Table {
        info(&format!(
            "Checking identity provider at {}...",
            shell.provider_label()
        ));
    }

    let status = shell.provider().check_status().await;

    match format {
        OutputFormat::Table => {
            let message = status.message.as_deref().unwrap_or("no details");
            if status.reachable {
                success("Identity provider is reachable");
                println!();
                println!("Status: {}", message);
            } else {
                error(&format!("Identity provider is not reachable: {}", message));
            }
        }
        OutputFormat::Json => output_json(&StatusOutput {
            provider: shell.provider_label(),
            reachable: status.reachable,
            message: status.message.as_deref(),
        })?,
        OutputFormat::Quiet => println!("{}", if status.reachable { "up" } else { "down" }),
    }

    Ok(())
}
