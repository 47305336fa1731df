//! Configuration management commands.

use std::path::PathBuf;

use crate::cli::ConfigCommand;
use crate::config::OutputFormat;
use crate::output::{info, success};
use crate::CliConfig;

/// Runs a config command.
pub fn run_config(cmd: ConfigCommand, config: &mut CliConfig) -> crate::CliResult<()> {
    match cmd {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Set { key, value } => {
            apply_setting(config, &key, &value)?;
            config.save()?;
            success(&format!("Set {} = {}", key, value));
            Ok(())
        }
        ConfigCommand::Init => init_config(config),
    }
}

/// Shows the current configuration.
fn show_config(config: &CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;
    let identity = &config.client.identity;

    info(&format!("Configuration file: {}", config_path.display()));
    println!();
    println!("base_url: {}", identity.base_url);
    println!("timeout_secs: {}", identity.timeout_secs);
    println!("demo_mode: {}", identity.demo_mode);
    println!("session_dir: {}", config.session_dir()?.display());
    println!("output_format: {:?}", config.output_format);

    Ok(())
}

/// Sets a configuration value in memory.
fn apply_setting(config: &mut CliConfig, key: &str, value: &str) -> crate::CliResult<()> {
    match key {
        "base_url" | "server" => {
            config.client.identity.base_url = value.trim_end_matches('/').to_string();
        }
        "timeout_secs" | "timeout" => {
            config.client.identity.timeout_secs = value.parse().map_err(|_| {
                crate::CliError::InvalidArgument(format!(
                    "timeout must be a number of seconds, got: {}",
                    value
                ))
            })?;
        }
        "demo_mode" | "demo" => {
            config.client.identity.demo_mode = parse_bool(value)?;
        }
        "session_dir" => {
            config.client.storage.session_dir = if value.is_empty() || value == "none" {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        "output_format" | "output" => {
            config.output_format = value.parse::<OutputFormat>()?;
        }
        _ => {
            return Err(crate::CliError::InvalidArgument(format!(
                "Unknown configuration key: {}. Known keys: base_url, timeout_secs, demo_mode, session_dir, output_format",
                key
            )));
        }
    }
    Ok(())
}

fn parse_bool(value: &str) -> crate::CliResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(crate::CliError::InvalidArgument(format!(
            "expected true or false, got: {}",
            value
        ))),
    }
}

/// Initializes configuration interactively.
fn init_config(config: &mut CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;

    info("Initializing CRM CLI configuration...");
    println!();

    // Identity provider URL
    print!("Identity provider URL [{}]: ", config.client.identity.base_url);
    std::io::Write::flush(&mut std::io::stdout())?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            apply_setting(config, "base_url", trimmed)?;
        }
    }

    // Demo mode
    print!("Use demo identities (true/false) [{}]: ", config.client.identity.demo_mode);
    std::io::Write::flush(&mut std::io::stdout())?;
    input.clear();
    std::io::stdin().read_line(&mut input)?;
    {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            apply_setting(config, "demo_mode", trimmed)?;
        }
    }

    // Output format
    print!("Output format (table/json/quiet) [{:?}]: ", config.output_format);
    std::io::Write::flush(&mut std::io::stdout())?;
    input.clear();
    std::io::stdin().read_line(&mut input)?;
    {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            config.output_format = trimmed.parse().unwrap_or(config.output_format);
        }
    }

    config.save()?;

    println!();
    success(&format!("Configuration saved to: {}", config_path.display()));
    Ok(())
}
