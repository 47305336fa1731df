//! CLI configuration.

use std::path::PathBuf;

use crm_core::config::ClientConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration, stored as TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Session client settings.
    #[serde(flatten)]
    pub client: ClientConfig,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Identity provider base URL.
    pub server: Option<String>,
    /// Force the demo provider on.
    pub demo: bool,
    /// Session directory.
    pub session_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Loads configuration from file.
    pub fn load() -> crate::CliResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from a specific file; a missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> crate::CliResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| crate::CliError::Config(format!("failed to parse config: {e}")))
        } else {
            Ok(Self::default())
        }
    }

    /// Saves configuration to file.
    pub fn save(&self) -> crate::CliResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &std::path::Path) -> crate::CliResult<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::CliError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Gets the configuration directory (`~/.crm`).
    pub fn config_dir() -> crate::CliResult<PathBuf> {
        let home = dirs_next::home_dir().ok_or_else(|| {
            crate::CliError::Config("could not determine home directory".to_string())
        })?;
        Ok(home.join(".crm"))
    }

    /// Gets the configuration file path.
    pub fn config_path() -> crate::CliResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the effective session directory (config or `~/.crm/session`).
    pub fn session_dir(&self) -> crate::CliResult<PathBuf> {
        match &self.client.storage.session_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("session")),
        }
    }

    /// Returns a copy with command-line overrides applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: &Overrides) -> Self {
        let mut config = self.clone();
        if let Some(server) = &overrides.server {
            config.client.identity.base_url = server.clone();
        }
        if overrides.demo {
            config.client.identity.demo_mode = true;
        }
        if let Some(dir) = &overrides.session_dir {
            config.client.storage.session_dir = Some(dir.clone());
        }
        config
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// Quiet (minimal output).
    Quiet,
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "quiet" => Ok(Self::Quiet),
            _ => Err(crate::CliError::InvalidArgument(format!(
                "Unknown output format: {}. Supported: table, json, quiet",
                s
            ))),
        }
    }
}
