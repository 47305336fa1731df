//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Overrides, OutputFormat};

/// CRM CLI - session shell for the CRM client.
#[derive(Debug, Parser)]
#[command(name = "crm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Identity provider base URL (overrides config).
    #[arg(short, long, env = "CRM_API_URL")]
    pub server: Option<String>,

    /// Use the built-in demo identity provider.
    #[arg(long, env = "CRM_DEMO")]
    pub demo: bool,

    /// Directory holding the stored session (overrides config).
    #[arg(long, env = "CRM_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Collects the flags that override the configuration file.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            server: self.server.clone(),
            demo: self.demo,
            session_dir: self.session_dir.clone(),
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session.
    Login(LoginArgs),

    /// Create an account.
    Register(RegisterArgs),

    /// End the stored session.
    Logout,

    /// Show the logged-in identity.
    Whoami,

    /// Decide whether a screen may be shown.
    Open {
        /// Requested path (e.g. /customers/42/edit).
        path: String,
    },

    /// Show the navigation for a path.
    Nav {
        /// Current path.
        #[arg(default_value = "/dashboard")]
        path: String,
    },

    /// Identity provider status check.
    Status,

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Login arguments.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (will prompt if not provided).
    pub username: Option<String>,

    /// Password (will prompt if not provided).
    #[arg(long, env = "CRM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Registration arguments.
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username.
    pub username: String,

    /// Email address.
    #[arg(long)]
    pub email: String,

    /// Full name.
    #[arg(long)]
    pub full_name: Option<String>,

    /// Password (will prompt if not provided).
    #[arg(long)]
    pub password: Option<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Initialize configuration interactively.
    Init,
}
