//! # crm-cli
//!
//! The `crm` shell.
//!
//! Boots the session from durable storage and drives it from the command line:
//! - Login, registration, logout and `whoami`
//! - Route decisions for a requested path (`open`)
//! - Role-gated navigation (`nav`)
//! - Identity provider status and configuration management

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
