//! Client configuration.
//!
//! Loaded by the shell from a TOML file; every section has defaults so an
//! empty or missing file yields a usable configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default identity provider base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default request timeout against the identity provider, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Top-level client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Identity provider settings.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Credential storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Identity provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the REST API (e.g., `http://localhost:8080/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Use the built-in demo provider instead of the REST API.
    ///
    /// Never switched on implicitly.
    #[serde(default)]
    pub demo_mode: bool,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            demo_mode: false,
        }
    }
}

impl IdentityConfig {
    /// Returns the request timeout as a [`Duration`].
    ///
    /// A zero value falls back to the default so requests are always bounded.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }
}

/// Credential storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted credential entries.
    ///
    /// `None` lets the shell pick its default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,
}
