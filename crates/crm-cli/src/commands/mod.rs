//! Command implementations.

pub mod auth;
pub mod config;
pub mod route;
pub mod status;

pub use auth::{run_login, run_logout, run_register, run_whoami};
pub use config::run_config;
pub use route::{run_nav, run_open};
pub use status::run_status;

use std::sync::Arc;

use crm_identity::{DemoIdentityService, HttpIdentityService, IdentityService};
use crm_session::SessionController;
use crm_storage::{DurableTokenStore, FileStore, TokenStore};

use crate::cli::{Cli, Command};
use crate::config::Overrides;
use crate::output::warning;
use crate::CliConfig;

/// Runs a parsed command line.
pub async fn run(cli: Cli, config: &mut CliConfig) -> crate::CliResult<()> {
    let format = cli.output.unwrap_or(config.output_format);
    let overrides = cli.overrides();

    match cli.command {
        Command::Config(cmd) => run_config(cmd, config),
        Command::Login(args) => run_login(&open(config, &overrides)?, args, format).await,
        Command::Register(args) => run_register(&open(config, &overrides)?, args).await,
        Command::Logout => run_logout(&open(config, &overrides)?),
        Command::Whoami => run_whoami(&open(config, &overrides)?, format).await,
        Command::Open { path } => run_open(&open(config, &overrides)?, &path, format).await,
        Command::Nav { path } => run_nav(&open(config, &overrides)?, &path, format).await,
        Command::Status => run_status(&open(config, &overrides)?, format).await,
    }
}

/// Provider label used for the demo provider.
pub const DEMO_PROVIDER: &str = "demo";

fn open(config: &CliConfig, overrides: &Overrides) -> crate::CliResult<Shell> {
    Shell::open(&config.with_overrides(overrides))
}

/// A session controller wired to its store and identity provider.
pub struct Shell {
    controller: SessionController,
    store: Arc<dyn TokenStore>,
    provider: Arc<dyn IdentityService>,
    provider_label: String,
}

impl Shell {
    /// Opens the shell described by `config`.
    ///
    /// The demo provider is used only when `demo_mode` is set, and a warning
    /// is printed every time it is.
    pub fn open(config: &CliConfig) -> crate::CliResult<Self> {
        let session_dir = config.session_dir()?;
        let store: Arc<dyn TokenStore> =
            Arc::new(DurableTokenStore::new(FileStore::new(&session_dir)));

        let identity = &config.client.identity;
        let (provider, label): (Arc<dyn IdentityService>, String) = if identity.demo_mode {
            warning("Demo mode: canned identities, no auth service is contacted");
            (Arc::new(DemoIdentityService::new()), DEMO_PROVIDER.to_string())
        } else {
            let http = HttpIdentityService::new(identity)?;
            let label = http.base_url().to_string();
            (Arc::new(http), label)
        };

        tracing::debug!(session_dir = %session_dir.display(), provider = %label, "Opening session shell");
        Ok(Self::with_parts(store, provider, label))
    }

    /// Builds a shell from explicit parts.
    #[must_use]
    pub fn with_parts(
        store: Arc<dyn TokenStore>,
        provider: Arc<dyn IdentityService>,
        provider_label: impl Into<String>,
    ) -> Self {
        Self {
            controller: SessionController::new(store.clone(), provider.clone()),
            store,
            provider,
            provider_label: provider_label.into(),
        }
    }

    /// Gets the session controller.
    #[must_use]
    pub const fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Gets the credential store.
    #[must_use]
    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// Gets the identity provider.
    #[must_use]
    pub fn provider(&self) -> &dyn IdentityService {
        self.provider.as_ref()
    }

    /// Describes the identity provider (base URL or `demo`).
    #[must_use]
    pub fn provider_label(&self) -> &str {
        &self.provider_label
    }

    /// Checks if the demo provider is active.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.provider_label == DEMO_PROVIDER
    }
}
