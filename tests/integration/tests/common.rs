//! Common test utilities and fixtures.

use std::sync::Arc;
use std::time::Duration;

use crm_core::IdentityConfig;
use crm_identity::HttpIdentityService;
use crm_integration_tests::FakeAuthService;
use crm_session::SessionController;
use crm_storage::{DurableTokenStore, FileStore, TokenStore};
use tempfile::TempDir;

/// Test environment with a running auth service and a scratch session dir.
pub struct TestEnv {
    /// Fake auth service.
    pub service: FakeAuthService,
    /// Per-test session directory.
    session_dir: TempDir,
}

impl TestEnv {
    /// Starts a fresh environment.
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_service(FakeAuthService::start().await?)
    }

    /// Starts an environment whose service has no current-user lookup.
    pub async fn without_lookup() -> anyhow::Result<Self> {
        Self::with_service(FakeAuthService::start_without_lookup().await?)
    }

    fn with_service(service: FakeAuthService) -> anyhow::Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("crm_session=debug,crm_identity=debug")
            .with_test_writer()
            .try_init();

        let session_dir = tempfile::tempdir()?;

        Ok(Self {
            service,
            session_dir,
        })
    }

    /// Identity configuration pointing at the fake service.
    pub fn identity_config(&self) -> IdentityConfig {
        IdentityConfig {
            base_url: self.service.base_url(),
            timeout_secs: 5,
            demo_mode: false,
        }
    }

    /// Opens the on-disk credential store. Every call sees the same files.
    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::new(DurableTokenStore::new(FileStore::new(self.session_dir.path())))
    }

    /// Builds a controller as a freshly started client would.
    pub fn controller(&self) -> anyhow::Result<SessionController> {
        let provider = HttpIdentityService::new(&self.identity_config())?;
        Ok(SessionController::new(self.store(), Arc::new(provider)))
    }

    /// Builds a controller whose requests give up after `timeout`.
    pub fn controller_with_timeout(&self, timeout: Duration) -> anyhow::Result<SessionController> {
        let provider = HttpIdentityService::with_timeout(&self.service.base_url(), timeout)?;
        Ok(SessionController::new(self.store(), Arc::new(provider)))
    }
}
