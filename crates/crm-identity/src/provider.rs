//! Identity provider trait.

use async_trait::async_trait;
use crm_model::{Credential, Identity, RegistrationProfile};

use crate::error::IdentityResult;

/// A successful login: who logged in and the credential to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    /// The authenticated identity.
    pub identity: Identity,
    /// Bearer credential issued for it.
    pub credential: Credential,
}

/// Reachability report from [`IdentityService::check_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    /// Whether the provider answered.
    pub reachable: bool,
    /// Provider-supplied status line or the failure reason.
    pub message: Option<String>,
}

impl ProviderStatus {
    /// Creates a reachable status.
    #[must_use]
    pub fn reachable(message: impl Into<String>) -> Self {
        Self {
            reachable: true,
            message: Some(message.into()),
        }
    }

    /// Creates an unreachable status.
    #[must_use]
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            reachable: false,
            message: Some(reason.into()),
        }
    }
}

/// External identity provider.
///
/// Implementations own their timeout: every call must resolve in bounded
/// time even if the backend never answers. Callers do not retry.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Exchanges a username and secret for an identity and credential.
    async fn login(&self, username: &str, secret: &str) -> IdentityResult<LoginGrant>;

    /// Creates an account. Does not log in.
    async fn register(&self, profile: &RegistrationProfile) -> IdentityResult<()>;

    /// Resolves a stored credential.
    ///
    /// `Ok(None)` means the provider answered and no longer accepts the
    /// credential.
    async fn fetch_current_user(&self, credential: &Credential) -> IdentityResult<Option<Identity>>;

    /// Probes whether the provider is reachable. Never fails.
    async fn check_status(&self) -> ProviderStatus;
}
