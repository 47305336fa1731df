//! Offline demo provider.
//!
//! Answers the way the development auth service does: every non-empty
//! username logs in, `admin`/`admin123` additionally gets the admin role.
//! Never selected implicitly.

use async_trait::async_trait;
use crm_model::{roles, Credential, Identity, RegistrationProfile};

use crate::error::{IdentityError, IdentityResult};
use crate::local::ADMIN_SUFFIX;
use crate::provider::{IdentityService, LoginGrant, ProviderStatus};

/// Prefix of every token the demo provider issues.
pub const DEMO_TOKEN: &str = "mock-jwt-token-for-testing";

const ADMIN_USERNAME: &str = "admin";
const ADMIN_SECRET: &str = "admin123";

/// Canned [`IdentityService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoIdentityService;

impl DemoIdentityService {
    /// Creates the demo provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn demo_identity(username: &str, admin: bool) -> Identity {
    let granted: &[&str] = if admin {
        &[roles::ADMIN, roles::USER]
    } else {
        &[roles::USER]
    };
    Identity::new(
        if admin { 1 } else { 2 },
        username,
        format!("{username}@example.com"),
        granted.iter().copied(),
    )
}

#[async_trait]
impl IdentityService for DemoIdentityService {
    async fn login(&self, username: &str, secret: &str) -> IdentityResult<LoginGrant> {
        if username.trim().is_empty() || secret.is_empty() {
            return Err(IdentityError::InvalidCredentials);
        }

        let admin = username.eq_ignore_ascii_case(ADMIN_USERNAME) && secret == ADMIN_SECRET;
        let token = if admin {
            format!("{DEMO_TOKEN}{ADMIN_SUFFIX}")
        } else {
            DEMO_TOKEN.to_string()
        };

        tracing::debug!(username, admin, "Demo login");
        Ok(LoginGrant {
            identity: demo_identity(username, admin),
            credential: Credential::new(token, username),
        })
    }

    async fn register(&self, profile: &RegistrationProfile) -> IdentityResult<()> {
        tracing::debug!(username = %profile.username, "Demo registration");
        Ok(())
    }

    async fn fetch_current_user(&self, credential: &Credential) -> IdentityResult<Option<Identity>> {
        let Some(rest) = credential.token.strip_prefix(DEMO_TOKEN) else {
            return Ok(None);
        };
        let admin = match rest {
            "" => false,
            ADMIN_SUFFIX => true,
            _ => return Ok(None),
        };
        Ok(Some(demo_identity(&credential.username, admin)))
    }

    async fn check_status(&self) -> ProviderStatus {
        ProviderStatus::reachable("Demo mode (no auth service contacted)")
    }
}
