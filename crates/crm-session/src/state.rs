//! Observable session state.

use crm_model::Identity;
use serde::Serialize;

/// Snapshot of the session.
///
/// `identity` being set implies a credential is durably stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Logged-in identity, if any.
    pub identity: Option<Identity>,
    /// Boot restore or a login/register call is in flight.
    pub loading: bool,
    /// Human-readable cause of the last failed attempt.
    pub error: Option<String>,
}

impl SessionState {
    /// State at controller construction: loading, nobody logged in.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            identity: None,
            loading: true,
            error: None,
        }
    }

    /// Checks if an identity is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Checks if the logged-in identity is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(Identity::is_admin)
    }

    /// Returns the logged-in username.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.username.as_str())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}
