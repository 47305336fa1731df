//! Credential domain model.
//!
//! A credential is the opaque bearer token issued by the identity provider
//! together with the display name it was issued for.
//!
//! ## Security Note
//!
//! The token is a secret. `Debug` output redacts it; callers must not log
//! [`Credential::token`] directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A bearer credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque bearer token.
    pub token: String,
    /// Display name the token was issued for.
    pub username: String,
}

impl Credential {
    /// Creates a new credential.
    #[must_use]
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }

    /// Returns the `Authorization` header value for this credential.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Checks that both halves are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.username.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}
