//! Identity domain model.
//!
//! An identity is never persisted by the client. It is rebuilt on every boot
//! from the stored credential through the identity provider.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Well-known role names.
pub mod roles {
    /// Grants administrative affordances.
    pub const ADMIN: &str = "ROLE_ADMIN";
    /// Granted to every authenticated user.
    pub const USER: &str = "ROLE_USER";
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Provider-assigned identifier.
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Full name, when the provider knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Granted roles.
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl Identity {
    /// Creates an identity with the given roles.
    #[must_use]
    pub fn new<I, R>(id: i64, username: impl Into<String>, email: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            full_name: None,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks whether the identity holds a role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Checks whether the identity holds [`roles::ADMIN`].
    ///
    /// This is the single admin predicate; presentation code goes through it.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(roles::ADMIN)
    }

    /// Returns the roles as a comma-separated list.
    #[must_use]
    pub fn roles_display(&self) -> String {
        self.roles.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}
