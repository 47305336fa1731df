//! Registration payload.
//!
//! Field rules match the sign-up form: they belong to the form layer, which
//! calls [`RegistrationProfile::validate`] before handing the profile to the
//! session controller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Minimum username length.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length.
pub const USERNAME_MAX: usize = 20;
/// Minimum password length.
pub const PASSWORD_MIN: usize = 6;

/// A sign-up request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationProfile {
    /// Requested username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Optional full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl RegistrationProfile {
    /// Creates a profile without a full name.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            full_name: None,
        }
    }

    /// Sets the full name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        self.full_name = (!full_name.trim().is_empty()).then_some(full_name);
        self
    }

    /// Validates the profile against the sign-up form rules.
    ///
    /// `confirmation` is the repeated password; it is not part of the payload.
    ///
    /// ## Errors
    ///
    /// Returns the first failing field.
    pub fn validate(&self, confirmation: &str) -> ModelResult<()> {
        let username_len = self.username.chars().count();
        if username_len == 0 {
            return Err(ModelError::invalid("username", "Username is required"));
        }
        if username_len < USERNAME_MIN {
            return Err(ModelError::invalid(
                "username",
                format!("Username must be at least {USERNAME_MIN} characters"),
            ));
        }
        if username_len > USERNAME_MAX {
            return Err(ModelError::invalid(
                "username",
                format!("Username must be at most {USERNAME_MAX} characters"),
            ));
        }

        if self.email.is_empty() {
            return Err(ModelError::invalid("email", "Email is required"));
        }
        if !looks_like_email(&self.email) {
            return Err(ModelError::invalid("email", "Invalid email address"));
        }

        if self.password.is_empty() {
            return Err(ModelError::invalid("password", "Password is required"));
        }
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(ModelError::invalid(
                "password",
                format!("Password must be at least {PASSWORD_MIN} characters"),
            ));
        }

        if confirmation != self.password {
            return Err(ModelError::invalid("confirmPassword", "Passwords must match"));
        }

        Ok(())
    }
}

impl fmt::Debug for RegistrationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationProfile")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// `local@domain.tld` with no whitespace.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}
