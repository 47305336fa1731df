//! Wire types of the REST auth service.

use std::collections::BTreeSet;

use crm_model::{Credential, Identity};
use serde::{Deserialize, Serialize};

use crate::provider::LoginGrant;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Username.
    pub username: &'a str,
    /// Password.
    pub password: &'a str,
}

/// Answer of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Issued bearer token.
    pub token: String,
    /// Token type, normally `Bearer`.
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    /// User id.
    pub id: i64,
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Granted roles.
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl LoginResponse {
    /// Splits the response into identity and credential.
    ///
    /// `requested_username` stands in when the service does not echo one.
    #[must_use]
    pub fn into_grant(self, requested_username: &str) -> LoginGrant {
        let username = if self.username.is_empty() {
            requested_username.to_string()
        } else {
            self.username
        };

        LoginGrant {
            credential: Credential::new(self.token, username.clone()),
            identity: Identity {
                id: self.id,
                username,
                email: self.email,
                full_name: self.full_name,
                roles: self.roles,
            },
        }
    }
}

/// Answer of `GET /auth/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    /// Status line.
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body shared by the auth service and the gateway fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Short error name.
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Extracts the best message from a raw body.
    #[must_use]
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "no details".to_string()
                } else {
                    trimmed.to_string()
                }
            })
    }
}
