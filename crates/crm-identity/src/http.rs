//! REST adapter for the auth service.

use std::time::Duration;

use async_trait::async_trait;
use crm_core::config::IdentityConfig;
use crm_model::{Credential, Identity, RegistrationProfile};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::dto::{ErrorResponse, LoginRequest, LoginResponse, StatusResponse};
use crate::error::{IdentityError, IdentityResult};
use crate::local::rebuild_identity;
use crate::provider::{IdentityService, LoginGrant, ProviderStatus};

/// [`IdentityService`] backed by the REST auth service.
#[derive(Debug, Clone)]
pub struct HttpIdentityService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityService {
    /// Creates a client from configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`IdentityError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &IdentityConfig) -> IdentityResult<Self> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    /// Creates a client with an explicit request timeout.
    ///
    /// ## Errors
    ///
    /// Returns [`IdentityError::Config`] if the HTTP client cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> IdentityResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| IdentityError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Gets the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn login(&self, username: &str, secret: &str) -> IdentityResult<LoginGrant> {
        let url = self.url("/auth/login");
        tracing::debug!(%url, username, "POST login");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username,
                password: secret,
            })
            .send()
            .await?;

        let body: LoginResponse = handle_response(response).await?;
        Ok(body.into_grant(username))
    }

    async fn register(&self, profile: &RegistrationProfile) -> IdentityResult<()> {
        let url = self.url("/auth/register");
        tracing::debug!(%url, username = %profile.username, "POST register");

        let response = self.client.post(&url).json(profile).send().await?;
        handle_empty_response(response).await
    }

    async fn fetch_current_user(&self, credential: &Credential) -> IdentityResult<Option<Identity>> {
        let url = self.url("/auth/me");
        tracing::debug!(%url, username = %credential.username, "GET current user");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, credential.bearer())
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!(status = response.status().as_u16(), "Credential not accepted");
                Ok(None)
            }
            // service without a lookup endpoint
            StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED => {
                tracing::debug!(
                    status = response.status().as_u16(),
                    "No current-user endpoint, rebuilding identity from credential"
                );
                Ok(rebuild_identity(credential))
            }
            _ => handle_response(response).await.map(Some),
        }
    }

    async fn check_status(&self) -> ProviderStatus {
        let url = self.url("/auth/status");
        tracing::debug!(%url, "GET status");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return ProviderStatus::unreachable(e.to_string()),
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            return ProviderStatus::unreachable(format!(
                "{} - {}",
                status.as_u16(),
                ErrorResponse::message_from(&body)
            ));
        }

        let message = serde_json::from_str::<StatusResponse>(&body)
            .ok()
            .and_then(|s| s.status)
            .unwrap_or_else(|| ErrorResponse::message_from(&body));
        ProviderStatus::reachable(message)
    }
}

/// Handles a response with a body.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> IdentityResult<T> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| IdentityError::MalformedResponse(e.to_string()))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(classify(status, &body))
    }
}

/// Handles a response whose body is ignored on success.
async fn handle_empty_response(response: reqwest::Response) -> IdentityResult<()> {
    let status = response.status();

    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(classify(status, &body))
    }
}

/// Maps an error status to the provider taxonomy.
fn classify(status: StatusCode, body: &str) -> IdentityError {
    let message = ErrorResponse::message_from(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => IdentityError::InvalidCredentials,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            IdentityError::Validation(message)
        }
        // gateway fallback: the auth service itself is down
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            IdentityError::Unreachable(format!("{} - {}", status.as_u16(), message))
        }
        _ => IdentityError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_are_invalid_credentials() {
        assert_eq!(
            classify(StatusCode::UNAUTHORIZED, r#"{"message":"Bad credentials"}"#),
            IdentityError::InvalidCredentials
        );
        assert_eq!(classify(StatusCode::FORBIDDEN, ""), IdentityError::InvalidCredentials);
    }

    #[test]
    fn validation_keeps_server_message() {
        assert_eq!(
            classify(StatusCode::BAD_REQUEST, r#"{"message":"Username is already taken!"}"#),
            IdentityError::Validation("Username is already taken!".to_string())
        );
        assert!(matches!(
            classify(StatusCode::CONFLICT, "{}"),
            IdentityError::Validation(_)
        ));
    }

    #[test]
    fn gateway_fallback_is_unreachable() {
        let err = classify(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"message":"Auth Service is currently unavailable. Please try again later."}"#,
        );
        assert!(err.is_unreachable());
        assert!(classify(StatusCode::BAD_GATEWAY, "").is_unreachable());
        assert!(classify(StatusCode::GATEWAY_TIMEOUT, "").is_unreachable());
    }

    #[test]
    fn other_statuses_are_rejected() {
        assert_eq!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            IdentityError::Rejected {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let service =
            HttpIdentityService::with_timeout("http://localhost:8080/api/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(service.base_url(), "http://localhost:8080/api");
        assert_eq!(service.url("/auth/me"), "http://localhost:8080/api/auth/me");
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        // port 9 (discard) is not served in test environments
        let service =
            HttpIdentityService::with_timeout("http://127.0.0.1:9/api", Duration::from_secs(2))
                .unwrap();

        let err = service.login("admin", "admin123").await.unwrap_err();
        assert!(err.is_unreachable(), "got {err:?}");

        let status = service.check_status().await;
        assert!(!status.reachable);
    }
}
