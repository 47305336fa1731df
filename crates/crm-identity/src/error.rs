//! Identity provider error types.

use thiserror::Error;

/// Errors reported by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Username/secret pair was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Provider could not be reached or did not answer in time.
    #[error("identity provider unreachable: {0}")]
    Unreachable(String),

    /// Provider rejected submitted fields.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Provider answered with an unexpected status.
    #[error("identity provider error: {status} - {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Provider answered with a body that could not be understood.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Client could not be constructed.
    #[error("identity client configuration error: {0}")]
    Config(String),
}

impl IdentityError {
    /// Checks if this error means the provider is unreachable.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }

    /// Checks if the caller supplied bad input (credentials or fields).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Validation(_))
    }
}

impl From<reqwest::Error> for IdentityError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::MalformedResponse(e.to_string())
        } else if e.is_builder() {
            Self::Config(e.to_string())
        } else {
            // connect, timeout, body and redirect failures all mean "no usable answer"
            Self::Unreachable(e.to_string())
        }
    }
}

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;
