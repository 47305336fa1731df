//! Session error types.

use crm_identity::IdentityError;
use crm_storage::StorageError;
use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Provider rejected the username/secret pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Provider could not be reached.
    #[error("identity provider unreachable: {0}")]
    ProviderUnreachable(String),

    /// Stored credential resolved to an unusable identity.
    #[error("stored identity is malformed: {0}")]
    MalformedStoredIdentity(String),

    /// Provider rejected submitted fields.
    #[error("validation failed: {0}")]
    ValidationFailure(String),

    /// Any other provider failure.
    #[error("{0}")]
    Provider(String),

    /// Credential could not be persisted or cleared.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// A newer session operation started while this one was in flight.
    #[error("superseded by a newer session operation")]
    Superseded,
}

impl SessionError {
    /// Checks if the controller recovers from this error on its own.
    ///
    /// Recoverable errors end in identity none and are never recorded in
    /// the state's `error` field during boot.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnreachable(_) | Self::MalformedStoredIdentity(_)
        )
    }

    /// Checks if this error means the provider is unreachable.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::ProviderUnreachable(_))
    }

    /// Checks if the outcome was discarded.
    #[must_use]
    pub const fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

impl From<IdentityError> for SessionError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::InvalidCredentials => Self::InvalidCredentials,
            IdentityError::Unreachable(reason) => Self::ProviderUnreachable(reason),
            IdentityError::Validation(message) => Self::ValidationFailure(message),
            other @ (IdentityError::Rejected { .. }
            | IdentityError::MalformedResponse(_)
            | IdentityError::Config(_)) => Self::Provider(other.to_string()),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
