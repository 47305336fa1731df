//! CLI error types.

use crm_identity::IdentityError;
use crm_model::ModelError;
use crm_session::SessionError;
use crm_storage::StorageError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Session operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Identity provider could not be set up.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Stored session could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Form input rejected before reaching the provider.
    #[error("validation error: {0}")]
    Validation(#[from] ModelError),

    /// Nobody is logged in.
    #[error("not logged in")]
    NotAuthenticated,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
