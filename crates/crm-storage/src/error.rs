//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("storage I/O error on '{key}': {source}")]
    Io {
        /// Entry being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Entry holds data that cannot be used.
    #[error("invalid data in '{key}': {message}")]
    InvalidData {
        /// Entry being accessed.
        key: String,
        /// What is wrong with it.
        message: String,
    },

    /// Backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Creates an I/O error for an entry.
    #[must_use]
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    /// Creates an invalid data error.
    #[must_use]
    pub fn invalid_data(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidData {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
