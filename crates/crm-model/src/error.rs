//! Model error types.

use thiserror::Error;

/// Errors raised by model-level validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A form field failed validation.
    #[error("{field}: {message}")]
    InvalidField {
        /// Field name as shown to the user.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl ModelError {
    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Returns the offending field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidField { field, .. } => field,
        }
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
