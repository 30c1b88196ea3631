//! # Accessor Errors

use thiserror::Error;

/// Result type for typed lookups
pub type AccessorResult<T> = Result<T, AccessorError>;

/// Typed accessor errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessorError {
    #[error("Key '{0}' was not parsed and has no default")]
    KeyNotFound(String),

    #[error("Value '{value}' for key '{key}' is not a valid {target}")]
    Conversion {
        key: String,
        value: String,
        target: &'static str,
    },
}

impl AccessorError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            AccessorError::KeyNotFound(_) => "KVCONF_KEY_NOT_FOUND",
            AccessorError::Conversion { .. } => "KVCONF_CONVERSION_FAILED",
        }
    }
}
