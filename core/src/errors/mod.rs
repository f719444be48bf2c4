//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Lookup miss. Deliberately identical for "never issued" and "expired".
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Lookup miss for a verification code
    pub fn code_not_found() -> Self {
        DomainError::NotFound {
            resource: "verification code".to_string(),
        }
    }

    /// Whether this error is the caller's fault rather than a server fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Internal { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
