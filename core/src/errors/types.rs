//! Error types for token verification and input validation
//!
//! Variants are grouped by how a caller must react: token errors are
//! authentication failures, validation errors are malformed requests.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing credential")]
    MissingCredential,

    #[error("Malformed token: {reason}")]
    MalformedToken { reason: String },

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Untrusted certificate: {reason}")]
    UntrustedCertificate { reason: String },

    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claim: {claim}")]
    InvalidClaims { claim: String },

    /// Signature is fine but the payload lacks a required field
    #[error("Token structure error: missing claim {claim}")]
    StructureError { claim: String },

    #[error("Key load error: {message}")]
    KeyLoadError { message: String },
}

impl TokenError {
    /// Whether the error concerns payload structure rather than trust
    pub fn is_structural(&self) -> bool {
        matches!(self, TokenError::StructureError { .. })
    }
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid identity: {reason}")]
    InvalidIdentity { reason: String },

    #[error("Invalid verification code format")]
    InvalidCodeFormat,
}
