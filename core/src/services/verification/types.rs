//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Association;
use crate::domain::value_objects::{Identity, VerificationCode};

/// Result of issuing a code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedCode {
    /// The derived code
    pub code: VerificationCode,
    /// Identity the code resolves to
    pub identity: Identity,
    /// When the association was recorded
    pub issued_at: DateTime<Utc>,
    /// When the code stops resolving
    pub expires_at: DateTime<Utc>,
    /// Lifetime of the code in seconds
    pub ttl_seconds: i64,
}

impl IssuedCode {
    pub(crate) fn from_association(association: Association, ttl: chrono::Duration) -> Self {
        Self {
            expires_at: association.expires_at(ttl),
            issued_at: association.created_at,
            ttl_seconds: ttl.num_seconds(),
            code: association.code,
            identity: association.identity,
        }
    }
}
