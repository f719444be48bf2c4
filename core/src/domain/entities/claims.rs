//! Verified token claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, TokenError};

/// Claims of a token whose signature has been verified.
///
/// Kept as an open map: the only field this service interprets is the
/// identity claim, and its location is configurable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Wraps an already-verified claim map
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Top-level claim by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Claim at a dot-separated path (`"payload.AbsClientID"`)
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.0.get(first)?, |value, segment| value.get(segment))
    }

    /// Extracts the identity claim at `path`.
    ///
    /// # Errors
    ///
    /// * `TokenError::StructureError` - the claim is absent, null or not a string
    /// * `ValidationError::InvalidIdentity` - the claim is an empty string
    pub fn identity_at(&self, path: &str) -> Result<Identity, DomainError> {
        let raw = self
            .get_path(path)
            .and_then(Value::as_str)
            .ok_or_else(|| TokenError::StructureError {
                claim: path.to_string(),
            })?;
        Ok(Identity::new(raw)?)
    }

    /// Number of top-level claims
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload carried no claims at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
