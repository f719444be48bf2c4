//! Identity claim extracted from a verified token.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;

/// Opaque client/account identifier.
///
/// The value is kept exactly as it appeared in the token; normalization for
/// hashing happens in the code deriver, never here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Creates an identity, rejecting empty and whitespace-only values
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if re_shared::validation::is_blank(&value) {
            return Err(ValidationError::InvalidIdentity {
                reason: "identity is empty".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Borrow the raw identity string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw identity string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Identity::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
