//! Six-digit verification code.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;

/// Length of the verification code
pub const CODE_LENGTH: usize = re_shared::validation::VERIFICATION_CODE_LENGTH;

/// Number of distinct codes (10^6)
pub const CODE_SPACE: u64 = 1_000_000;

/// Fixed-width, zero-padded decimal code shown to a person.
///
/// Codes are a display convenience, not a secret. Different identities may
/// share a code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Parses user input, accepting exactly six ASCII digits
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if !re_shared::validation::is_valid_verification_code(input) {
            return Err(ValidationError::InvalidCodeFormat);
        }
        Ok(Self(input.to_string()))
    }

    /// Builds a code from an integer, reducing it into the code space
    pub fn from_number(value: u64) -> Self {
        Self(format!("{:0width$}", value % CODE_SPACE, width = CODE_LENGTH))
    }

    /// Borrow the code as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VerificationCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VerificationCode::parse(&value)
    }
}

impl From<VerificationCode> for String {
    fn from(code: VerificationCode) -> Self {
        code.0
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
