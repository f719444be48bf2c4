//! Identity → 6-digit code.
//!
//! SHA-256 of the normalized identity, first 8 digest bytes read as a
//! big-endian `u64`, reduced modulo 10^6 and zero-padded.

use sha2::{Digest, Sha256};

use re_shared::config::IdentityNormalization;

use crate::domain::value_objects::VerificationCode;
use crate::errors::ValidationError;

/// Number of digest bytes folded into the code
const DIGEST_PREFIX_BYTES: usize = 8;

/// Applies `normalization` to a raw identity
pub fn normalize_identity(identity: &str, normalization: IdentityNormalization) -> String {
    let stripped = || {
        identity
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect::<String>()
    };
    match normalization {
        IdentityNormalization::None => identity.to_string(),
        IdentityNormalization::StripSeparators => stripped(),
        IdentityNormalization::StripSeparatorsLowercase => stripped().to_ascii_lowercase(),
    }
}

/// Pure function from identity to verification code
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeDeriver {
    normalization: IdentityNormalization,
}

impl CodeDeriver {
    /// Creates a deriver with the given normalization policy
    pub fn new(normalization: IdentityNormalization) -> Self {
        Self { normalization }
    }

    /// Active normalization policy
    pub fn normalization(&self) -> IdentityNormalization {
        self.normalization
    }

    /// Derives the code for `identity`
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidIdentity` if the identity is blank, or becomes
    /// empty once normalized (e.g. `"--"` with separator stripping).
    pub fn derive(&self, identity: &str) -> Result<VerificationCode, ValidationError> {
        if re_shared::validation::is_blank(identity) {
            return Err(ValidationError::InvalidIdentity {
                reason: "identity is empty".to_string(),
            });
        }

        let normalized = normalize_identity(identity, self.normalization);
        if normalized.is_empty() {
            return Err(ValidationError::InvalidIdentity {
                reason: "identity is empty after normalization".to_string(),
            });
        }

        let digest = Sha256::digest(normalized.as_bytes());
        let mut prefix = [0u8; DIGEST_PREFIX_BYTES];
        prefix.copy_from_slice(&digest[..DIGEST_PREFIX_BYTES]);

        Ok(VerificationCode::from_number(u64::from_be_bytes(prefix)))
    }
}
