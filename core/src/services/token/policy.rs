//! Trust policies: the only ways a token can be accepted.
//!
//! Every policy verifies a signature before any claim is read. There is no
//! unverified decode path.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::domain::entities::Claims;
use crate::errors::TokenError;

use super::certificate::decoding_key_from_chain;
use super::config::{ClaimRules, KeyFamily, TrustPolicyConfig};

/// Rule set that decides whether a token's signature is acceptable
pub trait TrustPolicy: Send + Sync {
    /// Short policy name for logs
    fn name(&self) -> &'static str;

    /// Algorithm this policy accepts
    fn algorithm(&self) -> Algorithm;

    /// Verifies `token` and returns its claims
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// Builds the policy described by `config`
pub fn build_policy(config: &TrustPolicyConfig, rules: &ClaimRules) -> Result<Box<dyn TrustPolicy>, TokenError> {
    match config {
        TrustPolicyConfig::SharedSecret { secret, algorithm } => {
            Ok(Box::new(SharedSecretPolicy::new(secret.as_bytes(), *algorithm, rules)?))
        }
        TrustPolicyConfig::EmbeddedCertificate { algorithm } => {
            Ok(Box::new(EmbeddedCertificatePolicy::new(*algorithm, rules)?))
        }
    }
}

/// Maps `jsonwebtoken` failures onto the token error taxonomy
pub(crate) fn map_jwt_error(error: JwtError) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        ErrorKind::InvalidIssuer => TokenError::InvalidClaims {
            claim: "iss".to_string(),
        },
        ErrorKind::InvalidAudience => TokenError::InvalidClaims {
            claim: "aud".to_string(),
        },
        ErrorKind::InvalidSubject => TokenError::InvalidClaims {
            claim: "sub".to_string(),
        },
        ErrorKind::MissingRequiredClaim(claim) => TokenError::StructureError {
            claim: claim.clone(),
        },
        ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidEcdsaKey | ErrorKind::InvalidKeyFormat => {
            TokenError::UntrustedCertificate {
                reason: error.to_string(),
            }
        }
        _ => TokenError::MalformedToken {
            reason: error.to_string(),
        },
    }
}

fn decode_claims(token: &str, key: &DecodingKey, validation: &Validation) -> Result<Claims, TokenError> {
    decode::<Claims>(token, key, validation)
        .map(|data| data.claims)
        .map_err(map_jwt_error)
}

/// HMAC verification with a pre-provisioned symmetric key
pub struct SharedSecretPolicy {
    algorithm: Algorithm,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SharedSecretPolicy {
    /// Creates the policy; `algorithm` must be an HMAC algorithm
    pub fn new(secret: &[u8], algorithm: Algorithm, rules: &ClaimRules) -> Result<Self, TokenError> {
        if KeyFamily::of(algorithm) != KeyFamily::Hmac {
            return Err(TokenError::KeyLoadError {
                message: format!("{:?} is not an HMAC algorithm", algorithm),
            });
        }
        if secret.is_empty() {
            return Err(TokenError::KeyLoadError {
                message: "shared secret is empty".to_string(),
            });
        }
        Ok(Self {
            algorithm,
            decoding_key: DecodingKey::from_secret(secret),
            validation: rules.validation(algorithm),
        })
    }
}

impl std::fmt::Debug for SharedSecretPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretPolicy")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl TrustPolicy for SharedSecretPolicy {
    fn name(&self) -> &'static str {
        "shared_secret"
    }

    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode_claims(token, &self.decoding_key, &self.validation)
    }
}

/// Asymmetric verification against the certificate the token carries in `x5c`.
///
/// This policy establishes that the token was signed by the holder of the
/// embedded certificate's key. It does not chain the certificate to a root.
#[derive(Debug)]
pub struct EmbeddedCertificatePolicy {
    algorithm: Algorithm,
    validation: Validation,
}

impl EmbeddedCertificatePolicy {
    /// Creates the policy; `algorithm` must be an RSA or EC algorithm
    pub fn new(algorithm: Algorithm, rules: &ClaimRules) -> Result<Self, TokenError> {
        if !matches!(KeyFamily::of(algorithm), KeyFamily::Rsa | KeyFamily::Ec) {
            return Err(TokenError::KeyLoadError {
                message: format!("{:?} cannot be verified with a certificate", algorithm),
            });
        }
        Ok(Self {
            algorithm,
            validation: rules.validation(algorithm),
        })
    }
}

impl TrustPolicy for EmbeddedCertificatePolicy {
    fn name(&self) -> &'static str {
        "embedded_certificate"
    }

    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|e| TokenError::MalformedToken {
            reason: e.to_string(),
        })?;

        if header.alg != self.algorithm {
            debug!(
                declared = ?header.alg,
                expected = ?self.algorithm,
                "Rejecting token with unexpected algorithm"
            );
            return Err(TokenError::UntrustedCertificate {
                reason: format!("algorithm {:?} is not accepted", header.alg),
            });
        }

        let chain = header
            .x5c
            .as_deref()
            .filter(|chain| !chain.is_empty())
            .ok_or_else(|| TokenError::UntrustedCertificate {
                reason: "token carries no x5c certificate".to_string(),
            })?;

        let decoding_key = decoding_key_from_chain(chain, self.algorithm)?;
        decode_claims(token, &decoding_key, &self.validation)
    }
}
