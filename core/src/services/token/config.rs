//! Configuration for the token verifier

use jsonwebtoken::{Algorithm, Validation};
use std::str::FromStr;

use re_shared::config::{ConfigError, TrustConfig, TrustPolicyKind};

/// Development HMAC secret, rejected in production by the shared config
const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Key material and accepted algorithm of a trust policy
#[derive(Clone)]
pub enum TrustPolicyConfig {
    /// HMAC signature with a pre-provisioned key
    SharedSecret {
        /// Symmetric key bytes
        secret: String,
        /// Accepted HMAC algorithm
        algorithm: Algorithm,
    },
    /// Asymmetric signature verified with the leading `x5c` certificate
    EmbeddedCertificate {
        /// Accepted asymmetric algorithm
        algorithm: Algorithm,
    },
}

impl std::fmt::Debug for TrustPolicyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrustPolicyConfig::SharedSecret { algorithm, .. } => f
                .debug_struct("SharedSecret")
                .field("algorithm", algorithm)
                .field("secret", &"<redacted>")
                .finish(),
            TrustPolicyConfig::EmbeddedCertificate { algorithm } => f
                .debug_struct("EmbeddedCertificate")
                .field("algorithm", algorithm)
                .finish(),
        }
    }
}

impl TrustPolicyConfig {
    /// Algorithm the policy accepts
    pub fn algorithm(&self) -> Algorithm {
        match self {
            TrustPolicyConfig::SharedSecret { algorithm, .. }
            | TrustPolicyConfig::EmbeddedCertificate { algorithm } => *algorithm,
        }
    }
}

/// Claim checks applied after the signature is accepted
#[derive(Debug, Clone)]
pub struct ClaimRules {
    /// Reject tokens without `exp`
    pub require_exp: bool,
    /// Clock skew tolerance in seconds
    pub leeway_seconds: u64,
    /// Accepted `iss` values (empty = unchecked)
    pub issuers: Vec<String>,
    /// Accepted `aud` values (empty = unchecked)
    pub audiences: Vec<String>,
}

impl Default for ClaimRules {
    fn default() -> Self {
        Self {
            require_exp: true,
            leeway_seconds: 30,
            issuers: Vec::new(),
            audiences: Vec::new(),
        }
    }
}

impl ClaimRules {
    /// Builds a `jsonwebtoken` validation pinned to a single algorithm
    pub fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.leeway = self.leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        if !self.require_exp {
            validation.required_spec_claims.clear();
        }
        if !self.issuers.is_empty() {
            validation.set_issuer(&self.issuers);
        }
        if self.audiences.is_empty() {
            validation.validate_aud = false;
        } else {
            validation.set_audience(&self.audiences);
        }
        validation
    }
}

/// Configuration for the token verifier
#[derive(Debug, Clone)]
pub struct TokenVerifierConfig {
    /// Trust policy selected at startup
    pub policy: TrustPolicyConfig,
    /// Dot-separated path of the identity claim
    pub identity_claim: String,
    /// Post-signature claim checks
    pub rules: ClaimRules,
}

impl Default for TokenVerifierConfig {
    fn default() -> Self {
        Self {
            policy: TrustPolicyConfig::SharedSecret {
                secret: DEVELOPMENT_SECRET.to_string(),
                algorithm: Algorithm::HS256,
            },
            identity_claim: "AbsClientID".to_string(),
            rules: ClaimRules::default(),
        }
    }
}

impl TokenVerifierConfig {
    /// Shared-secret configuration with default claim rules
    pub fn shared_secret(secret: impl Into<String>) -> Self {
        Self {
            policy: TrustPolicyConfig::SharedSecret {
                secret: secret.into(),
                algorithm: Algorithm::HS256,
            },
            ..Default::default()
        }
    }

    /// Embedded-certificate configuration for `algorithm`
    pub fn embedded_certificate(algorithm: Algorithm) -> Self {
        Self {
            policy: TrustPolicyConfig::EmbeddedCertificate { algorithm },
            ..Default::default()
        }
    }

    /// Overrides the identity claim path
    pub fn with_identity_claim(mut self, path: impl Into<String>) -> Self {
        self.identity_claim = path.into();
        self
    }

    /// Overrides the claim rules
    pub fn with_rules(mut self, rules: ClaimRules) -> Self {
        self.rules = rules;
        self
    }
}

/// Key family an algorithm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyFamily {
    Hmac,
    Rsa,
    Ec,
    Ed,
}

impl KeyFamily {
    pub(crate) fn of(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => KeyFamily::Hmac,
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => KeyFamily::Rsa,
            Algorithm::ES256 | Algorithm::ES384 => KeyFamily::Ec,
            Algorithm::EdDSA => KeyFamily::Ed,
        }
    }
}

impl TryFrom<&TrustConfig> for TokenVerifierConfig {
    type Error = ConfigError;

    fn try_from(config: &TrustConfig) -> Result<Self, Self::Error> {
        config.validate()?;

        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| ConfigError::Invalid {
            key: "JWT_ALGORITHM".to_string(),
            message: format!("unknown algorithm {}", config.algorithm),
        })?;
        let family = KeyFamily::of(algorithm);

        let policy = match config.policy {
            TrustPolicyKind::SharedSecret => {
                if family != KeyFamily::Hmac {
                    return Err(ConfigError::Invalid {
                        key: "JWT_ALGORITHM".to_string(),
                        message: format!("{:?} is not an HMAC algorithm", algorithm),
                    });
                }
                let secret = config.secret.clone().ok_or_else(|| ConfigError::Missing {
                    key: "JWT_SECRET".to_string(),
                })?;
                TrustPolicyConfig::SharedSecret { secret, algorithm }
            }
            TrustPolicyKind::EmbeddedCertificate => {
                if !matches!(family, KeyFamily::Rsa | KeyFamily::Ec) {
                    return Err(ConfigError::Invalid {
                        key: "JWT_ALGORITHM".to_string(),
                        message: format!(
                            "{:?} cannot be verified with an embedded certificate",
                            algorithm
                        ),
                    });
                }
                TrustPolicyConfig::EmbeddedCertificate { algorithm }
            }
        };

        Ok(Self {
            policy,
            identity_claim: config.identity_claim.clone(),
            rules: ClaimRules {
                require_exp: config.require_exp,
                leeway_seconds: config.leeway_seconds,
                issuers: config.issuers.clone(),
                audiences: config.audiences.clone(),
            },
        })
    }
}
