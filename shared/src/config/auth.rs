//! Token trust configuration
//!
//! The trust policy is selected once at startup; requests never choose it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{env_list, env_parse, env_string, ConfigError};

const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Which trust model authenticates inbound tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustPolicyKind {
    /// HMAC signature with a pre-provisioned symmetric key
    SharedSecret,
    /// Asymmetric signature checked against the leading `x5c` certificate
    EmbeddedCertificate,
}

impl Default for TrustPolicyKind {
    fn default() -> Self {
        TrustPolicyKind::SharedSecret
    }
}

impl fmt::Display for TrustPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustPolicyKind::SharedSecret => write!(f, "shared_secret"),
            TrustPolicyKind::EmbeddedCertificate => write!(f, "embedded_certificate"),
        }
    }
}

impl FromStr for TrustPolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "shared_secret" | "hmac" | "secret" => Ok(TrustPolicyKind::SharedSecret),
            "embedded_certificate" | "x5c" | "certificate" => {
                Ok(TrustPolicyKind::EmbeddedCertificate)
            }
            _ => Err(format!("Invalid trust policy: {}", s)),
        }
    }
}

/// Token trust configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrustConfig {
    /// Selected trust model
    pub policy: TrustPolicyKind,

    /// Symmetric key for the shared-secret policy
    #[serde(default, skip_serializing)]
    pub secret: Option<String>,

    /// Accepted signing algorithm name (e.g. `HS256`, `RS256`)
    pub algorithm: String,

    /// Dot-separated path of the identity claim inside the payload
    pub identity_claim: String,

    /// Whether tokens must carry an `exp` claim
    pub require_exp: bool,

    /// Clock skew tolerance for `exp`/`nbf` in seconds
    pub leeway_seconds: u64,

    /// Accepted issuers (empty = not checked)
    #[serde(default)]
    pub issuers: Vec<String>,

    /// Accepted audiences (empty = not checked)
    #[serde(default)]
    pub audiences: Vec<String>,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            policy: TrustPolicyKind::SharedSecret,
            secret: Some(DEVELOPMENT_SECRET.to_string()),
            algorithm: "HS256".to_string(),
            identity_claim: "AbsClientID".to_string(),
            require_exp: true,
            leeway_seconds: 30,
            issuers: Vec::new(),
            audiences: Vec::new(),
        }
    }
}

impl TrustConfig {
    /// Load trust configuration from environment variables
    ///
    /// - `TRUST_POLICY`: `shared_secret` (default) or `embedded_certificate`
    /// - `JWT_SECRET`: symmetric key, required for `shared_secret`
    /// - `JWT_ALGORITHM`: defaults to `HS256` / `RS256` depending on the policy
    /// - `JWT_IDENTITY_CLAIM`: defaults to `AbsClientID`
    /// - `JWT_REQUIRE_EXP`, `JWT_LEEWAY_SECONDS`, `JWT_ISSUER`, `JWT_AUDIENCE`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let policy = env_parse("TRUST_POLICY", TrustPolicyKind::default())?;
        let default_algorithm = match policy {
            TrustPolicyKind::SharedSecret => "HS256",
            TrustPolicyKind::EmbeddedCertificate => "RS256",
        };

        Ok(Self {
            policy,
            secret: env_string("JWT_SECRET").or(match policy {
                TrustPolicyKind::SharedSecret => defaults.secret,
                TrustPolicyKind::EmbeddedCertificate => None,
            }),
            algorithm: env_string("JWT_ALGORITHM")
                .unwrap_or_else(|| default_algorithm.to_string())
                .to_uppercase(),
            identity_claim: env_string("JWT_IDENTITY_CLAIM").unwrap_or(defaults.identity_claim),
            require_exp: env_parse("JWT_REQUIRE_EXP", defaults.require_exp)?,
            leeway_seconds: env_parse("JWT_LEEWAY_SECONDS", defaults.leeway_seconds)?,
            issuers: env_list("JWT_ISSUER"),
            audiences: env_list("JWT_AUDIENCE"),
        })
    }

    /// Create a shared-secret configuration
    pub fn shared_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Default::default()
        }
    }

    /// Create an embedded-certificate configuration accepting `RS256`
    pub fn embedded_certificate() -> Self {
        Self {
            policy: TrustPolicyKind::EmbeddedCertificate,
            secret: None,
            algorithm: "RS256".to_string(),
            ..Default::default()
        }
    }

    /// Whether the built-in development secret is in use
    pub fn uses_development_secret(&self) -> bool {
        self.policy == TrustPolicyKind::SharedSecret
            && self.secret.as_deref() == Some(DEVELOPMENT_SECRET)
    }

    /// Validate policy-specific requirements
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy == TrustPolicyKind::SharedSecret {
            match self.secret.as_deref() {
                None => {
                    return Err(ConfigError::Missing {
                        key: "JWT_SECRET".to_string(),
                    })
                }
                Some(secret) if secret.trim().is_empty() => {
                    return Err(ConfigError::Invalid {
                        key: "JWT_SECRET".to_string(),
                        message: "secret must not be empty".to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        if self.identity_claim.split('.').any(|segment| segment.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                key: "JWT_IDENTITY_CLAIM".to_string(),
                message: format!("invalid claim path: {:?}", self.identity_claim),
            });
        }

        Ok(())
    }
}
