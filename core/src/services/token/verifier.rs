//! Token verifier: trust policy plus identity extraction

use tracing::{debug, warn};

use crate::domain::entities::Claims;
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenVerifierConfig;
use super::policy::{build_policy, TrustPolicy};

/// Authenticates raw tokens under the trust policy chosen at startup
pub struct TokenVerifier {
    policy: Box<dyn TrustPolicy>,
    identity_claim: String,
}

impl TokenVerifier {
    /// Creates a verifier from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TokenVerifier)` - Verifier ready to use
    /// * `Err(DomainError)` - The configured key material or algorithm is unusable
    pub fn new(config: TokenVerifierConfig) -> DomainResult<Self> {
        let policy = build_policy(&config.policy, &config.rules)?;
        Ok(Self::with_policy(policy, config.identity_claim))
    }

    /// Creates a verifier around an explicit policy
    pub fn with_policy(policy: Box<dyn TrustPolicy>, identity_claim: impl Into<String>) -> Self {
        Self {
            policy,
            identity_claim: identity_claim.into(),
        }
    }

    /// Name of the active trust policy
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Verifies a raw token and returns its claims
    ///
    /// # Arguments
    ///
    /// * `raw_token` - Compact JWS, without any `Bearer ` prefix
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The signature and time claims were accepted
    /// * `Err(DomainError::Token)` - Missing, malformed or untrusted token
    pub fn verify(&self, raw_token: &str) -> DomainResult<Claims> {
        let token = raw_token.trim();
        if token.is_empty() {
            return Err(TokenError::MissingCredential.into());
        }

        self.policy.verify(token).map_err(|error| {
            if error.is_structural() {
                debug!(policy = self.policy.name(), error = %error, "Token structure rejected");
            } else {
                warn!(
                    policy = self.policy.name(),
                    error = %error,
                    event = "token_rejected",
                    "Token verification failed"
                );
            }
            DomainError::Token(error)
        })
    }

    /// Verifies a raw token and extracts the identity claim
    pub fn verify_identity(&self, raw_token: &str) -> DomainResult<Identity> {
        self.verify(raw_token)?.identity_at(&self.identity_claim)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("policy", &self.policy.name())
            .field("algorithm", &self.policy.algorithm())
            .field("identity_claim", &self.identity_claim)
            .finish()
    }
}
