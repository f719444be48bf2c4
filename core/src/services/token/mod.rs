//! Token verification module
//!
//! This module authenticates inbound signed tokens:
//! - Shared-secret (HMAC) trust policy
//! - Embedded-certificate (`x5c`) trust policy
//! - Claim rules (`exp`, `nbf`, issuer, audience)
//! - Identity claim extraction

mod certificate;
mod config;
mod policy;
mod verifier;

#[cfg(test)]
pub(crate) mod tests;

pub use certificate::decoding_key_from_chain;
pub use config::{ClaimRules, TokenVerifierConfig, TrustPolicyConfig};
pub use policy::{build_policy, EmbeddedCertificatePolicy, SharedSecretPolicy, TrustPolicy};
pub use verifier::TokenVerifier;
