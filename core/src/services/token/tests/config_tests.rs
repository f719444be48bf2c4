//! Tests for building verifier configuration from the shared trust settings

use jsonwebtoken::Algorithm;
use re_shared::config::{ConfigError, TrustConfig};

use crate::services::token::{TokenVerifierConfig, TrustPolicyConfig};

#[test]
fn test_shared_secret_config_conversion() {
    let trust = TrustConfig {
        algorithm: "HS384".to_string(),
        issuers: vec!["idp".to_string()],
        ..TrustConfig::shared_secret("s3cret")
    };
    let config = TokenVerifierConfig::try_from(&trust).unwrap();

    match &config.policy {
        TrustPolicyConfig::SharedSecret { secret, algorithm } => {
            assert_eq!(secret, "s3cret");
            assert_eq!(*algorithm, Algorithm::HS384);
        }
        other => panic!("Expected shared secret policy, got {:?}", other),
    }
    assert_eq!(config.rules.issuers, vec!["idp".to_string()]);
    assert_eq!(config.identity_claim, "AbsClientID");
}

#[test]
fn test_embedded_certificate_config_conversion() {
    let config = TokenVerifierConfig::try_from(&TrustConfig::embedded_certificate()).unwrap();
    assert_eq!(config.policy.algorithm(), Algorithm::RS256);
    assert!(matches!(config.policy, TrustPolicyConfig::EmbeddedCertificate { .. }));
}

#[test]
fn test_rejects_asymmetric_algorithm_for_shared_secret() {
    let trust = TrustConfig {
        algorithm: "RS256".to_string(),
        ..TrustConfig::shared_secret("s3cret")
    };
    assert!(matches!(
        TokenVerifierConfig::try_from(&trust),
        Err(ConfigError::Invalid { key, .. }) if key == "JWT_ALGORITHM"
    ));
}

#[test]
fn test_rejects_hmac_algorithm_for_certificate() {
    let trust = TrustConfig {
        algorithm: "HS256".to_string(),
        ..TrustConfig::embedded_certificate()
    };
    assert!(TokenVerifierConfig::try_from(&trust).is_err());
}

#[test]
fn test_rejects_unknown_algorithm() {
    let trust = TrustConfig {
        algorithm: "none".to_string(),
        ..TrustConfig::shared_secret("s3cret")
    };
    assert!(TokenVerifierConfig::try_from(&trust).is_err());
}
