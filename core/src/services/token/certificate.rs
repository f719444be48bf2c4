//! Verification keys taken from an embedded `x5c` certificate chain.
//!
//! Only the leading certificate is used; it must carry a public key of the
//! family the configured algorithm expects and be inside its validity period.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{Algorithm, DecodingKey};
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

use crate::errors::TokenError;

use super::config::KeyFamily;

fn untrusted(reason: impl Into<String>) -> TokenError {
    TokenError::UntrustedCertificate {
        reason: reason.into(),
    }
}

/// Builds a decoding key from the leading certificate of an `x5c` chain.
///
/// # Errors
///
/// Returns `TokenError::UntrustedCertificate` when the chain is empty, the
/// certificate is not valid base64 DER X.509, it is outside its validity
/// period, or its key does not match `algorithm`.
pub fn decoding_key_from_chain(
    chain: &[String],
    algorithm: Algorithm,
) -> Result<DecodingKey, TokenError> {
    let leading = chain
        .first()
        .ok_or_else(|| untrusted("certificate chain is empty"))?;

    let der = STANDARD
        .decode(leading.trim())
        .map_err(|e| untrusted(format!("certificate is not base64: {}", e)))?;

    let (_, certificate) = parse_x509_certificate(&der)
        .map_err(|e| untrusted(format!("certificate is not X.509 DER: {}", e)))?;

    if !certificate.validity().is_valid() {
        return Err(untrusted("certificate is outside its validity period"));
    }

    let spki = certificate.public_key();
    let key_bytes: &[u8] = &spki.subject_public_key.data;

    match (KeyFamily::of(algorithm), spki.parsed()) {
        (KeyFamily::Rsa, Ok(PublicKey::RSA(_))) => Ok(DecodingKey::from_rsa_der(key_bytes)),
        (KeyFamily::Ec, Ok(PublicKey::EC(_))) => Ok(DecodingKey::from_ec_der(key_bytes)),
        (family, Ok(_)) => Err(untrusted(format!(
            "certificate key does not match {:?} ({:?} expected)",
            algorithm, family
        ))),
        (_, Err(e)) => Err(untrusted(format!("unreadable public key: {}", e))),
    }
}
