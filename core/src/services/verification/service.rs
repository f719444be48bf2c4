//! Main verification service implementation

use std::sync::Arc;
use tracing;

use crate::domain::value_objects::{Identity, VerificationCode};
use crate::errors::{DomainError, DomainResult};
use crate::services::association::AssociationStore;
use crate::services::code::CodeDeriver;
use crate::services::token::TokenVerifier;

use super::types::IssuedCode;

/// Verification service issuing codes for verified tokens and resolving them back
pub struct VerificationService<S: AssociationStore> {
    /// Token verifier with the trust policy fixed at startup
    verifier: TokenVerifier,
    /// Identity to code derivation
    deriver: CodeDeriver,
    /// Store of live code associations
    store: Arc<S>,
}

impl<S: AssociationStore> VerificationService<S> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `verifier` - Token verifier
    /// * `deriver` - Code deriver
    /// * `store` - Association store implementation
    pub fn new(verifier: TokenVerifier, deriver: CodeDeriver, store: Arc<S>) -> Self {
        Self {
            verifier,
            deriver,
            store,
        }
    }

    /// The underlying association store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Issue a code for the identity carried by a signed token
    ///
    /// This method:
    /// 1. Verifies the token under the configured trust policy
    /// 2. Extracts the identity claim
    /// 3. Derives the 6-digit code
    /// 4. Records the code association
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCode)` - The code and its validity window
    /// * `Err(DomainError)` - Token, structure or identity errors pass through
    ///   unchanged; store failures become `Internal`
    pub async fn issue_code(&self, raw_token: &str) -> DomainResult<IssuedCode> {
        let identity = self.verifier.verify_identity(raw_token)?;
        let code = self.deriver.derive(identity.as_str())?;

        let association = self.store.put(&code, &identity).await.map_err(|e| {
            tracing::error!(
                code = %code,
                error = %e,
                event = "association_storage_failed",
                "Failed to record code association"
            );
            into_internal(e)
        })?;

        let issued = IssuedCode::from_association(association, self.store.ttl());

        tracing::info!(
            code = %issued.code,
            policy = self.verifier.policy_name(),
            expires_at = %issued.expires_at,
            event = "code_issued",
            "Issued verification code"
        );

        Ok(issued)
    }

    /// Resolve a code back to the identity it was issued for
    ///
    /// The format is checked before the store is consulted. An unknown code
    /// and an expired code produce the same `NotFound`.
    pub async fn resolve_code(&self, code: &str) -> DomainResult<Identity> {
        let code = VerificationCode::parse(code)?;

        let identity = self.store.get(&code).await.map_err(|e| {
            tracing::error!(
                code = %code,
                error = %e,
                event = "association_lookup_failed",
                "Failed to look up code association"
            );
            into_internal(e)
        })?;

        match identity {
            Some(identity) => {
                tracing::info!(code = %code, event = "code_resolved", "Resolved verification code");
                Ok(identity)
            }
            None => {
                tracing::debug!(code = %code, "No active association for code");
                Err(DomainError::code_not_found())
            }
        }
    }

    /// Remove expired associations now, returning how many were removed
    pub async fn sweep_expired(&self) -> DomainResult<usize> {
        self.store.sweep().await.map_err(into_internal)
    }
}

fn into_internal(error: DomainError) -> DomainError {
    match error {
        DomainError::Internal { .. } => error,
        other => DomainError::Internal {
            message: other.to_string(),
        },
    }
}
