//! Storage contract for code associations

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::entities::Association;
use crate::domain::value_objects::{Identity, VerificationCode};
use crate::errors::DomainResult;

/// Store mapping codes to identities with TTL semantics.
///
/// Implementations must guarantee that:
/// - `get` never returns an expired association, swept or not
/// - `sweep` never removes an active association
/// - an association is written as a whole, never partially visible
#[async_trait]
pub trait AssociationStore: Send + Sync {
    /// Upserts `code → identity` stamped with the current time.
    ///
    /// Last write wins: a later put for the same code replaces the identity
    /// and restarts the lifetime window.
    async fn put(&self, code: &VerificationCode, identity: &Identity) -> DomainResult<Association>;

    /// Identity for `code` if an active association exists
    async fn get(&self, code: &VerificationCode) -> DomainResult<Option<Identity>>;

    /// Removes every expired association and returns how many were removed
    async fn sweep(&self) -> DomainResult<usize>;

    /// Number of physically stored associations, expired ones included
    async fn len(&self) -> DomainResult<usize>;

    /// Lifetime of an association
    fn ttl(&self) -> Duration;
}
