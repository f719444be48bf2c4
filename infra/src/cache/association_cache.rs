//! In-memory association store
//! 
//! This module provides the code → identity store used by the verification
//! service:
//! - A single async mutex guards every operation
//! - Expired entries are hidden from lookups and dropped on read
//! - `sweep` compacts whatever lookups never touched

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use re_core::domain::entities::Association;
use re_core::domain::value_objects::{Identity, VerificationCode};
use re_core::errors::DomainResult;
use re_core::services::association::AssociationStore;
use re_core::services::clock::{Clock, SystemClock};

/// Association store held in process memory
/// 
/// Entries are keyed by code. A put for an existing code replaces the entry
/// and restarts its lifetime.
pub struct InMemoryAssociationStore {
    /// Associations keyed by code
    entries: Mutex<HashMap<VerificationCode, Association>>,
    /// Lifetime of an association
    ttl: Duration,
    /// Time source for stamping and expiry checks
    clock: Arc<dyn Clock>,
}

impl InMemoryAssociationStore {
    /// Create a store with the given TTL and time source
    /// 
    /// # Arguments
    /// * `ttl` - Lifetime of each association
    /// * `clock` - Clock used to stamp and expire associations
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Create a store driven by the system clock
    pub fn with_system_clock(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(SystemClock))
    }
}

#[async_trait]
impl AssociationStore for InMemoryAssociationStore {
    async fn put(&self, code: &VerificationCode, identity: &Identity) -> DomainResult<Association> {
        let mut entries = self.entries.lock().await;
        let association = Association::new(code.clone(), identity.clone(), self.clock.now());

        if let Some(previous) = entries.insert(code.clone(), association.clone()) {
            if previous.identity != *identity {
                debug!(code = %code, "Code collision, replacing previous identity");
            }
        }

        Ok(association)
    }

    async fn get(&self, code: &VerificationCode) -> DomainResult<Option<Identity>> {
        let mut entries = self.entries.lock().await;
        let now = self.clock.now();

        match entries.get(code) {
            Some(association) if association.is_active_at(now, self.ttl) => {
                Ok(Some(association.identity.clone()))
            }
            Some(_) => {
                entries.remove(code);
                debug!(code = %code, "Dropped expired association on read");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn sweep(&self) -> DomainResult<usize> {
        let mut entries = self.entries.lock().await;
        let now = self.clock.now();
        let before = entries.len();

        entries.retain(|_, association| association.is_active_at(now, self.ttl));

        let removed = before - entries.len();
        if removed > 0 {
            debug!(
                removed = removed,
                remaining = entries.len(),
                "Swept expired associations from memory"
            );
        }
        Ok(removed)
    }

    async fn len(&self) -> DomainResult<usize> {
        Ok(self.entries.lock().await.len())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
