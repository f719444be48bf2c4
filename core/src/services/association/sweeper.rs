//! Sweep service for periodic removal of expired associations
//!
//! Lookups already hide expired associations; the sweep only bounds memory.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::errors::DomainResult;

use super::config::SweepConfig;
use super::traits::AssociationStore;

/// Service for sweeping expired associations out of a store
pub struct AssociationSweepService<S: AssociationStore + 'static> {
    store: Arc<S>,
    config: SweepConfig,
}

impl<S: AssociationStore> AssociationSweepService<S> {
    /// Create a new sweep service
    pub fn new(store: Arc<S>, config: SweepConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep cycle
    ///
    /// # Returns
    /// * `Ok(SweepResult)` - Summary of the cycle
    /// * `Err(DomainError)` - If the store could not be swept
    pub async fn run_sweep(&self) -> DomainResult<SweepResult> {
        if !self.config.enabled {
            return Ok(SweepResult::default());
        }

        let removed = self.store.sweep().await?;
        let remaining = self.store.len().await?;

        if removed > 0 {
            info!(
                removed = removed,
                remaining = remaining,
                event = "associations_swept",
                "Removed expired associations"
            );
        } else {
            debug!(remaining = remaining, "Sweep found no expired associations");
        }

        Ok(SweepResult { removed, remaining })
    }

    /// Start the sweep as a background task
    ///
    /// This spawns a tokio task that sweeps at regular intervals. Returns
    /// `None` when sweeping is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Association sweep is disabled");
            return None;
        }

        let period = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Association sweep started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(period);
            interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_sweep().await {
                    error!("Association sweep cycle failed: {}", e);
                }
            }
        }))
    }
}

/// Result of a sweep cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired associations removed
    pub removed: usize,
    /// Number of associations still stored afterwards
    pub remaining: usize,
}
