//! Association module: code → identity records with a bounded lifetime
//!
//! This module defines:
//! - The `AssociationStore` contract (put / get / sweep)
//! - Lifetime and sweep configuration
//! - The background sweep task that compacts expired records

mod config;
mod sweeper;
mod traits;


pub use config::{AssociationConfig, SweepConfig};
pub use sweeper::{AssociationSweepService, SweepResult};
pub use traits::AssociationStore;
