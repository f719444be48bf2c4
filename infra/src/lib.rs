//! # Infrastructure Layer
//! 
//! This crate implements the infrastructure layer for the verification code
//! service. It provides concrete implementations of the storage contracts
//! defined in `re_core`.
//!
//! ## Architecture
//! 
//! The infrastructure layer contains:
//! - **Cache**: in-process association store with TTL and sweep support

// Re-export core types for convenience  
pub use re_core::errors::*;

/// Cache module - in-process association storage
pub mod cache;

pub use cache::InMemoryAssociationStore;
