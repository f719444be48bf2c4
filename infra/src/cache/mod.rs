//! Cache module for in-process association storage
//! 
//! Associations live only as long as the process; there is no persistence
//! and no coordination between instances.

pub mod association_cache;


pub use association_cache::InMemoryAssociationStore;
