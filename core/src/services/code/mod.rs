//! Deterministic derivation of display codes from identities.

mod deriver;

pub use deriver::{normalize_identity, CodeDeriver};
pub use re_shared::config::IdentityNormalization;
