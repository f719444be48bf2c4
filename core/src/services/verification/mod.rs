//! Verification service module
//!
//! This module ties the pieces of the code workflow together:
//! - Token verification and identity extraction
//! - Code derivation from the identity
//! - Recording and resolving code associations

mod service;
mod types;


pub use service::VerificationService;
pub use types::IssuedCode;
