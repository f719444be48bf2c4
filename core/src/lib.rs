//! # RenovEasy Core
//! 
//! Core domain layer for the verification code service.
//! This crate contains the token verifier and its trust policies, the code
//! deriver, the association store contract and the verification service
//! tying them together, along with the domain types and error taxonomy.

pub mod domain;
pub mod services;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::entities::{Association, Claims};
pub use domain::value_objects::{Identity, VerificationCode};
pub use errors::{DomainError, DomainResult, TokenError, ValidationError};
pub use services::{
    AssociationStore, Clock, CodeDeriver, IssuedCode, ManualClock, SystemClock, TokenVerifier,
    VerificationService,
};
