//! Verification code route handlers
//!
//! This module contains the code endpoints:
//! - Issuing a code for the identity in a signed token
//! - Resolving a code back to its identity

pub mod issue_code;
pub mod resolve_code;
