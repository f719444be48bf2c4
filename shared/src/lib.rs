//! Shared utilities and common types for the verification code server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Validation helpers shared by the HTTP layer and the core

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, IdentityNormalization, LogFormat, LoggingConfig,
    ServerConfig, TrustConfig, TrustPolicyKind, VerificationConfig,
};
pub use utils::validation;
