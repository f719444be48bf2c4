//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token trust policy configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `verification` - Code lifetime, sweep schedule and identity normalization

pub mod auth;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use auth::{TrustConfig, TrustPolicyKind};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use verification::{IdentityNormalization, VerificationConfig, MAX_CODE_TTL_SECONDS};

/// Configuration errors detected at startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {key}")]
    Missing { key: String },

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token trust configuration
    pub trust: TrustConfig,

    /// Code issuance configuration
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            trust: TrustConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file is honoured when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let config = Self {
            environment,
            server: ServerConfig::from_env()?,
            trust: TrustConfig::from_env()?,
            verification: VerificationConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints of every sub-configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trust.validate()?;
        self.verification.validate()?;
        if self.environment.is_production() && self.trust.uses_development_secret() {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET".to_string(),
                message: "development secret is not allowed in production".to_string(),
            });
        }
        Ok(())
    }
}

/// Read an optional environment variable, treating empty values as unset
pub(crate) fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Read and parse an environment variable, falling back to `default` when unset
pub(crate) fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Read a comma-separated list from an environment variable
pub(crate) fn env_list(key: &str) -> Vec<String> {
    env_string(key)
        .map(|raw| {
            raw.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
