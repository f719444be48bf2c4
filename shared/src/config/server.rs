//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string, ConfigError};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Maximum JSON payload size in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 3000,
            workers: 0, // Use all CPU cores
            max_payload_size: default_max_payload_size(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Load from `SERVER_HOST`, `SERVER_PORT` (or `PORT`), `SERVER_WORKERS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = match env_string("SERVER_PORT") {
            Some(_) => env_parse("SERVER_PORT", defaults.port)?,
            None => env_parse("PORT", defaults.port)?,
        };
        Ok(Self {
            host: env_string("SERVER_HOST").unwrap_or(defaults.host),
            port,
            workers: env_parse("SERVER_WORKERS", defaults.workers)?,
            max_payload_size: env_parse("SERVER_MAX_PAYLOAD_SIZE", defaults.max_payload_size)?,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_max_payload_size() -> usize {
    64 * 1024 // tokens are small
}
