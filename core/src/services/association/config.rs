//! Configuration for association lifetime and sweeping

use chrono::Duration;

use re_shared::config::{ConfigError, VerificationConfig, MAX_CODE_TTL_SECONDS};

use crate::domain::entities::DEFAULT_CODE_TTL_MINUTES;

/// Configuration of the periodic sweep task
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the sweep at all
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60, // Run every minute
            enabled: true,
        }
    }
}

/// Association lifetime plus sweep schedule
#[derive(Debug, Clone)]
pub struct AssociationConfig {
    /// Lifetime of an association
    pub ttl: Duration,
    /// Sweep schedule
    pub sweep: SweepConfig,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(DEFAULT_CODE_TTL_MINUTES),
            sweep: SweepConfig::default(),
        }
    }
}

impl AssociationConfig {
    /// Checks that the TTL is positive and the sweep period does not exceed it
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl <= Duration::zero() {
            return Err(ConfigError::Invalid {
                key: "CODE_TTL_SECONDS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        let ttl_seconds = u64::try_from(self.ttl.num_seconds()).unwrap_or(0);
        if ttl_seconds > MAX_CODE_TTL_SECONDS {
            return Err(ConfigError::Invalid {
                key: "CODE_TTL_SECONDS".to_string(),
                message: format!("must not exceed {} seconds", MAX_CODE_TTL_SECONDS),
            });
        }
        if self.sweep.interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "SWEEP_INTERVAL_SECONDS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.sweep.interval_seconds > ttl_seconds {
            return Err(ConfigError::Invalid {
                key: "SWEEP_INTERVAL_SECONDS".to_string(),
                message: format!(
                    "sweep interval {}s exceeds TTL {}s",
                    self.sweep.interval_seconds, ttl_seconds
                ),
            });
        }
        Ok(())
    }
}

impl TryFrom<&VerificationConfig> for AssociationConfig {
    type Error = ConfigError;

    fn try_from(config: &VerificationConfig) -> Result<Self, Self::Error> {
        let ttl = i64::try_from(config.code_ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| ConfigError::Invalid {
                key: "CODE_TTL_SECONDS".to_string(),
                message: "value is too large".to_string(),
            })?;
        let association = Self {
            ttl,
            sweep: SweepConfig {
                interval_seconds: config.sweep_interval_seconds,
                enabled: config.sweep_enabled,
            },
        };
        association.validate()?;
        Ok(association)
    }
}
