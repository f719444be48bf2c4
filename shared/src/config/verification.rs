//! Code issuance configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{env_parse, ConfigError};

/// Longest accepted code lifetime (one day)
pub const MAX_CODE_TTL_SECONDS: u64 = 24 * 60 * 60;

/// How an identity is normalized before it is hashed into a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityNormalization {
    /// Hash the identity exactly as received
    None,
    /// Drop hyphens and whitespace (UUID-style client identifiers)
    StripSeparators,
    /// Drop hyphens and whitespace, then lowercase ASCII letters
    StripSeparatorsLowercase,
}

impl Default for IdentityNormalization {
    fn default() -> Self {
        IdentityNormalization::StripSeparators
    }
}

impl fmt::Display for IdentityNormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityNormalization::None => write!(f, "none"),
            IdentityNormalization::StripSeparators => write!(f, "strip_separators"),
            IdentityNormalization::StripSeparatorsLowercase => {
                write!(f, "strip_separators_lowercase")
            }
        }
    }
}

impl FromStr for IdentityNormalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" | "raw" => Ok(IdentityNormalization::None),
            "strip_separators" | "strip" => Ok(IdentityNormalization::StripSeparators),
            "strip_separators_lowercase" | "strip_lowercase" => {
                Ok(IdentityNormalization::StripSeparatorsLowercase)
            }
            _ => Err(format!("Invalid identity normalization: {}", s)),
        }
    }
}

/// Code lifetime and maintenance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds a code stays resolvable after issuance
    pub code_ttl_seconds: u64,

    /// Seconds between sweeps of expired codes (must not exceed the TTL)
    pub sweep_interval_seconds: u64,

    /// Whether the background sweep runs at all
    pub sweep_enabled: bool,

    /// Identity normalization applied before hashing
    #[serde(default)]
    pub normalization: IdentityNormalization,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: 600,      // 10 minutes
            sweep_interval_seconds: 60, // well inside the TTL
            sweep_enabled: true,
            normalization: IdentityNormalization::StripSeparators,
        }
    }
}

impl VerificationConfig {
    /// Load from `CODE_TTL_SECONDS`, `SWEEP_INTERVAL_SECONDS`, `SWEEP_ENABLED`
    /// and `IDENTITY_NORMALIZATION`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            code_ttl_seconds: env_parse("CODE_TTL_SECONDS", defaults.code_ttl_seconds)?,
            sweep_interval_seconds: env_parse(
                "SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            )?,
            sweep_enabled: env_parse("SWEEP_ENABLED", defaults.sweep_enabled)?,
            normalization: env_parse("IDENTITY_NORMALIZATION", defaults.normalization)?,
        })
    }

    /// Validate TTL and sweep schedule
    ///
    /// The sweep interval must be non-zero and no longer than the TTL so that
    /// expired codes never linger for more than one extra window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_ttl_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "CODE_TTL_SECONDS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.code_ttl_seconds > MAX_CODE_TTL_SECONDS {
            return Err(ConfigError::Invalid {
                key: "CODE_TTL_SECONDS".to_string(),
                message: format!("must not exceed {} seconds", MAX_CODE_TTL_SECONDS),
            });
        }
        if self.sweep_interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "SWEEP_INTERVAL_SECONDS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.sweep_interval_seconds > self.code_ttl_seconds {
            return Err(ConfigError::Invalid {
                key: "SWEEP_INTERVAL_SECONDS".to_string(),
                message: format!(
                    "sweep interval {}s exceeds code TTL {}s",
                    self.sweep_interval_seconds, self.code_ttl_seconds
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.code_ttl_seconds, 600);
        assert!(config.sweep_interval_seconds <= config.code_ttl_seconds);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sweep_longer_than_ttl_rejected() {
        let config = VerificationConfig {
            code_ttl_seconds: 600,
            sweep_interval_seconds: 3600,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key, .. }) if key == "SWEEP_INTERVAL_SECONDS"
        ));
    }

    #[test]
    fn test_sweep_equal_to_ttl_accepted() {
        let config = VerificationConfig {
            code_ttl_seconds: 300,
            sweep_interval_seconds: 300,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let zero_ttl = VerificationConfig {
            code_ttl_seconds: 0,
            sweep_interval_seconds: 0,
            ..Default::default()
        };
        assert!(zero_ttl.validate().is_err());

        let zero_interval = VerificationConfig {
            sweep_interval_seconds: 0,
            ..Default::default()
        };
        assert!(zero_interval.validate().is_err());
    }

    #[test]
    fn test_ttl_above_one_day_rejected() {
        let config = VerificationConfig {
            code_ttl_seconds: 9_000_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key, .. }) if key == "CODE_TTL_SECONDS"
        ));

        let one_day = VerificationConfig {
            code_ttl_seconds: MAX_CODE_TTL_SECONDS,
            ..Default::default()
        };
        assert!(one_day.validate().is_ok());
    }

    #[test]
    fn test_normalization_parsing() {
        assert_eq!("none".parse(), Ok(IdentityNormalization::None));
        assert_eq!("strip-separators".parse(), Ok(IdentityNormalization::StripSeparators));
        assert_eq!(
            "STRIP_SEPARATORS_LOWERCASE".parse(),
            Ok(IdentityNormalization::StripSeparatorsLowercase)
        );
        assert!("upper".parse::<IdentityNormalization>().is_err());
    }
}
