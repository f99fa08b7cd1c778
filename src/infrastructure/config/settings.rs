//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; `FOOTALERT_FALLBACK_ODDS` in the
//! environment overrides `engine.fallback_odds`.
//!
//! # Example
//!
//! ```no_run
//! use footalert::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("footalert.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::sources::{FeedConfig, NotifyConfig, StoreConfig};
use crate::domain::id::OwnerId;
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`EngineConfig::fallback_odds`].
pub const FALLBACK_ODDS_ENV: &str = "FOOTALERT_FALLBACK_ODDS";

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Odds recorded on a ticket when the feed has no usable live price.
    pub fallback_odds: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_odds: dec!(1.90),
        }
    }
}

/// Poll loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_secs: u64,
    /// Stop after this many ticks. 0 runs until shutdown.
    pub max_ticks: u64,
}

impl PollConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub fn max_ticks(&self) -> Option<u64> {
        (self.max_ticks > 0).then_some(self.max_ticks)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            max_ticks: 0,
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Only load this owner's strategies. All owners when unset.
    #[serde(default)]
    pub owner: Option<OwnerId>,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub poll: PollConfig,

    /// Snapshot source.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Strategy and ticket persistence.
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub notify: NotifyConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - `FOOTALERT_FALLBACK_ODDS` is set but not a decimal
    /// - Validation fails (e.g., fallback odds not above 1)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_with_overrides(content, std::env::var(FALLBACK_ODDS_ENV).ok().as_deref())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    #[allow(clippy::result_large_err)]
    fn parse_with_overrides(content: &str, fallback_odds: Option<&str>) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Some(raw) = fallback_odds {
            config.engine.fallback_odds =
                Decimal::from_str(raw.trim()).map_err(|e| ConfigError::InvalidValue {
                    field: FALLBACK_ODDS_ENV,
                    reason: e.to_string(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.engine.fallback_odds <= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "fallback_odds",
                reason: "must be greater than 1".to_string(),
            }
            .into());
        }
        if self.poll.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        match &self.feed {
            FeedConfig::Replay { path } if path.as_os_str().is_empty() => {
                return Err(ConfigError::MissingField { field: "feed.path" }.into());
            }
            FeedConfig::Demo { matches: 0, .. } => {
                return Err(ConfigError::InvalidValue {
                    field: "matches",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
            _ => {}
        }
        if let StoreConfig::Json { path } = &self.store {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::MissingField { field: "store.path" }.into());
            }
        }
        if let Some(owner) = &self.owner {
            if owner.as_str().trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "owner",
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
