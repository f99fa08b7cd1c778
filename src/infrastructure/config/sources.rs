//! Feed, store and notifier selection.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Where match snapshots come from.
///
/// The active variant is determined by the `type` field in the TOML config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedConfig {
    /// Recorded batches from a JSON file.
    Replay { path: PathBuf },
    /// Seeded random simulation.
    Demo {
        #[serde(default = "default_demo_matches")]
        matches: usize,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::Demo {
            matches: default_demo_matches(),
            seed: None,
        }
    }
}

fn default_demo_matches() -> usize {
    8
}

impl fmt::Display for FeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replay { path } => write!(f, "replay ({})", path.display()),
            Self::Demo {
                matches,
                seed: Some(seed),
            } => write!(f, "demo ({matches} matches, seed {seed})"),
            Self::Demo { matches, seed: None } => write!(f, "demo ({matches} matches)"),
        }
    }
}

/// Where strategies and tickets are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// One JSON document per collection under `path`.
    Json {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
    /// Process memory only; nothing survives a restart.
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Json {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("footalert-data")
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { path } => write!(f, "json ({})", path.display()),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Notification sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Log triggers and wins through `tracing`.
    pub log: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { log: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_sources() {
        let replay = FeedConfig::Replay {
            path: PathBuf::from("feed.json"),
        };
        assert_eq!(replay.to_string(), "replay (feed.json)");
        let demo = FeedConfig::Demo {
            matches: 4,
            seed: Some(9),
        };
        assert_eq!(demo.to_string(), "demo (4 matches, seed 9)");
        assert_eq!(FeedConfig::default().to_string(), "demo (8 matches)");
        assert_eq!(StoreConfig::Memory.to_string(), "memory");
        assert_eq!(StoreConfig::default().to_string(), "json (footalert-data)");
    }
}
