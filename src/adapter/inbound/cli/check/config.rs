use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::{Config, FALLBACK_ODDS_ENV};
use crate::infrastructure::config::sources::{FeedConfig, StoreConfig};

/// Validate a configuration file without starting the engine.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field(
        "Owner",
        config.owner.as_ref().map_or("all", |owner| owner.as_str()),
    );
    output::field("Feed", &config.feed);
    output::field("Store", &config.store);
    output::field("Interval", format!("{}s", config.poll.interval_secs));
    output::field("Fallback", config.engine.fallback_odds);
    if std::env::var_os(FALLBACK_ODDS_ENV).is_some() {
        output::field("Override", FALLBACK_ODDS_ENV);
    }
    output::field("Log notify", config.notify.log);

    if let FeedConfig::Replay { path } = &config.feed {
        if path.is_file() {
            output::success("Replay file found");
        } else {
            output::warning(&format!("Replay file {} does not exist", path.display()));
        }
    }
    match &config.store {
        StoreConfig::Json { path } if !path.exists() => {
            output::hint(&format!("{} will be created on first run", path.display()));
        }
        StoreConfig::Memory => {
            output::warning("Memory store: strategies and tickets are lost on exit");
        }
        StoreConfig::Json { .. } => {}
    }

    output::success("Configuration check complete");
    Ok(())
}
