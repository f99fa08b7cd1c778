//! CLI module graph.

pub mod catalog;
pub mod check;
pub mod command;
pub mod output;
pub mod run;
pub mod stats;

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load the configuration file and start logging.
///
/// Quiet mode lowers the configured level to `warn` unless `RUST_LOG` is set.
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load(path)?;
    if output::is_quiet() {
        config.logging.level = "warn".to_string();
    }
    config.logging.init();
    Ok(config)
}
