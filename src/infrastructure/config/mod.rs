//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;
pub mod sources;

pub use logging::LoggingConfig;
pub use settings::{Config, EngineConfig, PollConfig};
pub use sources::{FeedConfig, NotifyConfig, StoreConfig};
