//! Composition root: turn a [`Config`] into a loaded engine and a feed.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::demo::DemoFeed;
use crate::adapter::outbound::json_store::JsonFileStore;
use crate::adapter::outbound::memory::MemoryStore;
use crate::adapter::outbound::replay::ReplayFeed;
use crate::application::engine::Engine;
use crate::application::factory::TicketFactory;
use crate::application::runner::RunnerConfig;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::sources::{FeedConfig, StoreConfig};
use crate::port::outbound::feed::MatchFeed;
use crate::port::outbound::notifier::{LogNotifier, NotifierRegistry};
use crate::port::outbound::store::{StrategyStore, TicketStore};

/// Store handles for both collections. Backed by one adapter.
#[derive(Clone)]
pub struct Stores {
    pub strategies: Arc<dyn StrategyStore>,
    pub tickets: Arc<dyn TicketStore>,
}

/// Open the configured store.
///
/// # Errors
///
/// Returns [`Error::Store`](crate::error::Error::Store) if a JSON store
/// directory cannot be created.
pub async fn build_stores(config: &StoreConfig) -> Result<Stores> {
    match config {
        StoreConfig::Json { path } => {
            let store = Arc::new(JsonFileStore::open(path).await?);
            info!(path = %path.display(), "JSON store opened");
            Ok(Stores {
                strategies: store.clone(),
                tickets: store,
            })
        }
        StoreConfig::Memory => {
            let store = Arc::new(MemoryStore::new());
            info!("Memory store opened");
            Ok(Stores {
                strategies: store.clone(),
                tickets: store,
            })
        }
    }
}

/// Build the configured match feed.
///
/// # Errors
///
/// Returns [`Error::Feed`](crate::error::Error::Feed) if a replay file
/// cannot be loaded.
pub fn build_feed(config: &FeedConfig) -> Result<Box<dyn MatchFeed>> {
    match config {
        FeedConfig::Replay { path } => Ok(Box::new(ReplayFeed::from_path(path)?)),
        FeedConfig::Demo { matches, seed } => {
            info!(matches, seed = ?seed, "Demo feed started");
            Ok(Box::new(DemoFeed::new(*matches, *seed)))
        }
    }
}

/// Build the notifier registry from configuration.
#[must_use]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    if config.notify.log {
        registry.register(Box::new(LogNotifier));
    }
    registry
}

#[must_use]
pub fn runner_config(config: &Config) -> RunnerConfig {
    RunnerConfig {
        interval: config.poll.interval(),
        max_ticks: config.poll.max_ticks(),
    }
}

/// Build an engine over the configured store and load its state.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read.
pub async fn build_engine(config: &Config) -> Result<Engine> {
    build_engine_with(config, build_notifier_registry(config)).await
}

/// Like [`build_engine`], with a caller-assembled notifier registry.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read.
pub async fn build_engine_with(config: &Config, notifiers: NotifierRegistry) -> Result<Engine> {
    let stores = build_stores(&config.store).await?;
    let mut engine = Engine::new(
        stores.strategies,
        stores.tickets,
        Arc::new(notifiers),
        TicketFactory::new(config.engine.fallback_odds),
    );
    engine.load(config.owner.as_ref()).await?;
    Ok(engine)
}
