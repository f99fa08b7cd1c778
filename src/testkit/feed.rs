//! Scripted [`MatchFeed`] for driving the engine and poll loop in tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::snapshot::MatchSnapshot;
use crate::error::{Error, Result};
use crate::port::outbound::feed::MatchFeed;

/// Serves queued fetch results in order.
///
/// Once the queue is empty every fetch returns an empty batch and
/// [`is_exhausted`](MatchFeed::is_exhausted) reports true, unless the feed
/// was built [`endless`](Self::endless).
pub struct ScriptedFeed {
    results: Mutex<VecDeque<Result<Vec<MatchSnapshot>>>>,
    fetch_count: Arc<AtomicU32>,
    endless: bool,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            fetch_count: Arc::new(AtomicU32::new(0)),
            endless: false,
        }
    }

    pub fn with_batches(batches: Vec<Vec<MatchSnapshot>>) -> Self {
        let feed = Self::new();
        for batch in batches {
            feed.push_batch(batch);
        }
        feed
    }

    /// Never report exhaustion, so only shutdown or a tick limit stops a run.
    pub fn endless(mut self) -> Self {
        self.endless = true;
        self
    }

    pub fn push_batch(&self, batch: Vec<MatchSnapshot>) {
        self.results.lock().push_back(Ok(batch));
    }

    /// Queue a failing fetch.
    pub fn push_error(&self, message: &str) {
        self.results
            .lock()
            .push_back(Err(Error::Feed(message.to_string())));
    }

    /// Shared counter of fetch calls.
    pub fn fetch_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.fetch_count)
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatchFeed for ScriptedFeed {
    async fn fetch(&self) -> Result<Vec<MatchSnapshot>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.results.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn is_exhausted(&self) -> bool {
        !self.endless && self.results.lock().is_empty()
    }
}
