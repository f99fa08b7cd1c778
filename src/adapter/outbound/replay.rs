//! Replay feed: recorded snapshot batches served one per fetch.

use std::collections::VecDeque;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::snapshot::MatchSnapshot;
use crate::error::{Error, Result};
use crate::port::outbound::feed::MatchFeed;

/// Serves pre-recorded batches in order, then empty batches.
///
/// The file format is a JSON array of batches, each an array of
/// [`MatchSnapshot`]s.
pub struct ReplayFeed {
    batches: Mutex<VecDeque<Vec<MatchSnapshot>>>,
}

impl ReplayFeed {
    #[must_use]
    pub fn new(batches: Vec<Vec<MatchSnapshot>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
        }
    }

    /// Load batches from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Feed`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Feed(format!("{}: {e}", path.display())))?;
        let batches: Vec<Vec<MatchSnapshot>> = serde_json::from_str(&text)
            .map_err(|e| Error::Feed(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), batches = batches.len(), "Replay feed loaded");
        Ok(Self::new(batches))
    }

    /// Batches not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.batches.lock().len()
    }
}

#[async_trait]
impl MatchFeed for ReplayFeed {
    async fn fetch(&self) -> Result<Vec<MatchSnapshot>> {
        let batch = self.batches.lock().pop_front().unwrap_or_default();
        debug!(matches = batch.len(), remaining = self.remaining(), "Replay batch served");
        Ok(batch)
    }

    fn is_exhausted(&self) -> bool {
        self.batches.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::MatchPhase;

    #[tokio::test]
    async fn serves_batches_in_order_then_empty() {
        let feed = ReplayFeed::new(vec![
            vec![MatchSnapshot::new("a", MatchPhase::Live, 10)],
            vec![
                MatchSnapshot::new("a", MatchPhase::Live, 11),
                MatchSnapshot::new("b", MatchPhase::Live, 1),
            ],
        ]);
        assert!(!feed.is_exhausted());
        assert_eq!(feed.fetch().await.unwrap().len(), 1);
        assert_eq!(feed.fetch().await.unwrap().len(), 2);
        assert!(feed.is_exhausted());
        assert!(feed.fetch().await.unwrap().is_empty());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.json");
        std::fs::write(&path, r#"[[{"id": "m1", "phase": "1H", "minute": 12}], []]"#).unwrap();
        let feed = ReplayFeed::from_path(&path).unwrap();
        assert_eq!(feed.remaining(), 2);
    }

    #[test]
    fn bad_file_is_a_feed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.json");
        std::fs::write(&path, "[{").unwrap();
        assert!(matches!(ReplayFeed::from_path(&path), Err(Error::Feed(_))));
        assert!(matches!(
            ReplayFeed::from_path(&dir.path().join("missing.json")),
            Err(Error::Feed(_))
        ));
    }
}
