//! Match data port.

use async_trait::async_trait;

use crate::domain::snapshot::MatchSnapshot;
use crate::error::Result;

/// Source of live match snapshots, polled once per tick.
///
/// A batch holds every match the provider currently reports. Matches may
/// appear and disappear between batches.
#[async_trait]
pub trait MatchFeed: Send + Sync {
    /// Fetch the current batch.
    async fn fetch(&self) -> Result<Vec<MatchSnapshot>>;

    /// True when the feed will never produce another non-empty batch.
    ///
    /// Live feeds never run dry; recorded feeds do.
    fn is_exhausted(&self) -> bool {
        false
    }
}
