//! Append-only record of the matches a strategy has already fired on.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::MatchId;

/// Matches a strategy has triggered on, in first-trigger order.
///
/// Entries are never removed. Membership is O(1); iteration follows
/// insertion order. Serialized as a plain list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggeredMatches {
    order: Vec<MatchId>,
    seen: HashSet<MatchId>,
}

impl TriggeredMatches {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trigger. Returns `false` if the match was already recorded.
    pub fn mark(&mut self, match_id: MatchId) -> bool {
        if !self.seen.insert(match_id.clone()) {
            return false;
        }
        self.order.push(match_id);
        true
    }

    #[must_use]
    pub fn contains(&self, match_id: &MatchId) -> bool {
        self.seen.contains(match_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchId> {
        self.order.iter()
    }
}

impl FromIterator<MatchId> for TriggeredMatches {
    fn from_iter<I: IntoIterator<Item = MatchId>>(iter: I) -> Self {
        let mut triggered = Self::new();
        for match_id in iter {
            triggered.mark(match_id);
        }
        triggered
    }
}

impl Serialize for TriggeredMatches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TriggeredMatches {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<MatchId>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}
