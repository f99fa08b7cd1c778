//! User-defined strategies: a conjunction of criteria and the bet to place.

use serde::{Deserialize, Serialize};

use super::criterion::Criterion;
use super::error::DomainError;
use super::id::{MatchId, OwnerId, StrategyId};
use super::outcome::TargetOutcome;
use super::performance::PerformanceStats;
use super::trigger::TriggeredMatches;

/// A strategy owned by one user.
///
/// Criteria are immutable once saved. The triggered set only grows, and the
/// performance block is always re-derived from ticket history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    id: StrategyId,
    owner: OwnerId,
    name: String,
    #[serde(default = "default_active")]
    active: bool,
    criteria: Vec<Criterion>,
    target_outcome: TargetOutcome,
    #[serde(default)]
    triggered_matches: TriggeredMatches,
    #[serde(default)]
    performance: PerformanceStats,
}

fn default_active() -> bool {
    true
}

impl Strategy {
    /// Create an active strategy.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyCriteria`] if `criteria` is empty.
    pub fn try_new(
        id: StrategyId,
        owner: OwnerId,
        name: impl Into<String>,
        criteria: Vec<Criterion>,
        target_outcome: TargetOutcome,
    ) -> Result<Self, DomainError> {
        if criteria.is_empty() {
            return Err(DomainError::EmptyCriteria);
        }
        Ok(Self {
            id,
            owner,
            name: name.into(),
            active: true,
            criteria,
            target_outcome,
            triggered_matches: TriggeredMatches::new(),
            performance: PerformanceStats::default(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &StrategyId {
        &self.id
    }

    #[must_use]
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    #[must_use]
    pub fn target_outcome(&self) -> TargetOutcome {
        self.target_outcome
    }

    #[must_use]
    pub fn triggered_matches(&self) -> &TriggeredMatches {
        &self.triggered_matches
    }

    #[must_use]
    pub fn has_triggered(&self, match_id: &MatchId) -> bool {
        self.triggered_matches.contains(match_id)
    }

    /// Record a trigger on `match_id`. Returns `false` if already recorded.
    pub fn mark_triggered(&mut self, match_id: MatchId) -> bool {
        self.triggered_matches.mark(match_id)
    }

    #[must_use]
    pub fn performance(&self) -> &PerformanceStats {
        &self.performance
    }

    pub fn set_performance(&mut self, performance: PerformanceStats) {
        self.performance = performance;
    }
}
