//! Strategy matching: the AND of every criterion, at most once per match.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::criterion::CriterionCheck;
use crate::domain::id::StrategyId;
use crate::domain::snapshot::MatchSnapshot;
use crate::domain::strategy::Strategy;

/// Reason a strategy can never match, whatever the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligible {
    Inactive,
    NoCriteria,
    InvalidCriterion(String),
}

/// Check the parts of a strategy that do not depend on the snapshot.
pub fn eligibility(strategy: &Strategy) -> Result<(), Ineligible> {
    if !strategy.is_active() {
        return Err(Ineligible::Inactive);
    }
    if strategy.criteria().is_empty() {
        return Err(Ineligible::NoCriteria);
    }
    for criterion in strategy.criteria() {
        if criterion.metric.known().is_none() || criterion.operator.known().is_none() {
            return Err(Ineligible::InvalidCriterion(criterion.to_string()));
        }
    }
    Ok(())
}

/// Data-quality warnings already written, one per strategy.
///
/// Criteria never change while a strategy is loaded, so a strategy that is
/// broken on one poll is broken on every poll.
#[derive(Debug, Default)]
pub struct IneligibleWarnings {
    reported: HashSet<StrategyId>,
}

impl IneligibleWarnings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `reason` unless this strategy was already reported. Inactive
    /// strategies are skipped silently. Returns true if a warning was written.
    pub fn report(&mut self, strategy: &Strategy, reason: &Ineligible) -> bool {
        if *reason == Ineligible::Inactive || !self.reported.insert(strategy.id().clone()) {
            return false;
        }
        match reason {
            Ineligible::NoCriteria => warn!(
                strategy_id = %strategy.id(),
                strategy = %strategy.name(),
                "Strategy has no criteria and can never match"
            ),
            Ineligible::InvalidCriterion(criterion) => warn!(
                strategy_id = %strategy.id(),
                strategy = %strategy.name(),
                criterion = %criterion,
                "Strategy references an unknown metric or operator and can never match"
            ),
            Ineligible::Inactive => {}
        }
        true
    }
}

/// True when `strategy` should fire on `snapshot` now.
///
/// Fails closed: an ineligible strategy, an already-triggered match, or any
/// criterion that is missing data all give `false`.
#[must_use]
pub fn matches(strategy: &Strategy, snapshot: &MatchSnapshot) -> bool {
    if !strategy.is_active() || strategy.criteria().is_empty() {
        return false;
    }
    if strategy.has_triggered(&snapshot.id) {
        return false;
    }
    strategy
        .criteria()
        .iter()
        .all(|criterion| match criterion.check(snapshot) {
            CriterionCheck::Pass => true,
            CriterionCheck::Fail | CriterionCheck::Invalid { .. } => false,
        })
}
