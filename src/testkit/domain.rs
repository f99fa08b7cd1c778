//! Builders for domain values used across tests.
//!
//! [`SnapshotBuilder`] starts from a kicked-off match with every counted
//! statistic at zero, so tests only set what they assert on.

use rust_decimal::Decimal;

use crate::domain::criterion::{Criterion, Operator};
use crate::domain::id::{OwnerId, StrategyId};
use crate::domain::metric::Metric;
use crate::domain::outcome::TargetOutcome;
use crate::domain::snapshot::{MatchOdds, MatchPhase, MatchSnapshot, TeamStats};
use crate::domain::strategy::Strategy;

/// Owner given to strategies built by [`strategy`].
pub const OWNER: &str = "owner-1";

/// Fluent builder for [`MatchSnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: MatchSnapshot,
}

impl SnapshotBuilder {
    /// A live match at minute 1, 0-0, all counters zero.
    pub fn new(id: &str) -> Self {
        let mut snapshot = MatchSnapshot::new(id, MatchPhase::Live, 1);
        snapshot.league = "Test League".to_string();
        snapshot.country = "Testland".to_string();
        snapshot.home_team = "Home FC".to_string();
        snapshot.away_team = "Away FC".to_string();
        snapshot.stats.home = zeroed();
        snapshot.stats.away = zeroed();
        Self { snapshot }
    }

    pub fn phase(mut self, phase: MatchPhase) -> Self {
        self.snapshot.phase = phase;
        self
    }

    pub fn minute(mut self, minute: u32) -> Self {
        self.snapshot.minute = minute;
        self
    }

    pub fn teams(mut self, home: &str, away: &str) -> Self {
        self.snapshot.home_team = home.to_string();
        self.snapshot.away_team = away.to_string();
        self
    }

    pub fn score(mut self, home: u32, away: u32) -> Self {
        self.snapshot.stats.home.goals = Some(home);
        self.snapshot.stats.away.goals = Some(away);
        self
    }

    pub fn half_time_score(mut self, home: u32, away: u32) -> Self {
        self.snapshot.stats.home.goals_first_half = Some(home);
        self.snapshot.stats.away.goals_first_half = Some(away);
        self
    }

    pub fn corners(mut self, home: u32, away: u32) -> Self {
        self.snapshot.stats.home.corners = Some(home);
        self.snapshot.stats.away.corners = Some(away);
        self
    }

    pub fn first_half_corners(mut self, home: u32, away: u32) -> Self {
        self.snapshot.stats.home.corners_first_half = Some(home);
        self.snapshot.stats.away.corners_first_half = Some(away);
        self
    }

    pub fn dangerous_attacks(mut self, home: u32, away: u32) -> Self {
        self.snapshot.stats.home.dangerous_attacks = Some(home);
        self.snapshot.stats.away.dangerous_attacks = Some(away);
        self
    }

    pub fn live_odds(mut self, odds: MatchOdds) -> Self {
        self.snapshot.live_odds = Some(odds);
        self
    }

    /// Clear every live statistic, as a feed with no coverage would.
    pub fn without_stats(mut self) -> Self {
        self.snapshot.stats.home = TeamStats::default();
        self.snapshot.stats.away = TeamStats::default();
        self
    }

    pub fn build(self) -> MatchSnapshot {
        self.snapshot
    }
}

fn zeroed() -> TeamStats {
    TeamStats {
        goals: Some(0),
        goals_first_half: Some(0),
        corners: Some(0),
        corners_first_half: Some(0),
        shots_on_target: Some(0),
        shots_off_target: Some(0),
        attacks: Some(0),
        dangerous_attacks: Some(0),
        possession: None,
        yellow_cards: Some(0),
        red_cards: Some(0),
        expected_goals: None,
    }
}

/// Live snapshot with a score.
pub fn live(id: &str, minute: u32, home: u32, away: u32) -> MatchSnapshot {
    SnapshotBuilder::new(id).minute(minute).score(home, away).build()
}

/// Full-time snapshot with a score.
pub fn finished(id: &str, home: u32, away: u32) -> MatchSnapshot {
    SnapshotBuilder::new(id)
        .phase(MatchPhase::FullTime)
        .minute(90)
        .score(home, away)
        .build()
}

/// Odds quoting only the home win.
pub fn home_win_odds(price: Decimal) -> MatchOdds {
    MatchOdds {
        home_win: Some(price),
        ..MatchOdds::default()
    }
}

pub fn criterion(metric: Metric, operator: Operator, threshold: Decimal) -> Criterion {
    Criterion::new(metric, operator, threshold)
}

/// Active strategy owned by [`OWNER`].
pub fn strategy(id: &str, criteria: Vec<Criterion>, target: TargetOutcome) -> Strategy {
    Strategy::try_new(
        StrategyId::new(id),
        OwnerId::new(OWNER),
        format!("Strategy {id}"),
        criteria,
        target,
    )
    .expect("testkit strategies have criteria")
}
