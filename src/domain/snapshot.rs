//! Per-tick match snapshots supplied by the data provider.
//!
//! A [`MatchSnapshot`] is an immutable read of one match at one poll. Every
//! statistic is independently optional: providers routinely omit fields for
//! lower leagues, and a missing value must stay missing rather than becoming
//! zero.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::MatchId;

/// Phase of a match as reported by the provider.
///
/// Provider short codes (`1H`, `2H`, `HT`, `FT`, `AET`, `PEN`, `PST`, `NS`)
/// are accepted as aliases when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Not yet kicked off.
    #[default]
    #[serde(alias = "NS", alias = "Scheduled")]
    Scheduled,
    /// In play (either half).
    #[serde(alias = "1H", alias = "2H", alias = "Live")]
    Live,
    /// Half-time break.
    #[serde(alias = "HT")]
    HalfTime,
    /// Finished after regulation time.
    #[serde(alias = "FT")]
    FullTime,
    /// Finished after extra time.
    #[serde(alias = "AET")]
    ExtraTime,
    /// Finished on penalties.
    #[serde(alias = "PEN")]
    Penalties,
    /// Postponed; never counts as finished.
    #[serde(alias = "PST")]
    Postponed,
}

impl MatchPhase {
    /// True once the result is final (full time, extra time or penalties).
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::FullTime | Self::ExtraTime | Self::Penalties)
    }

    /// True during the half-time break.
    #[must_use]
    pub const fn is_half_time(self) -> bool {
        matches!(self, Self::HalfTime)
    }

    /// Short code used in logs and CLI output.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Scheduled => "NS",
            Self::Live => "LIVE",
            Self::HalfTime => "HT",
            Self::FullTime => "FT",
            Self::ExtraTime => "AET",
            Self::Penalties => "PEN",
            Self::Postponed => "PST",
        }
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Home or away side of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// A scoreline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    #[must_use]
    pub const fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Combined goals of both sides, or `None` if the sum does not fit.
    #[must_use]
    pub const fn total(&self) -> Option<u32> {
        self.home.checked_add(self.away)
    }

    /// Goals for one side.
    #[must_use]
    pub const fn side(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Live in-play statistics for one side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamStats {
    pub goals: Option<u32>,
    pub goals_first_half: Option<u32>,
    pub corners: Option<u32>,
    pub corners_first_half: Option<u32>,
    pub shots_on_target: Option<u32>,
    pub shots_off_target: Option<u32>,
    pub attacks: Option<u32>,
    pub dangerous_attacks: Option<u32>,
    /// Ball possession in percent.
    pub possession: Option<Decimal>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
    pub expected_goals: Option<Decimal>,
}

/// Pre-match historical aggregates for one side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreMatchTeamStats {
    pub avg_goals_scored: Option<Decimal>,
    pub avg_goals_conceded: Option<Decimal>,
    pub avg_corners: Option<Decimal>,
    pub btts_percentage: Option<Decimal>,
    pub over_2_5_percentage: Option<Decimal>,
    pub points_per_game: Option<Decimal>,
    pub league_position: Option<u32>,
    pub clean_sheet_percentage: Option<Decimal>,
    pub failed_to_score_percentage: Option<Decimal>,
    pub avg_first_half_goals_for: Option<Decimal>,
    pub avg_second_half_goals_for: Option<Decimal>,
    pub avg_first_half_goals_against: Option<Decimal>,
    pub avg_second_half_goals_against: Option<Decimal>,
    pub avg_minute_first_goal_scored: Option<Decimal>,
    pub avg_minute_first_goal_conceded: Option<Decimal>,
    /// Last five results, most recent last (e.g. `"WWDLW"`).
    pub last_5_form: Option<String>,
}

/// Betting markets priced in [`MatchOdds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddsMarket {
    HomeWin,
    Draw,
    AwayWin,
    Over25,
    Under25,
    BttsYes,
}

/// Decimal odds for the main markets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOdds {
    pub home_win: Option<Decimal>,
    pub draw: Option<Decimal>,
    pub away_win: Option<Decimal>,
    pub over_2_5: Option<Decimal>,
    pub under_2_5: Option<Decimal>,
    pub btts_yes: Option<Decimal>,
}

impl MatchOdds {
    /// Price for a market, if quoted.
    ///
    /// Providers use `0` for "not offered"; non-positive prices are treated as
    /// unavailable.
    #[must_use]
    pub fn price(&self, market: OddsMarket) -> Option<Decimal> {
        let raw = match market {
            OddsMarket::HomeWin => self.home_win,
            OddsMarket::Draw => self.draw,
            OddsMarket::AwayWin => self.away_win,
            OddsMarket::Over25 => self.over_2_5,
            OddsMarket::Under25 => self.under_2_5,
            OddsMarket::BttsYes => self.btts_yes,
        };
        raw.filter(|price| *price > Decimal::ZERO)
    }
}

/// Home and away live statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveStats {
    pub home: TeamStats,
    pub away: TeamStats,
}

impl LiveStats {
    #[must_use]
    pub fn side(&self, side: Side) -> &TeamStats {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// Home and away pre-match aggregates plus opening odds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreMatch {
    pub home: PreMatchTeamStats,
    pub away: PreMatchTeamStats,
    pub odds: Option<MatchOdds>,
}

impl PreMatch {
    #[must_use]
    pub fn side(&self, side: Side) -> &PreMatchTeamStats {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// One poll's read of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub id: MatchId,
    #[serde(default)]
    pub league: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub phase: MatchPhase,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub stats: LiveStats,
    #[serde(default)]
    pub live_odds: Option<MatchOdds>,
    #[serde(default)]
    pub pre_match: PreMatch,
}

impl MatchSnapshot {
    /// Create a snapshot with no statistics.
    pub fn new(id: impl Into<MatchId>, phase: MatchPhase, minute: u32) -> Self {
        Self {
            id: id.into(),
            league: String::new(),
            country: String::new(),
            home_team: String::new(),
            away_team: String::new(),
            phase,
            minute,
            stats: LiveStats::default(),
            live_odds: None,
            pre_match: PreMatch::default(),
        }
    }

    /// Current scoreline, when both sides' goals are reported.
    #[must_use]
    pub fn score(&self) -> Option<Score> {
        Some(Score::new(self.stats.home.goals?, self.stats.away.goals?))
    }

    /// First-half scoreline.
    ///
    /// Uses the dedicated first-half fields when present. During the
    /// half-time break the current score is the half-time score, so it is
    /// used when those fields are absent.
    #[must_use]
    pub fn half_time_score(&self) -> Option<Score> {
        let reported = self
            .stats
            .home
            .goals_first_half
            .zip(self.stats.away.goals_first_half)
            .map(|(home, away)| Score::new(home, away));
        match reported {
            Some(score) => Some(score),
            None if self.phase.is_half_time() => self.score(),
            None => None,
        }
    }

    /// Combined corners, when both sides are reported and the sum fits.
    #[must_use]
    pub fn total_corners(&self) -> Option<u32> {
        self.stats.home.corners?.checked_add(self.stats.away.corners?)
    }

    /// Combined first-half corners, with the same half-time fallback as
    /// [`half_time_score`](Self::half_time_score).
    #[must_use]
    pub fn first_half_corners(&self) -> Option<u32> {
        let reported = self
            .stats
            .home
            .corners_first_half
            .zip(self.stats.away.corners_first_half)
            .and_then(|(home, away)| home.checked_add(away));
        match reported {
            Some(total) => Some(total),
            None if self.phase.is_half_time() => self.total_corners(),
            None => None,
        }
    }

    /// Human-readable fixture label (`Home vs Away`).
    #[must_use]
    pub fn fixture(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn finished_phases() {
        assert!(MatchPhase::FullTime.is_finished());
        assert!(MatchPhase::ExtraTime.is_finished());
        assert!(MatchPhase::Penalties.is_finished());
        assert!(!MatchPhase::HalfTime.is_finished());
        assert!(!MatchPhase::Live.is_finished());
        assert!(!MatchPhase::Postponed.is_finished());
    }

    #[test]
    fn phase_accepts_provider_short_codes() {
        let phase: MatchPhase = serde_json::from_str("\"HT\"").unwrap();
        assert_eq!(phase, MatchPhase::HalfTime);
        let phase: MatchPhase = serde_json::from_str("\"2H\"").unwrap();
        assert_eq!(phase, MatchPhase::Live);
        let phase: MatchPhase = serde_json::from_str("\"full_time\"").unwrap();
        assert_eq!(phase, MatchPhase::FullTime);
    }

    #[test]
    fn score_requires_both_sides() {
        let mut snapshot = MatchSnapshot::new("m1", MatchPhase::Live, 30);
        snapshot.stats.home.goals = Some(1);
        assert_eq!(snapshot.score(), None);

        snapshot.stats.away.goals = Some(0);
        assert_eq!(snapshot.score(), Some(Score::new(1, 0)));
    }

    #[test]
    fn half_time_score_falls_back_to_current_score_only_at_the_break() {
        let mut snapshot = MatchSnapshot::new("m1", MatchPhase::HalfTime, 45);
        snapshot.stats.home.goals = Some(2);
        snapshot.stats.away.goals = Some(1);
        assert_eq!(snapshot.half_time_score(), Some(Score::new(2, 1)));

        snapshot.phase = MatchPhase::Live;
        assert_eq!(snapshot.half_time_score(), None);

        snapshot.stats.home.goals_first_half = Some(1);
        snapshot.stats.away.goals_first_half = Some(1);
        assert_eq!(snapshot.half_time_score(), Some(Score::new(1, 1)));
    }

    #[test]
    fn zero_odds_are_unavailable() {
        let odds = MatchOdds {
            home_win: Some(dec!(0)),
            draw: Some(dec!(3.40)),
            ..Default::default()
        };
        assert_eq!(odds.price(OddsMarket::HomeWin), None);
        assert_eq!(odds.price(OddsMarket::Draw), Some(dec!(3.40)));
        assert_eq!(odds.price(OddsMarket::BttsYes), None);
    }

    #[test]
    fn snapshot_deserializes_with_missing_sections() {
        let json = r#"{"id": "m9", "phase": "FT", "minute": 90,
            "stats": {"home": {"goals": 2}, "away": {"goals": 1, "corners": 4}}}"#;
        let snapshot: MatchSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.phase, MatchPhase::FullTime);
        assert_eq!(snapshot.score(), Some(Score::new(2, 1)));
        assert_eq!(snapshot.stats.home.corners, None);
        assert!(snapshot.live_odds.is_none());
    }

    #[test]
    fn totals_that_overflow_are_unknown() {
        assert_eq!(Score::new(u32::MAX, 1).total(), None);
        assert_eq!(Score::new(2, 1).total(), Some(3));

        let mut snapshot = MatchSnapshot::new("m1", MatchPhase::HalfTime, 45);
        snapshot.stats.home.corners = Some(u32::MAX);
        snapshot.stats.away.corners = Some(1);
        assert_eq!(snapshot.total_corners(), None);
        assert_eq!(snapshot.first_half_corners(), None);

        snapshot.stats.home.corners_first_half = Some(u32::MAX);
        snapshot.stats.away.corners_first_half = Some(u32::MAX);
        assert_eq!(snapshot.first_half_corners(), None);
    }
}
