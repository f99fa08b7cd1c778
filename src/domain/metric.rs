//! Metric catalogue and resolution against match snapshots.
//!
//! Every metric a criterion can reference is listed once in the `metrics!`
//! table below: its stable id, its display label and the [`Formula`] that
//! computes it. Resolution is a match over [`Formula`], so adding a metric
//! family forces every consumer to handle it.
//!
//! Resolution is null-safe: a value is only produced when every operand the
//! formula needs was reported by the provider.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;
use super::snapshot::{MatchSnapshot, OddsMarket, PreMatchTeamStats, Side, TeamStats};

/// Live per-side statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveStat {
    Goals,
    HalfTimeGoals,
    ExpectedGoals,
    Corners,
    HalfTimeCorners,
    ShotsOnTarget,
    ShotsOffTarget,
    Attacks,
    DangerousAttacks,
    Possession,
    YellowCards,
    RedCards,
}

impl LiveStat {
    /// Read this statistic for one side.
    #[must_use]
    pub fn read(self, stats: &TeamStats) -> Option<Decimal> {
        let count = |value: Option<u32>| value.map(Decimal::from);
        match self {
            Self::Goals => count(stats.goals),
            Self::HalfTimeGoals => count(stats.goals_first_half),
            Self::ExpectedGoals => stats.expected_goals,
            Self::Corners => count(stats.corners),
            Self::HalfTimeCorners => count(stats.corners_first_half),
            Self::ShotsOnTarget => count(stats.shots_on_target),
            Self::ShotsOffTarget => count(stats.shots_off_target),
            Self::Attacks => count(stats.attacks),
            Self::DangerousAttacks => count(stats.dangerous_attacks),
            Self::Possession => stats.possession,
            Self::YellowCards => count(stats.yellow_cards),
            Self::RedCards => count(stats.red_cards),
        }
    }

    /// Statistics that only describe the first half.
    #[must_use]
    pub const fn is_half_time(self) -> bool {
        matches!(self, Self::HalfTimeGoals | Self::HalfTimeCorners)
    }
}

/// Pre-match historical aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreStat {
    AvgGoalsScored,
    AvgGoalsConceded,
    AvgCorners,
    BttsPercentage,
    Over25Percentage,
    PointsPerGame,
    LeaguePosition,
    CleanSheetPercentage,
    FailedToScorePercentage,
    AvgFirstHalfGoalsFor,
    AvgSecondHalfGoalsFor,
    AvgFirstHalfGoalsAgainst,
    AvgSecondHalfGoalsAgainst,
    AvgMinuteFirstGoalScored,
    AvgMinuteFirstGoalConceded,
}

impl PreStat {
    /// Read this aggregate for one side.
    #[must_use]
    pub fn read(self, stats: &PreMatchTeamStats) -> Option<Decimal> {
        match self {
            Self::AvgGoalsScored => stats.avg_goals_scored,
            Self::AvgGoalsConceded => stats.avg_goals_conceded,
            Self::AvgCorners => stats.avg_corners,
            Self::BttsPercentage => stats.btts_percentage,
            Self::Over25Percentage => stats.over_2_5_percentage,
            Self::PointsPerGame => stats.points_per_game,
            Self::LeaguePosition => stats.league_position.map(Decimal::from),
            Self::CleanSheetPercentage => stats.clean_sheet_percentage,
            Self::FailedToScorePercentage => stats.failed_to_score_percentage,
            Self::AvgFirstHalfGoalsFor => stats.avg_first_half_goals_for,
            Self::AvgSecondHalfGoalsFor => stats.avg_second_half_goals_for,
            Self::AvgFirstHalfGoalsAgainst => stats.avg_first_half_goals_against,
            Self::AvgSecondHalfGoalsAgainst => stats.avg_second_half_goals_against,
            Self::AvgMinuteFirstGoalScored => stats.avg_minute_first_goal_scored,
            Self::AvgMinuteFirstGoalConceded => stats.avg_minute_first_goal_conceded,
        }
    }
}

/// How a metric is computed from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formula {
    /// Current match minute.
    Minute,
    /// Live statistic for one side.
    Live(Side, LiveStat),
    /// Sum of a live statistic over both sides.
    LiveTotal(LiveStat),
    /// Home goals minus away goals.
    GoalDifference,
    /// Pre-match aggregate for one side.
    PreMatch(Side, PreStat),
    /// Larger of the two sides' pre-match aggregates.
    PreMatchAny(PreStat),
    /// In-play odds for a market.
    LiveOdds(OddsMarket),
    /// Pre-match odds for a market.
    PreMatchOdds(OddsMarket),
}

impl Formula {
    /// Compute the value, or `None` if any operand is missing.
    #[must_use]
    pub fn resolve(self, snapshot: &MatchSnapshot) -> Option<Decimal> {
        let live = &snapshot.stats;
        let pre = &snapshot.pre_match;
        match self {
            Self::Minute => Some(Decimal::from(snapshot.minute)),
            Self::Live(side, stat) => stat.read(live.side(side)),
            Self::LiveTotal(stat) => stat.read(&live.home)?.checked_add(stat.read(&live.away)?),
            Self::GoalDifference => {
                let home = LiveStat::Goals.read(&live.home)?;
                let away = LiveStat::Goals.read(&live.away)?;
                Some(home - away)
            }
            Self::PreMatch(side, stat) => stat.read(pre.side(side)),
            Self::PreMatchAny(stat) => {
                let home = stat.read(&pre.home)?;
                let away = stat.read(&pre.away)?;
                Some(home.max(away))
            }
            Self::LiveOdds(market) => snapshot.live_odds.as_ref()?.price(market),
            Self::PreMatchOdds(market) => pre.odds.as_ref()?.price(market),
        }
    }

    /// True when the formula only describes the first half.
    #[must_use]
    pub const fn is_half_time_scoped(self) -> bool {
        match self {
            Self::Live(_, stat) | Self::LiveTotal(stat) => stat.is_half_time(),
            _ => false,
        }
    }
}

macro_rules! metrics {
    ($($variant:ident => $id:literal, $label:literal, $formula:expr;)+) => {
        /// A metric a criterion can compare against a threshold.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Metric {
            $($variant,)+
        }

        impl Metric {
            /// Every metric, in catalogue order.
            pub const ALL: &'static [Metric] = &[$(Metric::$variant,)+];

            /// Stable identifier used in stored strategies.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Metric::$variant => $id,)+
                }
            }

            /// Display label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Metric::$variant => $label,)+
                }
            }

            /// Formula computing this metric.
            #[must_use]
            pub const fn formula(self) -> Formula {
                match self {
                    $(Metric::$variant => $formula,)+
                }
            }
        }
    };
}

metrics! {
    Minute => "TIME", "Time (Minute)", Formula::Minute;

    GoalsHome => "GOALS_HOME", "Live Home Goals", Formula::Live(Side::Home, LiveStat::Goals);
    GoalsAway => "GOALS_AWAY", "Live Away Goals", Formula::Live(Side::Away, LiveStat::Goals);
    GoalsTotal => "GOALS_TOTAL", "Live Total Goals", Formula::LiveTotal(LiveStat::Goals);
    GoalDifference => "GOAL_DIFF", "Live Goal Difference", Formula::GoalDifference;

    HtGoalsHome => "HT_GOALS_HOME", "Live Home Goals (HT)", Formula::Live(Side::Home, LiveStat::HalfTimeGoals);
    HtGoalsAway => "HT_GOALS_AWAY", "Live Away Goals (HT)", Formula::Live(Side::Away, LiveStat::HalfTimeGoals);
    HtGoalsTotal => "HT_GOALS_TOTAL", "Live Total Goals (HT)", Formula::LiveTotal(LiveStat::HalfTimeGoals);

    OddsHomeWin => "ODDS_HOME_WIN", "Live Odds: Home Win", Formula::LiveOdds(OddsMarket::HomeWin);
    OddsAwayWin => "ODDS_AWAY_WIN", "Live Odds: Away Win", Formula::LiveOdds(OddsMarket::AwayWin);
    OddsDraw => "ODDS_DRAW", "Live Odds: Draw", Formula::LiveOdds(OddsMarket::Draw);
    OddsOver25 => "ODDS_OVER_25", "Live Odds: Over 2.5", Formula::LiveOdds(OddsMarket::Over25);
    OddsUnder25 => "ODDS_UNDER_25", "Live Odds: Under 2.5", Formula::LiveOdds(OddsMarket::Under25);
    OddsBttsYes => "ODDS_BTTS_YES", "Live Odds: BTTS Yes", Formula::LiveOdds(OddsMarket::BttsYes);

    XgHome => "XG_HOME", "Live Home xG", Formula::Live(Side::Home, LiveStat::ExpectedGoals);
    XgAway => "XG_AWAY", "Live Away xG", Formula::Live(Side::Away, LiveStat::ExpectedGoals);
    XgTotal => "XG_TOTAL", "Live Total xG", Formula::LiveTotal(LiveStat::ExpectedGoals);

    CornersHome => "CORNERS_HOME", "Live Home Corners", Formula::Live(Side::Home, LiveStat::Corners);
    CornersAway => "CORNERS_AWAY", "Live Away Corners", Formula::Live(Side::Away, LiveStat::Corners);
    CornersTotal => "CORNERS_TOTAL", "Live Total Corners", Formula::LiveTotal(LiveStat::Corners);

    HtCornersHome => "HT_CORNERS_HOME", "Live Home Corners (HT)", Formula::Live(Side::Home, LiveStat::HalfTimeCorners);
    HtCornersAway => "HT_CORNERS_AWAY", "Live Away Corners (HT)", Formula::Live(Side::Away, LiveStat::HalfTimeCorners);
    HtCornersTotal => "HT_CORNERS_TOTAL", "Live Total Corners (HT)", Formula::LiveTotal(LiveStat::HalfTimeCorners);

    ShotsOnHome => "SHOTS_ON_HOME", "Live Home Shots On Target", Formula::Live(Side::Home, LiveStat::ShotsOnTarget);
    ShotsOnAway => "SHOTS_ON_AWAY", "Live Away Shots On Target", Formula::Live(Side::Away, LiveStat::ShotsOnTarget);
    ShotsOnTotal => "SHOTS_ON_TOTAL", "Live Total Shots On Target", Formula::LiveTotal(LiveStat::ShotsOnTarget);
    ShotsOffHome => "SHOTS_OFF_HOME", "Live Home Shots Off Target", Formula::Live(Side::Home, LiveStat::ShotsOffTarget);
    ShotsOffAway => "SHOTS_OFF_AWAY", "Live Away Shots Off Target", Formula::Live(Side::Away, LiveStat::ShotsOffTarget);
    ShotsOffTotal => "SHOTS_OFF_TOTAL", "Live Total Shots Off Target", Formula::LiveTotal(LiveStat::ShotsOffTarget);

    AttacksHome => "ATTACKS_HOME", "Live Home Attacks", Formula::Live(Side::Home, LiveStat::Attacks);
    AttacksAway => "ATTACKS_AWAY", "Live Away Attacks", Formula::Live(Side::Away, LiveStat::Attacks);
    AttacksTotal => "ATTACKS_TOTAL", "Live Total Attacks", Formula::LiveTotal(LiveStat::Attacks);
    DangerousAttacksHome => "DA_HOME", "Live Home Dangerous Attacks", Formula::Live(Side::Home, LiveStat::DangerousAttacks);
    DangerousAttacksAway => "DA_AWAY", "Live Away Dangerous Attacks", Formula::Live(Side::Away, LiveStat::DangerousAttacks);
    DangerousAttacksTotal => "DA_TOTAL", "Live Total Dangerous Attacks", Formula::LiveTotal(LiveStat::DangerousAttacks);

    PossessionHome => "POSSESSION_HOME", "Live Home Possession %", Formula::Live(Side::Home, LiveStat::Possession);
    PossessionAway => "POSSESSION_AWAY", "Live Away Possession %", Formula::Live(Side::Away, LiveStat::Possession);

    YellowHome => "YELLOW_HOME", "Live Home Yellow Cards", Formula::Live(Side::Home, LiveStat::YellowCards);
    YellowAway => "YELLOW_AWAY", "Live Away Yellow Cards", Formula::Live(Side::Away, LiveStat::YellowCards);
    YellowTotal => "YELLOW_TOTAL", "Live Total Yellow Cards", Formula::LiveTotal(LiveStat::YellowCards);
    RedHome => "RED_HOME", "Live Home Red Cards", Formula::Live(Side::Home, LiveStat::RedCards);
    RedAway => "RED_AWAY", "Live Away Red Cards", Formula::Live(Side::Away, LiveStat::RedCards);
    RedTotal => "RED_TOTAL", "Live Total Red Cards", Formula::LiveTotal(LiveStat::RedCards);

    PreOddsHomeWin => "PRE_ODDS_HOME_WIN", "Pre-Odds: Home Win", Formula::PreMatchOdds(OddsMarket::HomeWin);
    PreOddsAwayWin => "PRE_ODDS_AWAY_WIN", "Pre-Odds: Away Win", Formula::PreMatchOdds(OddsMarket::AwayWin);
    PreOddsDraw => "PRE_ODDS_DRAW", "Pre-Odds: Draw", Formula::PreMatchOdds(OddsMarket::Draw);
    PreOddsOver25 => "PRE_ODDS_OVER_25", "Pre-Odds: Over 2.5", Formula::PreMatchOdds(OddsMarket::Over25);

    PreAvgGoalsScoredHome => "PRE_AVG_GOALS_SCORED_HOME", "Pre: Avg Goals Scored (Home)", Formula::PreMatch(Side::Home, PreStat::AvgGoalsScored);
    PreAvgGoalsScoredAway => "PRE_AVG_GOALS_SCORED_AWAY", "Pre: Avg Goals Scored (Away)", Formula::PreMatch(Side::Away, PreStat::AvgGoalsScored);
    PreAvgGoalsScoredAny => "PRE_AVG_GOALS_SCORED_ANY", "Pre: Avg Goals Scored (ANY)", Formula::PreMatchAny(PreStat::AvgGoalsScored);
    PreAvgGoalsConcededHome => "PRE_AVG_GOALS_CONCEDED_HOME", "Pre: Avg Goals Conceded (Home)", Formula::PreMatch(Side::Home, PreStat::AvgGoalsConceded);
    PreAvgGoalsConcededAway => "PRE_AVG_GOALS_CONCEDED_AWAY", "Pre: Avg Goals Conceded (Away)", Formula::PreMatch(Side::Away, PreStat::AvgGoalsConceded);
    PreAvgGoalsConcededAny => "PRE_AVG_GOALS_CONCEDED_ANY", "Pre: Avg Goals Conceded (ANY)", Formula::PreMatchAny(PreStat::AvgGoalsConceded);

    PrePpgHome => "PRE_PPG_HOME", "Pre: PPG (Home)", Formula::PreMatch(Side::Home, PreStat::PointsPerGame);
    PrePpgAway => "PRE_PPG_AWAY", "Pre: PPG (Away)", Formula::PreMatch(Side::Away, PreStat::PointsPerGame);
    PreLeaguePosHome => "PRE_LEAGUE_POS_HOME", "Pre: League Position (Home)", Formula::PreMatch(Side::Home, PreStat::LeaguePosition);
    PreLeaguePosAway => "PRE_LEAGUE_POS_AWAY", "Pre: League Position (Away)", Formula::PreMatch(Side::Away, PreStat::LeaguePosition);
    PreCleanSheetHome => "PRE_CLEAN_SHEET_HOME", "Pre: Clean Sheet % (Home)", Formula::PreMatch(Side::Home, PreStat::CleanSheetPercentage);
    PreCleanSheetAway => "PRE_CLEAN_SHEET_AWAY", "Pre: Clean Sheet % (Away)", Formula::PreMatch(Side::Away, PreStat::CleanSheetPercentage);
    PreFailedScoreHome => "PRE_FAILED_SCORE_HOME", "Pre: Failed to Score % (Home)", Formula::PreMatch(Side::Home, PreStat::FailedToScorePercentage);
    PreFailedScoreAway => "PRE_FAILED_SCORE_AWAY", "Pre: Failed to Score % (Away)", Formula::PreMatch(Side::Away, PreStat::FailedToScorePercentage);

    PreBttsHome => "PRE_BTTS_HOME", "Pre: BTTS % (Home)", Formula::PreMatch(Side::Home, PreStat::BttsPercentage);
    PreBttsAway => "PRE_BTTS_AWAY", "Pre: BTTS % (Away)", Formula::PreMatch(Side::Away, PreStat::BttsPercentage);
    PreBttsAny => "PRE_BTTS_ANY", "Pre: BTTS % (ANY)", Formula::PreMatchAny(PreStat::BttsPercentage);
    PreOver25Home => "PRE_OVER25_HOME", "Pre: Over 2.5 % (Home)", Formula::PreMatch(Side::Home, PreStat::Over25Percentage);
    PreOver25Away => "PRE_OVER25_AWAY", "Pre: Over 2.5 % (Away)", Formula::PreMatch(Side::Away, PreStat::Over25Percentage);
    PreOver25Any => "PRE_OVER25_ANY", "Pre: Over 2.5 % (ANY)", Formula::PreMatchAny(PreStat::Over25Percentage);

    PreAvgFirstHalfGoalsForHome => "PRE_AVG_1ST_HALF_GOALS_FOR_HOME", "Pre: Avg 1H Goals For (Home)", Formula::PreMatch(Side::Home, PreStat::AvgFirstHalfGoalsFor);
    PreAvgFirstHalfGoalsForAway => "PRE_AVG_1ST_HALF_GOALS_FOR_AWAY", "Pre: Avg 1H Goals For (Away)", Formula::PreMatch(Side::Away, PreStat::AvgFirstHalfGoalsFor);
    PreAvgFirstHalfGoalsForAny => "PRE_AVG_1ST_HALF_GOALS_FOR_ANY", "Pre: Avg 1H Goals For (ANY)", Formula::PreMatchAny(PreStat::AvgFirstHalfGoalsFor);
    PreAvgSecondHalfGoalsForHome => "PRE_AVG_2ND_HALF_GOALS_FOR_HOME", "Pre: Avg 2H Goals For (Home)", Formula::PreMatch(Side::Home, PreStat::AvgSecondHalfGoalsFor);
    PreAvgSecondHalfGoalsForAway => "PRE_AVG_2ND_HALF_GOALS_FOR_AWAY", "Pre: Avg 2H Goals For (Away)", Formula::PreMatch(Side::Away, PreStat::AvgSecondHalfGoalsFor);
    PreAvgSecondHalfGoalsForAny => "PRE_AVG_2ND_HALF_GOALS_FOR_ANY", "Pre: Avg 2H Goals For (ANY)", Formula::PreMatchAny(PreStat::AvgSecondHalfGoalsFor);
    PreAvgFirstHalfGoalsAgainstHome => "PRE_AVG_1ST_HALF_GOALS_AGAINST_HOME", "Pre: Avg 1H Goals Agst (Home)", Formula::PreMatch(Side::Home, PreStat::AvgFirstHalfGoalsAgainst);
    PreAvgFirstHalfGoalsAgainstAway => "PRE_AVG_1ST_HALF_GOALS_AGAINST_AWAY", "Pre: Avg 1H Goals Agst (Away)", Formula::PreMatch(Side::Away, PreStat::AvgFirstHalfGoalsAgainst);
    PreAvgFirstHalfGoalsAgainstAny => "PRE_AVG_1ST_HALF_GOALS_AGAINST_ANY", "Pre: Avg 1H Goals Agst (ANY)", Formula::PreMatchAny(PreStat::AvgFirstHalfGoalsAgainst);
    PreAvgSecondHalfGoalsAgainstHome => "PRE_AVG_2ND_HALF_GOALS_AGAINST_HOME", "Pre: Avg 2H Goals Agst (Home)", Formula::PreMatch(Side::Home, PreStat::AvgSecondHalfGoalsAgainst);
    PreAvgSecondHalfGoalsAgainstAway => "PRE_AVG_2ND_HALF_GOALS_AGAINST_AWAY", "Pre: Avg 2H Goals Agst (Away)", Formula::PreMatch(Side::Away, PreStat::AvgSecondHalfGoalsAgainst);
    PreAvgSecondHalfGoalsAgainstAny => "PRE_AVG_2ND_HALF_GOALS_AGAINST_ANY", "Pre: Avg 2H Goals Agst (ANY)", Formula::PreMatchAny(PreStat::AvgSecondHalfGoalsAgainst);

    PreAvgMinuteFirstGoalHome => "PRE_AVG_TIME_1ST_GOAL_HOME", "Pre: Avg Min 1st Goal (Home)", Formula::PreMatch(Side::Home, PreStat::AvgMinuteFirstGoalScored);
    PreAvgMinuteFirstGoalAway => "PRE_AVG_TIME_1ST_GOAL_AWAY", "Pre: Avg Min 1st Goal (Away)", Formula::PreMatch(Side::Away, PreStat::AvgMinuteFirstGoalScored);
    PreAvgMinuteFirstConcededHome => "PRE_AVG_TIME_1ST_CONCEDED_HOME", "Pre: Avg Min 1st Conceded (Home)", Formula::PreMatch(Side::Home, PreStat::AvgMinuteFirstGoalConceded);
    PreAvgMinuteFirstConcededAway => "PRE_AVG_TIME_1ST_CONCEDED_AWAY", "Pre: Avg Min 1st Conceded (Away)", Formula::PreMatch(Side::Away, PreStat::AvgMinuteFirstGoalConceded);

    PreAvgCornersHome => "PRE_AVG_CORNERS_HOME", "Pre: Avg Corners (Home)", Formula::PreMatch(Side::Home, PreStat::AvgCorners);
    PreAvgCornersAway => "PRE_AVG_CORNERS_AWAY", "Pre: Avg Corners (Away)", Formula::PreMatch(Side::Away, PreStat::AvgCorners);
    PreAvgCornersAny => "PRE_AVG_CORNERS_ANY", "Pre: Avg Corners (ANY)", Formula::PreMatchAny(PreStat::AvgCorners);
}

impl Metric {
    /// Resolve this metric against a snapshot.
    ///
    /// Phase-agnostic: half-time scoped metrics resolve in any phase, gating
    /// is the matcher's job.
    #[must_use]
    pub fn resolve(self, snapshot: &MatchSnapshot) -> Option<Decimal> {
        self.formula().resolve(snapshot)
    }

    /// True for metrics that only apply during the half-time break.
    #[must_use]
    pub const fn is_half_time_scoped(self) -> bool {
        self.formula().is_half_time_scoped()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = DomainError;

    /// Accepts the stable id (case-insensitive) or the exact display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(s) || metric.label() == s)
            .ok_or_else(|| DomainError::UnknownMetric(s.to_string()))
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::snapshot::{MatchOdds, MatchPhase};
    use rust_decimal_macros::dec;

    fn snapshot() -> MatchSnapshot {
        let mut snapshot = MatchSnapshot::new("m1", MatchPhase::Live, 75);
        snapshot.stats.home.goals = Some(2);
        snapshot.stats.away.goals = Some(1);
        snapshot.stats.home.dangerous_attacks = Some(25);
        snapshot.stats.away.dangerous_attacks = Some(15);
        snapshot.stats.home.expected_goals = Some(dec!(1.45));
        snapshot.pre_match.home.btts_percentage = Some(dec!(60));
        snapshot.pre_match.away.btts_percentage = Some(dec!(72));
        snapshot
    }

    #[test]
    fn ids_and_labels_are_unique() {
        let ids: HashSet<_> = Metric::ALL.iter().map(|m| m.as_str()).collect();
        let labels: HashSet<_> = Metric::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(ids.len(), Metric::ALL.len());
        assert_eq!(labels.len(), Metric::ALL.len());
    }

    #[test]
    fn direct_and_derived_live_stats() {
        let snapshot = snapshot();
        assert_eq!(Metric::Minute.resolve(&snapshot), Some(dec!(75)));
        assert_eq!(Metric::GoalsHome.resolve(&snapshot), Some(dec!(2)));
        assert_eq!(Metric::GoalsTotal.resolve(&snapshot), Some(dec!(3)));
        assert_eq!(Metric::GoalDifference.resolve(&snapshot), Some(dec!(1)));
        assert_eq!(Metric::DangerousAttacksTotal.resolve(&snapshot), Some(dec!(40)));
    }

    #[test]
    fn derived_stat_requires_every_operand() {
        let snapshot = snapshot();
        assert_eq!(Metric::XgHome.resolve(&snapshot), Some(dec!(1.45)));
        assert_eq!(Metric::XgTotal.resolve(&snapshot), None);
        assert_eq!(Metric::CornersTotal.resolve(&snapshot), None);
    }

    #[test]
    fn any_takes_the_larger_side() {
        let mut snapshot = snapshot();
        assert_eq!(Metric::PreBttsAny.resolve(&snapshot), Some(dec!(72)));

        snapshot.pre_match.away.btts_percentage = None;
        assert_eq!(Metric::PreBttsAny.resolve(&snapshot), None);
    }

    #[test]
    fn odds_need_a_positive_quote() {
        let mut snapshot = snapshot();
        assert_eq!(Metric::OddsHomeWin.resolve(&snapshot), None);

        snapshot.live_odds = Some(MatchOdds {
            home_win: Some(dec!(1.65)),
            draw: Some(dec!(0)),
            ..Default::default()
        });
        assert_eq!(Metric::OddsHomeWin.resolve(&snapshot), Some(dec!(1.65)));
        assert_eq!(Metric::OddsDraw.resolve(&snapshot), None);
    }

    #[test]
    fn half_time_scope_is_a_typed_flag() {
        assert!(Metric::HtGoalsTotal.is_half_time_scoped());
        assert!(Metric::HtCornersHome.is_half_time_scoped());
        assert!(!Metric::GoalsTotal.is_half_time_scoped());
        assert!(!Metric::PreAvgFirstHalfGoalsForAny.is_half_time_scoped());
    }

    #[test]
    fn parses_from_id_or_label() {
        assert_eq!("DA_TOTAL".parse::<Metric>().unwrap(), Metric::DangerousAttacksTotal);
        assert_eq!("da_total".parse::<Metric>().unwrap(), Metric::DangerousAttacksTotal);
        assert_eq!(
            "Live Total Dangerous Attacks".parse::<Metric>().unwrap(),
            Metric::DangerousAttacksTotal
        );
        assert!(matches!(
            "NOT_A_METRIC".parse::<Metric>(),
            Err(DomainError::UnknownMetric(_))
        ));
    }

    #[test]
    fn serializes_as_stable_id() {
        let json = serde_json::to_string(&Metric::PreOver25Any).unwrap();
        assert_eq!(json, "\"PRE_OVER25_ANY\"");
        let back: Metric = serde_json::from_str("\"Pre: Over 2.5 % (ANY)\"").unwrap();
        assert_eq!(back, Metric::PreOver25Any);
    }

    #[test]
    fn every_metric_resolves_without_panicking_on_empty_snapshot() {
        let empty = MatchSnapshot::new("m0", MatchPhase::Scheduled, 0);
        for metric in Metric::ALL {
            let value = metric.resolve(&empty);
            if *metric != Metric::Minute {
                assert_eq!(value, None, "{metric} should be missing");
            }
        }
    }

    #[test]
    fn extreme_counts_resolve_and_overflowing_sums_are_missing() {
        let mut snapshot = MatchSnapshot::new("m0", MatchPhase::HalfTime, 45);
        for side in [&mut snapshot.stats.home, &mut snapshot.stats.away] {
            side.goals = Some(u32::MAX);
            side.goals_first_half = Some(u32::MAX);
            side.corners = Some(u32::MAX);
            side.corners_first_half = Some(u32::MAX);
            side.expected_goals = Some(Decimal::MAX);
        }
        for metric in Metric::ALL {
            let _ = metric.resolve(&snapshot);
        }

        let doubled = Decimal::from(u32::MAX) * Decimal::TWO;
        assert_eq!(Metric::GoalsTotal.resolve(&snapshot), Some(doubled));
        assert_eq!(Metric::HtCornersTotal.resolve(&snapshot), Some(doubled));
        assert_eq!(Metric::XgTotal.resolve(&snapshot), None);
        assert_eq!(Metric::GoalDifference.resolve(&snapshot), Some(Decimal::ZERO));
        assert_eq!(Metric::GoalsHome.resolve(&snapshot), Some(Decimal::from(u32::MAX)));
    }
}
