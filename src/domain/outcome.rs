//! Target outcomes a strategy bets on, and the rule family each belongs to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;
use super::snapshot::{OddsMarket, Score, Side};

/// Which side of a line the bet is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Over,
    Under,
}

/// A half-unit line `N.5`, stored as `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line(u32);

impl Line {
    #[must_use]
    pub const fn new(whole: u32) -> Self {
        Self(whole)
    }

    /// True when `total` is above the line.
    #[must_use]
    pub const fn exceeded_by(self, total: u32) -> bool {
        total > self.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.5", self.0)
    }
}

/// Pick in a three-way result market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultPick {
    Home,
    Draw,
    Away,
}

impl ResultPick {
    #[must_use]
    pub fn matches(self, score: Score) -> bool {
        match self {
            Self::Home => score.home > score.away,
            Self::Draw => score.home == score.away,
            Self::Away => score.away > score.home,
        }
    }
}

/// Settlement family of a target outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeRule {
    MatchResult(ResultPick),
    HalfTimeResult(ResultPick),
    Goals { line: Line, direction: Direction },
    HalfTimeGoals { line: Line, direction: Direction },
    BothTeamsToScore,
    NextGoal(Side),
    Corners { line: Line, direction: Direction },
    HalfTimeCorners { line: Line, direction: Direction },
}

macro_rules! outcomes {
    ($($variant:ident => $id:literal, $label:literal, $rule:expr;)+) => {
        /// The bet a strategy places when it triggers.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TargetOutcome {
            $($variant,)+
        }

        impl TargetOutcome {
            /// Every outcome, in catalogue order.
            pub const ALL: &'static [TargetOutcome] = &[$(TargetOutcome::$variant,)+];

            /// Stable identifier used in stored strategies and tickets.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(TargetOutcome::$variant => $id,)+
                }
            }

            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(TargetOutcome::$variant => $label,)+
                }
            }

            /// Settlement rule for this outcome.
            #[must_use]
            pub const fn rule(self) -> OutcomeRule {
                match self {
                    $(TargetOutcome::$variant => $rule,)+
                }
            }
        }
    };
}

const fn over(line: u32) -> (Line, Direction) {
    (Line::new(line), Direction::Over)
}

const fn under(line: u32) -> (Line, Direction) {
    (Line::new(line), Direction::Under)
}

const fn goals((line, direction): (Line, Direction)) -> OutcomeRule {
    OutcomeRule::Goals { line, direction }
}

const fn ht_goals((line, direction): (Line, Direction)) -> OutcomeRule {
    OutcomeRule::HalfTimeGoals { line, direction }
}

const fn corners((line, direction): (Line, Direction)) -> OutcomeRule {
    OutcomeRule::Corners { line, direction }
}

const fn ht_corners((line, direction): (Line, Direction)) -> OutcomeRule {
    OutcomeRule::HalfTimeCorners { line, direction }
}

outcomes! {
    HomeWin => "HOME_WIN", "Home Win (FT)", OutcomeRule::MatchResult(ResultPick::Home);
    AwayWin => "AWAY_WIN", "Away Win (FT)", OutcomeRule::MatchResult(ResultPick::Away);
    Draw => "DRAW", "Draw (FT)", OutcomeRule::MatchResult(ResultPick::Draw);

    HtHomeWin => "HT_HOME_WIN", "Home Win (HT)", OutcomeRule::HalfTimeResult(ResultPick::Home);
    HtDraw => "HT_DRAW", "Draw (HT)", OutcomeRule::HalfTimeResult(ResultPick::Draw);
    HtAwayWin => "HT_AWAY_WIN", "Away Win (HT)", OutcomeRule::HalfTimeResult(ResultPick::Away);
    HtOver05 => "HT_OVER_0_5", "Over 0.5 Goals (HT)", ht_goals(over(0));
    HtOver15 => "HT_OVER_1_5", "Over 1.5 Goals (HT)", ht_goals(over(1));
    HtUnder05 => "HT_UNDER_0_5", "Under 0.5 Goals (HT)", ht_goals(under(0));
    HtUnder15 => "HT_UNDER_1_5", "Under 1.5 Goals (HT)", ht_goals(under(1));

    Over05Goals => "OVER_0_5_GOALS", "Over 0.5 Goals", goals(over(0));
    Over15Goals => "OVER_1_5_GOALS", "Over 1.5 Goals", goals(over(1));
    Over25Goals => "OVER_2_5_GOALS", "Over 2.5 Goals", goals(over(2));
    Under15Goals => "UNDER_1_5_GOALS", "Under 1.5 Goals", goals(under(1));
    Under25Goals => "UNDER_2_5_GOALS", "Under 2.5 Goals", goals(under(2));
    Under35Goals => "UNDER_3_5_GOALS", "Under 3.5 Goals", goals(under(3));

    BttsYes => "BTTS_YES", "Both Teams To Score", OutcomeRule::BothTeamsToScore;
    HomeNextGoal => "HOME_NEXT_GOAL", "Next Goal: Home", OutcomeRule::NextGoal(Side::Home);
    AwayNextGoal => "AWAY_NEXT_GOAL", "Next Goal: Away", OutcomeRule::NextGoal(Side::Away);

    Over85Corners => "OVER_8_5_CORNERS", "Over 8.5 Corners", corners(over(8));
    Over95Corners => "OVER_9_5_CORNERS", "Over 9.5 Corners", corners(over(9));
    Under105Corners => "UNDER_10_5_CORNERS", "Under 10.5 Corners", corners(under(10));

    HtOver05Corners => "HT_OVER_0_5_CORNERS", "HT Corners Over 0.5", ht_corners(over(0));
    HtOver15Corners => "HT_OVER_1_5_CORNERS", "HT Corners Over 1.5", ht_corners(over(1));
    HtOver25Corners => "HT_OVER_2_5_CORNERS", "HT Corners Over 2.5", ht_corners(over(2));
    HtOver35Corners => "HT_OVER_3_5_CORNERS", "HT Corners Over 3.5", ht_corners(over(3));
    HtOver45Corners => "HT_OVER_4_5_CORNERS", "HT Corners Over 4.5", ht_corners(over(4));
    HtUnder25Corners => "HT_UNDER_2_5_CORNERS", "HT Corners Under 2.5", ht_corners(under(2));
    HtUnder35Corners => "HT_UNDER_3_5_CORNERS", "HT Corners Under 3.5", ht_corners(under(3));
    HtUnder45Corners => "HT_UNDER_4_5_CORNERS", "HT Corners Under 4.5", ht_corners(under(4));
}

impl TargetOutcome {
    /// Live odds market that prices this outcome, if one is quoted.
    #[must_use]
    pub const fn odds_market(self) -> Option<OddsMarket> {
        match self {
            Self::HomeWin => Some(OddsMarket::HomeWin),
            Self::AwayWin => Some(OddsMarket::AwayWin),
            Self::Draw => Some(OddsMarket::Draw),
            Self::Over25Goals => Some(OddsMarket::Over25),
            Self::Under25Goals => Some(OddsMarket::Under25),
            Self::BttsYes => Some(OddsMarket::BttsYes),
            _ => None,
        }
    }

    /// True for outcomes decided by the first half alone.
    #[must_use]
    pub const fn is_half_time(self) -> bool {
        matches!(
            self.rule(),
            OutcomeRule::HalfTimeResult(_)
                | OutcomeRule::HalfTimeGoals { .. }
                | OutcomeRule::HalfTimeCorners { .. }
        )
    }
}

impl fmt::Display for TargetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetOutcome {
    type Err = DomainError;

    /// Accepts the stable id (case-insensitive) or the exact display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|outcome| outcome.as_str().eq_ignore_ascii_case(s) || outcome.label() == s)
            .ok_or_else(|| DomainError::UnknownOutcome(s.to_string()))
    }
}

impl Serialize for TargetOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TargetOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_half_units() {
        let line = Line::new(2);
        assert!(!line.exceeded_by(2));
        assert!(line.exceeded_by(3));
        assert_eq!(line.to_string(), "2.5");
    }

    #[test]
    fn rules_match_their_names() {
        assert_eq!(
            TargetOutcome::Under25Goals.rule(),
            OutcomeRule::Goals {
                line: Line::new(2),
                direction: Direction::Under
            }
        );
        assert_eq!(
            TargetOutcome::HtOver35Corners.rule(),
            OutcomeRule::HalfTimeCorners {
                line: Line::new(3),
                direction: Direction::Over
            }
        );
        assert_eq!(
            TargetOutcome::AwayNextGoal.rule(),
            OutcomeRule::NextGoal(Side::Away)
        );
    }

    #[test]
    fn half_time_outcomes() {
        let half_time: Vec<_> = TargetOutcome::ALL
            .iter()
            .filter(|outcome| outcome.is_half_time())
            .collect();
        assert_eq!(half_time.len(), 15);
        assert!(!TargetOutcome::Over05Goals.is_half_time());
    }

    #[test]
    fn result_picks() {
        assert!(ResultPick::Home.matches(Score::new(2, 1)));
        assert!(ResultPick::Draw.matches(Score::new(1, 1)));
        assert!(!ResultPick::Away.matches(Score::new(1, 1)));
    }

    #[test]
    fn odds_markets_only_for_quoted_outcomes() {
        assert_eq!(TargetOutcome::HomeWin.odds_market(), Some(OddsMarket::HomeWin));
        assert_eq!(TargetOutcome::Under25Goals.odds_market(), Some(OddsMarket::Under25));
        assert_eq!(TargetOutcome::Over05Goals.odds_market(), None);
        assert_eq!(TargetOutcome::HomeNextGoal.odds_market(), None);
    }

    #[test]
    fn parses_ids_and_labels() {
        assert_eq!("BTTS_YES".parse::<TargetOutcome>().unwrap(), TargetOutcome::BttsYes);
        assert_eq!(
            "Over 0.5 Goals (HT)".parse::<TargetOutcome>().unwrap(),
            TargetOutcome::HtOver05
        );
        assert!("OVER_99_GOALS".parse::<TargetOutcome>().is_err());
        let json = serde_json::to_string(&TargetOutcome::Over85Corners).unwrap();
        assert_eq!(json, "\"OVER_8_5_CORNERS\"");
    }
}
