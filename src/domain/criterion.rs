//! Single-condition criteria and their fail-closed evaluation.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metric::Metric;
use super::snapshot::MatchSnapshot;

/// Comparison operator of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">", alias = "GREATER_THAN")]
    GreaterThan,
    #[serde(rename = "<", alias = "LESS_THAN")]
    LessThan,
    #[serde(rename = "=", alias = "EQUALS", alias = "==")]
    Equals,
    #[serde(rename = ">=", alias = "GREATER_EQUAL")]
    GreaterEqual,
    #[serde(rename = "<=", alias = "LESS_EQUAL")]
    LessEqual,
}

impl Operator {
    /// Apply the operator to a present value.
    #[must_use]
    pub fn compare(self, value: Decimal, threshold: Decimal) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::LessThan => value < threshold,
            Self::Equals => value == threshold,
            Self::GreaterEqual => value >= threshold,
            Self::LessEqual => value <= threshold,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::Equals => "=",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Evaluate a resolved metric value against a threshold.
///
/// A missing value fails every operator.
#[must_use]
pub fn evaluate(value: Option<Decimal>, operator: Operator, threshold: Decimal) -> bool {
    value.is_some_and(|value| operator.compare(value, threshold))
}

/// A stored value that may not be recognised by this build.
///
/// Unrecognised values are kept verbatim so the record still loads and
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Known(T),
    Unknown(String),
}

impl<T> Lenient<T> {
    /// The recognised value, if any.
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown(_) => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Lenient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(value) => value.fmt(f),
            Self::Unknown(raw) => write!(f, "{raw}?"),
        }
    }
}

/// Outcome of checking one criterion against a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionCheck {
    Pass,
    Fail,
    /// The criterion can never be satisfied; `reason` names what is wrong.
    Invalid { reason: String },
}

impl CriterionCheck {
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// `metric operator threshold`, e.g. `DA_TOTAL > 30`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub metric: Lenient<Metric>,
    pub operator: Lenient<Operator>,
    #[serde(rename = "value", alias = "threshold")]
    pub threshold: Decimal,
}

impl Criterion {
    #[must_use]
    pub fn new(metric: Metric, operator: Operator, threshold: Decimal) -> Self {
        Self {
            metric: Lenient::Known(metric),
            operator: Lenient::Known(operator),
            threshold,
        }
    }

    /// Check the criterion against a snapshot.
    ///
    /// Half-time scoped metrics only pass while the match is at the
    /// half-time break.
    #[must_use]
    pub fn check(&self, snapshot: &MatchSnapshot) -> CriterionCheck {
        let Some(metric) = self.metric.known() else {
            return CriterionCheck::Invalid {
                reason: format!("unknown metric {}", self.metric),
            };
        };
        let Some(operator) = self.operator.known() else {
            return CriterionCheck::Invalid {
                reason: format!("unknown operator {}", self.operator),
            };
        };
        if metric.is_half_time_scoped() && !snapshot.phase.is_half_time() {
            return CriterionCheck::Fail;
        }
        if evaluate(metric.resolve(snapshot), *operator, self.threshold) {
            CriterionCheck::Pass
        } else {
            CriterionCheck::Fail
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.metric, self.operator, self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::MatchPhase;
    use rust_decimal_macros::dec;

    const OPERATORS: [Operator; 5] = [
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::Equals,
        Operator::GreaterEqual,
        Operator::LessEqual,
    ];

    #[test]
    fn missing_value_fails_every_operator() {
        for operator in OPERATORS {
            assert!(!evaluate(None, operator, dec!(0)), "{operator}");
            assert!(!evaluate(None, operator, dec!(-1)), "{operator}");
        }
    }

    #[test]
    fn operators_compare_present_values() {
        assert!(evaluate(Some(dec!(75)), Operator::GreaterThan, dec!(70)));
        assert!(!evaluate(Some(dec!(70)), Operator::GreaterThan, dec!(70)));
        assert!(evaluate(Some(dec!(70)), Operator::GreaterEqual, dec!(70)));
        assert!(evaluate(Some(dec!(0)), Operator::Equals, dec!(0)));
        assert!(evaluate(Some(dec!(1.1)), Operator::LessThan, dec!(1.2)));
        assert!(evaluate(Some(dec!(1.2)), Operator::LessEqual, dec!(1.2)));
    }

    #[test]
    fn deserializes_stored_criterion() {
        let json = r#"{"metric": "Live Total Goals", "operator": "=", "value": 0}"#;
        let criterion: Criterion = serde_json::from_str(json).unwrap();
        assert_eq!(criterion, Criterion::new(Metric::GoalsTotal, Operator::Equals, dec!(0)));
    }

    #[test]
    fn unknown_metric_is_kept_and_invalid() {
        let json = r#"{"metric": "MOON_PHASE", "operator": ">", "value": 3}"#;
        let criterion: Criterion = serde_json::from_str(json).unwrap();
        assert_eq!(criterion.metric, Lenient::Unknown("MOON_PHASE".into()));

        let snapshot = MatchSnapshot::new("m1", MatchPhase::Live, 10);
        assert!(matches!(criterion.check(&snapshot), CriterionCheck::Invalid { .. }));

        let back = serde_json::to_value(&criterion).unwrap();
        assert_eq!(back["metric"], "MOON_PHASE");
    }

    #[test]
    fn unknown_operator_is_invalid() {
        let json = r#"{"metric": "TIME", "operator": "!=", "value": 3}"#;
        let criterion: Criterion = serde_json::from_str(json).unwrap();
        let snapshot = MatchSnapshot::new("m1", MatchPhase::Live, 10);
        assert!(matches!(criterion.check(&snapshot), CriterionCheck::Invalid { .. }));
    }

    #[test]
    fn half_time_metric_only_passes_at_the_break() {
        let criterion = Criterion::new(Metric::HtGoalsTotal, Operator::Equals, dec!(0));
        let mut snapshot = MatchSnapshot::new("m1", MatchPhase::Live, 40);
        snapshot.stats.home.goals_first_half = Some(0);
        snapshot.stats.away.goals_first_half = Some(0);
        assert_eq!(criterion.check(&snapshot), CriterionCheck::Fail);

        snapshot.phase = MatchPhase::HalfTime;
        assert_eq!(criterion.check(&snapshot), CriterionCheck::Pass);
    }

    #[test]
    fn display_reads_like_a_rule() {
        let criterion = Criterion::new(Metric::DangerousAttacksTotal, Operator::GreaterThan, dec!(30));
        assert_eq!(criterion.to_string(), "DA_TOTAL > 30");
    }
}
