//! Metric and outcome catalogues.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::metric::{Formula, Metric};
use crate::domain::outcome::TargetOutcome;
use crate::error::Result;

/// Where a metric's value comes from.
#[must_use]
pub fn scope(metric: Metric) -> &'static str {
    match metric.formula() {
        _ if metric.is_half_time_scoped() => "half-time",
        Formula::Minute | Formula::Live(..) | Formula::LiveTotal(_) | Formula::GoalDifference => {
            "live"
        }
        Formula::LiveOdds(_) => "live odds",
        Formula::PreMatch(..) | Formula::PreMatchAny(_) => "pre-match",
        Formula::PreMatchOdds(_) => "pre-match odds",
    }
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Scope")]
    scope: &'static str,
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Settles")]
    settles: &'static str,
}

/// List every metric.
pub fn metrics() -> Result<()> {
    if output::is_json() {
        let metrics: Vec<_> = Metric::ALL
            .iter()
            .map(|m| json!({ "id": m.as_str(), "label": m.label(), "scope": scope(*m) }))
            .collect();
        output::json_output(json!({ "command": "metrics", "metrics": metrics }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Metrics");
    let rows = Metric::ALL.iter().map(|m| MetricRow {
        id: m.as_str(),
        label: m.label(),
        scope: scope(*m),
    });
    output::lines(&Table::new(rows).to_string());
    output::hint("half-time metrics only match during the break");
    Ok(())
}

/// List every target outcome.
pub fn outcomes() -> Result<()> {
    let settles = |o: TargetOutcome| if o.is_half_time() { "half-time" } else { "full-time" };

    if output::is_json() {
        let outcomes: Vec<_> = TargetOutcome::ALL
            .iter()
            .map(|o| {
                json!({
                    "id": o.as_str(),
                    "label": o.label(),
                    "settles": settles(*o),
                    "odds_market": o.odds_market().is_some(),
                })
            })
            .collect();
        output::json_output(json!({ "command": "outcomes", "outcomes": outcomes }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Outcomes");
    let rows = TargetOutcome::ALL.iter().map(|o| OutcomeRow {
        id: o.as_str(),
        label: o.label(),
        settles: settles(*o),
    });
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
