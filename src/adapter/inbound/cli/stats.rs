//! Handler for the `stats` command.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::StatsArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::id::{OwnerId, StrategyId};
use crate::domain::outcome::TargetOutcome;
use crate::domain::performance::PerformanceStats;
use crate::domain::strategy::Strategy;
use crate::domain::ticket::BetTicket;
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// One strategy's line in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyReport {
    pub id: StrategyId,
    pub name: String,
    pub target_outcome: TargetOutcome,
    pub active: bool,
    pub tickets: usize,
    pub pending: usize,
    pub performance: PerformanceStats,
}

/// Build per-strategy reports and the combined performance.
///
/// Performance is folded from the tickets rather than read from the stored
/// strategy, so the report is correct even if the last run was interrupted.
#[must_use]
pub fn report(strategies: &[Strategy], tickets: &[BetTicket]) -> (Vec<StrategyReport>, PerformanceStats) {
    let rows = strategies
        .iter()
        .map(|strategy| {
            let own: Vec<&BetTicket> = tickets
                .iter()
                .filter(|t| t.strategy_id() == strategy.id())
                .collect();
            StrategyReport {
                id: strategy.id().clone(),
                name: strategy.name().to_string(),
                target_outcome: strategy.target_outcome(),
                active: strategy.is_active(),
                tickets: own.len(),
                pending: own.iter().filter(|t| t.is_pending()).count(),
                performance: PerformanceStats::from_tickets(own.iter().copied()),
            }
        })
        .collect();

    let overall = PerformanceStats::from_tickets(
        tickets
            .iter()
            .filter(|t| strategies.iter().any(|s| s.id() == t.strategy_id())),
    );
    (rows, overall)
}

#[derive(Tabled)]
struct StrategyRow {
    #[tabled(rename = "Strategy")]
    name: String,
    #[tabled(rename = "Target")]
    target: &'static str,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "Tickets")]
    tickets: usize,
    #[tabled(rename = "Pending")]
    pending: usize,
    #[tabled(rename = "W/Settled")]
    record: String,
    #[tabled(rename = "Strike %")]
    strike_rate: Decimal,
    #[tabled(rename = "Avg odds")]
    avg_odds: Decimal,
    #[tabled(rename = "ROI %")]
    roi: Decimal,
}

impl From<&StrategyReport> for StrategyRow {
    fn from(report: &StrategyReport) -> Self {
        let stats = &report.performance;
        Self {
            name: report.name.clone(),
            target: report.target_outcome.label(),
            active: if report.active { "yes" } else { "no" },
            tickets: report.tickets,
            pending: report.pending,
            record: format!("{}/{}", stats.wins, stats.total_settled),
            strike_rate: stats.strike_rate,
            avg_odds: stats.avg_odds,
            roi: stats.roi,
        }
    }
}

/// Execute the stats command.
pub async fn execute(args: &StatsArgs) -> Result<()> {
    let config = super::load_config(&args.config)?;
    let owner = args.owner.as_deref().map(OwnerId::from).or(config.owner);

    let stores = bootstrap::build_stores(&config.store).await?;
    let strategies = match &owner {
        Some(owner) => stores.strategies.list_strategies_by_owner(owner).await?,
        None => stores.strategies.list_strategies().await?,
    };
    let tickets = stores.tickets.list_tickets().await?;
    let (rows, overall) = report(&strategies, &tickets);

    if output::is_json() {
        output::json_output(json!({
            "command": "stats",
            "owner": owner,
            "strategies": rows,
            "overall": overall,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if rows.is_empty() {
        output::warning("No strategies found");
        output::hint(&format!(
            "add strategies to the store configured as {}",
            output::highlight(&config.store)
        ));
        return Ok(());
    }

    output::section("Strategies");
    let table = Table::new(rows.iter().map(StrategyRow::from)).to_string();
    output::lines(&table);

    output::section("Overall");
    output::field("Settled", overall.total_settled);
    output::field("Wins", overall.wins);
    output::field("Strike rate", format!("{}%", overall.strike_rate));
    output::field("Avg odds", overall.avg_odds);
    let roi = format!("{}%", overall.roi);
    if overall.roi >= Decimal::ZERO {
        output::field("ROI", output::positive(roi));
    } else {
        output::field("ROI", output::negative(roi));
    }
    Ok(())
}
