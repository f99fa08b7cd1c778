//! Handler for the `run` command.

use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::application::runner::{self, RunSummary};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::notifier::{Event, Notifier};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = super::load_config(&args.config)?;
    if let Some(ticks) = args.ticks {
        config.poll.max_ticks = ticks;
    }
    if let Some(interval) = args.interval {
        config.poll.interval_secs = interval;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    print_startup_config(&config);

    let mut notifiers = bootstrap::build_notifier_registry(&config);
    notifiers.register(Box::new(ConsoleNotifier));
    let mut engine = bootstrap::build_engine_with(&config, notifiers).await?;
    let feed = bootstrap::build_feed(&config.feed)?;

    let state = engine.state();
    let active = state.strategies().iter().filter(|s| s.is_active()).count();
    output::field("Strategies", format!("{active} active of {}", state.strategies().len()));
    output::field("Pending", state.pending_count());
    if active == 0 {
        output::warning("No active strategies loaded; nothing will trigger");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                warn!(error = %e, "Could not listen for Ctrl-C");
                shutdown_tx.closed().await;
            }
        }
    });

    output::section("Alerts");
    let summary = runner::run(
        &mut engine,
        feed.as_ref(),
        bootstrap::runner_config(&config),
        shutdown_rx,
    )
    .await;

    print_summary(&summary);
    if engine.backlog_len() > 0 {
        output::warning(&format!(
            "{} writes could not be persisted before exit",
            engine.backlog_len()
        ));
    }
    Ok(())
}

fn print_startup_config(config: &Config) {
    output::field("Feed", &config.feed);
    output::field("Store", &config.store);
    output::field("Interval", format!("{}s", config.poll.interval_secs));
    output::field(
        "Max polls",
        config
            .poll
            .max_ticks()
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
    );
    output::field("Fallback", config.engine.fallback_odds);
    if let Some(owner) = &config.owner {
        output::field("Owner", owner);
    }
}

fn print_summary(summary: &RunSummary) {
    output::section("Summary");
    output::field("Polls", summary.ticks);
    if summary.failed_ticks > 0 {
        output::field("Failed", output::negative(summary.failed_ticks));
    }
    output::field("Triggered", summary.triggered);
    output::field("Settled", summary.settled);
    output::field("Won", output::positive(summary.won));
    output::field("Lost", output::negative(summary.lost));
}

/// Prints alerts as they happen.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: Event) {
        let now = Utc::now().format("%H:%M:%S").to_string();
        match event {
            Event::StrategyTriggered(e) => {
                let score = e.score.map_or_else(|| "?".to_string(), |s| s.to_string());
                output::triggered(
                    &now,
                    &format!(
                        "{} | {} {}' {} | {} @ {}",
                        output::highlight(&e.strategy_name),
                        e.fixture,
                        e.minute,
                        score,
                        e.target_outcome.label(),
                        e.odds
                    ),
                );
            }
            Event::TicketWon(e) => {
                let score = e.score.map_or_else(|| "?".to_string(), |s| s.to_string());
                output::won(
                    &now,
                    &format!(
                        "{} | {} {} | {} @ {}",
                        output::highlight(&e.strategy_name),
                        e.fixture,
                        score,
                        e.target_outcome.label(),
                        e.odds
                    ),
                );
            }
        }
    }
}
