//! Poll loop driving the engine from a match feed.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use super::engine::{Engine, TickReport};
use crate::port::outbound::feed::MatchFeed;

/// Poll loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub interval: Duration,
    /// Stop after this many ticks; `None` runs until shutdown.
    pub max_ticks: Option<u64>,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub failed_ticks: u64,
    pub settled: usize,
    pub won: usize,
    pub lost: usize,
    pub triggered: usize,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport) {
        self.settled += report.settled;
        self.won += report.won;
        self.lost += report.lost;
        self.triggered += report.triggered;
    }
}

/// Fetch and tick on a fixed interval until shutdown.
///
/// Fetch and tick run back to back in this task, so ticks never overlap; a
/// slow tick delays the next fetch instead of queueing it. Fetch and tick
/// errors are logged and the loop carries on. The loop also stops when a
/// finite feed is exhausted or `max_ticks` is reached.
pub async fn run(
    engine: &mut Engine,
    feed: &dyn MatchFeed,
    config: RunnerConfig,
    mut shutdown: watch::Receiver<bool>,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut timer = interval(config.interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        interval = ?config.interval,
        max_ticks = ?config.max_ticks,
        "Poll loop started"
    );

    loop {
        if *shutdown.borrow() {
            break;
        }
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = timer.tick() => {}
        }

        let step = tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            step = poll_once(engine, feed) => step,
        };

        summary.ticks += 1;
        match step {
            Some(report) => summary.record(&report),
            None => summary.failed_ticks += 1,
        }

        if config.max_ticks.is_some_and(|max| summary.ticks >= max) {
            info!(ticks = summary.ticks, "Tick limit reached");
            break;
        }
        if feed.is_exhausted() {
            info!(ticks = summary.ticks, "Feed exhausted");
            break;
        }
    }

    info!(
        ticks = summary.ticks,
        failed = summary.failed_ticks,
        triggered = summary.triggered,
        settled = summary.settled,
        won = summary.won,
        lost = summary.lost,
        "Poll loop stopped"
    );
    summary
}

/// One fetch and tick. `None` when either step failed (already logged).
async fn poll_once(engine: &mut Engine, feed: &dyn MatchFeed) -> Option<TickReport> {
    let batch = match feed.fetch().await {
        Ok(batch) => batch,
        Err(e) => {
            warn!(error = %e, "Feed fetch failed, skipping tick");
            return None;
        }
    };
    match engine.tick(&batch, Utc::now()).await {
        Ok(report) => Some(report),
        Err(e) => {
            error!(error = %e, "Tick failed");
            None
        }
    }
}
