//! Poll loop tests against scripted feeds.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use tokio::sync::watch;

use footalert::adapter::outbound::memory::MemoryStore;
use footalert::application::engine::Engine;
use footalert::application::factory::TicketFactory;
use footalert::application::runner::{run, RunnerConfig};
use footalert::domain::criterion::Operator;
use footalert::domain::metric::Metric;
use footalert::domain::outcome::TargetOutcome;
use footalert::domain::strategy::Strategy;
use footalert::port::{StrategyStore, TicketStore};
use footalert::testkit::domain::{criterion, finished, live, strategy};
use footalert::testkit::feed::ScriptedFeed;
use footalert::testkit::notifier::RecordingNotifier;
use footalert::testkit::store::FailingStore;

fn fast(max_ticks: Option<u64>) -> RunnerConfig {
    RunnerConfig {
        interval: Duration::from_millis(5),
        max_ticks,
    }
}

fn late_goal() -> Strategy {
    strategy(
        "late-goal",
        vec![criterion(Metric::Minute, Operator::GreaterThan, dec!(70))],
        TargetOutcome::Over05Goals,
    )
}

async fn engine_over<S>(store: Arc<S>) -> Engine
where
    S: StrategyStore + TicketStore + 'static,
{
    let mut engine = Engine::new(
        store.clone(),
        store,
        Arc::new(RecordingNotifier::new()),
        TicketFactory::new(dec!(1.90)),
    );
    engine.load(None).await.unwrap();
    engine
}

#[tokio::test]
async fn runs_until_the_feed_is_exhausted() {
    let store = Arc::new(MemoryStore::with_strategies(vec![late_goal()]));
    let mut engine = engine_over(store.clone()).await;
    let feed = ScriptedFeed::with_batches(vec![
        vec![live("m1", 72, 0, 0)],
        vec![live("m1", 75, 0, 0)],
        vec![finished("m1", 1, 0)],
    ]);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let summary = run(&mut engine, &feed, fast(None), shutdown_rx).await;

    assert_eq!(summary.ticks, 3);
    assert_eq!(summary.failed_ticks, 0);
    assert_eq!(summary.triggered, 1);
    assert_eq!(summary.won, 1);
    assert_eq!(feed.fetch_count(), 3);
    assert_eq!(store.list_tickets().await.unwrap().len(), 1);
}

#[tokio::test]
async fn stops_at_the_tick_limit() {
    let store = Arc::new(MemoryStore::new());
    let mut engine = engine_over(store).await;
    let feed = ScriptedFeed::new().endless();
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let summary = run(&mut engine, &feed, fast(Some(4)), shutdown_rx).await;

    assert_eq!(summary.ticks, 4);
    assert_eq!(feed.fetch_count(), 4);
}

#[tokio::test]
async fn fetch_errors_skip_the_tick_and_carry_on() {
    let store = Arc::new(MemoryStore::with_strategies(vec![late_goal()]));
    let mut engine = engine_over(store).await;
    let feed = ScriptedFeed::new();
    feed.push_error("provider timed out");
    feed.push_batch(vec![live("m1", 80, 0, 0)]);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let summary = run(&mut engine, &feed, fast(None), shutdown_rx).await;

    assert_eq!(summary.ticks, 2);
    assert_eq!(summary.failed_ticks, 1);
    assert_eq!(summary.triggered, 1);
}

#[tokio::test]
async fn store_failures_are_retried_on_later_ticks() {
    let store = Arc::new(FailingStore::with_strategies(vec![late_goal()]));
    let mut engine = engine_over(store.clone()).await;
    store.set_failing(true);

    let feed = ScriptedFeed::with_batches(vec![vec![live("m1", 80, 0, 0)]]);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let summary = run(&mut engine, &feed, fast(None), shutdown_rx).await;

    assert_eq!(summary.failed_ticks, 1);
    assert!(engine.backlog_len() > 0);

    store.set_failing(false);
    let feed = ScriptedFeed::with_batches(vec![vec![]]);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let summary = run(&mut engine, &feed, fast(None), shutdown_rx).await;

    assert_eq!(summary.failed_ticks, 0);
    assert_eq!(engine.backlog_len(), 0);
    assert_eq!(store.inner().list_tickets().await.unwrap().len(), 1);
}

#[tokio::test]
async fn shutdown_signal_stops_an_endless_feed() {
    let store = Arc::new(MemoryStore::new());
    let mut engine = engine_over(store).await;
    let feed = ScriptedFeed::new().endless();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let stop = async {
        tokio::time::sleep(Duration::from_millis(40)).await;
        shutdown_tx.send(true).unwrap();
    };
    let (summary, ()) = tokio::join!(run(&mut engine, &feed, fast(None), shutdown_rx), stop);

    assert!(summary.ticks >= 1);
    assert_eq!(summary.failed_ticks, 0);
}

#[tokio::test]
async fn raised_shutdown_flag_prevents_any_tick() {
    let store = Arc::new(MemoryStore::new());
    let mut engine = engine_over(store).await;
    let feed = ScriptedFeed::new().endless();
    let (_shutdown_tx, shutdown_rx) = watch::channel(true);

    let summary = run(&mut engine, &feed, fast(None), shutdown_rx).await;

    assert_eq!(summary.ticks, 0);
    assert_eq!(feed.fetch_count(), 0);
}

#[tokio::test]
async fn first_poll_runs_immediately_on_a_long_interval() {
    let store = Arc::new(MemoryStore::with_strategies(vec![late_goal()]));
    let mut engine = engine_over(store).await;
    let feed = ScriptedFeed::new().endless();
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let config = RunnerConfig {
        interval: Duration::from_secs(24 * 60 * 60),
        max_ticks: Some(1),
    };

    let summary = tokio::time::timeout(
        Duration::from_secs(5),
        run(&mut engine, &feed, config, shutdown_rx),
    )
    .await
    .expect("first poll does not wait for the interval");

    assert_eq!(summary.ticks, 1);
    assert_eq!(feed.fetch_count(), 1);
}
