//! End-to-end alert scenarios: trigger on a live snapshot, settle on a
//! later one, and read the resulting performance.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;

use footalert::adapter::outbound::memory::MemoryStore;
use footalert::application::engine::Engine;
use footalert::application::factory::TicketFactory;
use footalert::domain::criterion::Operator;
use footalert::domain::metric::Metric;
use footalert::domain::outcome::TargetOutcome;
use footalert::domain::performance::{PerformanceStats, PerformanceTally};
use footalert::domain::snapshot::{MatchPhase, Score};
use footalert::domain::strategy::Strategy;
use footalert::domain::ticket::TicketStatus;
use footalert::testkit::domain::{criterion, finished, live, strategy, SnapshotBuilder};
use footalert::testkit::notifier::RecordingNotifier;

async fn engine_with(strategies: Vec<Strategy>) -> (Engine, RecordingNotifier) {
    let store = Arc::new(MemoryStore::with_strategies(strategies));
    let notifier = RecordingNotifier::new();
    let mut engine = Engine::new(
        store.clone(),
        store,
        Arc::new(notifier.clone()),
        TicketFactory::new(dec!(1.90)),
    );
    engine.load(None).await.unwrap();
    (engine, notifier)
}

fn late_pressure() -> Strategy {
    strategy(
        "late-pressure",
        vec![
            criterion(Metric::Minute, Operator::GreaterThan, dec!(70)),
            criterion(Metric::GoalsTotal, Operator::Equals, dec!(0)),
            criterion(Metric::DangerousAttacksTotal, Operator::GreaterThan, dec!(30)),
        ],
        TargetOutcome::Over05Goals,
    )
}

#[tokio::test]
async fn late_pressure_triggers_with_the_score_at_trigger() {
    let (mut engine, notifier) = engine_with(vec![late_pressure()]).await;

    let quiet = SnapshotBuilder::new("m1").minute(75).dangerous_attacks(12, 10).build();
    assert_eq!(engine.tick(&[quiet], Utc::now()).await.unwrap().triggered, 0);

    let pressure = SnapshotBuilder::new("m1")
        .minute(75)
        .score(0, 0)
        .dangerous_attacks(25, 15)
        .build();
    let report = engine.tick(&[pressure], Utc::now()).await.unwrap();

    assert_eq!(report.triggered, 1);
    let state = engine.state();
    let ticket = &state.tickets()[0];
    assert_eq!(ticket.status(), TicketStatus::Pending);
    assert_eq!(ticket.minute_at_trigger(), 75);
    assert_eq!(ticket.initial_score(), Some(Score::new(0, 0)));
    assert_eq!(ticket.target_outcome(), TargetOutcome::Over05Goals);
    assert_eq!(notifier.triggered()[0].minute, 75);
}

#[tokio::test]
async fn over_line_wins_on_the_first_goal() {
    let (mut engine, notifier) = engine_with(vec![late_pressure()]).await;
    let pressure = SnapshotBuilder::new("m1").minute(75).dangerous_attacks(25, 15).build();
    engine.tick(&[pressure], Utc::now()).await.unwrap();

    let goal = SnapshotBuilder::new("m1")
        .minute(81)
        .score(1, 0)
        .dangerous_attacks(28, 16)
        .build();
    let report = engine.tick(&[goal], Utc::now()).await.unwrap();

    assert_eq!(report.won, 1);
    let state = engine.state();
    let ticket = &state.tickets()[0];
    assert_eq!(ticket.status(), TicketStatus::Won);
    assert_eq!(ticket.score_at_result(), Some(Score::new(1, 0)));
    assert_eq!(ticket.ft_score(), None);
    assert!(ticket.settled_at().is_some());
    assert_eq!(notifier.won().len(), 1);

    let performance = state.strategies()[0].performance();
    assert_eq!(performance.wins, 1);
    assert_eq!(performance.strike_rate, dec!(100.0));
    assert_eq!(performance.roi, dec!(90.00));
}

#[tokio::test]
async fn under_line_loses_as_soon_as_it_is_breached() {
    let s = strategy(
        "quiet-start",
        vec![criterion(Metric::Minute, Operator::GreaterEqual, dec!(20))],
        TargetOutcome::Under25Goals,
    );
    let (mut engine, _) = engine_with(vec![s]).await;

    engine.tick(&[live("m1", 20, 0, 0)], Utc::now()).await.unwrap();
    let report = engine.tick(&[live("m1", 60, 2, 0)], Utc::now()).await.unwrap();
    assert_eq!(report.settled, 0);

    let report = engine.tick(&[live("m1", 70, 2, 1)], Utc::now()).await.unwrap();
    assert_eq!(report.lost, 1);
    assert_eq!(engine.state().tickets()[0].status(), TicketStatus::Lost);
}

#[tokio::test]
async fn under_line_wins_at_full_time() {
    let s = strategy(
        "quiet-start",
        vec![criterion(Metric::Minute, Operator::GreaterEqual, dec!(20))],
        TargetOutcome::Under25Goals,
    );
    let (mut engine, _) = engine_with(vec![s]).await;

    engine.tick(&[live("m1", 20, 0, 0)], Utc::now()).await.unwrap();
    let report = engine.tick(&[finished("m1", 1, 1)], Utc::now()).await.unwrap();

    assert_eq!(report.won, 1);
    assert_eq!(engine.state().tickets()[0].ft_score(), Some(Score::new(1, 1)));
}

#[tokio::test]
async fn match_result_waits_for_full_time() {
    let s = strategy(
        "home-favourite",
        vec![criterion(Metric::Minute, Operator::GreaterThan, dec!(10))],
        TargetOutcome::HomeWin,
    );
    let (mut engine, _) = engine_with(vec![s]).await;

    engine
        .tick(&[live("win", 15, 0, 0), live("draw", 15, 0, 0)], Utc::now())
        .await
        .unwrap();
    let report = engine
        .tick(&[live("win", 80, 2, 1), live("draw", 80, 1, 1)], Utc::now())
        .await
        .unwrap();
    assert_eq!(report.settled, 0);

    let report = engine
        .tick(&[finished("win", 2, 1), finished("draw", 1, 1)], Utc::now())
        .await
        .unwrap();
    assert_eq!(report.won, 1);
    assert_eq!(report.lost, 1);

    let state = engine.state();
    let performance = state.strategies()[0].performance();
    assert_eq!(performance.total_settled, 2);
    assert_eq!(performance.strike_rate, dec!(50.0));
}

#[tokio::test]
async fn half_time_outcome_settles_at_the_break() {
    let s = strategy(
        "first-half-goal",
        vec![criterion(Metric::Minute, Operator::GreaterThan, dec!(20))],
        TargetOutcome::HtOver05,
    );
    let (mut engine, _) = engine_with(vec![s]).await;

    engine.tick(&[live("m1", 25, 0, 0)], Utc::now()).await.unwrap();
    let goal = SnapshotBuilder::new("m1").minute(40).score(1, 0).half_time_score(1, 0).build();
    assert_eq!(engine.tick(&[goal], Utc::now()).await.unwrap().settled, 0);

    let break_time = SnapshotBuilder::new("m1")
        .phase(MatchPhase::HalfTime)
        .minute(45)
        .score(1, 0)
        .half_time_score(1, 0)
        .build();
    let report = engine.tick(&[break_time], Utc::now()).await.unwrap();

    assert_eq!(report.won, 1);
    assert_eq!(engine.state().tickets()[0].ht_score(), Some(Score::new(1, 0)));
}

#[tokio::test]
async fn next_goal_compares_against_the_trigger_score() {
    let home = strategy(
        "home-next",
        vec![criterion(Metric::Minute, Operator::GreaterThan, dec!(60))],
        TargetOutcome::HomeNextGoal,
    );
    let (mut engine, _) = engine_with(vec![home]).await;

    engine
        .tick(&[live("a", 61, 1, 1), live("b", 61, 0, 0)], Utc::now())
        .await
        .unwrap();
    let report = engine
        .tick(&[live("a", 70, 2, 1), live("b", 70, 0, 1)], Utc::now())
        .await
        .unwrap();

    assert_eq!(report.won, 1);
    assert_eq!(report.lost, 1);
}

#[tokio::test]
async fn unresolved_ticket_is_lost_at_full_time() {
    let s = strategy(
        "late-goal",
        vec![criterion(Metric::Minute, Operator::GreaterThan, dec!(80))],
        TargetOutcome::Over05Goals,
    );
    let (mut engine, notifier) = engine_with(vec![s]).await;

    engine.tick(&[live("m1", 85, 0, 0)], Utc::now()).await.unwrap();
    let report = engine.tick(&[finished("m1", 0, 0)], Utc::now()).await.unwrap();

    assert_eq!(report.lost, 1);
    assert!(notifier.won().is_empty());
    let state = engine.state();
    assert_eq!(state.strategies()[0].performance().roi, dec!(-100.00));
}

#[tokio::test]
async fn postponed_match_keeps_the_ticket_pending() {
    let s = strategy(
        "any",
        vec![criterion(Metric::Minute, Operator::GreaterThan, dec!(5))],
        TargetOutcome::HomeWin,
    );
    let (mut engine, _) = engine_with(vec![s]).await;

    engine.tick(&[live("m1", 10, 0, 0)], Utc::now()).await.unwrap();
    let postponed = SnapshotBuilder::new("m1").phase(MatchPhase::Postponed).minute(10).build();
    let report = engine.tick(&[postponed], Utc::now()).await.unwrap();

    assert_eq!(report.settled, 0);
    assert_eq!(engine.state().pending_count(), 1);
}

#[tokio::test]
async fn strategy_without_history_reports_zeros() {
    let (engine, _) = engine_with(vec![late_pressure()]).await;
    let state = engine.state();
    assert_eq!(state.strategies()[0].performance(), &PerformanceStats::default());
    assert_eq!(state.tickets_for(state.strategies()[0].id()).count(), 0);
}

#[tokio::test]
async fn stored_performance_matches_a_fold_over_tickets() {
    let s = strategy(
        "any",
        vec![criterion(Metric::Minute, Operator::GreaterThan, dec!(5))],
        TargetOutcome::Over05Goals,
    );
    let (mut engine, _) = engine_with(vec![s]).await;

    let ids = ["a", "b", "c", "d", "e"];
    let opening: Vec<_> = ids.iter().map(|id| live(id, 10, 0, 0)).collect();
    engine.tick(&opening, Utc::now()).await.unwrap();

    let mut tally = PerformanceTally::default();
    for (index, id) in ids.iter().enumerate() {
        let goals = u32::from(index % 2 == 0);
        engine.tick(&[finished(id, goals, 0)], Utc::now()).await.unwrap();
        let state = engine.state();
        let ticket = state.tickets().iter().find(|t| t.match_id().as_str() == *id).unwrap();
        tally.push(ticket.status(), ticket.odds());
        assert_eq!(state.strategies()[0].performance(), &tally.stats());
    }

    let state = engine.state();
    let folded = PerformanceStats::from_tickets(state.tickets());
    assert_eq!(state.strategies()[0].performance(), &folded);
    assert_eq!(folded.wins, 3);
    assert_eq!(folded.total_settled, 5);
    assert_eq!(folded.strike_rate, dec!(60.0));
}
