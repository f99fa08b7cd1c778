//! Per-tick engine pipeline.
//!
//! One tick runs four stages in order:
//!
//! 1. **Settle** every pending ticket whose match is in the batch
//! 2. **Aggregate** performance for every strategy that had a ticket settle
//! 3. **Detect** triggers for every active strategy against every snapshot
//! 4. **Open** a ticket per trigger and notify
//!
//! Each stage changes the in-memory state synchronously, queues the writes
//! it implies, then flushes them. Writes that fail stay queued and are
//! retried before anything else on the next tick; detection never starts
//! while settlement writes are still outstanding.
//!
//! Observers read the state through [`Engine::subscribe`] and only ever see
//! it between stages.

use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::factory::TicketFactory;
use super::matcher;
use super::settlement;
use crate::domain::id::{MatchId, OwnerId, StrategyId, TicketId};
use crate::domain::performance::PerformanceStats;
use crate::domain::snapshot::MatchSnapshot;
use crate::domain::strategy::Strategy;
use crate::domain::ticket::{BetTicket, TicketStatus};
use crate::error::Result;
use crate::port::outbound::notifier::{Event, Notifier, TicketWonEvent, TriggerEvent};
use crate::port::outbound::store::{StrategyStore, TicketStore};

/// Immutable view of everything the engine owns.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    strategies: Vec<Strategy>,
    tickets: Vec<BetTicket>,
}

impl EngineState {
    #[must_use]
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    #[must_use]
    pub fn tickets(&self) -> &[BetTicket] {
        &self.tickets
    }

    #[must_use]
    pub fn strategy(&self, id: &StrategyId) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.id() == id)
    }

    /// Tickets opened by one strategy, oldest first.
    pub fn tickets_for<'a>(&'a self, id: &'a StrategyId) -> impl Iterator<Item = &'a BetTicket> {
        self.tickets.iter().filter(move |t| t.strategy_id() == id)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.tickets.iter().filter(|t| t.is_pending()).count()
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Snapshots in the batch.
    pub matches: usize,
    pub settled: usize,
    pub won: usize,
    pub lost: usize,
    pub triggered: usize,
    /// Writes still queued after the tick.
    pub deferred: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum WriteKey {
    Strategy(StrategyId),
    Ticket(TicketId),
}

#[derive(Debug, Clone)]
enum PendingWrite {
    Strategy(Strategy),
    CreateTicket(BetTicket),
    UpdateTicket(BetTicket),
}

impl PendingWrite {
    fn key(&self) -> WriteKey {
        match self {
            Self::Strategy(strategy) => WriteKey::Strategy(strategy.id().clone()),
            Self::CreateTicket(ticket) | Self::UpdateTicket(ticket) => {
                WriteKey::Ticket(ticket.id().clone())
            }
        }
    }
}

/// Strategy evaluation and settlement engine.
pub struct Engine {
    strategy_store: Arc<dyn StrategyStore>,
    ticket_store: Arc<dyn TicketStore>,
    notifier: Arc<dyn Notifier>,
    factory: TicketFactory,
    state: Arc<EngineState>,
    backlog: Vec<PendingWrite>,
    publisher: watch::Sender<Arc<EngineState>>,
    ineligible: matcher::IneligibleWarnings,
}

impl Engine {
    /// Create an engine with empty state. Call [`load`](Self::load) before
    /// the first tick.
    pub fn new(
        strategy_store: Arc<dyn StrategyStore>,
        ticket_store: Arc<dyn TicketStore>,
        notifier: Arc<dyn Notifier>,
        factory: TicketFactory,
    ) -> Self {
        let state = Arc::new(EngineState::default());
        let (publisher, _) = watch::channel(Arc::clone(&state));
        Self {
            strategy_store,
            ticket_store,
            notifier,
            factory,
            state,
            backlog: Vec::new(),
            publisher,
            ineligible: matcher::IneligibleWarnings::new(),
        }
    }

    /// Load strategies and their tickets from storage.
    ///
    /// Each strategy's triggered set is widened with the matches of its
    /// persisted tickets, and performance is recomputed from ticket history.
    /// Strategies changed by this reconciliation are queued for writing.
    pub async fn load(&mut self, owner: Option<&OwnerId>) -> Result<()> {
        let mut strategies = match owner {
            Some(owner) => self.strategy_store.list_strategies_by_owner(owner).await?,
            None => self.strategy_store.list_strategies().await?,
        };
        let known: HashSet<StrategyId> = strategies.iter().map(|s| s.id().clone()).collect();
        let tickets: Vec<BetTicket> = self
            .ticket_store
            .list_tickets()
            .await?
            .into_iter()
            .filter(|t| known.contains(t.strategy_id()))
            .collect();

        let mut repaired = Vec::new();
        for strategy in &mut strategies {
            let own: Vec<&BetTicket> = tickets.iter().filter(|t| t.strategy_id() == strategy.id()).collect();
            let mut changed = false;
            for ticket in &own {
                changed |= strategy.mark_triggered(ticket.match_id().clone());
            }
            let performance = PerformanceStats::from_tickets(own.iter().copied());
            if strategy.performance() != &performance {
                strategy.set_performance(performance);
                changed = true;
            }
            if changed {
                repaired.push(PendingWrite::Strategy(strategy.clone()));
            }
        }

        info!(
            strategies = strategies.len(),
            tickets = tickets.len(),
            repaired = repaired.len(),
            "Engine state loaded"
        );
        for write in repaired {
            self.enqueue(write);
        }
        for strategy in &strategies {
            if let Err(reason) = matcher::eligibility(strategy) {
                self.ineligible.report(strategy, &reason);
            }
        }
        self.state = Arc::new(EngineState { strategies, tickets });
        self.publish();
        Ok(())
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> Arc<EngineState> {
        Arc::clone(&self.state)
    }

    /// Receive the state after every stage.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<EngineState>> {
        self.publisher.subscribe()
    }

    /// Writes waiting to be retried.
    #[must_use]
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Run one tick over a snapshot batch.
    ///
    /// # Errors
    ///
    /// Returns the first persistence error. In-memory changes already
    /// applied are kept and their writes stay queued for the next tick.
    pub async fn tick(&mut self, batch: &[MatchSnapshot], now: DateTime<Utc>) -> Result<TickReport> {
        let mut report = TickReport {
            matches: batch.len(),
            ..TickReport::default()
        };

        self.flush().await?;

        self.settle(batch, now, &mut report);
        self.flush().await?;

        self.detect(batch, now, &mut report);
        self.flush().await?;

        report.deferred = self.backlog.len();
        debug!(
            matches = report.matches,
            settled = report.settled,
            won = report.won,
            lost = report.lost,
            triggered = report.triggered,
            pending = self.state.pending_count(),
            "Tick complete"
        );
        Ok(report)
    }

    /// Settle pending tickets and re-aggregate the strategies they belong to.
    fn settle(&mut self, batch: &[MatchSnapshot], now: DateTime<Utc>, report: &mut TickReport) {
        let by_match: HashMap<&MatchId, &MatchSnapshot> = batch.iter().map(|s| (&s.id, s)).collect();
        let needs_settling = self.state.tickets.iter().any(|t| {
            t.is_pending() && by_match.contains_key(t.match_id())
        });
        if !needs_settling {
            return;
        }

        let state = Arc::make_mut(&mut self.state);
        let mut writes = Vec::new();
        let mut won = Vec::new();
        let mut touched = HashSet::new();

        for ticket in state.tickets.iter_mut().filter(|t| t.is_pending()) {
            let Some(snapshot) = by_match.get(ticket.match_id()) else {
                continue;
            };
            let Some(settlement) = settlement::resolve(ticket, snapshot, now) else {
                continue;
            };
            if let Err(error) = ticket.settle(settlement) {
                warn!(ticket_id = %ticket.id(), error = %error, "Settlement rejected");
                continue;
            }

            info!(
                ticket_id = %ticket.id(),
                strategy = %ticket.strategy_name(),
                match_id = %ticket.match_id(),
                outcome = %ticket.target_outcome(),
                status = %ticket.status(),
                "Ticket settled"
            );
            report.settled += 1;
            match ticket.status() {
                TicketStatus::Won => {
                    report.won += 1;
                    won.push(TicketWonEvent::from(&*ticket));
                }
                TicketStatus::Lost => report.lost += 1,
                TicketStatus::Pending => {}
            }
            touched.insert(ticket.strategy_id().clone());
            writes.push(PendingWrite::UpdateTicket(ticket.clone()));
        }

        for strategy in state.strategies.iter_mut().filter(|s| touched.contains(s.id())) {
            let performance = PerformanceStats::from_tickets(
                state.tickets.iter().filter(|t| t.strategy_id() == strategy.id()),
            );
            strategy.set_performance(performance);
            writes.push(PendingWrite::Strategy(strategy.clone()));
        }

        for write in writes {
            self.enqueue(write);
        }
        self.publish();
        for event in won {
            self.emit(Event::TicketWon(event));
        }
    }

    /// Match every active strategy against the batch and open tickets.
    fn detect(&mut self, batch: &[MatchSnapshot], now: DateTime<Utc>, report: &mut TickReport) {
        if batch.is_empty() {
            return;
        }
        let warnings = &mut self.ineligible;
        let eligible: Vec<usize> = self
            .state
            .strategies
            .iter()
            .enumerate()
            .filter(|(_, strategy)| match matcher::eligibility(strategy) {
                Ok(()) => true,
                Err(reason) => {
                    warnings.report(strategy, &reason);
                    false
                }
            })
            .filter(|(_, strategy)| batch.iter().any(|snapshot| matcher::matches(strategy, snapshot)))
            .map(|(index, _)| index)
            .collect();
        if eligible.is_empty() {
            return;
        }

        let state = Arc::make_mut(&mut self.state);
        let mut writes = Vec::new();
        let mut triggers = Vec::new();

        for index in eligible {
            let strategy = &mut state.strategies[index];
            let mut opened = 0;
            for snapshot in batch {
                if !matcher::matches(strategy, snapshot) {
                    continue;
                }
                let ticket = match self.factory.create(strategy, snapshot, now) {
                    Ok(ticket) => ticket,
                    Err(error) => {
                        warn!(strategy_id = %strategy.id(), error = %error, "Could not open ticket");
                        continue;
                    }
                };
                if !strategy.mark_triggered(snapshot.id.clone()) {
                    continue;
                }
                info!(
                    strategy = %strategy.name(),
                    match_id = %snapshot.id,
                    fixture = %snapshot.fixture(),
                    minute = snapshot.minute,
                    outcome = %ticket.target_outcome(),
                    odds = %ticket.odds(),
                    "Strategy triggered"
                );
                triggers.push(TriggerEvent::from(&ticket));
                writes.push(PendingWrite::CreateTicket(ticket.clone()));
                state.tickets.push(ticket);
                opened += 1;
            }
            if opened > 0 {
                writes.push(PendingWrite::Strategy(strategy.clone()));
            }
        }

        report.triggered += triggers.len();
        for write in writes {
            self.enqueue(write);
        }
        self.publish();
        for event in triggers {
            self.emit(Event::StrategyTriggered(event));
        }
    }

    /// Queue a write, replacing an older queued write for the same record.
    fn enqueue(&mut self, write: PendingWrite) {
        let key = write.key();
        if let Some(slot) = self.backlog.iter_mut().find(|queued| queued.key() == key) {
            *slot = match (&*slot, write) {
                (PendingWrite::CreateTicket(_), PendingWrite::UpdateTicket(ticket)) => {
                    PendingWrite::CreateTicket(ticket)
                }
                (_, write) => write,
            };
        } else {
            self.backlog.push(write);
        }
    }

    /// Write queued records in order, stopping at the first failure.
    async fn flush(&mut self) -> Result<()> {
        let mut written = 0;
        let mut failure = None;
        for write in &self.backlog {
            let result = match write {
                PendingWrite::Strategy(strategy) => self.strategy_store.update_strategy(strategy).await,
                PendingWrite::CreateTicket(ticket) => self.ticket_store.create_ticket(ticket).await,
                PendingWrite::UpdateTicket(ticket) => self.ticket_store.update_ticket(ticket).await,
            };
            if let Err(error) = result {
                failure = Some(error);
                break;
            }
            written += 1;
        }
        self.backlog.drain(..written);

        match failure {
            Some(error) => {
                warn!(error = %error, queued = self.backlog.len(), "Write failed, will retry next tick");
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(Arc::clone(&self.state));
    }

    /// Deliver an event; a panicking notifier never reaches the engine.
    fn emit(&self, event: Event) {
        let notifier = &self.notifier;
        if catch_unwind(AssertUnwindSafe(|| notifier.notify(event))).is_err() {
            warn!("Notifier panicked, event dropped");
        }
    }
}
