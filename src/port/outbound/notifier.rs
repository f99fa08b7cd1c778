//! Notifier port for event notifications.
//!
//! This module defines the trait for sending notifications about engine
//! events: a strategy firing on a match and a ticket winning.

use rust_decimal::Decimal;

use crate::domain::id::{MatchId, StrategyId, TicketId};
use crate::domain::outcome::TargetOutcome;
use crate::domain::snapshot::Score;
use crate::domain::ticket::BetTicket;

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// A strategy's criteria all held for a match and a ticket was opened.
    StrategyTriggered(TriggerEvent),
    /// A pending ticket settled as won.
    TicketWon(TicketWonEvent),
}

/// Strategy trigger event.
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    pub ticket_id: TicketId,
    pub strategy_id: StrategyId,
    pub strategy_name: String,
    pub match_id: MatchId,
    /// `Home vs Away`.
    pub fixture: String,
    pub minute: u32,
    pub score: Option<Score>,
    pub target_outcome: TargetOutcome,
    pub odds: Decimal,
}

impl From<&BetTicket> for TriggerEvent {
    fn from(ticket: &BetTicket) -> Self {
        Self {
            ticket_id: ticket.id().clone(),
            strategy_id: ticket.strategy_id().clone(),
            strategy_name: ticket.strategy_name().to_string(),
            match_id: ticket.match_id().clone(),
            fixture: format!("{} vs {}", ticket.home_team(), ticket.away_team()),
            minute: ticket.minute_at_trigger(),
            score: ticket.initial_score(),
            target_outcome: ticket.target_outcome(),
            odds: ticket.odds(),
        }
    }
}

/// Winning ticket event.
#[derive(Debug, Clone)]
pub struct TicketWonEvent {
    pub ticket_id: TicketId,
    pub strategy_name: String,
    pub fixture: String,
    pub target_outcome: TargetOutcome,
    pub odds: Decimal,
    /// Score observed when the ticket settled.
    pub score: Option<Score>,
}

impl From<&BetTicket> for TicketWonEvent {
    fn from(ticket: &BetTicket) -> Self {
        Self {
            ticket_id: ticket.id().clone(),
            strategy_name: ticket.strategy_name().to_string(),
            fixture: format!("{} vs {}", ticket.home_team(), ticket.away_team()),
            target_outcome: ticket.target_outcome(),
            odds: ticket.odds(),
            score: ticket.score_at_result(),
        }
    }
}

/// Trait for notification handlers.
///
/// Notifications are fire-and-forget: the engine never waits on delivery
/// and never sees a delivery failure.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The `notify` method should not block or perform slow I/O synchronously
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        self.notify_all(event);
    }
}

/// A no-op notifier for when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::info;
        match event {
            Event::StrategyTriggered(e) => {
                let score = e.score.map_or_else(|| "?".to_string(), |s| s.to_string());
                info!(
                    strategy = %e.strategy_name,
                    fixture = %e.fixture,
                    minute = e.minute,
                    score = %score,
                    outcome = %e.target_outcome,
                    odds = %e.odds,
                    "Strategy triggered"
                );
            }
            Event::TicketWon(e) => {
                info!(
                    ticket_id = %e.ticket_id,
                    strategy = %e.strategy_name,
                    fixture = %e.fixture,
                    outcome = %e.target_outcome,
                    odds = %e.odds,
                    "Ticket won"
                );
            }
        }
    }
}
