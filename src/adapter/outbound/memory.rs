//! In-memory store implementation.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::id::OwnerId;
use crate::domain::strategy::Strategy;
use crate::domain::ticket::BetTicket;
use crate::error::Result;
use crate::port::outbound::store::{StrategyStore, TicketStore};

/// Volatile store keeping records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    strategies: RwLock<Vec<Strategy>>,
    tickets: RwLock<Vec<BetTicket>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with strategies.
    #[must_use]
    pub fn with_strategies(strategies: Vec<Strategy>) -> Self {
        Self {
            strategies: RwLock::new(strategies),
            tickets: RwLock::default(),
        }
    }

    fn upsert_strategy(&self, strategy: &Strategy) {
        let mut strategies = self.strategies.write();
        match strategies.iter_mut().find(|s| s.id() == strategy.id()) {
            Some(slot) => *slot = strategy.clone(),
            None => strategies.push(strategy.clone()),
        }
    }

    fn upsert_ticket(&self, ticket: &BetTicket) {
        let mut tickets = self.tickets.write();
        match tickets.iter_mut().find(|t| t.id() == ticket.id()) {
            Some(slot) => *slot = ticket.clone(),
            None => tickets.push(ticket.clone()),
        }
    }
}

#[async_trait]
impl StrategyStore for MemoryStore {
    async fn list_strategies(&self) -> Result<Vec<Strategy>> {
        Ok(self.strategies.read().clone())
    }

    async fn list_strategies_by_owner(&self, owner: &OwnerId) -> Result<Vec<Strategy>> {
        Ok(self
            .strategies
            .read()
            .iter()
            .filter(|s| s.owner() == owner)
            .cloned()
            .collect())
    }

    async fn create_strategy(&self, strategy: &Strategy) -> Result<()> {
        self.upsert_strategy(strategy);
        Ok(())
    }

    async fn update_strategy(&self, strategy: &Strategy) -> Result<()> {
        self.upsert_strategy(strategy);
        Ok(())
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn list_tickets(&self) -> Result<Vec<BetTicket>> {
        Ok(self.tickets.read().clone())
    }

    async fn create_ticket(&self, ticket: &BetTicket) -> Result<()> {
        self.upsert_ticket(ticket);
        Ok(())
    }

    async fn update_ticket(&self, ticket: &BetTicket) -> Result<()> {
        self.upsert_ticket(ticket);
        Ok(())
    }
}
