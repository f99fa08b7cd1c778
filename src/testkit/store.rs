//! Store wrapper with switchable write failures.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;

use crate::adapter::outbound::memory::MemoryStore;
use crate::domain::id::OwnerId;
use crate::domain::strategy::Strategy;
use crate::domain::ticket::BetTicket;
use crate::error::{Error, Result};
use crate::port::outbound::store::{StrategyStore, TicketStore};

/// [`MemoryStore`] whose writes fail while [`set_failing`](Self::set_failing)
/// is on. Reads always succeed.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    failing: AtomicBool,
    attempts: AtomicU32,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategies(strategies: Vec<Strategy>) -> Self {
        Self {
            inner: MemoryStore::with_strategies(strategies),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Write calls seen, failed or not.
    pub fn write_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Store("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StrategyStore for FailingStore {
    async fn list_strategies(&self) -> Result<Vec<Strategy>> {
        self.inner.list_strategies().await
    }

    async fn list_strategies_by_owner(&self, owner: &OwnerId) -> Result<Vec<Strategy>> {
        self.inner.list_strategies_by_owner(owner).await
    }

    async fn create_strategy(&self, strategy: &Strategy) -> Result<()> {
        self.check()?;
        self.inner.create_strategy(strategy).await
    }

    async fn update_strategy(&self, strategy: &Strategy) -> Result<()> {
        self.check()?;
        self.inner.update_strategy(strategy).await
    }
}

#[async_trait]
impl TicketStore for FailingStore {
    async fn list_tickets(&self) -> Result<Vec<BetTicket>> {
        self.inner.list_tickets().await
    }

    async fn create_ticket(&self, ticket: &BetTicket) -> Result<()> {
        self.check()?;
        self.inner.create_ticket(ticket).await
    }

    async fn update_ticket(&self, ticket: &BetTicket) -> Result<()> {
        self.check()?;
        self.inner.update_ticket(ticket).await
    }
}
