//! Persistence ports for strategies and tickets.
//!
//! Every write is an upsert keyed by id, so retrying a write that may or may
//! not have landed is always safe.

use async_trait::async_trait;

use crate::domain::id::OwnerId;
use crate::domain::strategy::Strategy;
use crate::domain::ticket::BetTicket;
use crate::error::Result;

/// Storage operations for strategies.
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// List every stored strategy.
    async fn list_strategies(&self) -> Result<Vec<Strategy>>;

    /// List strategies owned by one user.
    async fn list_strategies_by_owner(&self, owner: &OwnerId) -> Result<Vec<Strategy>>;

    /// Store a new strategy, replacing one with the same id.
    async fn create_strategy(&self, strategy: &Strategy) -> Result<()>;

    /// Update a strategy's mutable fields (triggered set, performance).
    async fn update_strategy(&self, strategy: &Strategy) -> Result<()>;
}

/// Storage operations for bet tickets. Tickets are never deleted.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// List every stored ticket.
    async fn list_tickets(&self) -> Result<Vec<BetTicket>>;

    /// Store a new ticket, replacing one with the same id.
    async fn create_ticket(&self, ticket: &BetTicket) -> Result<()>;

    /// Overwrite a ticket after settlement.
    async fn update_ticket(&self, ticket: &BetTicket) -> Result<()>;
}
