//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `try_new` constructors and by state
//! transitions that would break an invariant.
//!
//! # Examples
//!
//! ```
//! use footalert::domain::error::DomainError;
//! use footalert::domain::outcome::TargetOutcome;
//! use footalert::domain::strategy::Strategy;
//! use footalert::domain::id::{OwnerId, StrategyId};
//!
//! let result = Strategy::try_new(
//!     StrategyId::new("s-1"),
//!     OwnerId::new("u-1"),
//!     "Late goals",
//!     vec![],  // empty!
//!     TargetOutcome::Over05Goals,
//! );
//!
//! assert!(matches!(result, Err(DomainError::EmptyCriteria)));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::id::TicketId;
use super::ticket::TicketStatus;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Strategies must carry at least one criterion.
    #[error("criteria cannot be empty")]
    EmptyCriteria,

    /// A settled ticket is terminal and cannot transition again.
    #[error("ticket {ticket_id} is already settled as {status}")]
    AlreadySettled {
        /// The ticket that was already settled.
        ticket_id: TicketId,
        /// Its terminal status.
        status: TicketStatus,
    },

    /// Decimal odds must exceed 1.0 to represent a real price.
    #[error("odds must be greater than 1, got {odds}")]
    InvalidOdds {
        /// The rejected odds value.
        odds: Decimal,
    },

    /// Metric id or label not present in the catalogue.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// Target outcome id or label not recognised.
    #[error("unknown target outcome: {0}")]
    UnknownOutcome(String),
}
