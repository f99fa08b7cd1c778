//! footalert - Live football strategy alerts.
//!
//! Users define strategies as a conjunction of criteria over live match
//! statistics, pre-match aggregates and odds, plus the bet to place when
//! they all hold. Each poll of the match feed runs one engine tick:
//!
//! 1. Settle pending tickets whose match is in the batch
//! 2. Re-derive performance for the strategies that settled
//! 3. Evaluate every active strategy against every match
//! 4. Open a ticket and notify for each new trigger
//!
//! # Modules
//!
//! - [`domain`] - Snapshots, metrics, criteria, strategies, tickets, performance
//! - [`port`] - Feed, store and notifier traits
//! - [`application`] - Matcher, ticket factory, settlement, engine and poll loop
//! - [`adapter`] - CLI plus file, memory, replay and demo adapters
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use footalert::domain::criterion::{Criterion, Operator};
//! use footalert::domain::metric::Metric;
//! use footalert::domain::snapshot::{MatchPhase, MatchSnapshot};
//! use rust_decimal_macros::dec;
//!
//! let late = Criterion::new(Metric::Minute, Operator::GreaterThan, dec!(70));
//! let snapshot = MatchSnapshot::new("m1", MatchPhase::Live, 75);
//! assert!(late.check(&snapshot).passed());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
