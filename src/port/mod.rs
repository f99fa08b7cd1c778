//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Feed   │            │   Store     │              │ Notifier  │
//! │ Adapter │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! - [`MatchFeed`] - Live match snapshots
//! - [`StrategyStore`], [`TicketStore`] - Persistence
//! - [`Notifier`] - Event notifications

pub mod outbound;

pub use outbound::feed::MatchFeed;
pub use outbound::notifier::{Event, Notifier, NotifierRegistry, TicketWonEvent, TriggerEvent};
pub use outbound::store::{StrategyStore, TicketStore};
