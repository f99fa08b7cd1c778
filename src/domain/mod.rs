//! Pure domain model: snapshots, metrics, criteria, strategies and tickets.
//!
//! Nothing in this module performs I/O or reads the clock; timestamps are
//! passed in by the application layer.

pub mod criterion;
pub mod error;
pub mod id;
pub mod metric;
pub mod outcome;
pub mod performance;
pub mod snapshot;
pub mod strategy;
pub mod ticket;
pub mod trigger;

pub use criterion::{evaluate, Criterion, CriterionCheck, Lenient, Operator};
pub use error::DomainError;
pub use id::{MatchId, OwnerId, StrategyId, TicketId};
pub use metric::{Formula, LiveStat, Metric, PreStat};
pub use outcome::{Direction, Line, OutcomeRule, ResultPick, TargetOutcome};
pub use performance::{PerformanceStats, PerformanceTally};
pub use snapshot::{
    LiveStats, MatchOdds, MatchPhase, MatchSnapshot, OddsMarket, PreMatch, PreMatchTeamStats,
    Score, Side, TeamStats,
};
pub use strategy::Strategy;
pub use ticket::{BetTicket, OddsSource, Settlement, TicketStatus, Verdict};
pub use trigger::TriggeredMatches;
