//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the engine's per-tick pipeline and its poll loop.

pub mod engine;
pub mod factory;
pub mod matcher;
pub mod runner;
pub mod settlement;

pub use engine::{Engine, EngineState, TickReport};
pub use factory::TicketFactory;
pub use runner::{run, RunSummary, RunnerConfig};
