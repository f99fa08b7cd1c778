//! Outbound adapters (driven side).

pub mod demo;
pub mod json_store;
pub mod memory;
pub mod replay;

pub use demo::DemoFeed;
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use replay::ReplayFeed;
