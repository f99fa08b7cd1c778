//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the engine's collaborators: the match data
//! provider, storage, and notifications.

pub mod feed;
pub mod notifier;
pub mod store;
