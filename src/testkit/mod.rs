//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for snapshots, criteria and strategies.
//! - [`feed`] - [`ScriptedFeed`](feed::ScriptedFeed), a
//!   [`MatchFeed`](crate::port::MatchFeed) serving queued batches and errors.
//! - [`notifier`] - [`RecordingNotifier`](notifier::RecordingNotifier) and a
//!   notifier that always panics.
//! - [`store`] - [`FailingStore`](store::FailingStore), a memory store whose
//!   writes can be switched to fail.

pub mod domain;
pub mod feed;
pub mod notifier;
pub mod store;
