//! Diagnostic checks.

pub mod config;

pub use config::execute_config;
