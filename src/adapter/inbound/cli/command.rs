//! Command-line interface definitions.
//!
//! Defines the CLI structure for the footalert application using `clap`.
//! The CLI can run the alert engine, report strategy performance, list the
//! metric and outcome catalogues, and validate configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "footalert.toml";

/// Live football strategy alerts
#[derive(Parser, Debug)]
#[command(name = "footalert")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the footalert CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the feed and run strategies until interrupted
    Run(RunArgs),

    /// Show strategy performance
    Stats(StatsArgs),

    /// List the metrics criteria can use
    Metrics,

    /// List the outcomes a strategy can target
    Outcomes,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `footalert check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Stop after this many polls (overrides `poll.max_ticks`).
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Seconds between polls (overrides `poll.interval_secs`).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

/// Arguments for the `stats` subcommand.
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Only show this owner's strategies (overrides `owner`).
    #[arg(long)]
    pub owner: Option<String>,
}
