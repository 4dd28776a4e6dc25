//! CLI argument definitions for the fieldguard harness.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fieldguard",
    version,
    about = "Duplicate detection and URL level derivation for form snapshots",
    long_about = "Run the fieldguard engine against JSON page snapshots.\n\n\
                  Detects values repeated across a form's wide content fields and\n\
                  derives URL path-depth integers into their paired level fields."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Simulate typing a snapshot's values and report duplicates and levels.
    Check(CheckArgs),

    /// Run submit-time validation over a snapshot.
    Validate(ValidateArgs),

    /// Replay a timed edit script through the debounce coordinator.
    Replay(ReplayArgs),

    /// Print the path depth of a single URL.
    Depth(DepthArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the page snapshot JSON.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the page snapshot JSON.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Emit a machine-readable JSON report instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Path to the edit script JSON (page snapshot plus timed edits).
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Override the debounce quiet period in milliseconds.
    #[arg(long = "debounce-ms")]
    pub debounce_ms: Option<u64>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args)]
pub struct DepthArgs {
    /// The URL-like text to measure.
    #[arg(value_name = "URL")]
    pub url: String,
}

/// Engine knobs shared by the snapshot-driven commands.
#[derive(Args)]
pub struct EngineArgs {
    /// Compare values without regard to case.
    #[arg(long = "case-insensitive")]
    pub case_insensitive: bool,

    /// Width threshold (px) separating content fields from level fields.
    #[arg(long = "width-threshold", value_name = "PX")]
    pub width_threshold: Option<f64>,

    /// Suppress user-visible notices.
    #[arg(long = "no-notifications")]
    pub no_notifications: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
