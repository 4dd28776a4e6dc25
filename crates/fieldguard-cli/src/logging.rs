//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so report output on stdout stays machine-readable.
//!
//! # Log levels
//!
//! - `error`: fatal harness errors
//! - `warn`: suspicious snapshots, ignored edits
//! - `info`: command progress and summary counts
//! - `debug`: per-field evaluation detail

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level to emit.
    pub level_filter: LevelFilter,
    /// Output format.
    pub format: LogFormat,
    /// Whether to use ANSI colors.
    pub with_ansi: bool,
    /// Let `RUST_LOG` override the configured level when set.
    pub use_env_filter: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            format: LogFormat::default(),
            with_ansi: true,
            use_env_filter: true,
        }
    }
}

/// Initialize the global tracing subscriber. Call once at startup.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) {
    let filter = build_env_filter(config);
    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_ansi(config.with_ansi)
                .without_time();
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.with_ansi)
                .without_time();
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
    }
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let directives = default_directives(config.level_filter);
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives))
    } else {
        EnvFilter::new(&directives)
    }
}

/// Our crates at the configured level; external crates stay at warn.
fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    format!(
        "warn,fieldguard_cli={level},fieldguard_engine={level},fieldguard_model={level}",
        level = level
    )
}
