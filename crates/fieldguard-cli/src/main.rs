//! fieldguard CLI.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};

use fieldguard_cli::logging::{LogConfig, LogFormat, init_logging};
use fieldguard_cli::report::{self, ValidationPayload};
use fieldguard_cli::commands::{run_check, run_depth, run_replay, run_validate};
use fieldguard_model::{EditScript, EngineConfig, PageSnapshot};

mod cli;

use crate::cli::{Cli, Command, EngineArgs, LogFormatArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let exit_code = match cli.command {
        Command::Check(args) => match check(&args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Validate(args) => match validate(&args) {
            Ok(blocked) => {
                if blocked {
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                2
            }
        },
        Command::Replay(args) => match replay(&args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Depth(args) => {
            println!("{}", run_depth(&args.url));
            0
        }
    };
    std::process::exit(exit_code);
}

fn check(args: &cli::CheckArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let result = run_check(&snapshot, engine_config(&args.engine))?;
    report::print_check(&result);
    Ok(())
}

fn validate(args: &cli::ValidateArgs) -> Result<bool> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let result = run_validate(&snapshot, engine_config(&args.engine))?;
    if args.json {
        let payload = ValidationPayload::new(&result);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        report::print_validate(&result);
    }
    Ok(result.blocked)
}

fn replay(args: &cli::ReplayArgs) -> Result<()> {
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("reading {}", args.script.display()))?;
    let script: EditScript =
        serde_json::from_str(&text).context("parsing edit script JSON")?;
    let mut config = engine_config(&args.engine);
    if let Some(millis) = args.debounce_ms {
        config.debounce_delay_ms = millis;
    }
    let result = run_replay(&script, config)?;
    report::print_replay(&result);
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<PageSnapshot> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).context("parsing page snapshot JSON")
}

fn engine_config(args: &EngineArgs) -> EngineConfig {
    let mut config = EngineConfig::default()
        .with_case_sensitive(!args.case_insensitive)
        .with_notifications(!args.no_notifications);
    if let Some(threshold) = args.width_threshold {
        config.width_threshold_px = threshold;
    }
    config
}

/// Build logging configuration from CLI flags.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    config
}
