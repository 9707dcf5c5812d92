// src/logging.rs

//! Logging setup for `phaseplan` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `PHASEPLAN_LOG`: a level name ("debug", "warning", ...) or any
//!    `EnvFilter` directive list, e.g. `phaseplan::dag=trace,info` to trace
//!    graph construction only
//! 3. default to `info`
//!
//! Logs go to STDERR so the plan or rendering on stdout can be piped.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "PHASEPLAN_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let filter = log_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}

/// Build the subscriber filter from the CLI flag and the `PHASEPLAN_LOG`
/// value. A value that is neither a level nor a valid directive list falls
/// back to `info`.
pub fn log_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> EnvFilter {
    if let Some(lvl) = cli_level {
        return EnvFilter::new(directive_for(lvl));
    }

    let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) else {
        return EnvFilter::new(DEFAULT_DIRECTIVE);
    };

    if let Some(lvl) = parse_level_str(value) {
        return EnvFilter::new(directive_for(lvl));
    }
    EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn directive_for(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

fn parse_level_str(s: &str) -> Option<LogLevel> {
    match s.to_lowercase().as_str() {
        "error" => Some(LogLevel::Error),
        "warn" | "warning" => Some(LogLevel::Warn),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        "trace" => Some(LogLevel::Trace),
        _ => None,
    }
}
