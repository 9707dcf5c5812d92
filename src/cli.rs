// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::loader::default_config_path;
use crate::types::RenderFormat;

/// Command-line arguments for `phaseplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "phaseplan",
    version,
    about = "Plan parallel execution phases for a workflow step list.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PHASEPLAN_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the phase breakdown, total duration, total cost and critical path.
    Plan {
        /// Step file (TOML, or JSON when the name ends in `.json`).
        #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
        file: PathBuf,

        /// Print the plan as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Render the dependency graph.
    #[command(alias = "dag")]
    Graph {
        /// Step file (TOML, or JSON when the name ends in `.json`).
        #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = RenderFormat::Tree)]
        format: RenderFormat,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
