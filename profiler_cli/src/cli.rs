//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "profiler", version, about = "Shot phase profiler CLI")]
pub struct Cli {
    /// Path to the shot profile TOML
    #[arg(long, value_name = "FILE", default_value = "etc/profile.toml")]
    pub config: PathBuf,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded shot log through the profile, one JSON line per tick
    Replay {
        /// Shot log CSV (strict header)
        #[arg(long, value_name = "FILE")]
        log: PathBuf,
        /// Stop after N ticks (overrides replay.max_ticks; 0 = unlimited)
        #[arg(long, value_name = "N")]
        max_ticks: Option<u64>,
    },
    /// Validate the profile and list its phases
    Check,
}
