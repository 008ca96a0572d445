//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Drift Harness - scripted drift-maneuver test harness
#[derive(Parser, Debug)]
#[command(
    name = "drift-harness",
    author,
    version,
    about = "Scripted drift-maneuver test harness",
    long_about = "A drift-maneuver test harness driving a vehicle host through\n\
                  scripted accelerate/turn/rest sequences.\n\n\
                  Loads a maneuver plan from configuration, runs each maneuver\n\
                  through the phase sequencer against the built-in vehicle host,\n\
                  and exports per-run telemetry as CSV."
)]
pub struct Cli {
    /// Default log level when RUST_LOG is not set
    #[arg(
        long,
        default_value = "info",
        global = true,
        env = "DRIFT_HARNESS_LOG_LEVEL"
    )]
    pub log_level: String,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "DRIFT_HARNESS_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the maneuver schedule
    Run(RunArgs),

    /// Validate a maneuver plan without running
    Validate(ValidateArgs),

    /// Display maneuver plan information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to maneuver plan file (TOML or JSON)
    #[arg(short, long, default_value = "plan.toml", env = "DRIFT_HARNESS_PLAN")]
    pub plan: PathBuf,

    /// Simulation ticks per second
    #[arg(long, default_value = "50.0", env = "DRIFT_HARNESS_TICK_RATE")]
    pub tick_rate: f64,

    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    pub paced: bool,

    /// Maximum number of ticks to execute (0 = unlimited)
    #[arg(long, default_value = "0", env = "DRIFT_HARNESS_MAX_TICKS")]
    pub max_ticks: u64,

    /// Configuration index to start the schedule at
    #[arg(long, default_value = "0", env = "DRIFT_HARNESS_START_INDEX")]
    pub start_index: usize,

    /// Override telemetry output directory from the plan
    #[arg(long, env = "DRIFT_HARNESS_OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Friction settings file overriding the plan's friction section
    #[arg(long, env = "DRIFT_HARNESS_FRICTION")]
    pub friction: Option<PathBuf>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "DRIFT_HARNESS_METRICS_PORT")]
    pub metrics_port: u16,

    /// Validate the plan and exit without running
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to maneuver plan file to validate
    #[arg(short, long, default_value = "plan.toml")]
    pub plan: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to maneuver plan file
    #[arg(short, long, default_value = "plan.toml")]
    pub plan: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the turn schedule of every configuration
    #[arg(long)]
    pub turns: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
