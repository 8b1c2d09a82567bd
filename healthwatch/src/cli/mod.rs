//! CLI module for healthwatch
//!
//! Provides the `serve` / `monitor` / `clean` subcommands.

pub mod clean;
pub mod monitor;
pub mod serve;

use clap::{Parser, Subcommand};

/// healthwatch - status service, health monitor and log cleanup utilities
#[derive(Parser, Debug)]
#[command(name = "healthwatch")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    HEALTHWATCH_HOST            Bind address (default: 0.0.0.0)
    HEALTHWATCH_PORT            Listen port (default: 5000, fallback: PORT)
    HEALTHWATCH_LOG_LEVEL       Log level (default: info, fallback: RUST_LOG)
    HEALTHWATCH_TARGET_URL      Monitor target (default: http://localhost:5000/health)
    HEALTHWATCH_TIMEOUT_SECS    Probe timeout in seconds (default: 5)
    HEALTHWATCH_INTERVAL_SECS   Seconds between probes (default: 30)
    HEALTHWATCH_LOG_FILE        Monitor log file (default: health_check.log)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the status server (`/` and `/health`)
    Serve(serve::ServeArgs),
    /// Periodically probe a URL and log the result
    Monitor(monitor::MonitorArgs),
    /// Delete files older than N days
    Clean(clean::CleanArgs),
}
