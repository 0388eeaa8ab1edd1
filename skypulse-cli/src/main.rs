//! Binary crate for the `skypulse` command-line dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the interactive dashboard
//! - Human-friendly output formatting

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

/// Environment variable holding the log filter, e.g. `SKYPULSE_LOG=skypulse_core=debug`.
const LOG_ENV: &str = "SKYPULSE_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

/// Initialize the global tracing subscriber. Logs go to stderr so `--json` output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn,skypulse_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
