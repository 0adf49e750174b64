//! Moodreel CLI - Command-line interface
//!
//! Serves the web UI or runs one-off mood searches from the terminal.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use moodreel_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "moodreel")]
#[command(about = "Find movies and series that match your mood")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level (RUST_LOG overrides)
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    /// Directory for the full trace log of this run
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(log_file) = init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())? {
        eprintln!("Debug log: {}", log_file.display());
    }

    commands::handle_command(cli.command).await?;

    Ok(())
}
