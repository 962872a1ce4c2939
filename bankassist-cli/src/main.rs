//! # BankAssist CLI
//!
//! The `bankassist` binary hosts a simulated orchestration run in the
//! terminal. It owns the timer, renders every snapshot and tears the timer
//! down on exit or Ctrl-C.
//!
//! ## Commands
//!
//! - `bankassist run` - Simulate a case end to end
//! - `bankassist stages` - List the agent pipeline
//! - `bankassist config` - Print the effective stepper configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod render;

use commands::{ConfigOverrides, RunArgs};

/// BankAssist - simulated autonomous customer service orchestration
#[derive(Parser)]
#[command(name = "bankassist")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a JSON stepper configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "BANKASSIST_CONFIG",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BANKASSIST_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a customer service case
    Run(RunArgs),

    /// List the stages of the agent pipeline
    Stages,

    /// Print the effective stepper configuration as JSON
    Config(ConfigOverrides),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_json)?;

    match cli.command {
        Commands::Run(args) => commands::run(args, cli.config.as_deref()).await,
        Commands::Stages => commands::stages(),
        Commands::Config(overrides) => commands::show_config(&overrides, cli.config.as_deref()),
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}
