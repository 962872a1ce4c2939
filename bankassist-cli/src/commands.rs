//! Command handlers.

use anyhow::{Context, Result};
use bankassist::prelude::*;
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::Path;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::render;

/// Flags and environment variables layered over the config file.
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Tick interval in milliseconds (overrides the config file)
    #[arg(long, env = "BANKASSIST_INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// When the first stage starts (overrides the config file)
    #[arg(long, value_enum)]
    start: Option<StartArg>,
}

impl ConfigOverrides {
    fn apply(&self, mut config: StepperConfig) -> StepperConfig {
        if let Some(ms) = self.interval_ms {
            config = config.with_tick_interval_ms(ms);
        }
        if let Some(start) = self.start {
            config = config.with_start_policy(start.into());
        }
        config
    }
}

/// Options for `bankassist run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Case identifier (generated when omitted)
    #[arg(long)]
    case_id: Option<String>,

    /// Seed for reproducible progress increments
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Print one JSON snapshot per tick instead of the live board
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StartArg {
    Eager,
    FirstTick,
}

impl From<StartArg> for StartPolicy {
    fn from(arg: StartArg) -> Self {
        match arg {
            StartArg::Eager => Self::Eager,
            StartArg::FirstTick => Self::OnFirstTick,
        }
    }
}

/// The config file (or defaults) with overrides applied, validated.
fn effective_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<StepperConfig> {
    let base = match path {
        Some(path) => StepperConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => StepperConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate().context("Invalid stepper configuration")?;
    Ok(config)
}

/// Simulates one case until it completes or the user interrupts.
pub async fn run(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    let config = effective_config(config_path, &args.overrides)?;

    let case_id = args.case_id.unwrap_or_else(generate_case_id);
    let catalog = StageCatalog::banking();
    let (summary_tx, summary_rx) = oneshot::channel();

    let stepper = match args.seed {
        Some(seed) => PipelineStepper::seeded(case_id.clone(), &catalog, config, seed),
        None => PipelineStepper::new(case_id.clone(), &catalog, config),
    }
    .context("Failed to create pipeline")?
    .with_event_sink(std::sync::Arc::new(LoggingEventSink::info()))
    .on_complete(move |summary| {
        let _ = summary_tx.send(summary);
    });

    info!(case_id = %case_id, "Starting simulated orchestration");

    let mut handle = spawn_run(stepper);
    let mut snapshots = handle.subscribe();
    show(&snapshots.borrow_and_update(), args.json)?;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let run = snapshots.borrow_and_update().clone();
                show(&run, args.json)?;
                if run.is_complete() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!(case_id = %case_id, "Interrupted, stopping timer");
                handle.cancel();
                break;
            }
        }
    }

    let exit = handle.finished().await.context("Timer task failed")?;
    if exit == TimerExit::Cancelled {
        eprintln!("{}", format!("Case {case_id} cancelled before completion.").yellow());
        return Ok(());
    }

    let final_run = snapshots.borrow().clone();
    let summary = summary_rx
        .await
        .context("Run completed without a completion summary")?;

    if args.json {
        let line = serde_json::json!({ "summary": summary, "result": final_run.result() });
        println!("{line}");
    } else {
        println!();
        println!("{}", render::summary(&summary));
        if let Some(result) = final_run.result() {
            println!("{}", render::result(result));
        }
    }
    Ok(())
}

fn show(run: &PipelineRun, json: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string(run)?)?;
    } else {
        // clear screen and home cursor
        write!(out, "\x1B[2J\x1B[H{}", render::board(run))?;
    }
    out.flush()?;
    Ok(())
}

/// Lists the stages of the banking pipeline.
pub fn stages() -> Result<()> {
    let catalog = StageCatalog::banking();
    let outputs = CannedOutputs::default();
    for (i, stage) in catalog.stages().iter().enumerate() {
        println!(
            "{:>2}. {} {} ({})",
            i + 1,
            render::icon_glyph(stage.icon),
            stage.display_name.bold(),
            stage.identifier.dimmed()
        );
        println!("    {}", stage.description);
        println!("    {} {}", "output:".dimmed(), outputs.output_for(&stage.identifier));
    }
    Ok(())
}

/// Prints the effective configuration: file or defaults plus overrides.
pub fn show_config(overrides: &ConfigOverrides, config_path: Option<&Path>) -> Result<()> {
    let config = effective_config(config_path, overrides)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_effective_config_defaults() {
        let config = effective_config(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, StepperConfig::default());
    }

    #[test]
    fn test_effective_config_applies_overrides() {
        let overrides = ConfigOverrides {
            interval_ms: Some(250),
            start: Some(StartArg::FirstTick),
        };
        let config = effective_config(None, &overrides).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.start_policy, StartPolicy::OnFirstTick);
        assert_eq!(config.max_increment, StepperConfig::default().max_increment);
    }

    #[test]
    fn test_effective_config_rejects_zero_interval() {
        let overrides = ConfigOverrides {
            interval_ms: Some(0),
            start: None,
        };
        assert!(effective_config(None, &overrides).is_err());
    }
}
