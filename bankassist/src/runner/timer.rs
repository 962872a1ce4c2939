//! The timer task.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::RunHandle;
use crate::core::PipelineEvent;
use crate::pipeline::{PipelineRun, PipelineStepper};

/// Why the timer task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerExit {
    /// The run completed and the timer stopped itself.
    Completed,
    /// The handle cancelled the timer first.
    Cancelled,
}

impl fmt::Display for TimerExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Spawns the timer task at the stepper's configured cadence.
///
/// Must be called from within a tokio runtime.
pub fn spawn_run<R>(stepper: PipelineStepper<R>) -> RunHandle
where
    R: Rng + Send + 'static,
{
    let period = stepper.config().tick_interval();
    spawn_run_with_interval(stepper, period)
}

/// Spawns the timer task with an explicit cadence.
///
/// The first tick happens one `period` after spawning.
pub fn spawn_run_with_interval<R>(stepper: PipelineStepper<R>, period: Duration) -> RunHandle
where
    R: Rng + Send + 'static,
{
    let case_id = stepper.run().case_id().to_string();
    let (snapshot_tx, snapshot_rx) = watch::channel(stepper.run().clone());
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(drive(stepper, period, snapshot_tx, shutdown_rx));
    RunHandle::new(case_id, snapshot_rx, shutdown_tx, task)
}

async fn drive<R: Rng + Send>(
    mut stepper: PipelineStepper<R>,
    period: Duration,
    snapshots: watch::Sender<PipelineRun>,
    mut shutdown: oneshot::Receiver<()>,
) -> TimerExit {
    let sink = Arc::clone(stepper.event_sink());
    let case_id = stepper.run().case_id().to_string();
    let period = period.max(Duration::from_millis(1));
    let interval_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);

    sink.emit(
        PipelineEvent::new("timer.started")
            .add_data("case_id", serde_json::json!(case_id))
            .add_data("interval_ms", serde_json::json!(interval_ms)),
    )
    .await;

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks: u64 = 0;

    let exit = loop {
        tokio::select! {
            biased;
            // a dropped sender means the handle is gone, which also ends the timer
            _ = &mut shutdown => break TimerExit::Cancelled,
            _ = ticker.tick() => {
                let outcome = stepper.tick();
                ticks += 1;
                snapshots.send_replace(stepper.run().clone());
                if stepper.is_complete() {
                    debug!(case_id = %case_id, ?outcome, ticks, "Timer stopping after completion");
                    break TimerExit::Completed;
                }
            }
        }
    };

    debug!(case_id = %case_id, %exit, ticks, "Timer stopped");
    sink.emit(
        PipelineEvent::new("timer.stopped")
            .add_data("case_id", serde_json::json!(case_id))
            .add_data("exit", serde_json::json!(exit))
            .add_data("ticks", serde_json::json!(ticks)),
    )
    .await;
    exit
}
