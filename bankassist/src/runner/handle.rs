//! Handle to a running timer task.

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use super::TimerExit;
use crate::errors::{BankAssistError, Result};
use crate::pipeline::PipelineRun;

/// Owner of a running simulation.
///
/// Dropping the handle aborts the timer task, so no tick can happen after
/// the owning view is gone.
#[derive(Debug)]
pub struct RunHandle {
    case_id: String,
    snapshots: watch::Receiver<PipelineRun>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<TimerExit>>,
}

impl RunHandle {
    pub(crate) fn new(
        case_id: String,
        snapshots: watch::Receiver<PipelineRun>,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<TimerExit>,
    ) -> Self {
        Self {
            case_id,
            snapshots,
            shutdown: Some(shutdown),
            task: Some(task),
        }
    }

    /// The case being simulated.
    #[must_use]
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    /// The latest published state of the run.
    #[must_use]
    pub fn snapshot(&self) -> PipelineRun {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified after every tick.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PipelineRun> {
        self.snapshots.clone()
    }

    /// Returns true once the timer task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stops the timer. No tick starts after this returns. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            debug!(case_id = %self.case_id, "Cancelling run timer");
            let _ = tx.send(());
        }
    }

    /// Waits for the timer task to exit.
    pub async fn finished(mut self) -> Result<TimerExit> {
        let task = self
            .task
            .take()
            .ok_or_else(|| BankAssistError::Runner("timer task already detached".to_string()))?;
        task.await
            .map_err(|e| BankAssistError::Runner(e.to_string()))
    }

    /// Cancels the timer and waits for the task to exit.
    pub async fn cancel_and_wait(mut self) -> Result<TimerExit> {
        self.cancel();
        self.finished().await
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!(case_id = %self.case_id, "Run handle dropped, aborting timer");
            }
            task.abort();
        }
    }
}
