//! Live counters derived from a run.

use serde::{Deserialize, Serialize};

use crate::core::{Stage, StageState};

/// Stage counts by state plus overall completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Stages in `Done`.
    pub completed: usize,
    /// Stages in `InProgress`.
    pub in_progress: usize,
    /// Stages in `Pending`.
    pub pending: usize,
    /// Stages in `Failed`.
    pub failed: usize,
    /// All stages.
    pub total: usize,
    /// `completed / total` as a rounded percentage.
    pub percent_complete: u8,
}

impl RunMetrics {
    /// Counts the given stages.
    #[must_use]
    pub fn from_stages(stages: &[Stage]) -> Self {
        let mut metrics = Self {
            total: stages.len(),
            ..Self::default()
        };
        for stage in stages {
            match stage.state() {
                StageState::Done => metrics.completed += 1,
                StageState::InProgress => metrics.in_progress += 1,
                StageState::Pending => metrics.pending += 1,
                StageState::Failed => metrics.failed += 1,
            }
        }
        if metrics.total > 0 {
            // round half up without floats
            let percent = (metrics.completed * 200 + metrics.total) / (metrics.total * 2);
            metrics.percent_complete = u8::try_from(percent).unwrap_or(100);
        }
        metrics
    }
}
