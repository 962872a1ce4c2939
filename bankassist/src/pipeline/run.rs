//! Pipeline run state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrchestrationResult, RunMetrics};
use crate::catalog::StageCatalog;
use crate::config::StartPolicy;
use crate::core::{Stage, StageState};
use crate::errors::Result;

/// One end-to-end simulated case.
///
/// Only the owning [`PipelineStepper`](super::PipelineStepper) mutates a run.
/// Clones handed out to renderers are read-only snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    run_id: Uuid,
    case_id: String,
    created_at: String,
    stages: Vec<Stage>,
    is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<OrchestrationResult>,
}

impl PipelineRun {
    pub(crate) fn new(
        case_id: impl Into<String>,
        catalog: &StageCatalog,
        policy: StartPolicy,
        initial_progress: u8,
    ) -> Result<Self> {
        catalog.validate()?;
        let mut stages: Vec<Stage> = catalog.stages().iter().map(|d| d.to_stage()).collect();
        if policy == StartPolicy::Eager {
            if let Some(first) = stages.first_mut() {
                first.start(initial_progress);
            }
        }
        Ok(Self {
            run_id: Uuid::now_v7(),
            case_id: case_id.into(),
            created_at: crate::utils::iso_timestamp(),
            stages,
            is_complete: false,
            result: None,
        })
    }

    /// Unique id of this run.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// The case this run processes.
    #[must_use]
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    /// When the run was created (ISO 8601).
    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Stages in pipeline order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Looks up a stage by identifier.
    #[must_use]
    pub fn stage(&self, identifier: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.identifier() == identifier)
    }

    /// True once every stage is done and the result has been produced.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// The synthetic result, present once the run is complete.
    #[must_use]
    pub fn result(&self) -> Option<&OrchestrationResult> {
        self.result.as_ref()
    }

    /// Index of the stage currently in progress.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.stages.iter().position(|s| s.state().is_active())
    }

    /// The stage currently in progress.
    #[must_use]
    pub fn active_stage(&self) -> Option<&Stage> {
        self.active_index().map(|i| &self.stages[i])
    }

    /// Live counters for this run.
    #[must_use]
    pub fn metrics(&self) -> RunMetrics {
        RunMetrics::from_stages(&self.stages)
    }

    pub(crate) fn all_done(&self) -> bool {
        self.stages.iter().all(|s| s.state() == StageState::Done)
    }

    pub(crate) fn stages_mut(&mut self) -> &mut [Stage] {
        &mut self.stages
    }

    pub(crate) fn mark_complete(&mut self, result: OrchestrationResult) {
        self.is_complete = true;
        self.result = Some(result);
    }
}
