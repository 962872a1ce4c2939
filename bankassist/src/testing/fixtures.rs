//! Fixtures for stepper tests.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::catalog::StageCatalog;
use crate::config::StepperConfig;
use crate::errors::Result;
use crate::pipeline::{CompletionSummary, PipelineStepper};

/// Records every completion summary it receives.
#[derive(Debug, Clone, Default)]
pub struct CompletionRecorder {
    calls: Arc<Mutex<Vec<CompletionSummary>>>,
}

impl CompletionRecorder {
    /// Creates a new recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a callback that records into this recorder.
    #[must_use]
    pub fn callback(&self) -> impl FnOnce(CompletionSummary) + Send + 'static {
        let calls = Arc::clone(&self.calls);
        move |summary| calls.lock().push(summary)
    }

    /// Number of recorded invocations.
    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// All recorded summaries.
    #[must_use]
    pub fn calls(&self) -> Vec<CompletionSummary> {
        self.calls.lock().clone()
    }
}

/// A seeded stepper over the banking catalog with a recorder attached.
pub fn seeded_banking_stepper(
    case_id: &str,
    seed: u64,
) -> Result<(PipelineStepper, CompletionRecorder)> {
    let recorder = CompletionRecorder::new();
    let stepper = PipelineStepper::seeded(
        case_id,
        &StageCatalog::banking(),
        StepperConfig::default(),
        seed,
    )?
    .on_complete(recorder.callback());
    Ok((stepper, recorder))
}

/// A seeded stepper over `count` generic stages with a recorder attached.
pub fn seeded_linear_stepper(
    count: usize,
    config: StepperConfig,
    seed: u64,
) -> Result<(PipelineStepper, CompletionRecorder)> {
    let recorder = CompletionRecorder::new();
    let stepper = PipelineStepper::seeded(
        crate::utils::format_case_id(2024, 1),
        &StageCatalog::linear(count),
        config,
        seed,
    )?
    .on_complete(recorder.callback());
    Ok((stepper, recorder))
}
