//! The single-stage-at-a-time stepper.
//!
//! Each [`tick`](PipelineStepper::tick) advances at most one stage. The
//! stage in progress gains a random increment; when it reaches 100 it is
//! marked done with its canned output and the next stage starts. When the
//! last stage is done the result is synthesized and the completion callback
//! runs, once.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{CompletionSummary, OrchestrationResult, PipelineRun};
use crate::catalog::{CannedOutputs, CaseProfile, StageCatalog};
use crate::config::StepperConfig;
use crate::core::{PipelineEvent, StageState};
use crate::errors::Result;
use crate::events::{default_sink, EventSink};
use crate::utils::round_tenths;

/// Callback invoked when a run completes.
pub type CompletionCallback = Box<dyn FnOnce(CompletionSummary) + Send>;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed: the run is complete or has nothing to advance.
    Idle,
    /// A pending stage was moved to `InProgress`.
    Started {
        /// Index of the started stage.
        index: usize,
    },
    /// The active stage gained progress but is not done yet.
    Advanced {
        /// Index of the advanced stage.
        index: usize,
        /// Its new progress.
        progress: u8,
    },
    /// The active stage finished.
    StageCompleted {
        /// Index of the finished stage.
        index: usize,
        /// Index of the stage started in its place, if any.
        next: Option<usize>,
    },
    /// The last stage finished and the run is now complete.
    RunCompleted,
}

impl TickOutcome {
    /// Returns true if this tick completed the run.
    #[must_use]
    pub fn is_run_completed(&self) -> bool {
        matches!(self, Self::RunCompleted)
    }
}

/// Owns a [`PipelineRun`] and advances it.
pub struct PipelineStepper<R = StdRng> {
    run: PipelineRun,
    config: StepperConfig,
    outputs: CannedOutputs,
    profile: CaseProfile,
    rng: R,
    sink: Arc<dyn EventSink>,
    on_complete: Option<CompletionCallback>,
}

impl PipelineStepper<StdRng> {
    /// Creates a stepper for a new case, seeded from OS entropy.
    pub fn new(
        case_id: impl Into<String>,
        catalog: &StageCatalog,
        config: StepperConfig,
    ) -> Result<Self> {
        Self::with_rng(case_id, catalog, config, StdRng::from_entropy())
    }

    /// Creates a stepper whose increments are reproducible.
    pub fn seeded(
        case_id: impl Into<String>,
        catalog: &StageCatalog,
        config: StepperConfig,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(case_id, catalog, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PipelineStepper<R> {
    /// Creates a stepper using the given random source.
    pub fn with_rng(
        case_id: impl Into<String>,
        catalog: &StageCatalog,
        config: StepperConfig,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        let run = PipelineRun::new(case_id, catalog, config.start_policy, config.initial_progress)?;
        debug!(
            case_id = %run.case_id(),
            run_id = %run.run_id(),
            stages = run.stages().len(),
            "Pipeline run created"
        );
        Ok(Self {
            run,
            config,
            outputs: CannedOutputs::default(),
            profile: CaseProfile::default(),
            rng,
            sink: default_sink(),
            on_complete: None,
        })
    }

    /// Replaces the canned output table.
    #[must_use]
    pub fn with_outputs(mut self, outputs: CannedOutputs) -> Self {
        self.outputs = outputs;
        self
    }

    /// Replaces the placeholder case profile.
    #[must_use]
    pub fn with_profile(mut self, profile: CaseProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Registers the completion callback. It runs at most once.
    #[must_use]
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(CompletionSummary) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// The run being advanced.
    #[must_use]
    pub fn run(&self) -> &PipelineRun {
        &self.run
    }

    /// The stepper configuration.
    #[must_use]
    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// The event sink.
    #[must_use]
    pub fn event_sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    /// True once the run is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.run.is_complete()
    }

    /// Consumes the stepper and returns the run.
    #[must_use]
    pub fn into_run(self) -> PipelineRun {
        self.run
    }

    /// Advances the run by one step. A no-op once the run is complete.
    pub fn tick(&mut self) -> TickOutcome {
        if self.run.is_complete() {
            return TickOutcome::Idle;
        }

        let outcome = self.advance();

        if self.run.all_done() {
            self.complete();
            return TickOutcome::RunCompleted;
        }
        outcome
    }

    /// Ticks until the run completes or `max_ticks` is reached. Returns the
    /// number of ticks performed.
    pub fn run_to_completion(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while !self.run.is_complete() && ticks < max_ticks {
            ticks += 1;
            if self.tick().is_run_completed() {
                break;
            }
        }
        ticks
    }

    fn advance(&mut self) -> TickOutcome {
        let Some(index) = self.run.active_index() else {
            return self.promote_first();
        };

        let increment = self
            .rng
            .gen_range(self.config.min_increment..=self.config.max_increment);
        let case_id = self.run.case_id().to_string();
        let stages = self.run.stages_mut();
        let progress = stages[index].advance(increment);

        if progress < 100 {
            self.sink.try_emit(&PipelineEvent::stage_progress(
                &case_id,
                stages[index].identifier(),
                progress,
            ));
            return TickOutcome::Advanced { index, progress };
        }

        let output = self.outputs.output_for(stages[index].identifier()).to_string();
        let (min_secs, max_secs) = (self.config.min_elapsed_secs, self.config.max_elapsed_secs);
        // rounding may step past a narrow range
        let elapsed = round_tenths(self.rng.gen_range(min_secs..=max_secs)).clamp(min_secs, max_secs);
        stages[index].finish(output, elapsed);
        debug!(
            case_id = %case_id,
            stage = %stages[index].identifier(),
            elapsed_seconds = elapsed,
            "Stage completed"
        );
        self.sink.try_emit(&PipelineEvent::stage_completed(
            &case_id,
            stages[index].identifier(),
            elapsed,
        ));

        let next = index + 1;
        match stages.get_mut(next) {
            Some(stage) if stage.state() == StageState::Pending => {
                stage.start(self.config.initial_progress);
                self.sink.try_emit(&PipelineEvent::stage_started(
                    &case_id,
                    stage.identifier(),
                    stage.progress(),
                ));
                TickOutcome::StageCompleted {
                    index,
                    next: Some(next),
                }
            }
            _ => TickOutcome::StageCompleted { index, next: None },
        }
    }

    fn promote_first(&mut self) -> TickOutcome {
        let case_id = self.run.case_id().to_string();
        let initial = self.config.initial_progress;
        match self.run.stages_mut().first_mut() {
            Some(first) if first.state() == StageState::Pending => {
                first.start(initial);
                self.sink.try_emit(&PipelineEvent::stage_started(
                    &case_id,
                    first.identifier(),
                    first.progress(),
                ));
                TickOutcome::Started { index: 0 }
            }
            _ => TickOutcome::Idle,
        }
    }

    fn complete(&mut self) {
        let case_id = self.run.case_id().to_string();
        let result = OrchestrationResult::synthesize(&case_id, &self.profile, self.run.stages());
        self.run.mark_complete(result);

        info!(
            case_id = %case_id,
            run_id = %self.run.run_id(),
            processing_time = ?self.run.result().map(|r| &r.final_report.processing_time),
            "Pipeline run completed"
        );
        self.sink
            .try_emit(&PipelineEvent::run_completed(&case_id, self.run.stages().len()));

        if let Some(callback) = self.on_complete.take() {
            let summary = CompletionSummary::for_case(&case_id);
            if let Err(e) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                callback(summary);
            })) {
                warn!("Completion callback panicked: {:?}", e);
            }
        }
    }
}

impl<R> fmt::Debug for PipelineStepper<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineStepper")
            .field("case_id", &self.run.case_id())
            .field("is_complete", &self.run.is_complete())
            .field("config", &self.config)
            .field("has_callback", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}
