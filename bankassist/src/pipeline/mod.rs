//! The simulated pipeline: run state, the stepper that advances it, and the
//! synthetic result produced when it finishes.

mod metrics;
mod result;
mod run;
mod stepper;

pub use metrics::RunMetrics;
pub use result::{CompletionSummary, EmailDraft, FinalReport, OrchestrationResult};
pub use run::PipelineRun;
pub use stepper::{CompletionCallback, PipelineStepper, TickOutcome};
