//! # BankAssist
//!
//! A simulated multi-agent orchestration pipeline for banking customer
//! service cases.
//!
//! A submitted case walks through a fixed, ordered list of stages
//! ("agents"). Stages advance one at a time on a timer with randomized
//! progress increments, and once every stage is done a synthetic result
//! (customer email draft plus a final report) is produced and the caller is
//! notified exactly once.
//!
//! - **Stage model**: symbolic icons, states and progress in [`core`]
//! - **Canned catalog**: stage definitions, outputs and placeholder case data in [`catalog`]
//! - **Stepper**: the single-stage-at-a-time state machine in [`pipeline`]
//! - **Runner**: a timer-owning task with teardown guarantees in [`runner`]
//! - **Event sinks**: structured observability in [`events`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bankassist::prelude::*;
//!
//! let stepper = PipelineStepper::new("CS-2024-042", &StageCatalog::banking(), StepperConfig::default())?
//!     .on_complete(|summary| println!("{}", summary.customer_message));
//!
//! let handle = spawn_run(stepper);
//! let exit = handle.finished().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod catalog;
pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod pipeline;
pub mod runner;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{CannedOutputs, CaseProfile, StageCatalog, StageDefinition};
    pub use crate::config::{StartPolicy, StepperConfig};
    pub use crate::core::{PipelineEvent, Stage, StageIcon, StageState};
    pub use crate::errors::{BankAssistError, ConfigError, Result};
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::pipeline::{
        CompletionSummary, EmailDraft, FinalReport, OrchestrationResult, PipelineRun,
        PipelineStepper, RunMetrics, TickOutcome,
    };
    pub use crate::runner::{spawn_run, spawn_run_with_interval, RunHandle, TimerExit};
    pub use crate::utils::{format_case_id, generate_case_id, iso_timestamp};
}
