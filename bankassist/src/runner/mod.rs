//! Timer-driven execution of a stepper.
//!
//! One tokio task owns a [`PipelineStepper`](crate::pipeline::PipelineStepper)
//! and ticks it on a fixed cadence. Nothing else can touch the stepper, so
//! ticks never overlap. Renderers observe the run through a watch channel.
//! The [`RunHandle`] is the teardown point: cancelling or dropping it stops
//! the timer whether or not the run has finished.

mod handle;
mod timer;
#[cfg(test)]
mod runner_tests;

pub use handle::RunHandle;
pub use timer::{spawn_run, spawn_run_with_interval, TimerExit};
