//! Testing utilities for simulated runs.
//!
//! This module provides:
//! - Invariant assertions over run snapshots
//! - A completion recorder to count callback invocations
//! - Seeded stepper fixtures

mod assertions;
mod fixtures;

pub use assertions::{
    assert_run_completed, assert_run_invariants, assert_stage_state, assert_transition,
};
pub use fixtures::{seeded_banking_stepper, seeded_linear_stepper, CompletionRecorder};
