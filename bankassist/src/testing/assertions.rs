//! Assertions over pipeline run snapshots.

use crate::core::StageState;
use crate::pipeline::PipelineRun;

/// Asserts the structural invariants that must hold at every instant:
/// at most one stage in progress, stages leave `Pending` in order,
/// progress within bounds, done stages at 100 with an output.
pub fn assert_run_invariants(run: &PipelineRun) {
    let stages = run.stages();

    let active = stages
        .iter()
        .filter(|s| s.state() == StageState::InProgress)
        .count();
    assert!(
        active <= 1,
        "Expected at most one stage in progress, found {} in case {}",
        active,
        run.case_id()
    );

    for pair in stages.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.state() != StageState::Pending {
            assert_eq!(
                prev.state(),
                StageState::Done,
                "Stage '{}' is {} while its predecessor '{}' is {}",
                next.identifier(),
                next.state(),
                prev.identifier(),
                prev.state()
            );
        }
    }

    for stage in stages {
        assert!(
            stage.progress() <= 100,
            "Stage '{}' has progress {}",
            stage.identifier(),
            stage.progress()
        );
        if stage.state() == StageState::Done {
            assert_eq!(stage.progress(), 100, "Done stage '{}' below 100", stage.identifier());
            assert!(
                stage.output().is_some_and(|o| !o.is_empty()),
                "Done stage '{}' has no output",
                stage.identifier()
            );
            assert!(stage.elapsed_seconds().is_some());
        }
    }

    assert_eq!(
        run.is_complete(),
        stages.iter().all(|s| s.state() == StageState::Done),
        "is_complete disagrees with stage states"
    );
    assert_eq!(run.is_complete(), run.result().is_some());
}

/// Asserts that moving from `before` to `after` never touched a done stage.
pub fn assert_transition(before: &PipelineRun, after: &PipelineRun) {
    for (old, new) in before.stages().iter().zip(after.stages()) {
        if old.state() == StageState::Done {
            assert_eq!(old, new, "Done stage '{}' changed", old.identifier());
        }
    }
    if before.is_complete() {
        assert_eq!(before, after, "Completed run changed");
    }
}

/// Asserts that the named stage is in the expected state.
pub fn assert_stage_state(run: &PipelineRun, identifier: &str, expected: StageState) {
    let stage = run
        .stage(identifier)
        .unwrap_or_else(|| panic!("No stage '{identifier}' in case {}", run.case_id()));
    assert_eq!(
        stage.state(),
        expected,
        "Expected stage '{}' to be {:?}, got {:?}",
        identifier,
        expected,
        stage.state()
    );
}

/// Asserts that the run finished and produced a result for its case.
pub fn assert_run_completed(run: &PipelineRun) {
    assert!(run.is_complete(), "Expected case {} to be complete", run.case_id());
    let result = run
        .result()
        .unwrap_or_else(|| panic!("Complete case {} has no result", run.case_id()));
    assert_eq!(result.final_report.case_id, run.case_id());
    assert_run_invariants(run);
}
