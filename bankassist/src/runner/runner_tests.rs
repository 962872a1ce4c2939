//! Timer tests. All of them run on a paused clock, so sleeps advance
//! virtual time instantly.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use super::{spawn_run, spawn_run_with_interval, TimerExit};
use crate::catalog::StageCatalog;
use crate::config::{StartPolicy, StepperConfig};
use crate::core::StageState;
use crate::events::CollectingEventSink;
use crate::pipeline::PipelineStepper;
use crate::testing::{
    assert_run_completed, assert_run_invariants, seeded_banking_stepper, seeded_linear_stepper,
    CompletionRecorder,
};

fn fast_config() -> StepperConfig {
    StepperConfig::default().with_increment_range(100, 100)
}

#[tokio::test(start_paused = true)]
async fn test_run_completes_and_stops_itself() {
    let (stepper, recorder) = seeded_linear_stepper(3, fast_config(), 0).unwrap();
    let handle = spawn_run(stepper);
    let rx = handle.subscribe();

    let exit = handle.finished().await.unwrap();

    assert_eq!(exit, TimerExit::Completed);
    assert_eq!(recorder.count(), 1);
    assert_run_completed(&rx.borrow());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_tick() {
    let (stepper, recorder) = seeded_banking_stepper("CS-2024-001", 1).unwrap();
    let mut handle = spawn_run(stepper);
    handle.cancel();

    let snapshot = handle.snapshot();
    let exit = handle.finished().await.unwrap();

    assert_eq!(exit, TimerExit::Cancelled);
    assert_eq!(snapshot.active_index(), Some(0));
    assert_eq!(snapshot.stages()[0].progress(), 10);
    assert_eq!(snapshot.metrics().pending, 7);
    assert_eq!(recorder.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_tick_lazy_start() {
    let config = StepperConfig::default().with_start_policy(StartPolicy::OnFirstTick);
    let (stepper, recorder) = seeded_linear_stepper(4, config, 1).unwrap();
    let handle = spawn_run(stepper);
    let rx = handle.subscribe();

    assert_eq!(handle.cancel_and_wait().await.unwrap(), TimerExit::Cancelled);

    let run = rx.borrow();
    assert!(run.stages().iter().all(|s| s.state() == StageState::Pending));
    assert_eq!(recorder.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_after_one_period() {
    let (stepper, _) = seeded_linear_stepper(2, StepperConfig::default(), 2).unwrap();
    let handle = spawn_run_with_interval(stepper, Duration::from_millis(600));
    let initial = handle.snapshot();

    tokio::time::sleep(Duration::from_millis(599)).await;
    assert_eq!(handle.snapshot(), initial);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(handle.snapshot().stages()[0].progress() > 10);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_run_stops_ticks() {
    let config = StepperConfig::default().with_increment_range(3, 3);
    let (stepper, recorder) = seeded_linear_stepper(8, config, 3).unwrap();
    let mut handle = spawn_run(stepper);

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    handle.cancel();
    let rx = handle.subscribe();
    assert_eq!(handle.finished().await.unwrap(), TimerExit::Cancelled);

    let stopped = rx.borrow().clone();
    assert!(stopped.stages()[0].progress() > 10);
    assert!(!stopped.is_complete());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(*rx.borrow(), stopped);
    assert_eq!(recorder.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_drop_handle_aborts_timer() {
    let recorder = CompletionRecorder::new();
    let stepper = PipelineStepper::seeded(
        "CS-2024-001",
        &StageCatalog::banking(),
        StepperConfig::default(),
        4,
    )
    .unwrap()
    .on_complete(recorder.callback());

    let handle = spawn_run(stepper);
    let rx = handle.subscribe();
    drop(handle);

    tokio::time::sleep(Duration::from_secs(600)).await;

    assert!(rx.has_changed().is_err(), "timer task still alive");
    assert_eq!(rx.borrow().stages()[0].progress(), 10);
    assert_eq!(recorder.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_every_snapshot_satisfies_invariants() {
    let (stepper, recorder) = seeded_banking_stepper("CS-2024-001", 5).unwrap();
    let handle = spawn_run(stepper);
    let mut rx = handle.subscribe();

    let mut snapshots = 0;
    while rx.changed().await.is_ok() {
        let run = rx.borrow_and_update().clone();
        assert_run_invariants(&run);
        snapshots += 1;
        if run.is_complete() {
            break;
        }
    }

    assert!(snapshots >= 8, "only {snapshots} snapshots");
    assert_eq!(handle.finished().await.unwrap(), TimerExit::Completed);
    assert_eq!(recorder.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timer_events() {
    let sink = Arc::new(CollectingEventSink::new());
    let stepper = PipelineStepper::seeded("c", &StageCatalog::linear(1), fast_config(), 0)
        .unwrap()
        .with_event_sink(sink.clone());

    spawn_run(stepper).finished().await.unwrap();

    assert_eq!(
        sink.event_types(),
        vec!["timer.started", "stage.completed", "run.completed", "timer.stopped"]
    );
    let stopped = &sink.events_of_type("timer.stopped")[0];
    assert_eq!(stopped.data["exit"], "completed");
    assert_eq!(stopped.data["ticks"], 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_runs_are_independent() {
    let recorders: Vec<_> = (0..3).map(|_| CompletionRecorder::new()).collect();
    let handles: Vec<_> = recorders
        .iter()
        .enumerate()
        .map(|(i, recorder)| {
            let case_id = crate::utils::format_case_id(2024, u32::try_from(i).unwrap());
            let stepper = PipelineStepper::seeded(
                case_id,
                &StageCatalog::banking(),
                StepperConfig::default(),
                i as u64,
            )
            .unwrap()
            .on_complete(recorder.callback());
            spawn_run(stepper)
        })
        .collect();

    let exits = futures::future::join_all(handles.into_iter().map(|h| h.finished())).await;

    for (i, exit) in exits.into_iter().enumerate() {
        assert_eq!(exit.unwrap(), TimerExit::Completed);
        let calls = recorders[i].calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].case_id, format!("CS-2024-00{i}"));
    }
}

#[tokio::test(start_paused = true)]
async fn test_cancel_is_idempotent() {
    let (stepper, _) = seeded_linear_stepper(2, StepperConfig::default(), 6).unwrap();
    let mut handle = spawn_run(stepper);
    handle.cancel();
    handle.cancel();
    assert_eq!(handle.finished().await.unwrap(), TimerExit::Cancelled);
}
