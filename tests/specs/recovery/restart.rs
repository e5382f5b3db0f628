// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Restart resumption specs: the durable pointer carries a live run across
//! process lifetimes.

use crate::prelude::*;

/// Drive a submission to the point where training is running remotely and
/// the pointer is set, then lose contact (the "crash"). Returns the pipeline
/// with the pointer still in place.
async fn crashed_mid_training() -> Pipeline {
    let p = Pipeline::new();
    let _ = p.voice.clone().clone_returns("voice-1").statuses("voice-1", &["completed"]);
    // No scripted statuses: tracking dies on transport failures, but the
    // remote run and the pointer survive.
    let _ = p.training.clone().train_returns("train-1");

    let err = p.orchestrator().submit(submission("Margo")).await.unwrap_err();
    assert!(matches!(err, PipelineError::PollExhausted { stage: Stage::TrainingPoll, .. }));
    assert_eq!(p.session.pointer(SESSION).unwrap().job_id, "train-1");
    p
}

#[tokio::test]
async fn reconcile_resumes_the_pointed_run_after_a_restart() {
    let p = crashed_mid_training().await;

    // Restart: the service is reachable again and the run is still going.
    let _ = p.training.clone().statuses("train-1", &[processing(), completed("Margo")]);
    let outcome = p.orchestrator().reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Resumed(JobId::new("train-1")));

    assert_eq!(p.records.record("train-1").unwrap().status, "completed");
    assert!(p.session.pointer(SESSION).is_none());

    // Adoption watches the existing run; it never re-submits training.
    assert_eq!(p.training.train_requests().len(), 1);

    // Resumption re-enters at the conservative baseline, not at zero.
    let resumed = p.observer.last().unwrap();
    assert_eq!(resumed.progress, 100);
    assert!(p.observer.progress_trace().contains(&80));
}

#[tokio::test]
async fn run_that_finished_during_the_outage_is_recorded_on_reconcile() {
    let p = crashed_mid_training().await;

    let _ = p.training.clone().statuses("train-1", &[completed("Margo")]);
    let outcome = p.orchestrator().reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Resumed(JobId::new("train-1")));

    let record = p.records.record("train-1").unwrap();
    assert_eq!(record.status, "completed");
    assert_eq!(record.display_name, "Margo");
    assert!(p.session.pointer(SESSION).is_none());
}

#[tokio::test]
async fn reconcile_is_idempotent_once_the_run_is_recorded() {
    let p = crashed_mid_training().await;
    let _ = p.training.clone().statuses("train-1", &[completed("Margo")]);

    p.orchestrator().reconcile_once().await.unwrap();
    let upserts_after_first = p.records.upsert_calls();

    // Second sweep: pointer gone, allow-list empty, nothing to adopt.
    let outcome = p.orchestrator().reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Idle);
    assert_eq!(p.records.upsert_calls(), upserts_after_first);
    assert_eq!(p.records.records().len(), 1);
}

#[tokio::test]
async fn pointer_survives_on_disk_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    let voice = FakeVoiceService::new().clone_returns("voice-1").statuses("voice-1", &["completed"]);
    let training = FakeTrainingService::new().train_returns("train-1");
    let records = MemoryRecordStore::new();

    let deps = || dh_engine::OrchestratorDeps {
        media: FakeMediaStore::new(),
        voice: voice.clone(),
        training: training.clone(),
        records: records.clone(),
        session: dh_adapters::FileSessionStore::new(dir.path()),
    };

    // First process: training goes dark mid-tracking, pointer hits disk.
    let first = Orchestrator::new(
        deps(),
        FakeClock::new(),
        SessionId::new(SESSION),
        EngineConfig::zero_delay(),
    );
    first.submit(submission("Margo")).await.unwrap_err();

    // Second process: fresh store over the same directory finds the run.
    let _ = training.clone().statuses("train-1", &[completed("Margo")]);
    let second = Orchestrator::new(
        deps(),
        FakeClock::new(),
        SessionId::new(SESSION),
        EngineConfig::zero_delay(),
    );
    let outcome = second.reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Resumed(JobId::new("train-1")));
    assert_eq!(records.record("train-1").unwrap().status, "completed");

    // Pointer file cleared after the terminal record.
    let outcome = second.reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Idle);
}

#[tokio::test]
async fn service_still_down_leaves_the_pointer_for_the_next_sweep() {
    let p = crashed_mid_training().await;

    // Remote still unreachable on restart.
    let outcome = p.orchestrator().reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Idle);
    assert_eq!(p.session.pointer(SESSION).unwrap().job_id, "train-1");
}
