// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage failure specs: every failure lands in `Failed` exactly once and
//! later stages never run.

use crate::prelude::*;

#[tokio::test]
async fn upload_rejection_stops_the_pipeline_at_the_first_stage() {
    let mut p = Pipeline::new();
    p.media = FakeMediaStore::new().fail_with("file too large");

    let err = p.orchestrator().submit(submission("Margo")).await.unwrap_err();
    assert!(matches!(err, PipelineError::Collaborator { stage: Stage::Upload, .. }));

    let last = p.observer.last().unwrap();
    assert_eq!(last.lifecycle, Lifecycle::Failed);
    assert!(last.message.contains("file too large"));
    assert!(p.voice.clone_requests().is_empty());
    assert!(p.training.train_requests().is_empty());
    assert!(p.records.records().is_empty());
    assert!(p.session.pointer(SESSION).is_none());
}

#[tokio::test]
async fn missing_voice_id_never_reaches_training() {
    let p = Pipeline::new();
    let _ = p.voice.clone().clone_returns_empty();

    let err = p.orchestrator().submit(submission("Margo")).await.unwrap_err();
    assert!(matches!(err, PipelineError::MissingVoiceId));
    assert!(p.training.train_requests().is_empty());
}

#[tokio::test]
async fn voice_clone_that_never_finishes_exhausts_its_budget() {
    let p = Pipeline::new();
    let _ = p.voice.clone().clone_returns("voice-1").statuses("voice-1", &["pending"]);

    let err = p.orchestrator().submit(submission("Margo")).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::PollExhausted { stage: Stage::VoiceWait, attempts: 60 }
    ));
    assert_eq!(p.voice.status_probe_count("voice-1"), 60);
    assert_eq!(p.observer.last().unwrap().lifecycle, Lifecycle::Failed);
    assert!(p.training.train_requests().is_empty());
    // Training never started, so there is no pointer to disturb.
    assert!(p.session.pointer(SESSION).is_none());
}

#[tokio::test]
async fn second_submission_is_rejected_while_the_first_is_live() {
    let p = Pipeline::new();
    let _ = p.voice.clone().clone_returns("voice-1").statuses("voice-1", &["completed"]);
    // Training never terminates: transport failures push the first run into
    // a local failure that keeps the pointer.
    let _ = p.training.clone().train_returns("train-1");

    let err = p.orchestrator().submit(submission("Margo")).await.unwrap_err();
    assert!(matches!(err, PipelineError::PollExhausted { stage: Stage::TrainingPoll, .. }));
    assert!(p.session.pointer(SESSION).is_some());

    // The remote run is still live, so a second submission must not start.
    let _ = p.training.clone().status_strings("train-1", &["processing"]);
    let err = p.orchestrator().submit(submission("Nell")).await.unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));
    assert_eq!(p.media.uploads().len(), 1);
}

#[tokio::test]
async fn remote_training_failure_is_terminal_and_leaves_no_record() {
    let p = Pipeline::new();
    let _ = p.voice.clone().clone_returns("voice-1").statuses("voice-1", &["completed"]);
    let _ = p
        .training
        .clone()
        .train_returns("train-1")
        .status_strings("train-1", &["sent", "initialized", "failed"]);

    let err = p.orchestrator().submit(submission("Margo")).await.unwrap_err();
    assert!(matches!(err, PipelineError::Collaborator { stage: Stage::TrainingPoll, .. }));

    // A failed run must not appear in the digital-humans list.
    assert!(p.records.records().is_empty());
    assert!(p.session.pointer(SESSION).is_none());
    assert_eq!(p.observer.last().unwrap().lifecycle, Lifecycle::Failed);
}
