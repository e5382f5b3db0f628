// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full submit-to-record pipeline specs.

use crate::prelude::*;

#[tokio::test]
async fn submission_runs_every_stage_and_records_the_result() {
    let p = Pipeline::new();
    let _ = p.voice.clone().clone_returns("voice-1").statuses("voice-1", &["pending", "completed"]);
    let _ = p
        .training
        .clone()
        .train_returns("train-1")
        .statuses("train-1", &[processing(), completed("Margo")]);

    let job = p.orchestrator().submit(submission("Margo")).await.unwrap();

    assert_eq!(job.lifecycle, Lifecycle::Completed);
    assert_eq!(job.progress, 100);
    assert_eq!(job.id, "train-1");

    // Record persisted with the remote result attached.
    let record = p.records.record("train-1").unwrap();
    assert_eq!(record.status, "completed");
    assert_eq!(record.preview_url.as_deref(), Some("https://cdn.test/preview/Margo.mp4"));
    assert_eq!(record.result_image_url.as_deref(), Some("https://cdn.test/image/Margo.png"));

    // Pointer released: the session is free for the next submission.
    assert!(p.session.pointer(SESSION).is_none());

    // One upload, one clone, one train.
    assert_eq!(p.media.uploads(), vec!["take-one.mp4"]);
    assert_eq!(p.voice.clone_requests().len(), 1);
    assert_eq!(p.training.train_requests().len(), 1);
}

#[tokio::test]
async fn observer_sees_monotone_progress_across_every_stage() {
    let p = Pipeline::new();
    let _ = p.voice.clone().clone_returns("voice-1").statuses("voice-1", &["pending", "completed"]);
    let _ = p
        .training
        .clone()
        .train_returns("train-1")
        .statuses("train-1", &[processing(), processing(), completed("Margo")]);

    p.orchestrator().submit(submission("Margo")).await.unwrap();

    let trace = p.observer.progress_trace();
    assert!(trace.windows(2).all(|w| w[0] <= w[1]), "not monotone: {trace:?}");
    // Stage floors in order: upload, clone, wait, train, done.
    for floor in [10, 30, 40, 70, 100] {
        assert!(trace.contains(&floor), "missing {floor} in {trace:?}");
    }
}

#[tokio::test]
async fn completed_session_accepts_a_second_submission() {
    let p = Pipeline::new();
    let _ = p.voice.clone().clone_returns("voice-1").statuses("voice-1", &["completed"]);
    let _ = p
        .training
        .clone()
        .train_returns("train-1")
        .statuses("train-1", &[completed("Margo")]);

    p.orchestrator().submit(submission("Margo")).await.unwrap();

    let _ = p.training.clone().train_returns("train-2").statuses("train-2", &[completed("Nell")]);
    p.orchestrator().submit(submission("Nell")).await.unwrap();

    let mut statuses: Vec<_> =
        p.records.records().into_iter().map(|r| (r.job_id.to_string(), r.status)).collect();
    statuses.sort();
    assert_eq!(
        statuses,
        vec![
            ("train-1".to_string(), "completed".to_string()),
            ("train-2".to_string(), "completed".to_string()),
        ]
    );
}
