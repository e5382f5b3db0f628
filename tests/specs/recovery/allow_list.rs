// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Allow-list fallback specs: recovery without a pointer only ever touches
//! configured job ids, and adopts at most one.

use crate::prelude::*;

#[tokio::test]
async fn no_pointer_and_no_allow_list_probes_nothing() {
    let p = Pipeline::new();
    let _ = p.training.clone().status_strings("train-1", &["processing"]);

    let outcome = p.orchestrator().reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Idle);
    assert_eq!(p.training.status_probe_count("train-1"), 0);
}

#[tokio::test]
async fn live_allow_listed_run_is_adopted_and_finished() {
    let mut p = Pipeline::new();
    p.config.recent_job_ids = vec![JobId::new("train-1")];
    let _ = p.training.clone().statuses("train-1", &[processing(), completed("Margo")]);

    let outcome = p.orchestrator().reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Recovered(JobId::new("train-1")));

    let record = p.records.record("train-1").unwrap();
    assert_eq!(record.status, "completed");
    assert_eq!(record.display_name, "Margo");
    assert!(p.session.pointer(SESSION).is_none());
}

#[tokio::test]
async fn finished_allow_listed_runs_are_recorded_in_passing() {
    let mut p = Pipeline::new();
    p.config.recent_job_ids = vec![JobId::new("train-1"), JobId::new("train-2")];
    let _ = p
        .training
        .clone()
        .statuses("train-1", &[completed("Margo")])
        .statuses("train-2", &[completed("Nell")]);

    let outcome = p.orchestrator().reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Idle);
    assert_eq!(p.records.records().len(), 2);
    assert_eq!(p.records.record("train-2").unwrap().display_name, "Nell");
}

#[tokio::test]
async fn adoption_stops_the_sweep_before_later_entries() {
    let mut p = Pipeline::new();
    p.config.recent_job_ids = vec![JobId::new("train-1"), JobId::new("train-2")];
    let _ = p
        .training
        .clone()
        .statuses("train-1", &[processing(), completed("Margo")])
        .status_strings("train-2", &["processing"]);

    let outcome = p.orchestrator().reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Recovered(JobId::new("train-1")));
    assert_eq!(p.training.status_probe_count("train-2"), 0);
}

#[tokio::test]
async fn pointer_takes_precedence_over_the_allow_list() {
    let mut p = Pipeline::new();
    p.config.recent_job_ids = vec![JobId::new("train-2")];
    p.session.seed(SESSION, "train-1", "Margo");
    let _ = p
        .training
        .clone()
        .statuses("train-1", &[completed("Margo")])
        .status_strings("train-2", &["processing"]);

    let outcome = p.orchestrator().reconcile_once().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Resumed(JobId::new("train-1")));
    assert_eq!(p.training.status_probe_count("train-2"), 0);
}
