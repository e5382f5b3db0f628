// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use dh_core::RemoteStatus;
use parking_lot::Mutex;

use super::{run, PollError, PollPlan, Polled};

fn instant_plan() -> PollPlan {
    PollPlan {
        interval: Duration::ZERO,
        error_backoff: Duration::ZERO,
        max_attempts: Some(60),
        max_transport_failures: 3,
    }
}

/// Scripted probe answers, consumed front to back.
fn scripted(
    steps: Vec<Result<RemoteStatus, &'static str>>,
) -> impl FnMut() -> std::future::Ready<Result<(RemoteStatus, u32), String>> {
    let queue = Arc::new(Mutex::new(steps.into_iter().enumerate().collect::<Vec<_>>()));
    let mut next = 0usize;
    move || {
        let guard = queue.lock();
        let (idx, step) = guard[next].clone();
        next += 1;
        std::future::ready(match step {
            Ok(status) => Ok((status, idx as u32)),
            Err(msg) => Err(msg.to_string()),
        })
    }
}

#[tokio::test]
async fn completes_on_first_terminal_status() {
    let probe = scripted(vec![
        Ok(RemoteStatus::Pending),
        Ok(RemoteStatus::Processing),
        Ok(RemoteStatus::Completed),
    ]);
    let seen = Mutex::new(Vec::new());
    let out = run(&instant_plan(), probe, |obs| {
        seen.lock().push((obs.attempt, obs.status));
    })
    .await
    .unwrap();

    assert!(matches!(out, Polled::Completed(2)));
    assert_eq!(
        *seen.lock(),
        vec![
            (1, RemoteStatus::Pending),
            (2, RemoteStatus::Processing),
            (3, RemoteStatus::Completed),
        ]
    );
}

#[tokio::test]
async fn failed_status_is_terminal_not_an_error() {
    let probe = scripted(vec![Ok(RemoteStatus::Failed)]);
    let out = run(&instant_plan(), probe, |_| {}).await.unwrap();
    assert!(matches!(out, Polled::Failed(0)));
}

#[tokio::test]
async fn exhausts_after_max_attempts() {
    let plan = PollPlan { max_attempts: Some(4), ..instant_plan() };
    let probe = scripted(vec![Ok(RemoteStatus::Processing); 4]);
    let err = run(&plan, probe, |_| {}).await.unwrap_err();
    assert_eq!(err, PollError::Exhausted { attempts: 4 });
}

#[tokio::test]
async fn consecutive_transport_failures_hit_the_limit() {
    let probe = scripted(vec![Err("connection reset"); 3]);
    let err = run(&instant_plan(), probe, |_| {}).await.unwrap_err();
    assert_eq!(
        err,
        PollError::TransportLimit {
            failures: 3,
            last_error: "connection reset".to_string(),
        }
    );
}

#[tokio::test]
async fn successful_probe_resets_the_failure_streak() {
    let probe = scripted(vec![
        Err("timeout"),
        Err("timeout"),
        Ok(RemoteStatus::Processing),
        Err("timeout"),
        Err("timeout"),
        Ok(RemoteStatus::Completed),
    ]);
    let out = run(&instant_plan(), probe, |_| {}).await.unwrap();
    assert!(matches!(out, Polled::Completed(5)));
}

#[tokio::test]
async fn transport_failures_count_toward_the_attempt_budget() {
    let plan = PollPlan { max_attempts: Some(2), max_transport_failures: 10, ..instant_plan() };
    let probe = scripted(vec![Err("timeout"), Err("timeout")]);
    let err = run(&plan, probe, |_| {}).await.unwrap_err();
    assert_eq!(err, PollError::Exhausted { attempts: 2 });
}

#[tokio::test]
async fn observer_is_not_called_for_transport_failures() {
    let probe = scripted(vec![Err("timeout"), Ok(RemoteStatus::Completed)]);
    let calls = Mutex::new(0u32);
    run(&instant_plan(), probe, |_| *calls.lock() += 1).await.unwrap();
    assert_eq!(*calls.lock(), 1);
}
