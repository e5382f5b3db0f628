// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job progress observation.
//!
//! The orchestrator emits a full job snapshot after every state change, so
//! a UI or log sink sees the same monotone progress sequence the pipeline
//! produced, in order, without having to poll shared state.

use dh_core::Job;

pub trait JobObserver: Send + Sync + 'static {
    /// Called after each lifecycle or progress change with the updated job.
    fn job_updated(&self, job: &Job);
}

/// Discards every update. Default observer when the caller only wants the
/// final result.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl JobObserver for NoopObserver {
    fn job_updated(&self, _job: &Job) {}
}

/// Retains every snapshot in order, for asserting on the exact sequence a
/// pipeline run produced.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct CapturingObserver {
    snapshots: parking_lot::Mutex<Vec<Job>>,
}

#[cfg(any(test, feature = "test-support"))]
impl CapturingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<Job> {
        self.snapshots.lock().clone()
    }

    /// Progress values in emission order.
    pub fn progress_trace(&self) -> Vec<u8> {
        self.snapshots.lock().iter().map(|j| j.progress).collect()
    }

    pub fn last(&self) -> Option<Job> {
        self.snapshots.lock().last().cloned()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl JobObserver for CapturingObserver {
    fn job_updated(&self, job: &Job) {
        self.snapshots.lock().push(job.clone());
    }
}
