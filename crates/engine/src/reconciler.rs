// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Restart recovery.
//!
//! After a process restart nothing in memory knows about a training run
//! started before the crash. The reconciler rebuilds that knowledge from
//! two sources, in order: the durable active-job pointer (fast path), and
//! a configured allow-list of recent job ids (fallback, bounded, stops at
//! the first adoption). Adopted jobs re-enter the same tracking loop fresh
//! submissions use, at a conservative progress baseline.

use dh_adapters::{
    MediaStore, RecordStore, SessionStore, TrainingService, TrainingStatusPayload, VoiceService,
};
use dh_core::{ActiveJobPointer, Clock, Job, JobId, Lifecycle, RemoteStatus};
use tokio_util::sync::CancellationToken;

use crate::error::PipelineError;
use crate::orchestrator::Orchestrator;

/// What one reconcile sweep did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The active-job pointer named a job and it was adopted: tracking ran
    /// until the remote reported terminal (possibly immediately, if it
    /// finished while we were away) or until tracking itself gave up, in
    /// which case the sweep returns `Err` and the pointer stays set.
    Resumed(JobId),
    /// No pointer was set; an allow-listed job turned out to be live and
    /// was adopted.
    Recovered(JobId),
    /// Nothing to adopt.
    Idle,
}

/// Progress baseline for adopted jobs. High enough to read as "almost
/// done", below the 90 cap estimated polling creeps toward.
const RESUME_PROGRESS: u8 = 80;

impl<M, V, T, R, S, C> Orchestrator<M, V, T, R, S, C>
where
    M: MediaStore,
    V: VoiceService,
    T: TrainingService,
    R: RecordStore,
    S: SessionStore,
    C: Clock,
{
    /// One recovery sweep: pointer fast path, then the allow-list fallback,
    /// then a record-list refresh when there was nothing to adopt.
    pub async fn reconcile_once(&self) -> Result<ReconcileOutcome, PipelineError> {
        let pointer = match self.session.get(&self.session_id).await {
            Ok(pointer) => pointer,
            Err(err) => {
                tracing::warn!(error = %err, "active job pointer read failed; trying fallback");
                None
            }
        };

        if let Some(pointer) = pointer {
            match self.training.status(&pointer.job_id).await {
                Ok(payload) => {
                    let job_id = pointer.job_id.clone();
                    self.adopt(job_id.clone(), pointer.display_name, payload).await?;
                    return Ok(ReconcileOutcome::Resumed(job_id));
                }
                // Keep the pointer; the next sweep retries.
                Err(err) => {
                    tracing::warn!(job_id = %pointer.job_id, error = %err,
                        "pointed-at job unverifiable; keeping pointer");
                    return Ok(ReconcileOutcome::Idle);
                }
            }
        }

        for job_id in self.config.recent_job_ids.clone() {
            let payload = match self.training.status(&job_id).await {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::debug!(%job_id, error = %err, "allow-listed job probe failed");
                    continue;
                }
            };
            let status = payload.normalized();
            if !status.is_terminal() {
                let display_name = display_name_from(&job_id, &payload);
                let pointer = ActiveJobPointer::new(job_id.clone(), display_name.clone());
                if let Err(err) = self.session.set(&self.session_id, &pointer).await {
                    tracing::warn!(%job_id, error = %err, "pointer write for recovered job failed");
                }
                self.adopt(job_id.clone(), display_name, payload).await?;
                return Ok(ReconcileOutcome::Recovered(job_id));
            }
            if status == RemoteStatus::Completed {
                // Finished while untracked. Upsert is idempotent, so this
                // is safe even when the record already exists.
                let mut job =
                    self.adopted_job(job_id.clone(), display_name_from(&job_id, &payload), &payload);
                job.complete("Training complete");
                self.record_result(&job, &payload).await;
            }
        }

        if let Err(err) = self.records.list(&self.session_id).await {
            tracing::warn!(error = %err, "record list refresh failed");
        }
        Ok(ReconcileOutcome::Idle)
    }

    /// Sweep until cancelled. Runs once immediately so a restart recovers
    /// without waiting out the first interval.
    pub async fn reconcile_loop(&self, cancel: CancellationToken) {
        loop {
            match self.reconcile_once().await {
                Ok(outcome) => tracing::debug!(?outcome, "reconcile sweep finished"),
                Err(err) => tracing::warn!(error = %err, "reconcile sweep failed"),
            }
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(self.config.recovery_interval()) => {}
            }
        }
    }

    /// Re-enter tracking for a job this process did not start. The first
    /// probe inside the tracker re-reads status, so a job that went
    /// terminal while untracked is finalized on that probe.
    async fn adopt(
        &self,
        job_id: JobId,
        display_name: String,
        payload: TrainingStatusPayload,
    ) -> Result<(), PipelineError> {
        let mut job = self.adopted_job(job_id, display_name, &payload);
        if !payload.normalized().is_terminal() {
            job.advance(Lifecycle::Training, RESUME_PROGRESS, "Resuming training watch");
            self.emit(&job);
        }
        self.track_training(&mut job).await
    }

    /// Minimal local snapshot for a job adopted from the remote side. The
    /// source language is unknown here; records do not carry it.
    fn adopted_job(
        &self,
        job_id: JobId,
        display_name: String,
        payload: &TrainingStatusPayload,
    ) -> Job {
        let gender = payload.echo.as_ref().and_then(|e| e.gender).unwrap_or_default();
        let mut job = Job::new(display_name, gender, "", &self.clock);
        job.id = job_id;
        job
    }
}

fn display_name_from(job_id: &JobId, payload: &TrainingStatusPayload) -> String {
    payload
        .echo
        .as_ref()
        .and_then(|e| e.name.clone())
        .unwrap_or_else(|| job_id.as_str().to_string())
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
