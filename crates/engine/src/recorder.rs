// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal-result recording.
//!
//! Once a training run is observed complete its record is written to the
//! record store; failed runs never reach it. Writes are keyed by job id
//! and upserted, so recording the
//! same run twice (fresh run, then a reconcile sweep) leaves one record.
//! Failures here are logged and swallowed: a store outage must not undo a
//! remote success the user already paid for.

use dh_adapters::{
    MediaStore, RecordStore, SessionStore, TrainingService, TrainingStatusPayload, VoiceService,
};
use dh_core::{Clock, Job, PresenterRecord, VoiceInfo};

use crate::orchestrator::Orchestrator;

impl<M, V, T, R, S, C> Orchestrator<M, V, T, R, S, C>
where
    M: MediaStore,
    V: VoiceService,
    T: TrainingService,
    R: RecordStore,
    S: SessionStore,
    C: Clock,
{
    pub(crate) async fn record_result(&self, job: &Job, payload: &TrainingStatusPayload) {
        let record = self.build_record(job, payload);
        if let Err(err) = self.records.upsert(&self.session_id, &record).await {
            tracing::warn!(job_id = %job.id, error = %err, "result record write failed");
        } else {
            tracing::info!(job_id = %job.id, status = %record.status, "result recorded");
        }
    }

    /// Prefers the metadata echoed by the status endpoint over the local
    /// snapshot, since a resumed job may only know what the remote told it.
    fn build_record(&self, job: &Job, payload: &TrainingStatusPayload) -> PresenterRecord {
        let echo = payload.echo.as_ref();
        PresenterRecord {
            job_id: job.id.clone(),
            display_name: echo
                .and_then(|e| e.name.clone())
                .unwrap_or_else(|| job.display_name.clone()),
            gender: echo.and_then(|e| e.gender).unwrap_or(job.gender),
            status: payload.normalized().to_string(),
            preview_url: payload.preview_url.clone(),
            result_image_url: payload.image_result_url.clone(),
            created_at_ms: job.created_at_ms,
            updated_at_ms: self.clock.epoch_ms(),
            voice: job.voice_id.clone().map(|voice_id| VoiceInfo {
                voice_id,
                name: job.display_name.clone(),
                status: "completed".to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
