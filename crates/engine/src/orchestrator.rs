// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline orchestration.
//!
//! [`Orchestrator::submit`] drives a fresh job through media upload, voice
//! cloning, training submission and status tracking, emitting a snapshot to
//! the observer after every state change. Restart resumption lives in the
//! reconciler module; both paths share the training tracker here so a job
//! finishes the same way no matter which path watched it.

use std::sync::Arc;

use dh_adapters::{
    MediaStore, RecordStore, SessionStore, TrainRequest, TrainingService, VoiceCloneRequest,
    VoiceService,
};
use dh_core::{ActiveJobPointer, Clock, Gender, Job, Lifecycle, RemoteStatus, SessionId, VoiceId};

use crate::config::EngineConfig;
use crate::error::{PipelineError, Stage};
use crate::observer::{JobObserver, NoopObserver};
use crate::poller::{self, PollError, PollPlan, Polled};

/// Raw media bytes to upload before anything else can start.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Everything needed to start a new training job.
#[derive(Debug, Clone)]
pub struct Submission {
    pub display_name: String,
    pub gender: Gender,
    pub language: String,
    pub media: MediaUpload,
}

/// Adapter dependencies for the orchestrator.
pub struct OrchestratorDeps<M, V, T, R, S> {
    pub media: M,
    pub voice: V,
    pub training: T,
    pub records: R,
    pub session: S,
}

/// Coordinates one session's pipeline runs against the remote services.
pub struct Orchestrator<M, V, T, R, S, C> {
    pub(crate) media: M,
    pub(crate) voice: V,
    pub(crate) training: T,
    pub(crate) records: R,
    pub(crate) session: S,
    pub(crate) clock: C,
    pub(crate) config: EngineConfig,
    pub(crate) session_id: SessionId,
    pub(crate) observer: Arc<dyn JobObserver>,
}

impl<M, V, T, R, S, C> Orchestrator<M, V, T, R, S, C>
where
    M: MediaStore,
    V: VoiceService,
    T: TrainingService,
    R: RecordStore,
    S: SessionStore,
    C: Clock,
{
    pub fn new(
        deps: OrchestratorDeps<M, V, T, R, S>,
        clock: C,
        session_id: SessionId,
        config: EngineConfig,
    ) -> Self {
        Self {
            media: deps.media,
            voice: deps.voice,
            training: deps.training,
            records: deps.records,
            session: deps.session,
            clock,
            config,
            session_id,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn JobObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run one submission end to end. Returns the terminal job snapshot on
    /// completion; on any stage failure the job is moved to `Failed` (and
    /// emitted) before the error is returned.
    pub async fn submit(&self, submission: Submission) -> Result<Job, PipelineError> {
        let Submission { display_name, gender, language, media } = submission;
        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(PipelineError::Validation("display name is required".into()));
        }
        if media.file_name.trim().is_empty() || media.data.is_empty() {
            return Err(PipelineError::Validation("a source video is required".into()));
        }
        self.ensure_no_active_job().await?;

        let mut job = Job::new(display_name.clone(), gender, language.clone(), &self.clock);
        job.advance(Lifecycle::Uploading, 10, "Uploading video");
        self.emit(&job);

        tracing::info!(name = %display_name, "starting pipeline");

        let video_url = match self.media.upload(&media.file_name, media.data).await {
            Ok(url) => url,
            Err(err) => return Err(self.fail_job(&mut job, Stage::Upload, err.to_string())),
        };
        job.source_video_url = Some(video_url.clone());
        job.advance(Lifecycle::CloningVoice, 30, "Cloning voice");
        self.emit(&job);

        let voice_name = format!("{display_name}_voice_{}", self.clock.epoch_ms());
        let clone_req = VoiceCloneRequest::new(
            self.session_id.clone(),
            voice_name,
            video_url.clone(),
            gender,
            language.clone(),
        );
        let clone_resp = match self.voice.clone_voice(clone_req).await {
            Ok(resp) => resp,
            Err(err) => return Err(self.fail_job(&mut job, Stage::VoiceClone, err.to_string())),
        };
        let Some(voice_id) = clone_resp.voice_id() else {
            job.fail("voice clone returned no voice id");
            self.emit(&job);
            return Err(PipelineError::MissingVoiceId);
        };
        job.voice_id = Some(voice_id.clone());
        job.advance(Lifecycle::AwaitingVoiceClone, 40, "Waiting for voice clone");
        self.emit(&job);

        self.wait_for_voice(&mut job, &voice_id).await?;

        job.advance(Lifecycle::Training, 60, "Voice ready, submitting training");
        self.emit(&job);

        let train_req = TrainRequest {
            user_id: self.session_id.clone(),
            name: display_name.clone(),
            gender,
            language,
            video_url: video_url.clone(),
            temp_video_file_name: final_path_segment(&video_url).to_string(),
            voice_id,
        };
        let train_resp = match self.training.train(train_req).await {
            Ok(resp) => resp,
            Err(err) => return Err(self.fail_job(&mut job, Stage::Train, err.to_string())),
        };
        job.id = train_resp.training_id;
        job.advance(Lifecycle::Training, 70, "Training started");
        self.emit(&job);

        let pointer = ActiveJobPointer::new(job.id.clone(), display_name);
        if let Err(err) = self.session.set(&self.session_id, &pointer).await {
            tracing::warn!(job_id = %job.id, error = %err,
                "active job pointer write failed; restart resumption unavailable");
        }

        tokio::time::sleep(self.config.poll_start_delay()).await;
        self.track_training(&mut job).await?;
        Ok(job)
    }

    /// Poll training status until terminal, then release the active job
    /// pointer; a completed run is also written to the record store. Shared
    /// by fresh submissions and reconciler resumption.
    pub(crate) async fn track_training(&self, job: &mut Job) -> Result<(), PipelineError> {
        let plan = PollPlan {
            interval: self.config.training_poll_interval(),
            error_backoff: self.config.error_backoff(),
            max_attempts: None,
            max_transport_failures: self.config.training_transport_failure_limit,
        };
        let training = self.training.clone();
        let job_id = job.id.clone();
        let outcome = poller::run(
            &plan,
            || {
                let training = training.clone();
                let job_id = job_id.clone();
                async move {
                    let payload = training.status(&job_id).await.map_err(|e| e.to_string())?;
                    Ok((payload.normalized(), payload))
                }
            },
            |obs| {
                if !obs.status.is_terminal() {
                    let next = job.progress.saturating_add(3).min(90);
                    job.advance(Lifecycle::Training, next, training_phase_message(obs.status));
                    self.emit(job);
                }
            },
        )
        .await;

        match outcome {
            Ok(Polled::Completed(payload)) => {
                job.complete("Training complete");
                self.emit(job);
                self.record_result(job, &payload).await;
                self.clear_pointer(&job.id).await;
                Ok(())
            }
            // Failed runs release the pointer but never land in the record
            // store: the presenter list holds completed digital humans only.
            Ok(Polled::Failed(payload)) => {
                let message = format!("training reported {}", payload.normalized());
                job.fail(message.clone());
                self.emit(job);
                self.clear_pointer(&job.id).await;
                Err(PipelineError::Collaborator { stage: Stage::TrainingPoll, message })
            }
            // Pointer stays set on give-up paths: the remote run may still
            // be live and a later reconcile sweep can pick it back up.
            Err(PollError::TransportLimit { failures, last_error }) => {
                job.fail(format!("{failures} consecutive status failures: {last_error}"));
                self.emit(job);
                Err(PipelineError::PollExhausted {
                    stage: Stage::TrainingPoll,
                    attempts: failures,
                })
            }
            Err(PollError::Exhausted { attempts }) => {
                job.fail("training status polling exhausted");
                self.emit(job);
                Err(PipelineError::PollExhausted { stage: Stage::TrainingPoll, attempts })
            }
        }
    }

    async fn wait_for_voice(
        &self,
        job: &mut Job,
        voice_id: &VoiceId,
    ) -> Result<(), PipelineError> {
        let plan = PollPlan {
            interval: self.config.voice_poll_interval(),
            error_backoff: self.config.voice_error_backoff(),
            max_attempts: Some(self.config.voice_max_attempts),
            max_transport_failures: self.config.voice_transport_failure_limit,
        };
        let voice = self.voice.clone();
        let id = voice_id.clone();
        let outcome = poller::run(
            &plan,
            || {
                let voice = voice.clone();
                let id = id.clone();
                async move {
                    let payload = voice.status(&id).await.map_err(|e| e.to_string())?;
                    Ok((payload.normalized(), payload))
                }
            },
            |obs| {
                if !obs.status.is_terminal() {
                    job.set_progress(voice_wait_progress(obs.attempt));
                    self.emit(job);
                }
            },
        )
        .await;

        match outcome {
            Ok(Polled::Completed(_)) => Ok(()),
            Ok(Polled::Failed(payload)) => {
                let message = format!("voice clone reported {}", payload.normalized());
                Err(self.fail_job(job, Stage::VoiceWait, message))
            }
            Err(PollError::Exhausted { attempts }) => {
                job.fail("voice clone did not finish in time");
                self.emit(job);
                Err(PipelineError::PollExhausted { stage: Stage::VoiceWait, attempts })
            }
            Err(PollError::TransportLimit { failures, last_error }) => {
                job.fail(format!("{failures} consecutive status failures: {last_error}"));
                self.emit(job);
                Err(PipelineError::PollExhausted { stage: Stage::VoiceWait, attempts: failures })
            }
        }
    }

    /// Reject a submission while a previous job is still running. A pointer
    /// to a finished job is stale and cleared here instead.
    async fn ensure_no_active_job(&self) -> Result<(), PipelineError> {
        let pointer = self
            .session
            .get(&self.session_id)
            .await
            .map_err(|e| PipelineError::Persistence(format!("active job pointer read failed: {e}")))?;
        let Some(pointer) = pointer else { return Ok(()) };

        // Fail closed: if we cannot verify the pointed-at job, refuse to
        // start a second one on top of it.
        let payload = self.training.status(&pointer.job_id).await.map_err(|e| {
            PipelineError::Persistence(format!(
                "could not verify active job {}: {e}",
                pointer.job_id
            ))
        })?;
        if !payload.normalized().is_terminal() {
            return Err(PipelineError::Validation(format!(
                "job {} ({}) is still active",
                pointer.job_id, pointer.display_name
            )));
        }
        self.clear_pointer(&pointer.job_id).await;
        Ok(())
    }

    fn fail_job(&self, job: &mut Job, stage: Stage, message: String) -> PipelineError {
        tracing::warn!(%stage, error = %message, "pipeline stage failed");
        job.fail(format!("{stage} failed: {message}"));
        self.emit(job);
        PipelineError::Collaborator { stage, message }
    }

    pub(crate) async fn clear_pointer(&self, job_id: &dh_core::JobId) {
        if let Err(err) = self.session.clear(&self.session_id).await {
            tracing::warn!(%job_id, error = %err, "active job pointer clear failed");
        }
    }

    pub(crate) fn emit(&self, job: &Job) {
        self.observer.job_updated(job);
    }
}

/// Estimated progress while the voice clone is pending: creeps from 40
/// toward a ceiling of 58 so the training band starting at 60 stays clear.
fn voice_wait_progress(attempt: u32) -> u8 {
    let estimate = 40 + (attempt * 3) / 10;
    estimate.min(58) as u8
}

fn training_phase_message(status: RemoteStatus) -> &'static str {
    match status {
        RemoteStatus::Pending => "Training pending",
        RemoteStatus::Queued => "Training queued",
        RemoteStatus::Sent => "Training request sent",
        RemoteStatus::Initializing => "Initializing training",
        _ => "Training in progress",
    }
}

fn final_path_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
