// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fakes for engine and spec tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`. Result
//! scripts are consumed front-to-back; when a script runs dry the fake
//! repeats its last configured answer, which keeps long poll loops easy to
//! set up ("processing, processing, completed" then stay completed).

use crate::media::{MediaError, MediaStore};
use crate::records::{RecordError, RecordStore};
use crate::session::{SessionError, SessionStore};
use crate::training::{
    TrainRequest, TrainResponse, TrainingError, TrainingService, TrainingStatusPayload,
};
use crate::voice::{VoiceCloneRequest, VoiceCloneResponse, VoiceError, VoiceService, VoiceStatusPayload};
use async_trait::async_trait;
use dh_core::{ActiveJobPointer, JobId, PresenterRecord, SessionId, VoiceId};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

// ── Media ───────────────────────────────────────────────────────────────

/// Fake upload service returning a canned URL (or failing).
#[derive(Clone, Default)]
pub struct FakeMediaStore {
    inner: Arc<Mutex<MediaInner>>,
}

#[derive(Default)]
struct MediaInner {
    fail_with: Option<String>,
    uploads: Vec<String>,
}

impl FakeMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(self, message: &str) -> Self {
        self.inner.lock().fail_with = Some(message.to_string());
        self
    }

    /// File names uploaded so far.
    pub fn uploads(&self) -> Vec<String> {
        self.inner.lock().uploads.clone()
    }
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload(&self, file_name: &str, _data: Vec<u8>) -> Result<String, MediaError> {
        let mut inner = self.inner.lock();
        if let Some(message) = &inner.fail_with {
            return Err(MediaError::Rejected { status: 500, message: message.clone() });
        }
        inner.uploads.push(file_name.to_string());
        Ok(format!("https://media.test/uploads/{file_name}"))
    }
}

// ── Voice ───────────────────────────────────────────────────────────────

/// Scripted voice service: one clone response plus a queue of status
/// results keyed by voice id.
#[derive(Clone, Default)]
pub struct FakeVoiceService {
    inner: Arc<Mutex<VoiceInner>>,
}

#[derive(Default)]
struct VoiceInner {
    clone_result: Option<Result<VoiceCloneResponse, String>>,
    statuses: HashMap<VoiceId, VecDeque<Result<String, String>>>,
    clone_requests: Vec<VoiceCloneRequest>,
    status_probes: HashMap<VoiceId, u32>,
}

impl FakeVoiceService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful clone returning `voice_id` via the provider envelope.
    pub fn clone_returns(self, voice_id: &str) -> Self {
        let response: VoiceCloneResponse = serde_json::from_value(serde_json::json!({
            "a2eResponse": { "data": { "_id": voice_id } }
        }))
        .unwrap_or_default();
        self.inner.lock().clone_result = Some(Ok(response));
        self
    }

    /// Script a clone response with no voice id in either field.
    pub fn clone_returns_empty(self) -> Self {
        self.inner.lock().clone_result = Some(Ok(VoiceCloneResponse::default()));
        self
    }

    pub fn clone_fails(self, message: &str) -> Self {
        self.inner.lock().clone_result = Some(Err(message.to_string()));
        self
    }

    /// Queue raw status strings for a voice id; the last entry repeats.
    pub fn statuses(self, voice_id: &str, statuses: &[&str]) -> Self {
        let queue = statuses.iter().map(|s| Ok(s.to_string())).collect();
        self.inner.lock().statuses.insert(VoiceId::new(voice_id), queue);
        self
    }

    /// Queue a transport failure for the next status probe.
    pub fn push_status_error(&self, voice_id: &str, message: &str) {
        self.inner
            .lock()
            .statuses
            .entry(VoiceId::new(voice_id))
            .or_default()
            .push_back(Err(message.to_string()));
    }

    pub fn clone_requests(&self) -> Vec<VoiceCloneRequest> {
        self.inner.lock().clone_requests.clone()
    }

    pub fn status_probe_count(&self, voice_id: &str) -> u32 {
        self.inner.lock().status_probes.get(&VoiceId::new(voice_id)).copied().unwrap_or(0)
    }
}

#[async_trait]
impl VoiceService for FakeVoiceService {
    async fn clone_voice(
        &self,
        req: VoiceCloneRequest,
    ) -> Result<VoiceCloneResponse, VoiceError> {
        let mut inner = self.inner.lock();
        inner.clone_requests.push(req);
        match inner.clone_result.clone() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(VoiceError::Rejected { status: 500, message }),
            None => Err(VoiceError::Rejected { status: 500, message: "unscripted".into() }),
        }
    }

    async fn status(&self, voice_id: &VoiceId) -> Result<VoiceStatusPayload, VoiceError> {
        let mut inner = self.inner.lock();
        *inner.status_probes.entry(voice_id.clone()).or_insert(0) += 1;
        let queue = inner
            .statuses
            .get_mut(voice_id)
            .ok_or_else(|| VoiceError::Rejected { status: 404, message: "unknown voice".into() })?;
        let next = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        match next {
            Some(Ok(status)) => Ok(VoiceStatusPayload { status }),
            Some(Err(message)) => Err(VoiceError::Transport(message)),
            None => Err(VoiceError::Rejected { status: 404, message: "unknown voice".into() }),
        }
    }
}

// ── Training ────────────────────────────────────────────────────────────

/// Scripted training service: one train response plus a queue of status
/// payloads keyed by job id.
#[derive(Clone, Default)]
pub struct FakeTrainingService {
    inner: Arc<Mutex<TrainingInner>>,
}

#[derive(Default)]
struct TrainingInner {
    train_result: Option<Result<JobId, String>>,
    statuses: HashMap<JobId, VecDeque<Result<TrainingStatusPayload, String>>>,
    train_requests: Vec<TrainRequest>,
    status_probes: HashMap<JobId, u32>,
}

impl FakeTrainingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn train_returns(self, job_id: &str) -> Self {
        self.inner.lock().train_result = Some(Ok(JobId::new(job_id)));
        self
    }

    pub fn train_fails(self, message: &str) -> Self {
        self.inner.lock().train_result = Some(Err(message.to_string()));
        self
    }

    /// Queue status payloads for a job id; the last entry repeats.
    pub fn statuses(self, job_id: &str, payloads: &[TrainingStatusPayload]) -> Self {
        let queue = payloads.iter().cloned().map(Ok).collect();
        self.inner.lock().statuses.insert(JobId::new(job_id), queue);
        self
    }

    /// Queue raw status strings (no URLs or echo) for a job id.
    pub fn status_strings(self, job_id: &str, statuses: &[&str]) -> Self {
        let payloads: Vec<TrainingStatusPayload> = statuses
            .iter()
            .map(|s| TrainingStatusPayload { status: s.to_string(), ..Default::default() })
            .collect();
        self.statuses(job_id, &payloads)
    }

    /// Queue a transport failure for the next status probe.
    pub fn push_status_error(&self, job_id: &str, message: &str) {
        self.inner
            .lock()
            .statuses
            .entry(JobId::new(job_id))
            .or_default()
            .push_back(Err(message.to_string()));
    }

    pub fn train_requests(&self) -> Vec<TrainRequest> {
        self.inner.lock().train_requests.clone()
    }

    pub fn status_probe_count(&self, job_id: &str) -> u32 {
        self.inner.lock().status_probes.get(&JobId::new(job_id)).copied().unwrap_or(0)
    }
}

#[async_trait]
impl TrainingService for FakeTrainingService {
    async fn train(&self, req: TrainRequest) -> Result<TrainResponse, TrainingError> {
        let mut inner = self.inner.lock();
        inner.train_requests.push(req);
        match inner.train_result.clone() {
            Some(Ok(training_id)) => Ok(TrainResponse { training_id }),
            Some(Err(message)) => Err(TrainingError::Rejected { status: 500, message }),
            None => Err(TrainingError::Rejected { status: 500, message: "unscripted".into() }),
        }
    }

    async fn status(&self, job_id: &JobId) -> Result<TrainingStatusPayload, TrainingError> {
        let mut inner = self.inner.lock();
        *inner.status_probes.entry(job_id.clone()).or_insert(0) += 1;
        let queue = inner.statuses.get_mut(job_id).ok_or_else(|| TrainingError::Rejected {
            status: 404,
            message: "unknown training".into(),
        })?;
        let next = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        match next {
            Some(Ok(payload)) => Ok(payload),
            Some(Err(message)) => Err(TrainingError::Transport(message)),
            None => Err(TrainingError::Rejected { status: 404, message: "unknown training".into() }),
        }
    }
}

// ── Records ─────────────────────────────────────────────────────────────

/// In-memory record store keyed by job id, counting upsert calls.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<Mutex<RecordsInner>>,
}

#[derive(Default)]
struct RecordsInner {
    records: HashMap<String, PresenterRecord>,
    upsert_calls: u32,
    fail_with: Option<String>,
    list_calls: u32,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(self, message: &str) -> Self {
        self.inner.lock().fail_with = Some(message.to_string());
        self
    }

    pub fn records(&self) -> Vec<PresenterRecord> {
        self.inner.lock().records.values().cloned().collect()
    }

    pub fn record(&self, job_id: &str) -> Option<PresenterRecord> {
        self.inner.lock().records.get(job_id).cloned()
    }

    pub fn upsert_calls(&self) -> u32 {
        self.inner.lock().upsert_calls
    }

    pub fn list_calls(&self) -> u32 {
        self.inner.lock().list_calls
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn upsert(
        &self,
        _session: &SessionId,
        record: &PresenterRecord,
    ) -> Result<(), RecordError> {
        let mut inner = self.inner.lock();
        inner.upsert_calls += 1;
        if let Some(message) = &inner.fail_with {
            return Err(RecordError::Rejected { status: 500, message: message.clone() });
        }
        inner.records.insert(record.job_id.to_string(), record.clone());
        Ok(())
    }

    async fn list(&self, _session: &SessionId) -> Result<Vec<PresenterRecord>, RecordError> {
        let mut inner = self.inner.lock();
        inner.list_calls += 1;
        let mut records: Vec<_> = inner.records.values().cloned().collect();
        records.sort_by(|a, b| b.updated_at_ms.cmp(&a.updated_at_ms));
        Ok(records)
    }
}

// ── Session ─────────────────────────────────────────────────────────────

/// In-memory active-job pointer store.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<HashMap<SessionId, ActiveJobPointer>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pointer, bypassing the trait (for restart scenarios).
    pub fn seed(&self, session: &str, job_id: &str, name: &str) {
        self.inner
            .lock()
            .insert(SessionId::new(session), ActiveJobPointer::new(job_id, name));
    }

    pub fn pointer(&self, session: &str) -> Option<ActiveJobPointer> {
        self.inner.lock().get(&SessionId::new(session)).cloned()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session: &SessionId) -> Result<Option<ActiveJobPointer>, SessionError> {
        Ok(self.inner.lock().get(session).cloned())
    }

    async fn set(
        &self,
        session: &SessionId,
        pointer: &ActiveJobPointer,
    ) -> Result<(), SessionError> {
        self.inner.lock().insert(session.clone(), pointer.clone());
        Ok(())
    }

    async fn clear(&self, session: &SessionId) -> Result<(), SessionError> {
        self.inner.lock().remove(session);
        Ok(())
    }
}
