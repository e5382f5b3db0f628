// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for pipeline scenario specs.

use std::sync::Arc;

pub use dh_adapters::test_support::{
    FakeMediaStore, FakeTrainingService, FakeVoiceService, MemoryRecordStore, MemorySessionStore,
};
pub use dh_adapters::{TrainingEcho, TrainingStatusPayload};
pub use dh_core::{FakeClock, Gender, JobId, Lifecycle, SessionId};
pub use dh_engine::{
    CapturingObserver, EngineConfig, MediaUpload, Orchestrator, OrchestratorDeps, PipelineError,
    ReconcileOutcome, Stage, Submission,
};

pub const SESSION: &str = "studio-session";

pub type PipelineOrchestrator = Orchestrator<
    FakeMediaStore,
    FakeVoiceService,
    FakeTrainingService,
    MemoryRecordStore,
    MemorySessionStore,
    FakeClock,
>;

/// One simulated client session: fakes, durable stores, and an observer
/// that records every emitted snapshot. Stores are shared across the
/// orchestrators built from it, so "restart" is just building a second
/// orchestrator from the same harness.
pub struct Pipeline {
    pub media: FakeMediaStore,
    pub voice: FakeVoiceService,
    pub training: FakeTrainingService,
    pub records: MemoryRecordStore,
    pub session: MemorySessionStore,
    pub observer: Arc<CapturingObserver>,
    pub config: EngineConfig,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            media: FakeMediaStore::new(),
            voice: FakeVoiceService::new(),
            training: FakeTrainingService::new(),
            records: MemoryRecordStore::new(),
            session: MemorySessionStore::new(),
            observer: Arc::new(CapturingObserver::new()),
            config: EngineConfig::zero_delay(),
        }
    }

    /// Same stores and config, fresh orchestrator. Each call models one
    /// process lifetime.
    pub fn orchestrator(&self) -> PipelineOrchestrator {
        Orchestrator::new(
            OrchestratorDeps {
                media: self.media.clone(),
                voice: self.voice.clone(),
                training: self.training.clone(),
                records: self.records.clone(),
                session: self.session.clone(),
            },
            FakeClock::new(),
            SessionId::new(SESSION),
            self.config.clone(),
        )
        .with_observer(self.observer.clone())
    }
}

pub fn submission(name: &str) -> Submission {
    Submission {
        display_name: name.to_string(),
        gender: Gender::Female,
        language: "en".to_string(),
        media: MediaUpload { file_name: "take-one.mp4".to_string(), data: vec![0xde, 0xad] },
    }
}

pub fn processing() -> TrainingStatusPayload {
    TrainingStatusPayload { status: "processing".to_string(), ..Default::default() }
}

pub fn completed(name: &str) -> TrainingStatusPayload {
    TrainingStatusPayload {
        status: "completed".to_string(),
        preview_url: Some(format!("https://cdn.test/preview/{name}.mp4")),
        image_result_url: Some(format!("https://cdn.test/image/{name}.png")),
        echo: Some(TrainingEcho {
            name: Some(name.to_string()),
            gender: Some(Gender::Female),
            video_url: None,
        }),
    }
}
