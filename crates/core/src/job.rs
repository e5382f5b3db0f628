// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job aggregate and pipeline lifecycle state machine.

use crate::clock::Clock;
use crate::id::{JobId, VoiceId};
use crate::record::Gender;
use serde::{Deserialize, Serialize};

/// Stage of the end-to-end training pipeline.
///
/// One-directional: a job only ever moves forward, and `Completed`/`Failed`
/// are absorbing. A failed run is never retried in place — the caller starts
/// a fresh [`Job`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Idle,
    Uploading,
    CloningVoice,
    AwaitingVoiceClone,
    Training,
    Completed,
    Failed,
}

impl Lifecycle {
    /// Terminal stages never transition further for a given job instance.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Lifecycle::Completed | Lifecycle::Failed)
    }
}

crate::simple_display! {
    Lifecycle {
        Idle => "idle",
        Uploading => "uploading",
        CloningVoice => "cloning_voice",
        AwaitingVoiceClone => "awaiting_voice_clone",
        Training => "training",
        Completed => "completed",
        Failed => "failed",
    }
}

/// One end-to-end training run.
///
/// Owned exclusively by the orchestrating task during a live session; the
/// durable sources of truth across restarts are the active-job pointer and
/// the record store, not this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Remote-assigned training id. Empty until the train request succeeds.
    pub id: JobId,
    /// Human-supplied label, immutable after submission.
    pub display_name: String,
    pub gender: Gender,
    /// BCP-47-ish language code forwarded to the voice and training services.
    pub language: String,
    pub lifecycle: Lifecycle,
    /// 0–100, monotonically non-decreasing while non-terminal.
    pub progress: u8,
    /// Human-readable phase message for the current stage.
    pub message: String,
    /// Set once voice cloning returns a remote identifier.
    pub voice_id: Option<VoiceId>,
    /// Set after a successful upload; input to both clone and train requests.
    pub source_video_url: Option<String>,
    pub created_at_ms: u64,
}

impl Job {
    /// Create a fresh job in `Idle` with zero progress.
    pub fn new(
        display_name: impl Into<String>,
        gender: Gender,
        language: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: JobId::new(""),
            display_name: display_name.into(),
            gender,
            language: language.into(),
            lifecycle: Lifecycle::Idle,
            progress: 0,
            message: String::new(),
            voice_id: None,
            source_video_url: None,
            created_at_ms: clock.epoch_ms(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.lifecycle.is_terminal()
    }

    /// Advance to a non-terminal stage with a phase message and progress
    /// floor. No-op once terminal; progress never decreases.
    pub fn advance(&mut self, lifecycle: Lifecycle, progress: u8, message: impl Into<String>) {
        if self.is_terminal() {
            return;
        }
        self.lifecycle = lifecycle;
        self.message = message.into();
        self.set_progress(progress);
    }

    /// Raise progress to `value`, clamped to 100. Decreases are ignored so
    /// estimated progress can never move backwards under reconciliation.
    pub fn set_progress(&mut self, value: u8) {
        let value = value.min(100);
        if value > self.progress {
            self.progress = value;
        }
    }

    /// Transition to `Completed` at 100%. No-op if already terminal.
    pub fn complete(&mut self, message: impl Into<String>) {
        if self.is_terminal() {
            return;
        }
        self.lifecycle = Lifecycle::Completed;
        self.progress = 100;
        self.message = message.into();
    }

    /// Transition to `Failed` with a cause message. No-op if already terminal.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.is_terminal() {
            return;
        }
        self.lifecycle = Lifecycle::Failed;
        self.message = message.into();
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
