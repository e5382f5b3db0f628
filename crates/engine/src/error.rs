// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline error taxonomy.
//!
//! Stage-local errors always resolve to the pipeline's `Failed` terminal
//! state with a message naming the stage, so a caller can tell an upload
//! rejection from a training failure from a poll budget we gave up on.

use std::fmt;

use thiserror::Error;

/// Pipeline stage that produced a collaborator or polling error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Upload,
    VoiceClone,
    VoiceWait,
    Train,
    TrainingPoll,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Upload => "upload",
            Stage::VoiceClone => "voice clone",
            Stage::VoiceWait => "voice clone wait",
            Stage::Train => "training request",
            Stage::TrainingPoll => "training status",
        })
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or conflicting input. Caller's fault; no state changed.
    #[error("validation: {0}")]
    Validation(String),

    /// A collaborator request failed or returned a non-success status.
    /// Terminal for the current run.
    #[error("{stage} failed: {message}")]
    Collaborator { stage: Stage, message: String },

    /// The voice service accepted the clone but returned no voice id in
    /// either response field. Fatal: training must never start without one.
    #[error("voice clone returned no voice id")]
    MissingVoiceId,

    /// Status polling exceeded its attempt or transport-failure budget.
    /// Distinct from `Collaborator` so "it failed" and "we stopped
    /// watching" read apart.
    #[error("{stage} polling exhausted after {attempts} attempts")]
    PollExhausted { stage: Stage, attempts: u32 },

    /// A durable-store operation failed where the outcome gates what the
    /// caller may do next. Record and pointer writes on the success path
    /// are logged and swallowed instead; they never reverse a remote
    /// success.
    #[error("persistence: {0}")]
    Persistence(String),
}
