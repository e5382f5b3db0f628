// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Voice cloning seam.
//!
//! The clone response wire shape is provider-specific: the voice id usually
//! arrives nested in the provider envelope (`a2eResponse.data._id`) but some
//! deployments flatten it to a top-level `voiceId`.
//! [`VoiceCloneResponse::voice_id`] tries both.

use async_trait::async_trait;
use dh_core::{Gender, RemoteStatus, SessionId, VoiceId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from voice service operations
#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("voice request failed: {0}")]
    Transport(String),
    #[error("voice service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("voice response malformed: {0}")]
    Decode(String),
}

/// One voice-clone submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCloneRequest {
    pub user_id: SessionId,
    /// Derived voice name (display name plus a generated suffix).
    pub name: String,
    /// Source media URLs to clone from.
    pub voice_urls: Vec<String>,
    pub gender: Gender,
    /// Fixed quality flags (always on, per service guidance).
    pub denoise: bool,
    pub enhance_voice_similarity: bool,
    /// Fixed provider model.
    pub model: String,
    pub language: String,
}

impl VoiceCloneRequest {
    /// Request with the fixed quality flags and provider model applied.
    pub fn new(
        user_id: SessionId,
        name: impl Into<String>,
        source_url: impl Into<String>,
        gender: Gender,
        language: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            voice_urls: vec![source_url.into()],
            gender,
            denoise: true,
            enhance_voice_similarity: true,
            model: "minimax".to_string(),
            language: language.into(),
        }
    }
}

/// Provider envelope carrying the voice id at `data._id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderEnvelope {
    #[serde(default)]
    pub data: Option<ProviderData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderData {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

/// Response to a clone request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCloneResponse {
    /// Provider envelope (primary id location).
    #[serde(rename = "a2eResponse", default)]
    pub provider: Option<ProviderEnvelope>,
    /// Flattened id (fallback location).
    #[serde(default)]
    pub voice_id: Option<String>,
}

impl VoiceCloneResponse {
    /// Extract the voice id, preferring the provider envelope over the
    /// flattened field. `None` when both are absent.
    pub fn voice_id(&self) -> Option<VoiceId> {
        self.provider
            .as_ref()
            .and_then(|p| p.data.as_ref())
            .and_then(|d| d.id.as_deref())
            .or(self.voice_id.as_deref())
            .map(VoiceId::new)
    }
}

/// Status probe result for a cloning voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceStatusPayload {
    pub status: String,
}

impl VoiceStatusPayload {
    pub fn normalized(&self) -> RemoteStatus {
        RemoteStatus::parse(&self.status)
    }
}

/// Adapter for the voice-cloning service.
#[async_trait]
pub trait VoiceService: Clone + Send + Sync + 'static {
    /// Submit a clone request. Success means the service accepted the job,
    /// not that the voice is ready — poll [`VoiceService::status`] for that.
    async fn clone_voice(&self, req: VoiceCloneRequest)
        -> Result<VoiceCloneResponse, VoiceError>;

    async fn status(&self, voice_id: &VoiceId) -> Result<VoiceStatusPayload, VoiceError>;
}

#[cfg(test)]
#[path = "voice_tests.rs"]
mod tests;
