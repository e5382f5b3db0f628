// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Voice-cloning service over the gateway API.

use super::{rejection_message, HttpConfig};
use crate::voice::{VoiceCloneRequest, VoiceCloneResponse, VoiceError, VoiceService, VoiceStatusPayload};
use async_trait::async_trait;
use dh_core::VoiceId;

/// `POST /api/voice/clone` and `GET /api/voice/status/{id}`.
#[derive(Debug, Clone)]
pub struct HttpVoiceService {
    config: HttpConfig,
}

impl HttpVoiceService {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl VoiceService for HttpVoiceService {
    async fn clone_voice(
        &self,
        req: VoiceCloneRequest,
    ) -> Result<VoiceCloneResponse, VoiceError> {
        let url = self.config.endpoint("api/voice/clone").map_err(VoiceError::Decode)?;
        tracing::debug!(name = req.name, "submitting voice clone");

        let response = self
            .config
            .client()
            .post(url)
            .json(&req)
            .send()
            .await
            .map_err(|e| VoiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        response.json().await.map_err(|e| VoiceError::Decode(e.to_string()))
    }

    async fn status(&self, voice_id: &VoiceId) -> Result<VoiceStatusPayload, VoiceError> {
        let url = self
            .config
            .endpoint(&format!("api/voice/status/{voice_id}"))
            .map_err(VoiceError::Decode)?;

        let response = self
            .config
            .client()
            .get(url)
            .send()
            .await
            .map_err(|e| VoiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        response.json().await.map_err(|e| VoiceError::Decode(e.to_string()))
    }
}
