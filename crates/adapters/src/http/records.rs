// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record store over the gateway API.

use super::{rejection_message, HttpConfig};
use crate::records::{RecordError, RecordStore};
use async_trait::async_trait;
use dh_core::{Gender, JobId, PresenterRecord, SessionId, VoiceId, VoiceInfo};
use serde::{Deserialize, Serialize};

/// Wire shape for one stored presenter record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDto {
    training_id: JobId,
    name: String,
    gender: Gender,
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_result_url: Option<String>,
    #[serde(default)]
    created_at_ms: u64,
    #[serde(default)]
    updated_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voice_cloning: Option<VoiceDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoiceDto {
    voice_id: VoiceId,
    name: String,
    status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest<'a> {
    user_id: &'a SessionId,
    #[serde(flatten)]
    record: RecordDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    digital_humans: Vec<RecordDto>,
}

impl From<&PresenterRecord> for RecordDto {
    fn from(record: &PresenterRecord) -> Self {
        Self {
            training_id: record.job_id.clone(),
            name: record.display_name.clone(),
            gender: record.gender,
            status: record.status.clone(),
            preview_url: record.preview_url.clone(),
            image_result_url: record.result_image_url.clone(),
            created_at_ms: record.created_at_ms,
            updated_at_ms: record.updated_at_ms,
            voice_cloning: record.voice.as_ref().map(|v| VoiceDto {
                voice_id: v.voice_id.clone(),
                name: v.name.clone(),
                status: v.status.clone(),
            }),
        }
    }
}

impl From<RecordDto> for PresenterRecord {
    fn from(dto: RecordDto) -> Self {
        Self {
            job_id: dto.training_id,
            display_name: dto.name,
            gender: dto.gender,
            status: dto.status,
            preview_url: dto.preview_url,
            result_image_url: dto.image_result_url,
            created_at_ms: dto.created_at_ms,
            updated_at_ms: dto.updated_at_ms,
            voice: dto.voice_cloning.map(|v| VoiceInfo {
                voice_id: v.voice_id,
                name: v.name,
                status: v.status,
            }),
        }
    }
}

/// `POST /api/digital-human/save` and `GET /api/digital-human/list/{user}`.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    config: HttpConfig,
}

impl HttpRecordStore {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn upsert(
        &self,
        session: &SessionId,
        record: &PresenterRecord,
    ) -> Result<(), RecordError> {
        let url =
            self.config.endpoint("api/digital-human/save").map_err(RecordError::Decode)?;
        let body = SaveRequest { user_id: session, record: RecordDto::from(record) };

        let response = self
            .config
            .client()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecordError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }
        Ok(())
    }

    async fn list(&self, session: &SessionId) -> Result<Vec<PresenterRecord>, RecordError> {
        let url = self
            .config
            .endpoint(&format!("api/digital-human/list/{session}"))
            .map_err(RecordError::Decode)?;

        let response = self
            .config
            .client()
            .get(url)
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecordError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        let parsed: ListResponse =
            response.json().await.map_err(|e| RecordError::Decode(e.to_string()))?;
        Ok(parsed.digital_humans.into_iter().map(PresenterRecord::from).collect())
    }
}
