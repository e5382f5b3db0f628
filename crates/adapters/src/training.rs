// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Training service seam.

use async_trait::async_trait;
use dh_core::{Gender, JobId, RemoteStatus, SessionId, VoiceId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from training service operations
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("training request failed: {0}")]
    Transport(String),
    #[error("training service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("training response malformed: {0}")]
    Decode(String),
}

/// One training submission. Only issued once the voice clone referenced by
/// `voice_id` has been observed completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRequest {
    pub user_id: SessionId,
    pub name: String,
    pub gender: Gender,
    pub language: String,
    pub video_url: String,
    /// Final path segment of the upload URL.
    pub temp_video_file_name: String,
    pub voice_id: VoiceId,
}

/// Response to a train request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainResponse {
    pub training_id: JobId,
}

/// Submission metadata echoed back by the status endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingEcho {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Status probe result for a training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatusPayload {
    pub status: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub image_result_url: Option<String>,
    /// Echoed submission metadata (field names are the service's own).
    #[serde(rename = "trainingData", default)]
    pub echo: Option<TrainingEcho>,
}

impl TrainingStatusPayload {
    pub fn normalized(&self) -> RemoteStatus {
        RemoteStatus::parse(&self.status)
    }
}

/// Adapter for the training service.
#[async_trait]
pub trait TrainingService: Clone + Send + Sync + 'static {
    async fn train(&self, req: TrainRequest) -> Result<TrainResponse, TrainingError>;

    async fn status(&self, job_id: &JobId) -> Result<TrainingStatusPayload, TrainingError>;
}

#[cfg(test)]
#[path = "training_tests.rs"]
mod tests;
