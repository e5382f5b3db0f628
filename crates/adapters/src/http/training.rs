// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Training service over the gateway API.

use super::{rejection_message, HttpConfig};
use crate::training::{
    TrainRequest, TrainResponse, TrainingError, TrainingService, TrainingStatusPayload,
};
use async_trait::async_trait;
use dh_core::JobId;

/// `POST /api/digital-human/train` and `GET /api/digital-human/status/{id}`.
#[derive(Debug, Clone)]
pub struct HttpTrainingService {
    config: HttpConfig,
}

impl HttpTrainingService {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TrainingService for HttpTrainingService {
    async fn train(&self, req: TrainRequest) -> Result<TrainResponse, TrainingError> {
        let url =
            self.config.endpoint("api/digital-human/train").map_err(TrainingError::Decode)?;
        tracing::debug!(name = req.name, voice_id = %req.voice_id, "submitting training");

        let response = self
            .config
            .client()
            .post(url)
            .json(&req)
            .send()
            .await
            .map_err(|e| TrainingError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrainingError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        response.json().await.map_err(|e| TrainingError::Decode(e.to_string()))
    }

    async fn status(&self, job_id: &JobId) -> Result<TrainingStatusPayload, TrainingError> {
        let url = self
            .config
            .endpoint(&format!("api/digital-human/status/{job_id}"))
            .map_err(TrainingError::Decode)?;

        let response = self
            .config
            .client()
            .get(url)
            .send()
            .await
            .map_err(|e| TrainingError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrainingError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        response.json().await.map_err(|e| TrainingError::Decode(e.to_string()))
    }
}
