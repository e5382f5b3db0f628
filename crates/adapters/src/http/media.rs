// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multipart upload against the media storage service.

use super::{rejection_message, HttpConfig};
use crate::media::{MediaError, MediaStore};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    video_url: String,
}

/// `POST /api/upload/video` with the file in a `video` form part.
#[derive(Debug, Clone)]
pub struct HttpMediaStore {
    config: HttpConfig,
}

impl HttpMediaStore {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, file_name: &str, data: Vec<u8>) -> Result<String, MediaError> {
        let url = self.config.endpoint("api/upload/video").map_err(MediaError::Decode)?;
        let size = data.len();
        tracing::debug!(file = file_name, size, "uploading media");

        let part = reqwest::multipart::Part::bytes(data).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("video", part);

        let response = self
            .config
            .client()
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        let parsed: UploadResponse =
            response.json().await.map_err(|e| MediaError::Decode(e.to_string()))?;
        tracing::info!(file = file_name, url = %parsed.video_url, "media uploaded");
        Ok(parsed.video_url)
    }
}
