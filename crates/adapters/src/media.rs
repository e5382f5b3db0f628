// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Media upload seam.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from media upload operations
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("upload request failed: {0}")]
    Transport(String),
    #[error("upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("upload response malformed: {0}")]
    Decode(String),
}

/// Adapter for the media storage service.
///
/// Accepts a file and returns a stable URL the voice and training services
/// can fetch from.
#[async_trait]
pub trait MediaStore: Clone + Send + Sync + 'static {
    async fn upload(&self, file_name: &str, data: Vec<u8>) -> Result<String, MediaError>;
}
