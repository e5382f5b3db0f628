// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result record persistence seam.

use async_trait::async_trait;
use dh_core::{PresenterRecord, SessionId};
use thiserror::Error;

/// Errors from record store operations
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record request failed: {0}")]
    Transport(String),
    #[error("record store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("record response malformed: {0}")]
    Decode(String),
}

/// Adapter for the list/record persistence service.
///
/// `upsert` is keyed by job id: writing the same record twice must leave one
/// record, not two. Callers treat failures as non-fatal.
#[async_trait]
pub trait RecordStore: Clone + Send + Sync + 'static {
    async fn upsert(&self, session: &SessionId, record: &PresenterRecord)
        -> Result<(), RecordError>;

    /// Records for one session, most recent first.
    async fn list(&self, session: &SessionId) -> Result<Vec<PresenterRecord>, RecordError>;
}
