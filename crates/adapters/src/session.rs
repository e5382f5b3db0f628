// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active-job pointer persistence seam.
//!
//! The pointer is the durable breadcrumb the reconciler reads on startup, so
//! this store must survive process restarts. The file-backed implementation
//! keeps one JSON file per session key and writes via temp-file rename so a
//! crash mid-write never leaves a corrupt pointer.

use async_trait::async_trait;
use dh_core::{ActiveJobPointer, SessionId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from session store operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store io: {0}")]
    Io(String),
    #[error("session store serialization: {0}")]
    Serde(String),
}

/// Durable key-value slot holding at most one active-job pointer per session.
#[async_trait]
pub trait SessionStore: Clone + Send + Sync + 'static {
    async fn get(&self, session: &SessionId) -> Result<Option<ActiveJobPointer>, SessionError>;

    /// Overwrite the pointer for this session.
    async fn set(&self, session: &SessionId, pointer: &ActiveJobPointer)
        -> Result<(), SessionError>;

    /// Remove the pointer. Clearing an absent pointer is a no-op.
    async fn clear(&self, session: &SessionId) -> Result<(), SessionError>;
}

/// File-backed session store: one JSON file per session key.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, session: &SessionId) -> PathBuf {
        // Session keys are caller-scoped opaque strings; percent-free ASCII
        // in practice. Escape path separators so a hostile key cannot
        // address files outside the store directory.
        let safe: String = session
            .as_str()
            .chars()
            .map(|c| if c == '/' || c == '\\' || c == '.' { '_' } else { c })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, session: &SessionId) -> Result<Option<ActiveJobPointer>, SessionError> {
        let path = self.path_for(session);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Io(e.to_string())),
        };
        let pointer = serde_json::from_slice(&bytes)
            .map_err(|e| SessionError::Serde(e.to_string()))?;
        Ok(Some(pointer))
    }

    async fn set(
        &self,
        session: &SessionId,
        pointer: &ActiveJobPointer,
    ) -> Result<(), SessionError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SessionError::Io(e.to_string()))?;
        let path = self.path_for(session);
        let tmp = path.with_extension("json.tmp");
        let bytes =
            serde_json::to_vec_pretty(pointer).map_err(|e| SessionError::Serde(e.to_string()))?;
        tokio::fs::write(&tmp, bytes).await.map_err(|e| SessionError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| SessionError::Io(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self, session: &SessionId) -> Result<(), SessionError> {
        let path = self.path_for(session);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
