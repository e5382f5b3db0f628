// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized remote job status.
//!
//! The voice and training services report free-form status strings. This
//! module folds both vocabularies into one lifecycle enum so that the poller
//! and reconciler reason about a single, total classification.

use serde::{Deserialize, Serialize};

/// Normalized status of a remote job (voice clone or training run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteStatus {
    /// Accepted, waiting in the remote queue
    Pending,
    /// Explicitly queued behind other work
    Queued,
    /// Request dispatched to the backing provider
    Sent,
    /// Provider is setting the job up
    Initializing,
    /// Actively running
    Processing,
    /// Finished successfully (terminal)
    Completed,
    /// Finished unsuccessfully (terminal)
    Failed,
}

impl RemoteStatus {
    /// Classify a raw remote status string.
    ///
    /// Total: every input maps to exactly one variant. Unrecognized
    /// non-terminal strings classify as `Processing` — an unknown status
    /// must keep the poller watching, never fabricate a terminal outcome.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => RemoteStatus::Pending,
            "queued" | "queue" => RemoteStatus::Queued,
            "sent" => RemoteStatus::Sent,
            "initialized" | "initializing" => RemoteStatus::Initializing,
            "completed" | "complete" | "success" => RemoteStatus::Completed,
            "failed" | "error" => RemoteStatus::Failed,
            _ => RemoteStatus::Processing,
        }
    }

    /// Terminal statuses are absorbing: no further polling once observed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RemoteStatus::Completed | RemoteStatus::Failed)
    }
}

crate::simple_display! {
    RemoteStatus {
        Pending => "pending",
        Queued => "queued",
        Sent => "sent",
        Initializing => "initializing",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
