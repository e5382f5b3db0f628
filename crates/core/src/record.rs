// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable result records.
//!
//! A [`PresenterRecord`] is written to the record store once a training run
//! is observed terminal. The store upserts by job id, so recording the same
//! completion twice is a no-op rather than a duplicate.

use crate::id::{JobId, VoiceId};
use serde::{Deserialize, Serialize};

/// Voice gender requested at submission time (service contract value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    #[default]
    Female,
}

crate::simple_display! {
    Gender {
        Male => "male",
        Female => "female",
    }
}

/// Cloned-voice metadata attached to a finished presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub voice_id: VoiceId,
    /// Derived voice name (display name plus a generated suffix).
    pub name: String,
    /// Normalized remote status string at recording time.
    pub status: String,
}

/// Durable record of one trained digital presenter, keyed by job id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenterRecord {
    pub job_id: JobId,
    pub display_name: String,
    pub gender: Gender,
    /// Normalized terminal status string ("completed" or "failed").
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_image_url: Option<String>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceInfo>,
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
