// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP implementations of the collaborator seams.
//!
//! All four remote services sit behind one API gateway, so the adapters
//! share a [`HttpConfig`] (base URL + pooled client) and differ only in the
//! paths they hit and the DTOs they move.

mod media;
mod records;
mod training;
mod voice;

pub use media::HttpMediaStore;
pub use records::HttpRecordStore;
pub use training::HttpTrainingService;
pub use voice::HttpVoiceService;

use serde::Deserialize;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared configuration for the HTTP adapters.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpConfig {
    /// Build a config with a pooled client and the default request timeout.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self { base_url, client })
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Resolve a service path against the base URL.
    ///
    /// Paths are crate-internal literals, so a join failure is a programming
    /// error; it is surfaced as a malformed-URL string for the adapter's
    /// Decode variant rather than panicking.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, String> {
        self.base_url.join(path).map_err(|e| format!("bad endpoint {path}: {e}"))
    }
}

/// Error body shape shared by all gateway services.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Extract a human-readable rejection message from a non-success response
/// body, falling back to the raw body or the status text.
pub(crate) fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body.chars().take(200).collect()
            }
        })
}
