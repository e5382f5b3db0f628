// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine timing and budget configuration.
//!
//! Every interval and limit the pipeline uses lives here so tests can run
//! with zero delays and production can tune backoff without touching the
//! orchestration code. All fields are optional in TOML; omitted fields
//! take the defaults below.

use std::time::Duration;

use dh_core::JobId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Seconds between training status probes.
    pub training_poll_interval_secs: u64,
    /// Seconds between voice clone status probes.
    pub voice_poll_interval_secs: u64,
    /// Seconds to wait after a transport failure during training polling.
    pub error_backoff_secs: u64,
    /// Seconds to wait after a transport failure during voice polling.
    pub voice_error_backoff_secs: u64,
    /// Seconds to wait after a training submission before the first probe.
    pub poll_start_delay_secs: u64,
    /// Hard ceiling on voice clone status probes before giving up.
    pub voice_max_attempts: u32,
    /// Consecutive transport failures tolerated while polling voice status.
    pub voice_transport_failure_limit: u32,
    /// Consecutive transport failures tolerated while polling training status.
    pub training_transport_failure_limit: u32,
    /// Seconds between recovery reconciler sweeps.
    pub recovery_interval_secs: u64,
    /// Job ids the reconciler may probe when no active pointer is set.
    /// Empty by default: recovery without a pointer is opt-in.
    pub recent_job_ids: Vec<JobId>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            training_poll_interval_secs: 10,
            voice_poll_interval_secs: 10,
            error_backoff_secs: 15,
            voice_error_backoff_secs: 5,
            poll_start_delay_secs: 5,
            voice_max_attempts: 60,
            voice_transport_failure_limit: 3,
            training_transport_failure_limit: 8,
            recovery_interval_secs: 30,
            recent_job_ids: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// All delays zeroed. Attempt budgets keep their defaults so exhaustion
    /// paths stay reachable without wall-clock waits.
    pub fn zero_delay() -> Self {
        Self {
            training_poll_interval_secs: 0,
            voice_poll_interval_secs: 0,
            error_backoff_secs: 0,
            voice_error_backoff_secs: 0,
            poll_start_delay_secs: 0,
            recovery_interval_secs: 0,
            ..Self::default()
        }
    }

    pub fn training_poll_interval(&self) -> Duration {
        Duration::from_secs(self.training_poll_interval_secs)
    }

    pub fn voice_poll_interval(&self) -> Duration {
        Duration::from_secs(self.voice_poll_interval_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }

    pub fn voice_error_backoff(&self) -> Duration {
        Duration::from_secs(self.voice_error_backoff_secs)
    }

    pub fn poll_start_delay(&self) -> Duration {
        Duration::from_secs(self.poll_start_delay_secs)
    }

    pub fn recovery_interval(&self) -> Duration {
        Duration::from_secs(self.recovery_interval_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
