// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active-job pointer: the durable breadcrumb for resumption.

use crate::id::JobId;
use serde::{Deserialize, Serialize};

/// Reference to the one currently active training run for a session.
///
/// Written the instant a train request succeeds and cleared the instant a
/// terminal remote status is observed (by either the live pipeline or the
/// recovery reconciler — clearing is idempotent). At most one pointer
/// exists per session at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveJobPointer {
    pub job_id: JobId,
    pub display_name: String,
}

impl ActiveJobPointer {
    pub fn new(job_id: impl Into<JobId>, display_name: impl Into<String>) -> Self {
        Self { job_id: job_id.into(), display_name: display_name.into() }
    }
}
