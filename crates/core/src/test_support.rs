// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::id::JobId;
use crate::record::{Gender, PresenterRecord};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::job::{Job, Lifecycle};
    use proptest::prelude::*;

    pub fn arb_lifecycle() -> impl Strategy<Value = Lifecycle> {
        prop_oneof![
            Just(Lifecycle::Idle),
            Just(Lifecycle::Uploading),
            Just(Lifecycle::CloningVoice),
            Just(Lifecycle::AwaitingVoiceClone),
            Just(Lifecycle::Training),
            Just(Lifecycle::Completed),
            Just(Lifecycle::Failed),
        ]
    }

    /// A single mutation against a [`Job`], for invariant checks.
    #[derive(Debug, Clone)]
    pub enum JobOp {
        SetProgress(u8),
        Advance(Lifecycle, u8),
        Complete,
        Fail,
    }

    impl JobOp {
        pub fn apply(&self, job: &mut Job) {
            match self {
                JobOp::SetProgress(p) => job.set_progress(*p),
                JobOp::Advance(l, p) => job.advance(*l, *p, "advanced"),
                JobOp::Complete => job.complete("completed"),
                JobOp::Fail => job.fail("failed"),
            }
        }
    }

    pub fn arb_job_op() -> impl Strategy<Value = JobOp> {
        prop_oneof![
            any::<u8>().prop_map(JobOp::SetProgress),
            (arb_lifecycle().prop_filter("non-terminal", |l| !l.is_terminal()), any::<u8>())
                .prop_map(|(l, p)| JobOp::Advance(l, p)),
            Just(JobOp::Complete),
            Just(JobOp::Fail),
        ]
    }
}

// ── Factory functions ───────────────────────────────────────────────────

/// A completed presenter record with the given ids and default metadata.
pub fn presenter_record(job_id: &str, name: &str) -> PresenterRecord {
    PresenterRecord {
        job_id: JobId::new(job_id),
        display_name: name.to_string(),
        gender: Gender::Female,
        status: "completed".to_string(),
        preview_url: None,
        result_image_url: None,
        created_at_ms: 1_000_000,
        updated_at_ms: 1_000_000,
        voice: None,
    }
}
