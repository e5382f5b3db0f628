// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dh-engine: resumable orchestration of the digital-human training pipeline.
//!
//! The [`Orchestrator`] drives a fresh job end-to-end (upload → voice clone →
//! wait → train → poll → record) and independently resumes pre-existing jobs
//! after a restart via [`Orchestrator::reconcile_once`]. Both paths funnel
//! into the same status normalization, the same result recorder, and the
//! same active-job pointer lifecycle, so re-observing a terminal job is
//! always a no-op.

pub mod config;
pub mod error;
pub mod observer;
pub mod orchestrator;
pub mod poller;
pub mod reconciler;

mod recorder;

pub use config::EngineConfig;
pub use error::{PipelineError, Stage};
pub use observer::{JobObserver, NoopObserver};
pub use orchestrator::{MediaUpload, Orchestrator, OrchestratorDeps, Submission};
pub use poller::{Observation, PollError, PollPlan, Polled};
pub use reconciler::ReconcileOutcome;

#[cfg(any(test, feature = "test-support"))]
pub use observer::CapturingObserver;
