// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dh-adapters: collaborator seams for the dh pipeline engine.
//!
//! Each external service the engine depends on — media upload, voice
//! cloning, training, the record store, and the active-job pointer store —
//! is reached through a trait defined here. HTTP implementations live in
//! [`http`]; in-memory fakes for tests live in [`test_support`].

pub mod http;
pub mod media;
pub mod records;
pub mod session;
pub mod training;
pub mod voice;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use http::HttpConfig;
pub use media::{MediaError, MediaStore};
pub use records::{RecordError, RecordStore};
pub use session::{FileSessionStore, SessionError, SessionStore};
pub use training::{
    TrainRequest, TrainResponse, TrainingError, TrainingEcho, TrainingService,
    TrainingStatusPayload,
};
pub use voice::{
    VoiceCloneRequest, VoiceCloneResponse, VoiceError, VoiceService, VoiceStatusPayload,
};
