// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dh-core: domain types for the digital-human (dh) training pipeline

pub mod macros;

pub mod clock;
pub mod id;
pub mod job;
pub mod pointer;
pub mod record;
pub mod status;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{JobId, SessionId, VoiceId};
pub use job::{Job, Lifecycle};
pub use pointer::ActiveJobPointer;
pub use record::{Gender, PresenterRecord, VoiceInfo};
pub use status::RemoteStatus;
