// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes.
//!
//! All three ids are opaque strings minted outside this process: `JobId` by
//! the training service, `VoiceId` by the voice service, and `SessionId` by
//! the caller. None of them are ever generated locally.

crate::remote_id! {
    /// Identifier for one training run, assigned by the training service.
    ///
    /// Primary key for the job, the active-job pointer, and the persisted
    /// presenter record.
    pub struct JobId;
}

crate::remote_id! {
    /// Identifier for a cloned voice, assigned by the voice service.
    pub struct VoiceId;
}

crate::remote_id! {
    /// Caller-supplied session/user key scoping the active-job pointer and
    /// the record list. Trusted as-is.
    pub struct SessionId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
