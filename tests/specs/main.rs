// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level pipeline scenario specs.
//!
//! These exercise the whole stack (engine + adapter fakes + durable
//! pointer store) the way a UI session would: submit, watch, crash,
//! reconcile. Crate-local edge cases live next to the code they test.

mod prelude;

mod pipeline {
    mod failures;
    mod happy_path;
}

mod recovery {
    mod allow_list;
    mod restart;
}
