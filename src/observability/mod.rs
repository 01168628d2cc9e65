// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with a `Display`
//! implementation so that log text lives in one place instead of as magic
//! strings scattered through the engines, and so the same event can be
//! emitted either as plain formatted output or as structured fields.
//!
//! Messages are organized by subsystem; today the search engines are the only
//! emitter, under `messages::engine`.

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber reading `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops. Library code never
/// calls this — it is for binaries and tests that want log output.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
