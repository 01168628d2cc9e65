// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.

use tracing::Span;

pub mod engine;

/// A log event that can be emitted with structured fields or opened as a span.
///
/// Implementors also provide `Display`, so callers can choose between
/// `msg.log()` (structured fields plus the rendered text) and
/// `tracing::info!("{}", msg)` (text only).
pub trait StructuredLog: std::fmt::Display {
    /// Emit this message at its intended level with structured fields.
    fn log(&self);

    /// Open a span carrying this message's fields.
    fn span(&self, name: &str) -> Span;
}
