// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for automaton construction.
//!
//! The search itself has no error taxonomy: "not reachable" is a successfully
//! computed `false`, and collaborator contract violations are documented
//! preconditions rather than runtime-checked conditions. The only fallible
//! surface is parsing a textual edge list into a `TransitionTable`.

use thiserror::Error;

/// Errors produced while parsing the textual edge-list notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableParseError {
    /// The line does not match the `<state> -<symbol>-> <targets>` shape.
    #[error("line {line}: malformed edge '{text}' (expected '<state> -<symbol>-> <targets>')")]
    MalformedEdge { line: usize, text: String },

    /// A state token is not an unsigned integer.
    #[error("line {line}: invalid state id '{token}'")]
    InvalidState { line: usize, token: String },

    /// An edge declares a source and symbol but no target states.
    #[error("line {line}: edge has no target states")]
    MissingTargets { line: usize },
}
