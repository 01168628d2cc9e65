// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod engine;        // search engines
pub mod errors;        // error handling
pub mod nfa;           // automaton domain types
pub mod observability;
pub mod traits;        // unified abstractions

pub use engine::reachable;
