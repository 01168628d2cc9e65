// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for search engine lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A search started with the given strategy and concurrency limit.
///
/// # Log Level
/// `debug!` - Routine per-call event
pub struct SearchStarted<'a> {
    pub strategy: &'a str,
    pub input_len: usize,
    pub max_concurrency: usize,
}

impl Display for SearchStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {} search: {} input symbols, max_concurrency={}",
            self.strategy, self.input_len, self.max_concurrency
        )
    }
}

impl StructuredLog for SearchStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            strategy = self.strategy,
            input_len = self.input_len,
            max_concurrency = self.max_concurrency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "search",
            span_name = name,
            strategy = self.strategy,
            input_len = self.input_len,
            max_concurrency = self.max_concurrency,
        )
    }
}

/// A search settled on its final answer.
///
/// # Log Level
/// `debug!` - Routine per-call event
pub struct SearchSettled<'a> {
    pub strategy: &'a str,
    pub found: bool,
    pub tasks_spawned: usize,
    pub peak_live_tasks: usize,
}

impl Display for SearchSettled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} search settled: found={}, {} tasks spawned, peak {} live",
            self.strategy, self.found, self.tasks_spawned, self.peak_live_tasks
        )
    }
}

impl StructuredLog for SearchSettled<'_> {
    fn log(&self) {
        tracing::debug!(
            strategy = self.strategy,
            found = self.found,
            tasks_spawned = self.tasks_spawned,
            peak_live_tasks = self.peak_live_tasks,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "search_settled",
            span_name = name,
            strategy = self.strategy,
            found = self.found,
            tasks_spawned = self.tasks_spawned,
            peak_live_tasks = self.peak_live_tasks,
        )
    }
}

/// A branch task ended abnormally and its subtree was forfeited.
///
/// This is a collaborator contract violation (a panicking transition
/// relation), not an engine defect; the search continues without the branch.
///
/// # Log Level
/// `warn!` - Degraded but not fatal
pub struct BranchTaskFailed<'a> {
    pub strategy: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for BranchTaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} search branch task failed and was discarded: {}",
            self.strategy, self.error
        )
    }
}

impl StructuredLog for BranchTaskFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            strategy = self.strategy,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "branch_task_failed",
            span_name = name,
            strategy = self.strategy,
            error = %self.error,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_render_human_readable_text() {
        let started = SearchStarted {
            strategy: "Spawning",
            input_len: 3,
            max_concurrency: 10,
        };
        assert_eq!(
            started.to_string(),
            "Starting Spawning search: 3 input symbols, max_concurrency=10"
        );

        let settled = SearchSettled {
            strategy: "WorkQueue",
            found: true,
            tasks_spawned: 4,
            peak_live_tasks: 4,
        };
        assert!(settled.to_string().contains("found=true"));
    }
}
