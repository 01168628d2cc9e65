// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::budget::DEFAULT_SPAWN_BUDGET;
use crate::engine::sequential::SequentialSearch;
use crate::engine::spawning::SpawningSearch;
use crate::engine::work_queue::WorkQueueSearch;
use crate::traits::SearchStrategy;

/// Available search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Recursive exploration with budgeted task spawning.
    Spawning,
    /// Explicit frame queue with a fixed worker pool.
    WorkQueue,
    /// Plain recursion, no concurrency.
    Sequential,
}

/// Factory for creating search engines from a strategy selection
pub struct EngineFactory;

impl EngineFactory {
    /// Create a search engine for the given strategy.
    ///
    /// `max_concurrency` is the spawn budget (Spawning) or worker-pool size
    /// (WorkQueue); `None` selects the default budget. Sequential ignores it.
    pub fn build(strategy: Strategy, max_concurrency: Option<usize>) -> Box<dyn SearchStrategy> {
        let max_concurrency = max_concurrency.unwrap_or(DEFAULT_SPAWN_BUDGET);

        match strategy {
            Strategy::Spawning => Box::new(SpawningSearch::new(max_concurrency)),
            Strategy::WorkQueue => Box::new(WorkQueueSearch::new(max_concurrency)),
            Strategy::Sequential => Box::new(SequentialSearch::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::{StateId, TransitionTable};
    use std::sync::Arc;

    #[tokio::test]
    async fn every_strategy_answers_the_same_query() {
        let table: TransitionTable = "0 -a-> 1 2\n1 -b-> 3\n2 -c-> 3".parse().unwrap();
        let transitions: Arc<dyn crate::traits::TransitionFn> = Arc::new(table);

        for strategy in [Strategy::Spawning, Strategy::WorkQueue, Strategy::Sequential] {
            let engine = EngineFactory::build(strategy, Some(4));
            assert!(
                engine
                    .reachable(transitions.clone(), StateId(0), StateId(3), &['a', 'b'])
                    .await,
                "{:?} missed the witness",
                strategy
            );
            assert!(
                !engine
                    .reachable(transitions.clone(), StateId(0), StateId(3), &['b'])
                    .await,
                "{:?} invented a witness",
                strategy
            );
        }
    }
}
