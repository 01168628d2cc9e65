pub mod budget;
pub mod factory;
pub mod sequential;
pub mod spawning;
pub mod verdict;
pub mod work_queue;


pub use budget::{BudgetStats, SpawnBudget, DEFAULT_SPAWN_BUDGET};
pub use factory::{EngineFactory, Strategy};
pub use sequential::SequentialSearch;
pub use spawning::SpawningSearch;
pub use verdict::Verdict;
pub use work_queue::WorkQueueSearch;

use std::sync::Arc;

use crate::nfa::{StateId, Symbol};
use crate::traits::TransitionFn;

/// Result of one search, with the concurrency instrumentation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Whether a witness path exists.
    pub found: bool,
    /// Tasks dispatched over the whole search.
    pub tasks_spawned: usize,
    /// Most tasks that were ever live at once.
    pub peak_live_tasks: usize,
}

/// Decide whether `target` is reachable from `start` by consuming the entire
/// `input` under `transitions`.
///
/// Convenience entry point running the default [`SpawningSearch`] with the
/// default spawn budget. See [`crate::traits::SearchStrategy::reachable`] for
/// the full contract.
pub async fn reachable(
    transitions: Arc<dyn TransitionFn>,
    start: StateId,
    target: StateId,
    input: &[Symbol],
) -> bool {
    SpawningSearch::default()
        .run(transitions, start, target, input)
        .await
        .found
}
