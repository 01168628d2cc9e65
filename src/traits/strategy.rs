use async_trait::async_trait;
use std::sync::Arc;

use crate::nfa::{StateId, Symbol};
use crate::traits::transition::TransitionFn;

#[async_trait]
pub trait SearchStrategy: Send + Sync {
    /// Decide whether `target` is reachable from `start` by consuming the
    /// entire `input`, under the supplied transition relation.
    ///
    /// - `transitions`: the automaton, shared read-only across all branches
    /// - `start` / `target`: where the search begins and where it must end
    /// - `input`: the (possibly empty) symbol sequence to consume
    ///
    /// There is no error path: an empty next-state set dead-ends a branch and
    /// an exhausted search is a normal `false`. The call resolves only once
    /// every branch the strategy dispatched has completed or been safely
    /// abandoned.
    async fn reachable(
        &self,
        transitions: Arc<dyn TransitionFn>,
        start: StateId,
        target: StateId,
        input: &[Symbol],
    ) -> bool;
}
