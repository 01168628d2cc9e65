//! Plain recursive reachability, the reference definition.

use async_trait::async_trait;
use std::sync::Arc;

use crate::nfa::{StateId, Symbol};
use crate::traits::{SearchStrategy, TransitionFn};

/// Depth-first recursive search with no concurrency.
///
/// This is the executable definition of reachability: the concurrent engines
/// are differential-tested against it, and it is useful in its own right when
/// the automaton is small enough that task dispatch is pure overhead.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialSearch;

impl SequentialSearch {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous entry point; no runtime required.
    pub fn reachable(
        &self,
        transitions: &dyn TransitionFn,
        start: StateId,
        target: StateId,
        input: &[Symbol],
    ) -> bool {
        let Some((&symbol, rest)) = input.split_first() else {
            return start == target;
        };

        transitions
            .next_states(start, symbol)
            .into_iter()
            .any(|next| self.reachable(transitions, next, target, rest))
    }
}

#[async_trait]
impl SearchStrategy for SequentialSearch {
    async fn reachable(
        &self,
        transitions: Arc<dyn TransitionFn>,
        start: StateId,
        target: StateId,
        input: &[Symbol],
    ) -> bool {
        SequentialSearch::reachable(self, transitions.as_ref(), start, target, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::TransitionTable;

    fn diamond() -> TransitionTable {
        "0 -a-> 1 2\n1 -b-> 3\n2 -c-> 3".parse().unwrap()
    }

    #[test]
    fn empty_input_is_identity_check() {
        let table = diamond();
        let search = SequentialSearch::new();
        assert!(search.reachable(&table, StateId(0), StateId(0), &[]));
        assert!(!search.reachable(&table, StateId(0), StateId(3), &[]));
    }

    #[test]
    fn follows_either_nondeterministic_arm() {
        let table = diamond();
        let search = SequentialSearch::new();
        assert!(search.reachable(&table, StateId(0), StateId(3), &['a', 'b']));
        assert!(search.reachable(&table, StateId(0), StateId(3), &['a', 'c']));
        assert!(!search.reachable(&table, StateId(0), StateId(3), &['a', 'a']));
    }

    #[test]
    fn dead_end_on_first_symbol_is_false() {
        let table = diamond();
        let search = SequentialSearch::new();
        assert!(!search.reachable(&table, StateId(0), StateId(3), &['z', 'b']));
    }
}
