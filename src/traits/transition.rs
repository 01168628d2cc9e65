use crate::nfa::{StateId, Symbol};

/// The transition relation of a nondeterministic finite automaton.
///
/// Given the current state and one input symbol, returns the set of states
/// the automaton may move to. The set may be empty; the search treats that as
/// a dead-ended branch, not an error.
///
/// # Collaborator contract
///
/// Implementations are invoked concurrently from many tasks without any
/// serialization imposed by the engine, so they must be pure with respect to
/// observable state: no mutation shared across calls, and each call must
/// terminate quickly. Violations are not detected or recovered from.
pub trait TransitionFn: Send + Sync {
    fn next_states(&self, state: StateId, symbol: Symbol) -> Vec<StateId>;
}

/// Plain closures work as transition relations.
impl<F> TransitionFn for F
where
    F: Fn(StateId, Symbol) -> Vec<StateId> + Send + Sync,
{
    fn next_states(&self, state: StateId, symbol: Symbol) -> Vec<StateId> {
        self(state, symbol)
    }
}
