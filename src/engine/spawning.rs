//! Task-spawning search engine: the recursive exploration, with branches
//! promoted to concurrent tasks while the spawn budget lasts.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::engine::budget::{SpawnBudget, DEFAULT_SPAWN_BUDGET};
use crate::engine::verdict::Verdict;
use crate::engine::SearchOutcome;
use crate::nfa::{StateId, Symbol};
use crate::observability::messages::engine::{BranchTaskFailed, SearchSettled, SearchStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::{SearchStrategy, TransitionFn};

/// Search engine that explores the branch tree recursively and dispatches
/// independent branches as tokio tasks under a per-search [`SpawnBudget`].
///
/// Each node consumes one symbol, asks the relation for candidate next
/// states, and for every candidate either spawns a task (non-blocking budget
/// acquire succeeded) or recurses inline. The node then joins all of its
/// spawned children, so by the time the root call returns every descendant has
/// completed and the [`Verdict`] cell holds the final answer. A branch that
/// reaches the end of the input in the target state settles the verdict;
/// everyone else reports nothing, which keeps the "exactly one false" rule a
/// property of the structure rather than of any distinguished node.
pub struct SpawningSearch {
    budget: usize,
}

/// Read-only search state shared by every branch of one invocation.
struct SearchContext {
    transitions: Arc<dyn TransitionFn>,
    input: Arc<[Symbol]>,
    target: StateId,
    verdict: Verdict,
    budget: SpawnBudget,
}

impl SpawningSearch {
    /// Create an engine with the given spawn budget (clamped to at least 1).
    pub fn new(budget: usize) -> Self {
        Self {
            budget: budget.max(1),
        }
    }

    /// Run one search and report the verdict together with budget
    /// instrumentation.
    pub async fn run(
        &self,
        transitions: Arc<dyn TransitionFn>,
        start: StateId,
        target: StateId,
        input: &[Symbol],
    ) -> SearchOutcome {
        SearchStarted {
            strategy: "Spawning",
            input_len: input.len(),
            max_concurrency: self.budget,
        }
        .log();

        let ctx = Arc::new(SearchContext {
            transitions,
            input: Arc::from(input),
            target,
            verdict: Verdict::new(),
            budget: SpawnBudget::new(self.budget),
        });

        explore(ctx.clone(), start, 0).await;

        let outcome = SearchOutcome {
            found: ctx.verdict.is_found(),
            tasks_spawned: ctx.budget.stats().total_spawned(),
            peak_live_tasks: ctx.budget.stats().high_water(),
        };
        SearchSettled {
            strategy: "Spawning",
            found: outcome.found,
            tasks_spawned: outcome.tasks_spawned,
            peak_live_tasks: outcome.peak_live_tasks,
        }
        .log();
        outcome
    }
}

impl Default for SpawningSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_BUDGET)
    }
}

/// Explore one `(state, depth)` node of the branch tree.
///
/// Boxed because the future recurses through itself both inline and across
/// `tokio::spawn`.
fn explore(
    ctx: Arc<SearchContext>,
    state: StateId,
    depth: usize,
) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        // Once some branch has found a witness the rest of the tree is moot.
        if ctx.verdict.is_found() {
            return;
        }

        if depth == ctx.input.len() {
            if state == ctx.target {
                ctx.verdict.settle_found();
            }
            return;
        }

        let symbol = ctx.input[depth];
        let mut children = Vec::new();

        for next in ctx.transitions.next_states(state, symbol) {
            match ctx.budget.try_acquire() {
                Some(permit) => {
                    let branch = ctx.clone();
                    children.push(tokio::spawn(async move {
                        let _permit = permit;
                        explore(branch, next, depth + 1).await;
                    }));
                }
                None => explore(ctx.clone(), next, depth + 1).await,
            }
        }

        // Join barrier: this node is not done until every child it spawned is.
        for child in children {
            if let Err(error) = child.await {
                // A panicking relation forfeits its branch; the search goes on.
                BranchTaskFailed {
                    strategy: "Spawning",
                    error: &error,
                }
                .log();
            }
        }
    })
}

#[async_trait]
impl SearchStrategy for SpawningSearch {
    async fn reachable(
        &self,
        transitions: Arc<dyn TransitionFn>,
        start: StateId,
        target: StateId,
        input: &[Symbol],
    ) -> bool {
        self.run(transitions, start, target, input).await.found
    }
}
