//! Work-queue search engine: explicit frames, a fixed worker pool, and O(1)
//! stack depth per worker.
//!
//! Where the spawning engine mirrors the branch tree in its call/task graph,
//! this engine flattens it into `(state, depth)` frames on a shared queue. A
//! fixed pool of workers drains the queue; an outstanding-frame counter
//! detects the drained-without-witness case, and a cancellation token lets a
//! `true` settle abandon every frame that was never dispatched. Depth no
//! longer costs stack, and width is exactly the worker count.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tokio_util::sync::CancellationToken;

use crate::engine::budget::DEFAULT_SPAWN_BUDGET;
use crate::engine::verdict::Verdict;
use crate::engine::SearchOutcome;
use crate::nfa::{StateId, Symbol};
use crate::observability::messages::engine::{BranchTaskFailed, SearchSettled, SearchStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::{SearchStrategy, TransitionFn};

/// Search engine backed by an explicit frame queue and a bounded worker pool.
pub struct WorkQueueSearch {
    workers: usize,
}

/// One undispatched node of the branch tree.
#[derive(Debug, Clone, Copy)]
struct Frame {
    state: StateId,
    depth: usize,
}

/// State shared by the worker pool for one search.
struct QueueContext {
    transitions: Arc<dyn TransitionFn>,
    input: Arc<[Symbol]>,
    target: StateId,
    verdict: Verdict,
    queue: Mutex<VecDeque<Frame>>,
    /// Frames queued or in flight; the search is over when this hits zero.
    outstanding: AtomicUsize,
    work_ready: Notify,
    done: CancellationToken,
    frames_expanded: AtomicUsize,
}

/// Decrements `outstanding` when a frame finishes, even if the transition
/// relation panicked mid-frame; otherwise a panicking collaborator would
/// strand the drain detection and hang the remaining workers.
struct FrameGuard<'a>(&'a QueueContext);

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        if self.0.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.done.cancel();
        }
    }
}

impl WorkQueueSearch {
    /// Create an engine with the given worker-pool size (clamped to at least 1).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Run one search and report the verdict together with pool metrics.
    pub async fn run(
        &self,
        transitions: Arc<dyn TransitionFn>,
        start: StateId,
        target: StateId,
        input: &[Symbol],
    ) -> SearchOutcome {
        SearchStarted {
            strategy: "WorkQueue",
            input_len: input.len(),
            max_concurrency: self.workers,
        }
        .log();

        let ctx = Arc::new(QueueContext {
            transitions,
            input: Arc::from(input),
            target,
            verdict: Verdict::new(),
            queue: Mutex::new(VecDeque::from([Frame { state: start, depth: 0 }])),
            outstanding: AtomicUsize::new(1),
            work_ready: Notify::new(),
            done: CancellationToken::new(),
            frames_expanded: AtomicUsize::new(0),
        });

        let mut workers = Vec::with_capacity(self.workers);
        for _ in 0..self.workers {
            let ctx = ctx.clone();
            workers.push(tokio::spawn(worker_loop(ctx)));
        }

        for worker in workers {
            if let Err(error) = worker.await {
                BranchTaskFailed {
                    strategy: "WorkQueue",
                    error: &error,
                }
                .log();
            }
        }

        tracing::debug!(
            frames_expanded = ctx.frames_expanded.load(Ordering::Acquire),
            "work queue drained"
        );

        let outcome = SearchOutcome {
            found: ctx.verdict.is_found(),
            tasks_spawned: self.workers,
            peak_live_tasks: self.workers,
        };
        SearchSettled {
            strategy: "WorkQueue",
            found: outcome.found,
            tasks_spawned: outcome.tasks_spawned,
            peak_live_tasks: outcome.peak_live_tasks,
        }
        .log();
        outcome
    }
}

impl Default for WorkQueueSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_BUDGET)
    }
}

async fn worker_loop(ctx: Arc<QueueContext>) {
    loop {
        if ctx.done.is_cancelled() {
            return;
        }

        let frame = ctx.queue.lock().await.pop_front();
        let Some(frame) = frame else {
            // Idle until either new frames land or the search is over.
            tokio::select! {
                _ = ctx.work_ready.notified() => continue,
                _ = ctx.done.cancelled() => return,
            }
        };

        process_frame(&ctx, frame).await;
    }
}

async fn process_frame(ctx: &QueueContext, frame: Frame) {
    let _guard = FrameGuard(ctx);
    ctx.frames_expanded.fetch_add(1, Ordering::AcqRel);

    if frame.depth == ctx.input.len() {
        if frame.state == ctx.target && ctx.verdict.settle_found() {
            // Witness found: abandon everything still queued.
            ctx.done.cancel();
        }
        return;
    }

    // Skip expansion once the answer is known; the queue drains on its own.
    if ctx.verdict.is_found() {
        return;
    }

    let successors = ctx
        .transitions
        .next_states(frame.state, ctx.input[frame.depth]);
    if successors.is_empty() {
        return;
    }

    // Account for the children before the guard retires this frame so the
    // outstanding count can never dip to zero while work remains.
    ctx.outstanding
        .fetch_add(successors.len(), Ordering::AcqRel);
    let mut queue = ctx.queue.lock().await;
    for next in successors {
        queue.push_back(Frame {
            state: next,
            depth: frame.depth + 1,
        });
        ctx.work_ready.notify_one();
    }
}

#[async_trait]
impl SearchStrategy for WorkQueueSearch {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::TransitionTable;

    fn table(text: &str) -> Arc<dyn TransitionFn> {
        Arc::new(text.parse::<TransitionTable>().unwrap())
    }

    #[tokio::test]
    async fn finds_path_through_either_arm_of_a_diamond() {
        let transitions = table("0 -a-> 1 2\n1 -b-> 3\n2 -c-> 3");
        let engine = WorkQueueSearch::new(4);

        assert!(
            engine
                .reachable(transitions.clone(), StateId(0), StateId(3), &['a', 'b'])
                .await
        );
        assert!(
            engine
                .reachable(transitions.clone(), StateId(0), StateId(3), &['a', 'c'])
                .await
        );
        assert!(
            !engine
                .reachable(transitions, StateId(0), StateId(3), &['a', 'a'])
                .await
        );
    }

    #[tokio::test]
    async fn empty_input_compares_start_against_target() {
        let transitions = table("0 -a-> 1");
        let engine = WorkQueueSearch::new(2);

        assert!(
            engine
                .reachable(transitions.clone(), StateId(0), StateId(0), &[])
                .await
        );
        assert!(
            !engine
                .reachable(transitions, StateId(0), StateId(1), &[])
                .await
        );
    }

    #[tokio::test]
    async fn single_worker_still_terminates_on_deep_fan_out() {
        // 3^10 leaves with one worker exercises the drain detection rather
        // than the pool.
        let fan_out = |StateId(s): StateId, _: Symbol| -> Vec<StateId> {
            (0..3).map(|i| StateId(s.wrapping_mul(3) + i + 1)).collect()
        };
        let engine = WorkQueueSearch::new(1);
        let input: Vec<Symbol> = std::iter::repeat('a').take(10).collect();

        let outcome = engine
            .run(Arc::new(fan_out), StateId(0), StateId(u32::MAX), &input)
            .await;
        assert!(!outcome.found);
    }

    #[tokio::test]
    async fn witness_on_a_long_input_does_not_recurse() {
        // Cycle of length 2; reachability holds for any even-length input.
        // Depth equals input length, which would be a deep call stack for the
        // recursive engines but is flat frame traffic here.
        let transitions = table("0 -a-> 1\n1 -a-> 0");
        let engine = WorkQueueSearch::new(4);
        let input: Vec<Symbol> = std::iter::repeat('a').take(10_000).collect();

        assert!(
            engine
                .reachable(transitions.clone(), StateId(0), StateId(0), &input)
                .await
        );
        let odd: Vec<Symbol> = std::iter::repeat('a').take(10_001).collect();
        assert!(
            !engine
                .reachable(transitions, StateId(0), StateId(0), &odd)
                .await
        );
    }

    #[tokio::test]
    async fn repeated_searches_are_deterministic() {
        let transitions = table("0 -a-> 0\n0 -b-> 1\n1 -a-> 1\n1 -b-> 0");
        let engine = WorkQueueSearch::new(3);

        for _ in 0..50 {
            assert!(
                engine
                    .reachable(transitions.clone(), StateId(0), StateId(0), &['a', 'b', 'b'])
                    .await
            );
            assert!(
                !engine
                    .reachable(transitions.clone(), StateId(0), StateId(1), &['a', 'a'])
                    .await
            );
        }
    }

    #[tokio::test]
    async fn panicking_relation_does_not_hang_the_pool() {
        let relation = |state: StateId, _: Symbol| -> Vec<StateId> {
            match state {
                StateId(0) => vec![StateId(2), StateId(1)],
                StateId(1) => vec![StateId(3)],
                StateId(2) => panic!("collaborator contract violation"),
                _ => vec![],
            }
        };
        let engine = WorkQueueSearch::new(4);

        // The branch through state 2 dies with its worker; the branch through
        // state 1 must still settle the verdict and the search must return.
        assert!(
            engine
                .reachable(Arc::new(relation), StateId(0), StateId(3), &['a', 'b'])
                .await
        );
    }
}
