//! Settle-once result cell shared by every branch of one search.

use std::sync::atomic::{AtomicBool, Ordering};

/// First-writer-wins boolean verdict for a single search.
///
/// Any branch that satisfies the termination condition may settle the verdict;
/// later settles are ignored rather than surfaced as errors, so branches that
/// lose the race simply run to completion and are discarded. `false` is never
/// written: it is the value observed by the caller once every branch has
/// finished without a settle, which makes the "exactly one not-reachable
/// report" guarantee structural instead of a convention about which node is
/// the root.
#[derive(Debug, Default)]
pub struct Verdict {
    found: AtomicBool,
}

impl Verdict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a witness path was found.
    ///
    /// Returns `true` for the first caller and `false` for every later one;
    /// redundant settles are harmless by design.
    pub fn settle_found(&self) -> bool {
        !self.found.swap(true, Ordering::AcqRel)
    }

    /// Whether some branch has already found a witness path.
    ///
    /// Branches use this to stop expanding once the answer is known; the
    /// check is an optimization, never required for correctness.
    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }
}
