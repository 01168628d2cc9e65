//! Scoped permit pool bounding concurrent task spawns within one search.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Semaphore, TryAcquireError};

/// Default number of concurrently live spawned tasks per search.
pub const DEFAULT_SPAWN_BUDGET: usize = 10;

/// Semaphore-backed spawn budget, created fresh for every search.
///
/// Each spawn decision tries a non-blocking acquire: a permit means the branch
/// may run as its own task, no permit means it recurses synchronously in the
/// current task. Permits are released by RAII when the spawned task finishes,
/// so the budget bounds *concurrently live* spawned tasks rather than the
/// total ever dispatched. Branching can be exponential in input length; this
/// is the lid on it.
#[derive(Debug, Clone)]
pub struct SpawnBudget {
    capacity: usize,
    semaphore: Arc<Semaphore>,
    stats: Arc<BudgetStats>,
}

/// Instrumentation counters for one search's budget.
#[derive(Debug, Default)]
pub struct BudgetStats {
    live: AtomicUsize,
    high_water: AtomicUsize,
    total_spawned: AtomicUsize,
}

impl BudgetStats {
    /// Spawned tasks currently running.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Most spawned tasks that were ever live at once.
    pub fn high_water(&self) -> usize {
        self.high_water.load(Ordering::Acquire)
    }

    /// Total spawn decisions that resulted in a task.
    pub fn total_spawned(&self) -> usize {
        self.total_spawned.load(Ordering::Acquire)
    }
}

/// RAII guard for one spawned task's slot in the budget.
///
/// Held for the task's whole lifetime; dropping it returns the permit to the
/// pool and decrements the live count.
#[derive(Debug)]
pub struct SpawnPermit {
    // Field order matters: stats bookkeeping runs before the semaphore permit
    // is returned to the pool.
    stats: StatsGuard,
    _permit: tokio::sync::OwnedSemaphorePermit,
}

#[derive(Debug)]
struct StatsGuard(Arc<BudgetStats>);

impl Drop for StatsGuard {
    fn drop(&mut self) {
        self.0.live.fetch_sub(1, Ordering::AcqRel);
    }
}

impl SpawnBudget {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            semaphore: Arc::new(Semaphore::new(capacity)),
            stats: Arc::new(BudgetStats::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> &BudgetStats {
        &self.stats
    }

    /// Claim a spawn slot without waiting.
    ///
    /// `None` means the budget is exhausted and the branch must run
    /// synchronously; the search never blocks on the budget, since a waiting
    /// parent could otherwise deadlock against the children it has to join.
    pub fn try_acquire(&self) -> Option<SpawnPermit> {
        match self.semaphore.clone().try_acquire_owned() {
            Ok(permit) => {
                let live = self.stats.live.fetch_add(1, Ordering::AcqRel) + 1;
                self.stats.high_water.fetch_max(live, Ordering::AcqRel);
                self.stats.total_spawned.fetch_add(1, Ordering::AcqRel);
                Some(SpawnPermit {
                    stats: StatsGuard(self.stats.clone()),
                    _permit: permit,
                })
            }
            Err(TryAcquireError::NoPermits) | Err(TryAcquireError::Closed) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_at_least_one() {
        assert_eq!(SpawnBudget::new(0).capacity(), 1);
        assert_eq!(SpawnBudget::new(4).capacity(), 4);
    }

    #[test]
    fn acquire_fails_once_exhausted_and_recovers_on_release() {
        let budget = SpawnBudget::new(2);

        let first = budget.try_acquire().expect("first permit");
        let second = budget.try_acquire().expect("second permit");
        assert!(budget.try_acquire().is_none());
        assert_eq!(budget.stats().live(), 2);

        drop(first);
        assert_eq!(budget.stats().live(), 1);
        let third = budget.try_acquire().expect("slot freed by release");

        drop(second);
        drop(third);
        assert_eq!(budget.stats().live(), 0);
    }

    #[test]
    fn stats_track_high_water_and_totals() {
        let budget = SpawnBudget::new(3);

        let a = budget.try_acquire().unwrap();
        let b = budget.try_acquire().unwrap();
        drop(a);
        let c = budget.try_acquire().unwrap();
        drop(b);
        drop(c);

        assert_eq!(budget.stats().high_water(), 2);
        assert_eq!(budget.stats().total_spawned(), 3);
        assert_eq!(budget.stats().live(), 0);
    }
}
