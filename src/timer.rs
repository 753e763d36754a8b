//! Wall-clock budget tracking for the top-level search

use std::time::{Duration, Instant};

/// Tracks elapsed time against the per-move budget
///
/// The search polls [`expired`](SearchTimer::expired) cooperatively; nothing
/// preempts a running node.
pub struct SearchTimer {
    start: Instant,
    budget: Duration,
}

impl SearchTimer {
    pub fn new(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// True once the budget is spent; the search should unwind
    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.budget
    }

    /// Early-halt heuristic: each depth costs several times its predecessor,
    /// so once half the budget is gone the next depth is unlikely to finish
    pub fn should_halt_early(&self) -> bool {
        self.start.elapsed() * 2 >= self.budget
    }
}
