//! Shared operation counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Operations completed and claimed across all workers.
///
/// Only totals are read, so relaxed ordering is enough.
#[derive(Debug, Default)]
pub struct OpCounter {
    completed: AtomicU64,
    claimed: AtomicU64,
}

impl OpCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the right to start one more operation under `max`.
    pub fn try_claim(&self, max: u64) -> bool {
        self.claimed.fetch_add(1, Ordering::Relaxed) < max
    }

    pub fn complete(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }
}
