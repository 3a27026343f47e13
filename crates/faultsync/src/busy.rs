//! Loading/busy indicator released by a scope guard.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared busy flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct BusyIndicator {
    active: Arc<AtomicUsize>,
}

impl BusyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one guard is alive.
    pub fn is_busy(&self) -> bool {
        self.active.load(Ordering::Acquire) > 0
    }

    /// Marks the indicator busy until the returned guard is dropped.
    pub fn acquire(&self) -> BusyGuard {
        self.active.fetch_add(1, Ordering::AcqRel);
        BusyGuard {
            active: Arc::clone(&self.active),
        }
    }
}

/// Clears its share of the busy flag on drop, on every exit path.
#[must_use = "the indicator is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct BusyGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}
