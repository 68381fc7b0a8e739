//! Step flows: quiz, profile/upload and results.
//!
//! Each flow is a plain state value the page keeps in a signal, plus an async
//! orchestration function that talks to the backend and writes the hand-off
//! record for the next step.

pub mod quiz;
pub mod results;
pub mod upload;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Liveness of a mounted step. Results of requests that finish after the
/// step was left are dropped instead of being persisted.
#[derive(Debug, Clone)]
pub struct StepGuard {
    active: Arc<AtomicBool>,
}

impl StepGuard {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn close(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Default for StepGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_close_is_shared_by_clones() {
        let guard = StepGuard::new();
        let handle = guard.clone();
        assert!(handle.is_active());
        guard.close();
        assert!(!handle.is_active());
    }
}
