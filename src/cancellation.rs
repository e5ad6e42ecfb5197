/*!
 * Cooperative cancellation for long-running merges.
 *
 * The merge engine samples a `CancellationCheck` at the top of every loop
 * iteration. A `CancellationToken` is the usual handle: clone it, hand one
 * copy to the worker, and call `cancel()` from anywhere else.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::Cancelled;

/// Anything that can be asked whether work should stop
pub trait CancellationCheck {
    fn is_cancelled(&self) -> bool;

    /// `Err(Cancelled)` once cancellation has been requested
    fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone of this token observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl CancellationCheck for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Never cancels; for callers that run the merge to completion
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationCheck for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancellationCheck for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}
