use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{CuratorError, CuratorResult};

/// Cooperative cancellation flag shared between a task and its scheduler.
///
/// Tasks poll it between units of work, never in the middle of one.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancellation has been requested.
    pub fn check(&self) -> CuratorResult<()> {
        if self.is_cancelled() {
            Err(CuratorError::Cancelled)
        } else {
            Ok(())
        }
    }
}
