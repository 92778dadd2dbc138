//! Tokio-backed deferred execution.

use crate::application::ports::{Scheduler, Task, TimerHandle};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs each task on its own spawned Tokio task after a `sleep`.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    /// Create a new scheduler.
    pub fn new() -> Self {
        Self
    }
}

/// Timer backed by a spawned task; cancelling aborts it.
#[derive(Debug)]
pub struct TokioTimer {
    handle: JoinHandle<()>,
}

impl TimerHandle for TokioTimer {
    fn cancel(&self) {
        self.handle.abort();
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle> {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        Box::new(TokioTimer { handle })
    }
}
