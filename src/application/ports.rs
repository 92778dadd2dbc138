//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Port for obtaining current time.
///
/// This abstraction allows the application layer to work with time
/// without depending on system clock implementation details.
/// Infrastructure provides concrete implementations (SystemClock, TokioClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a task accepted by a [`Scheduler`].
pub trait TimerHandle: Send + Sync + Debug {
    /// Prevent the task from running if it has not started yet.
    ///
    /// Cancelling a task that already ran, or was already cancelled, is a no-op.
    fn cancel(&self);
}

/// Port for deferred execution.
///
/// A scheduled task runs once, on a later turn, after at least `delay` has
/// elapsed. Infrastructure provides concrete implementations
/// (TokioScheduler, ManualScheduler).
pub trait Scheduler: Send + Sync + Debug {
    /// Run `task` after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle>;
}
