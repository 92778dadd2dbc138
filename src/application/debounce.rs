//! Trailing-edge debounced callbacks.
//!
//! A [`Debouncer`] postpones its action until calls have stopped for the
//! configured delay, then runs it once with the arguments of the last call.

use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, Scheduler, Task, TimerHandle};
use crate::domain::policy::DebounceWindow;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

type Action<T> = Box<dyn Fn(T) + Send + Sync + 'static>;

/// Wraps an action so bursts of calls collapse into one trailing invocation.
///
/// Every [`call`](Debouncer::call) cancels the pending invocation and
/// schedules a new one `delay` later, capturing that call's arguments.
/// Clones share the same pending timer.
///
/// # Example
/// ```
/// use form_throttle::infrastructure::mocks::{ManualScheduler, MockClock};
/// use form_throttle::Debouncer;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::{Duration, Instant};
///
/// let clock = MockClock::new(Instant::now());
/// let scheduler = ManualScheduler::new(clock.clone());
/// let last = Arc::new(AtomicUsize::new(0));
/// let seen = Arc::clone(&last);
///
/// let debounced = Debouncer::new(
///     move |n: usize| seen.store(n, Ordering::SeqCst),
///     Duration::from_millis(100),
///     Arc::new(clock),
///     Arc::new(scheduler.clone()),
/// );
///
/// debounced.call(1);
/// debounced.call(2);
/// scheduler.advance(Duration::from_millis(100));
/// assert_eq!(last.load(Ordering::SeqCst), 2);
/// ```
pub struct Debouncer<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    action: Action<T>,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
    slot: Mutex<Slot>,
    metrics: Metrics,
}

struct Slot {
    window: DebounceWindow,
    timer: Option<Box<dyn TimerHandle>>,
}

impl<T> Inner<T> {
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fire(&self, generation: u64, args: T) {
        let current = {
            let mut slot = self.slot();
            let current = slot.window.fire(generation);
            if current {
                slot.timer = None;
            }
            current
        };

        if current {
            debug!(generation, "debounced action firing");
            self.metrics.record_invocation();
            (self.action)(args);
        }
    }
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    /// Wrap `action` with a quiet period of `delay`.
    ///
    /// # Arguments
    /// * `action` - Callback to run after the quiet period
    /// * `delay` - How long calls must stop before the action runs
    /// * `clock` - Time source used for deadlines
    /// * `scheduler` - Deferred-execution primitive that owns the timers
    pub fn new<F>(
        action: F,
        delay: Duration,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                action: Box::new(action),
                clock,
                scheduler,
                slot: Mutex::new(Slot {
                    window: DebounceWindow::new(delay),
                    timer: None,
                }),
                metrics: Metrics::new(),
            }),
        }
    }

    /// Request the action with `args`, restarting the quiet period.
    pub fn call(&self, args: T) {
        self.inner.metrics.record_call();

        let mut slot = self.inner.slot();
        let (arming, superseded) = slot.window.arm(self.inner.clock.now());
        if let Some(previous) = slot.timer.take() {
            previous.cancel();
        }
        if superseded {
            self.inner.metrics.record_superseded();
        }

        let delay = slot.window.delay();
        let inner = Arc::clone(&self.inner);
        let task: Task = Box::new(move || inner.fire(arming.generation, args));
        slot.timer = Some(self.inner.scheduler.schedule(delay, task));
    }

    /// Whether an invocation is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.inner.slot().window.is_pending()
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.inner.slot().window.delay()
    }

    /// Call counters for this wrapper.
    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.inner.slot();
        f.debug_struct("Debouncer")
            .field("delay", &slot.window.delay())
            .field("pending", &slot.window.is_pending())
            .finish()
    }
}

/// Debounce `action` on the Tokio runtime.
///
/// Uses [`TokioClock`](crate::infrastructure::clock::TokioClock) and
/// [`TokioScheduler`](crate::infrastructure::scheduler::TokioScheduler).
///
/// # Panics
/// [`Debouncer::call`] panics if it is not made from within a Tokio runtime.
#[cfg(feature = "async")]
pub fn debounce<T, F>(action: F, delay: Duration) -> Debouncer<T>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    use crate::infrastructure::{clock::TokioClock, scheduler::TokioScheduler};

    Debouncer::new(
        action,
        delay,
        Arc::new(TokioClock::new()),
        Arc::new(TokioScheduler::new()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mocks::{ManualScheduler, MockClock};
    use std::time::Instant;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn recording(delay: Duration) -> (Debouncer<u32>, ManualScheduler, Arc<Mutex<Vec<u32>>>) {
        let clock = MockClock::new(Instant::now());
        let scheduler = ManualScheduler::new(clock.clone());
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_clone = Arc::clone(&calls);
        let debouncer = Debouncer::new(
            move |n| calls_clone.lock().unwrap().push(n),
            delay,
            Arc::new(clock),
            Arc::new(scheduler.clone()),
        );
        (debouncer, scheduler, calls)
    }

    #[test]
    fn test_burst_collapses_to_last_call() {
        let (debouncer, scheduler, calls) = recording(ms(100));

        debouncer.call(1);
        scheduler.advance(ms(10));
        debouncer.call(2);
        scheduler.advance(ms(10));
        debouncer.call(3);

        scheduler.advance(ms(99));
        assert!(calls.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        scheduler.advance(ms(1));
        assert_eq!(*calls.lock().unwrap(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let (debouncer, scheduler, calls) = recording(ms(50));

        debouncer.call(1);
        scheduler.advance(ms(60));
        debouncer.call(2);
        scheduler.advance(ms(60));

        assert_eq!(*calls.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_metrics_count_superseded_calls() {
        let (debouncer, scheduler, _calls) = recording(ms(100));

        for n in 0..5 {
            debouncer.call(n);
        }
        scheduler.advance(ms(100));

        let snapshot = debouncer.metrics().snapshot();
        assert_eq!(snapshot.calls, 5);
        assert_eq!(snapshot.superseded, 4);
        assert_eq!(snapshot.invocations, 1);
        assert_eq!(snapshot.dropped, 0);
    }

    #[test]
    fn test_clones_share_pending_timer() {
        let (debouncer, scheduler, calls) = recording(ms(100));
        let clone = debouncer.clone();

        debouncer.call(1);
        scheduler.advance(ms(50));
        clone.call(2);
        scheduler.advance(ms(100));

        assert_eq!(*calls.lock().unwrap(), vec![2]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_zero_delay_fires_on_next_turn() {
        let (debouncer, scheduler, calls) = recording(Duration::ZERO);

        debouncer.call(7);
        assert!(calls.lock().unwrap().is_empty());
        scheduler.advance(Duration::ZERO);
        assert_eq!(*calls.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_debug_output() {
        let (debouncer, _scheduler, _calls) = recording(ms(100));
        let rendered = format!("{:?}", debouncer);
        assert!(rendered.contains("Debouncer"));
        assert!(rendered.contains("pending: false"));
    }
}
