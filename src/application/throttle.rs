//! Leading-edge throttled callbacks.
//!
//! A [`Throttler`] runs its action on the first call, then ignores calls
//! until its cooldown window has passed.

use crate::application::metrics::Metrics;
use crate::application::ports::Clock;
use crate::domain::policy::{CallDecision, CallPolicy, ThrottleWindow};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::trace;

type Action<T> = Box<dyn Fn(T) + Send + Sync + 'static>;

/// Wraps an action so it runs at most once per window.
///
/// Dropped calls are not queued and there is no trailing invocation.
/// Clones share the same window.
///
/// # Example
/// ```
/// use form_throttle::infrastructure::mocks::MockClock;
/// use form_throttle::Throttler;
/// use std::sync::Arc;
/// use std::time::{Duration, Instant};
///
/// let clock = MockClock::new(Instant::now());
/// let throttled = Throttler::new(|_: ()| {}, Duration::from_millis(100), Arc::new(clock.clone()));
///
/// assert!(throttled.call(()).is_invoke());
/// clock.advance(Duration::from_millis(1));
/// assert!(throttled.call(()).is_drop());
/// clock.advance(Duration::from_millis(149));
/// assert!(throttled.call(()).is_invoke());
/// ```
pub struct Throttler<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    action: Action<T>,
    clock: Arc<dyn Clock>,
    window: Mutex<ThrottleWindow>,
    metrics: Metrics,
}

impl<T> Inner<T> {
    fn window(&self) -> MutexGuard<'_, ThrottleWindow> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Throttler<T> {
    /// Wrap `action` with a cooldown of `window`.
    ///
    /// # Arguments
    /// * `action` - Callback to rate limit
    /// * `window` - Minimum spacing between invocations
    /// * `clock` - Time source the cooldown is measured against
    pub fn new<F>(action: F, window: Duration, clock: Arc<dyn Clock>) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                action: Box::new(action),
                clock,
                window: Mutex::new(ThrottleWindow::new(window)),
                metrics: Metrics::new(),
            }),
        }
    }

    /// Offer a call with `args`.
    ///
    /// The action runs synchronously on this thread when the decision is
    /// [`CallDecision::Invoke`]; the window lock is released first, so the
    /// action may call back into the throttler.
    pub fn call(&self, args: T) -> CallDecision {
        self.inner.metrics.record_call();
        let now = self.inner.clock.now();
        let decision = self.inner.window().register_call(now);

        match decision {
            CallDecision::Invoke => {
                self.inner.metrics.record_invocation();
                (self.inner.action)(args);
            }
            CallDecision::Drop => {
                trace!("throttled call dropped");
                self.inner.metrics.record_dropped();
            }
        }

        decision
    }

    /// Whether a call made now would be dropped.
    pub fn is_cooling_down(&self) -> bool {
        let now = self.inner.clock.now();
        self.inner.window().is_cooling_down(now)
    }

    /// The configured window.
    pub fn window(&self) -> Duration {
        self.inner.window().window()
    }

    /// Close the cooldown so the next call is invoked.
    pub fn reset(&self) {
        self.inner.window().reset();
    }

    /// Call counters for this wrapper.
    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }
}

impl<T> Clone for Throttler<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Throttler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttler")
            .field("window", &self.window())
            .field("cooling_down", &self.is_cooling_down())
            .finish()
    }
}

/// Throttle `action` against the Tokio clock.
///
/// Using [`TokioClock`](crate::infrastructure::clock::TokioClock) keeps
/// the window consistent with paused or advanced Tokio time in tests.
#[cfg(feature = "async")]
pub fn throttle<T, F>(action: F, window: Duration) -> Throttler<T>
where
    F: Fn(T) + Send + Sync + 'static,
{
    Throttler::new(
        action,
        window,
        Arc::new(crate::infrastructure::clock::TokioClock::new()),
    )
}
