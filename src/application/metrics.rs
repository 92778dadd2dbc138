//! Call metrics for rate-limited wrappers.
//!
//! Every debounced or throttled wrapper counts what happened to the calls
//! it received, for monitoring and debugging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters shared by a wrapper and anyone holding a clone.
///
/// All counters use relaxed atomics; clones observe the same values.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Calls made to the wrapper
    calls: AtomicU64,
    /// Times the wrapped action actually ran
    invocations: AtomicU64,
    /// Calls discarded by a throttle cooldown
    dropped: AtomicU64,
    /// Pending debounced invocations replaced by a newer call
    superseded: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                calls: AtomicU64::new(0),
                invocations: AtomicU64::new(0),
                dropped: AtomicU64::new(0),
                superseded: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn record_call(&self) {
        self.inner.calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invocation(&self) {
        self.inner.invocations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.inner.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_superseded(&self) {
        self.inner.superseded.fetch_add(1, Ordering::Relaxed);
    }

    /// Total calls received.
    pub fn calls(&self) -> u64 {
        self.inner.calls.load(Ordering::Relaxed)
    }

    /// Total invocations of the wrapped action.
    pub fn invocations(&self) -> u64 {
        self.inner.invocations.load(Ordering::Relaxed)
    }

    /// Total calls dropped during a cooldown.
    pub fn dropped(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }

    /// Total pending invocations replaced by a later call.
    pub fn superseded(&self) -> u64 {
        self.inner.superseded.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls: self.calls(),
            invocations: self.invocations(),
            dropped: self.dropped(),
            superseded: self.superseded(),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.inner.calls.store(0, Ordering::Relaxed);
        self.inner.invocations.store(0, Ordering::Relaxed);
        self.inner.dropped.store(0, Ordering::Relaxed);
        self.inner.superseded.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Calls made to the wrapper
    pub calls: u64,
    /// Times the wrapped action ran
    pub invocations: u64,
    /// Calls discarded by a throttle cooldown
    pub dropped: u64,
    /// Pending debounced invocations replaced by a newer call
    pub superseded: u64,
}

impl MetricsSnapshot {
    /// Fraction of calls that never reached the action (0.0 to 1.0).
    ///
    /// Counts both dropped and superseded calls. Returns 0.0 when no calls
    /// were made.
    pub fn drop_rate(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.dropped.saturating_add(self.superseded) as f64 / self.calls as f64
        }
    }
}
