//! Call-rate policies for wrapped callbacks.
//!
//! These types hold the timing state of a wrapper and make the decisions;
//! they never run callbacks themselves. Time is passed in explicitly so the
//! policies stay deterministic under test.

use std::time::{Duration, Instant};

/// Decision made for one call to a rate-limited wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDecision {
    /// Run the wrapped action now
    Invoke,
    /// Discard the call
    Drop,
}

impl CallDecision {
    /// Check if this decision is Invoke.
    pub fn is_invoke(&self) -> bool {
        matches!(self, CallDecision::Invoke)
    }

    /// Check if this decision is Drop.
    pub fn is_drop(&self) -> bool {
        matches!(self, CallDecision::Drop)
    }
}

/// Trait for policies that decide synchronously, at call time.
pub trait CallPolicy: Send + Sync {
    /// Register a call made at `timestamp` and decide what to do with it.
    fn register_call(&mut self, timestamp: Instant) -> CallDecision;

    /// Forget all history.
    fn reset(&mut self);
}

/// Leading-edge cooldown window.
///
/// The first call is invoked and opens a cooldown of `window`. Calls made
/// while the cooldown is open are dropped. The first call at or after the
/// end of the cooldown is invoked and opens a new one.
///
/// # Example
/// ```
/// use form_throttle::{CallPolicy, ThrottleWindow};
/// use std::time::{Duration, Instant};
///
/// let mut window = ThrottleWindow::new(Duration::from_millis(100));
/// let t0 = Instant::now();
///
/// assert!(window.register_call(t0).is_invoke());
/// assert!(window.register_call(t0 + Duration::from_millis(1)).is_drop());
/// assert!(window.register_call(t0 + Duration::from_millis(150)).is_invoke());
/// ```
#[derive(Debug, Clone)]
pub struct ThrottleWindow {
    window: Duration,
    opened_at: Option<Instant>,
}

impl ThrottleWindow {
    /// Create a closed window of the given length.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            opened_at: None,
        }
    }

    /// Length of the cooldown.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a call at `now` would be dropped.
    pub fn is_cooling_down(&self, now: Instant) -> bool {
        match self.opened_at {
            Some(opened) => now.saturating_duration_since(opened) < self.window,
            None => false,
        }
    }

    /// When the current cooldown ends, if one is open at `now`.
    pub fn reopens_at(&self, now: Instant) -> Option<Instant> {
        if self.is_cooling_down(now) {
            self.opened_at.map(|opened| opened + self.window)
        } else {
            None
        }
    }
}

impl CallPolicy for ThrottleWindow {
    fn register_call(&mut self, timestamp: Instant) -> CallDecision {
        if self.is_cooling_down(timestamp) {
            CallDecision::Drop
        } else {
            self.opened_at = Some(timestamp);
            CallDecision::Invoke
        }
    }

    fn reset(&mut self) {
        self.opened_at = None;
    }
}

/// A single arming of a debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arming {
    /// Identifies this arming; only the newest one may fire
    pub generation: u64,
    /// When the action is due if nothing re-arms the window
    pub deadline: Instant,
}

/// Trailing-edge quiet-period window.
///
/// Every call re-arms the window with a fresh generation and pushes the
/// deadline to `delay` after that call. A scheduled firing is honoured
/// only if its generation is still the current one, so a superseded
/// timer that could not be cancelled in time is harmless.
#[derive(Debug, Clone)]
pub struct DebounceWindow {
    delay: Duration,
    generation: u64,
    deadline: Option<Instant>,
}

impl DebounceWindow {
    /// Create an idle window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            deadline: None,
        }
    }

    /// Quiet period required before the action fires.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Re-arm the window for a call made at `now`.
    ///
    /// Returns the new arming and whether it replaced a pending one.
    pub fn arm(&mut self, now: Instant) -> (Arming, bool) {
        let superseded = self.deadline.is_some();
        self.generation = self.generation.wrapping_add(1);
        let deadline = now + self.delay;
        self.deadline = Some(deadline);
        (
            Arming {
                generation: self.generation,
                deadline,
            },
            superseded,
        )
    }

    /// Consume the arming identified by `generation`.
    ///
    /// Returns `true` (and returns the window to idle) only when that
    /// arming is still pending.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.deadline.is_some() && self.generation == generation {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Whether an arming is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Deadline of the pending arming.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drop any pending arming without firing it.
    pub fn disarm(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
