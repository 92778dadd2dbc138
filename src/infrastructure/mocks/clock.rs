//! Mock clock for testing.

use crate::application::ports::Clock;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Manually driven clock.
///
/// Time only moves when a test moves it, which makes throttle windows and
/// debounce deadlines deterministic. Pair it with
/// [`ManualScheduler`](super::ManualScheduler) to also run deferred tasks.
///
/// # Examples
///
/// ```
/// use form_throttle::infrastructure::mocks::MockClock;
/// use form_throttle::application::ports::Clock;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let clock = MockClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance_ms(20);
/// assert_eq!(clock.elapsed(), Duration::from_millis(20));
///
/// clock.set(start + Duration::from_secs(1));
/// assert_eq!(clock.now(), start + Duration::from_secs(1));
/// ```
///
/// # Thread Safety
///
/// All clones share one underlying instant, so a scheduler, a wrapper and
/// the test body can each hold a clone and see the same time.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    current_time: Arc<Mutex<Instant>>,
}

impl MockClock {
    /// Create a mock clock starting at a specific instant.
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            current_time: Arc::new(Mutex::new(start)),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self
            .current_time
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *time += duration;
    }

    /// Advance the clock by `millis` milliseconds.
    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, instant: Instant) {
        let mut time = self
            .current_time
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *time = instant;
    }

    /// Time elapsed since the instant the clock was created with.
    pub fn elapsed(&self) -> Duration {
        self.now().saturating_duration_since(self.start)
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self
            .current_time
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_time() {
        let start = Instant::now();
        let clock = MockClock::new(start);
        let other = clock.clone();

        other.advance_ms(150);
        assert_eq!(clock.now(), start + Duration::from_millis(150));
        assert_eq!(clock.elapsed(), Duration::from_millis(150));
    }

    #[test]
    fn test_set_before_start_saturates_elapsed() {
        let start = Instant::now() + Duration::from_secs(10);
        let clock = MockClock::new(start);
        clock.set(start - Duration::from_secs(1));
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }
}
