//! Virtual-time scheduler for testing.

use super::clock::MockClock;
use crate::application::ports::{Clock, Scheduler, Task, TimerHandle};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Scheduler whose tasks run only when the test advances time.
///
/// Tasks are queued with a due instant taken from the shared
/// [`MockClock`]. [`advance`](ManualScheduler::advance) walks the clock
/// forward, stopping at each due instant to run that task, so tasks see
/// the clock exactly at their deadline and run in deadline order (ties in
/// scheduling order). Tasks scheduled while advancing are picked up in the
/// same walk if they fall due within it.
///
/// # Examples
///
/// ```
/// use form_throttle::application::ports::Scheduler;
/// use form_throttle::infrastructure::mocks::{ManualScheduler, MockClock};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::{Duration, Instant};
///
/// let scheduler = ManualScheduler::new(MockClock::new(Instant::now()));
/// let ran = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&ran);
///
/// let _timer = scheduler.schedule(
///     Duration::from_millis(30),
///     Box::new(move || flag.store(true, Ordering::SeqCst)),
/// );
///
/// scheduler.advance(Duration::from_millis(29));
/// assert!(!ran.load(Ordering::SeqCst));
/// scheduler.advance(Duration::from_millis(1));
/// assert!(ran.load(Ordering::SeqCst));
/// ```
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    clock: MockClock,
    queue: Arc<Mutex<Queue>>,
}

#[derive(Default)]
struct Queue {
    next_id: u64,
    entries: Vec<Entry>,
}

struct Entry {
    id: u64,
    due: Instant,
    task: Task,
}

impl std::fmt::Debug for Queue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queue")
            .field("next_id", &self.next_id)
            .field("pending", &self.entries.len())
            .finish()
    }
}

fn lock(queue: &Mutex<Queue>) -> MutexGuard<'_, Queue> {
    queue
        .lock()
        .expect("ManualScheduler mutex poisoned - a test thread panicked while holding the lock")
}

impl ManualScheduler {
    /// Create a scheduler driven by `clock`.
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            queue: Arc::new(Mutex::new(Queue::default())),
        }
    }

    /// The clock this scheduler reads and advances.
    pub fn clock(&self) -> &MockClock {
        &self.clock
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        lock(&self.queue).entries.len()
    }

    /// Move time forward by `duration`, running every task that falls due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, duration: Duration) -> usize {
        let target = self.clock.now() + duration;
        let mut ran = 0;

        while let Some((due, task)) = self.pop_due(target) {
            if due > self.clock.now() {
                self.clock.set(due);
            }
            task();
            ran += 1;
        }

        self.clock.set(target);
        ran
    }

    /// Run tasks already due at the current time without moving the clock.
    pub fn run_due(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    fn pop_due(&self, target: Instant) -> Option<(Instant, Task)> {
        let mut queue = lock(&self.queue);
        let position = queue
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= target)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(position, _)| position)?;
        let entry = queue.entries.remove(position);
        Some((entry.due, entry.task))
    }
}

/// Handle to a task queued on a [`ManualScheduler`].
#[derive(Debug)]
pub struct ManualTimer {
    id: u64,
    queue: Arc<Mutex<Queue>>,
}

impl TimerHandle for ManualTimer {
    fn cancel(&self) {
        lock(&self.queue).entries.retain(|entry| entry.id != self.id);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle> {
        let due = self.clock.now() + delay;
        let mut queue = lock(&self.queue);
        let id = queue.next_id;
        queue.next_id += 1;
        queue.entries.push(Entry { id, due, task });

        Box::new(ManualTimer {
            id,
            queue: Arc::clone(&self.queue),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<(&'static str, Duration)>>>, MockClock) {
        (Arc::new(Mutex::new(Vec::new())), MockClock::new(Instant::now()))
    }

    #[test]
    fn test_tasks_run_in_deadline_order_at_their_deadline() {
        let (log, clock) = recorder();
        let scheduler = ManualScheduler::new(clock.clone());

        for (name, delay) in [("late", 30), ("early", 10), ("tie", 10)] {
            let log = Arc::clone(&log);
            let clock = clock.clone();
            let _ = scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || log.lock().unwrap().push((name, clock.elapsed()))),
            );
        }

        assert_eq!(scheduler.advance(Duration::from_millis(100)), 3);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                ("early", Duration::from_millis(10)),
                ("tie", Duration::from_millis(10)),
                ("late", Duration::from_millis(30)),
            ]
        );
        assert_eq!(clock.elapsed(), Duration::from_millis(100));
    }

    #[test]
    fn test_cancelled_task_is_removed() {
        let (log, clock) = recorder();
        let scheduler = ManualScheduler::new(clock);
        let log_clone = Arc::clone(&log);

        let timer = scheduler.schedule(
            Duration::from_millis(5),
            Box::new(move || log_clone.lock().unwrap().push(("x", Duration::ZERO))),
        );
        assert_eq!(scheduler.pending(), 1);
        timer.cancel();
        assert_eq!(scheduler.pending(), 0);

        assert_eq!(scheduler.advance(Duration::from_millis(10)), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_task_scheduled_by_task_runs_in_same_advance() {
        let (log, clock) = recorder();
        let scheduler = ManualScheduler::new(clock.clone());
        let inner_scheduler = scheduler.clone();
        let inner_log = Arc::clone(&log);
        let inner_clock = clock.clone();

        let _ = scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                let _ = inner_scheduler.schedule(
                    Duration::from_millis(10),
                    Box::new(move || inner_log.lock().unwrap().push(("nested", inner_clock.elapsed()))),
                );
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(
            *log.lock().unwrap(),
            vec![("nested", Duration::from_millis(20))]
        );
    }
}
