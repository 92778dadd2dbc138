//! Background animation of the decorative flicker grid.
//!
//! Every tick a new set of active cells is chosen and handed to a
//! callback, until the returned handle is shut down.

use crate::domain::site::FlickerGrid;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

/// Error returned when the animation task did not stop cleanly.
#[derive(Debug)]
pub enum ShutdownError {
    /// The task panicked or was aborted before it could observe the signal
    TaskFailed(tokio::task::JoinError),
}

impl fmt::Display for ShutdownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownError::TaskFailed(e) => write!(f, "grid animation task failed: {}", e),
        }
    }
}

impl std::error::Error for ShutdownError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShutdownError::TaskFailed(e) => Some(e),
        }
    }
}

/// Error returned when a grid animation cannot be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridConfigError {
    /// The tick must be greater than zero
    ZeroTick,
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridConfigError::ZeroTick => write!(f, "grid tick must be greater than 0"),
        }
    }
}

impl std::error::Error for GridConfigError {}

/// Drives a [`FlickerGrid`] on a fixed tick.
#[derive(Debug, Clone)]
pub struct GridAnimator {
    grid: FlickerGrid,
    tick: Duration,
    seed: Option<u64>,
}

impl GridAnimator {
    /// Animate `grid`, producing one frame per `tick`.
    ///
    /// # Errors
    /// Returns `GridConfigError::ZeroTick` if `tick` is zero.
    pub fn new(grid: FlickerGrid, tick: Duration) -> Result<Self, GridConfigError> {
        if tick.is_zero() {
            return Err(GridConfigError::ZeroTick);
        }
        Ok(Self {
            grid,
            tick,
            seed: None,
        })
    }

    /// Use a fixed random seed, for reproducible frames.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Spawn the animation task.
    ///
    /// The first frame is produced one tick after starting. Grids with no
    /// cells never produce frames but the task still runs until shutdown.
    pub fn start<F>(self, mut on_frame: F) -> GridHandle
    where
        F: FnMut(Vec<usize>) + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(cells = self.grid.cells(), "grid animation started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if self.grid.cells() > 0 {
                            on_frame(self.grid.next_frame(&mut rng));
                        }
                    }
                    _ = &mut shutdown_rx => break,
                }
            }

            info!("grid animation stopped");
        });

        GridHandle { shutdown_tx, task }
    }
}

/// Owns the running animation task.
///
/// Dropping the handle without calling [`shutdown`](GridHandle::shutdown)
/// closes the signal channel, which also stops the task.
#[derive(Debug)]
pub struct GridHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl GridHandle {
    /// Stop the animation and wait for the task to finish.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        // the receiver may already be gone if the task ended
        let _ = self.shutdown_tx.send(());
        self.task.await.map_err(ShutdownError::TaskFailed)
    }

    /// Whether the task has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn collecting(
        grid: FlickerGrid,
        tick: Duration,
    ) -> (GridHandle, Arc<Mutex<Vec<Vec<usize>>>>) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let frames_clone = Arc::clone(&frames);
        let handle = GridAnimator::new(grid, tick)
            .unwrap()
            .with_seed(42)
            .start(move |frame| frames_clone.lock().unwrap().push(frame));
        (handle, frames)
    }

    #[test]
    fn test_zero_tick_is_rejected() {
        let result = GridAnimator::new(FlickerGrid::new(4, 2, 4), Duration::ZERO);
        assert_eq!(result.unwrap_err(), GridConfigError::ZeroTick);
        assert_eq!(
            GridConfigError::ZeroTick.to_string(),
            "grid tick must be greater than 0"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_frame_per_tick() {
        let (handle, frames) = collecting(FlickerGrid::new(9, 2, 4), Duration::from_secs(2));

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(frames.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(4002)).await;
        let frames = frames.lock().unwrap().clone();
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert!((2..=4).contains(&frame.len()));
            assert!(frame.iter().all(|cell| *cell < 9));
        }

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_frames() {
        let (handle, frames) = collecting(FlickerGrid::new(4, 2, 4), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(250)).await;
        handle.shutdown().await.unwrap();
        let count = frames.lock().unwrap().len();
        assert_eq!(count, 2);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(frames.lock().unwrap().len(), count);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_grid_produces_no_frames() {
        let (handle, frames) = collecting(FlickerGrid::new(0, 2, 4), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(frames.lock().unwrap().is_empty());
        assert!(!handle.is_finished());
        handle.shutdown().await.unwrap();
    }
}
