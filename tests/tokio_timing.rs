//! The Tokio-backed wrappers under paused time.

#![cfg(feature = "async")]

use form_throttle::{debounce, throttle, BuildError, FlickerGrid, GridAnimator, GridConfigError};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn test_debounce_fires_after_quiet_period() {
    let start = Instant::now();
    let fired = Arc::new(Mutex::new(Vec::new()));
    let fired_clone = Arc::clone(&fired);

    let debounced = debounce(
        move |query: &'static str| fired_clone.lock().unwrap().push((query, start.elapsed())),
        ms(100),
    );

    debounced.call("r");
    sleep(ms(10)).await;
    debounced.call("ru");
    sleep(ms(10)).await;
    debounced.call("rust");

    sleep(ms(99)).await;
    assert!(fired.lock().unwrap().is_empty());
    assert!(debounced.is_pending());

    sleep(ms(50)).await;
    let fired = fired.lock().unwrap();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].0, "rust");
    assert!(fired[0].1 >= ms(120) && fired[0].1 < ms(130));
}

#[tokio::test(start_paused = true)]
async fn test_throttle_drops_calls_within_window() {
    let count = Arc::new(Mutex::new(0u32));
    let count_clone = Arc::clone(&count);
    let throttled = throttle(move |_: ()| *count_clone.lock().unwrap() += 1, ms(100));

    assert!(throttled.call(()).is_invoke());
    sleep(ms(1)).await;
    assert!(throttled.call(()).is_drop());
    sleep(ms(149)).await;
    assert!(throttled.call(()).is_invoke());

    sleep(ms(500)).await;
    assert_eq!(*count.lock().unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_grid_animation_stops_on_shutdown() {
    let frames = Arc::new(Mutex::new(Vec::new()));
    let frames_clone = Arc::clone(&frames);

    let handle = GridAnimator::new(FlickerGrid::new(16, 2, 4), ms(2000))
        .unwrap()
        .with_seed(7)
        .start(move |frame| frames_clone.lock().unwrap().push(frame));

    sleep(ms(6500)).await;
    handle.shutdown().await.unwrap();

    let frames = frames.lock().unwrap();
    assert_eq!(frames.len(), 3);
    for frame in frames.iter() {
        assert!((2..=4).contains(&frame.len()));
        assert!(frame.iter().all(|&cell| cell < 16));
    }
}

#[test]
fn test_zero_grid_tick_fails_before_spawning() {
    let err = GridAnimator::new(FlickerGrid::new(4, 2, 4), Duration::ZERO).unwrap_err();
    assert_eq!(err, GridConfigError::ZeroTick);
    assert_eq!(BuildError::from(err), BuildError::ZeroGridTick);
}
