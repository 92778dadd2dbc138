//! Mock implementations for testing.
//!
//! This module provides test doubles for infrastructure adapters,
//! enabling deterministic tests of timing behaviour and log output.

pub mod clock;
pub mod layer;
pub mod scheduler;

pub use clock::MockClock;
pub use layer::{CapturedEvent, MockCaptureLayer};
pub use scheduler::{ManualScheduler, ManualTimer};
