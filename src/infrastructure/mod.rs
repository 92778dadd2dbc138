//! Infrastructure layer - adapters and wiring.
//!
//! This layer provides:
//! - Clock adapters (system time, Tokio time)
//! - The Tokio scheduler for deferred tasks
//! - Configuration and the `Interactions` composition root

pub mod clock;
pub mod config;
pub mod interactions;
#[cfg(feature = "async")]
pub mod scheduler;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides a controllable clock, a virtual-time
/// scheduler and a log-capturing tracing layer.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// form-throttle = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
