//! Application layer - orchestration of domain logic over time.
//!
//! This layer runs the domain decisions against real (or mocked) time:
//! - Debounced and throttled callback wrappers
//! - Contact form state
//! - Expiring notices
//! - The flicker grid animation task (requires `async`)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) for time and deferred
//! execution. Infrastructure adapters implement them, which keeps this
//! layer independent of any particular runtime.

pub mod debounce;
pub mod form;
#[cfg(feature = "async")]
pub mod grid;
pub mod metrics;
pub mod notice;
pub mod ports;
pub mod throttle;
