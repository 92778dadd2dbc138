//! # form-throttle
//!
//! Decision logic for a site's client-side interactions: contact-form
//! validation, debounce and throttle wrappers for noisy UI events, and the
//! small state models behind the mobile menu, navbar, scroll reveal and a
//! decorative flicker grid.
//!
//! The crate never touches a document. Event handlers feed it what
//! happened and apply what it answers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use form_throttle::{Interactions, SubmitOutcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // One explicit initialisation at start-up; defaults use Tokio time.
//! let mut page = Interactions::builder().build()?;
//!
//! // blur / input / submit events from the contact form
//! page.form_mut().input("email", "someone@example")?;
//! let result = page.form_mut().blur("email")?;
//! assert_eq!(result.message(), Some("Please enter a valid email address."));
//!
//! if let SubmitOutcome::Blocked { errors } = page.submit_form()? {
//!     for error in errors {
//!         println!("{}: {}", error.field, error.message);
//!     }
//! }
//!
//! // the navbar follows every scroll event; extra scroll work is throttled
//! page.on_scroll(240.0);
//! println!("navbar hidden: {}", page.navbar().hidden);
//! # Ok(())
//! # }
//! ```
//!
//! ## Field Validation
//!
//! [`validate`] is a pure function of a [`FieldKind`] and the raw text.
//! Values are trimmed first. The rules:
//!
//! | Field | Rule | Message |
//! |-------|------|---------|
//! | `name` | at least 2 characters | Name must be at least 2 characters long. |
//! | `email` | `local@domain.tld`, no spaces, one `@` | Please enter a valid email address. |
//! | `message` | at least 10 characters | Message must be at least 10 characters long. |
//! | anything else | none, always valid | |
//!
//! ```
//! use form_throttle::{validate, FieldKind};
//!
//! assert!(validate(&FieldKind::from_name("name"), "Jo").is_valid());
//! assert!(!validate(&FieldKind::Email, "test@").is_valid());
//! assert!(validate(&FieldKind::from_name("company"), "").is_valid());
//! ```
//!
//! ## Debounce and Throttle
//!
//! - [`Debouncer`]: every call restarts a quiet period; the action runs
//!   once, with the last call's arguments, when the period ends.
//! - [`Throttler`]: the first call runs immediately and opens a cooldown;
//!   calls during the cooldown are dropped, with no trailing call.
//!
//! Both take their time source and deferred-execution primitive through
//! the [`Clock`] and [`Scheduler`] ports. With the `async` feature (on by
//! default) [`debounce`] and [`throttle`] wire them to Tokio:
//!
//! ```rust,no_run
//! use form_throttle::{debounce, throttle};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let search = debounce(|query: String| println!("searching {query}"), Duration::from_millis(300));
//! search.call("ru".into());
//! search.call("rust".into()); // only this one runs, 300ms from now
//!
//! let on_scroll = throttle(|y: f64| println!("scrolled to {y}"), Duration::from_millis(100));
//! assert!(on_scroll.call(10.0).is_invoke());
//! assert!(on_scroll.call(20.0).is_drop());
//! # }
//! ```
//!
//! ## Testing
//!
//! The `test-helpers` feature exposes [`infrastructure::mocks`]: a
//! [`MockClock`](infrastructure::mocks::MockClock), a virtual-time
//! [`ManualScheduler`](infrastructure::mocks::ManualScheduler) and a
//! log-capturing [`MockCaptureLayer`](infrastructure::mocks::MockCaptureLayer).
//!
//! ## Logging
//!
//! The crate logs through `tracing` and never installs a subscriber.
//! Rejected fields are logged at `DEBUG`, dropped throttle calls at
//! `TRACE`.

// Domain layer - pure decision logic
pub mod domain;

// Application layer - orchestration over time
pub mod application;

// Infrastructure layer - adapters and wiring
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    field::{sanitize, FieldKind, FieldValue, MAX_INPUT_CHARS},
    policy::{Arming, CallDecision, CallPolicy, DebounceWindow, ThrottleWindow},
    site::{scroll_target, FlickerGrid, MenuState, NavbarAppearance, NavbarTracker, RevealState},
    validation::{is_email_shaped, validate, FieldRule, ValidationResult},
};

pub use application::{
    debounce::Debouncer,
    form::{ContactForm, FieldFeedback, FormError, FormField, SubmitOutcome, SENDING_LABEL},
    metrics::{Metrics, MetricsSnapshot},
    notice::{Notice, NoticeBoard, NoticeKind, SUCCESS_NOTICE},
    ports::{Clock, Scheduler, Task, TimerHandle},
    throttle::Throttler,
};

#[cfg(feature = "async")]
pub use application::{
    debounce::debounce,
    grid::{GridAnimator, GridConfigError, GridHandle, ShutdownError},
    throttle::throttle,
};

pub use infrastructure::{
    clock::SystemClock,
    config::{BuildError, InteractionConfig},
    interactions::{Interactions, InteractionsBuilder},
};

#[cfg(feature = "async")]
pub use infrastructure::{clock::TokioClock, scheduler::TokioScheduler};
