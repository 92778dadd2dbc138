//! Composition root for the page interactions.
//!
//! [`InteractionsBuilder::build`] is the single, explicit start-up step:
//! it wires the clock and scheduler adapters into the application
//! services and returns an [`Interactions`] value that owns all of them.
//! Nothing is registered globally.

use crate::application::{
    form::{ContactForm, FormError, SubmitOutcome},
    metrics::Metrics,
    notice::NoticeBoard,
    ports::{Clock, Scheduler},
    throttle::Throttler,
};
use crate::domain::policy::CallDecision;
use crate::domain::site::{
    scroll_target, FlickerGrid, MenuState, NavbarAppearance, NavbarTracker, RevealState,
};
use crate::infrastructure::config::{BuildError, InteractionConfig};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::info;

#[cfg(feature = "async")]
use crate::application::grid::{GridAnimator, GridHandle};

type ScrollListener = Box<dyn Fn(f64) + Send + Sync + 'static>;

/// Builder for constructing [`Interactions`].
pub struct InteractionsBuilder {
    config: InteractionConfig,
    clock: Option<Arc<dyn Clock>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    form: Option<ContactForm>,
    initial_scroll_y: f64,
    scroll_listener: Option<ScrollListener>,
}

impl InteractionsBuilder {
    fn new() -> Self {
        Self {
            config: InteractionConfig::default(),
            clock: None,
            scheduler: None,
            form: None,
            initial_scroll_y: 0.0,
            scroll_listener: None,
        }
    }

    /// Replace every tunable at once, e.g. with a deserialized config.
    pub fn with_config(mut self, config: InteractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Minimum spacing between handled scroll events.
    pub fn with_scroll_throttle(mut self, window: Duration) -> Self {
        self.config.scroll_throttle_ms = window.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// How long notices stay visible.
    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.config.notice_ttl_ms = ttl.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Scroll offsets past which the navbar is elevated, and may hide.
    pub fn with_navbar_thresholds(mut self, elevate_after: f64, hide_after: f64) -> Self {
        self.config.navbar_elevate_after = elevate_after;
        self.config.navbar_hide_after = hide_after;
        self
    }

    /// Visible fraction at which animated elements are revealed.
    pub fn with_reveal_threshold(mut self, threshold: f64) -> Self {
        self.config.reveal_threshold = threshold;
        self
    }

    /// Flicker grid tick and the inclusive range of lit cells per frame.
    pub fn with_grid(mut self, tick: Duration, min_active: usize, max_active: usize) -> Self {
        self.config.grid_tick_ms = tick.as_millis().try_into().unwrap_or(u64::MAX);
        self.config.grid_min_active = min_active;
        self.config.grid_max_active = max_active;
        self
    }

    /// Time source for the scroll throttle (useful for testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Deferred-execution primitive for notices (useful for testing).
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Use a custom form instead of [`ContactForm::standard`].
    pub fn with_form(mut self, form: ContactForm) -> Self {
        self.form = Some(form);
        self
    }

    /// Extra work to run on scroll, at most once per scroll throttle window.
    ///
    /// The navbar is updated on every scroll event regardless.
    pub fn with_scroll_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.scroll_listener = Some(Box::new(listener));
        self
    }

    /// Scroll position of the page when it loaded.
    pub fn with_initial_scroll(mut self, scroll_y: f64) -> Self {
        self.initial_scroll_y = scroll_y;
        self
    }

    /// Build the interactions.
    ///
    /// # Errors
    /// Returns `BuildError` if the configuration is invalid, or if no
    /// scheduler was supplied and the `async` feature is disabled.
    pub fn build(self) -> Result<Interactions, BuildError> {
        self.config.validate()?;

        let clock = match self.clock {
            Some(clock) => clock,
            None => default_clock(),
        };
        let scheduler = match self.scheduler {
            Some(scheduler) => scheduler,
            None => default_scheduler()?,
        };

        let navbar = Mutex::new(NavbarTracker::new(
            self.config.navbar_elevate_after,
            self.config.navbar_hide_after,
            self.initial_scroll_y,
        ));
        let listener = self.scroll_listener;
        let scroll = Throttler::new(
            move |scroll_y: f64| {
                if let Some(listener) = &listener {
                    listener(scroll_y);
                }
            },
            self.config.scroll_throttle(),
            clock,
        );

        let notices = NoticeBoard::new(scheduler, self.config.notice_ttl());

        info!(
            scroll_throttle_ms = self.config.scroll_throttle_ms,
            notice_ttl_ms = self.config.notice_ttl_ms,
            "interactions initialised"
        );

        Ok(Interactions {
            config: self.config,
            menu: MenuState::new(),
            form: self.form.unwrap_or_else(ContactForm::standard),
            notices,
            navbar,
            scroll,
        })
    }
}

#[cfg(feature = "async")]
fn default_clock() -> Arc<dyn Clock> {
    Arc::new(crate::infrastructure::clock::TokioClock::new())
}

#[cfg(not(feature = "async"))]
fn default_clock() -> Arc<dyn Clock> {
    Arc::new(crate::infrastructure::clock::SystemClock::new())
}

#[cfg(feature = "async")]
fn default_scheduler() -> Result<Arc<dyn Scheduler>, BuildError> {
    Ok(Arc::new(crate::infrastructure::scheduler::TokioScheduler::new()))
}

#[cfg(not(feature = "async"))]
fn default_scheduler() -> Result<Arc<dyn Scheduler>, BuildError> {
    Err(BuildError::MissingScheduler)
}

fn lock(navbar: &Mutex<NavbarTracker>) -> MutexGuard<'_, NavbarTracker> {
    navbar.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Everything the page needs, created once at start-up.
///
/// Event handlers on the page call into this value; it answers with what
/// the page should display.
pub struct Interactions {
    config: InteractionConfig,
    menu: MenuState,
    form: ContactForm,
    notices: NoticeBoard,
    navbar: Mutex<NavbarTracker>,
    scroll: Throttler<f64>,
}

impl Interactions {
    /// Create a builder with default settings.
    pub fn builder() -> InteractionsBuilder {
        InteractionsBuilder::new()
    }

    /// The effective configuration.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Mobile menu state.
    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    /// Mobile menu state, for feeding clicks.
    pub fn menu_mut(&mut self) -> &mut MenuState {
        &mut self.menu
    }

    /// Scroll offset for an in-page anchor, below the fixed navbar.
    pub fn anchor_target(&self, section_top: f64, navbar_height: f64) -> f64 {
        scroll_target(section_top, navbar_height)
    }

    /// Feed a scroll event.
    ///
    /// The navbar follows every position, so the last event of a burst
    /// always wins. The decision reports whether the throttled scroll
    /// listener ran for this event.
    pub fn on_scroll(&self, scroll_y: f64) -> CallDecision {
        lock(&self.navbar).on_scroll(scroll_y);
        self.scroll.call(scroll_y)
    }

    /// Current navbar appearance.
    pub fn navbar(&self) -> NavbarAppearance {
        lock(&self.navbar).appearance()
    }

    /// Counters of the throttled scroll listener.
    pub fn scroll_metrics(&self) -> &Metrics {
        self.scroll.metrics()
    }

    /// Contact form state.
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Contact form state, for feeding input events.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Submit the contact form.
    ///
    /// On success the form enters its sending state; posting the payload
    /// is up to the caller.
    pub fn submit_form(&mut self) -> Result<SubmitOutcome, FormError> {
        self.form.submit()
    }

    /// The caller finished posting the form: show the confirmation and
    /// reset the form. Returns the notice id.
    pub fn form_sent(&mut self) -> u64 {
        self.form.reset();
        self.notices.success()
    }

    /// Notices on screen.
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Fresh reveal state for one animated element.
    pub fn reveal(&self) -> RevealState {
        RevealState::new(self.config.reveal_threshold)
    }

    /// Frame picker for a grid of `cells` cells.
    pub fn grid(&self, cells: usize) -> FlickerGrid {
        FlickerGrid::new(cells, self.config.grid_min_active, self.config.grid_max_active)
    }

    /// Start animating a grid of `cells` cells on the configured tick.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns `BuildError::ZeroGridTick` if the configured tick is zero.
    #[cfg(feature = "async")]
    pub fn start_grid<F>(&self, cells: usize, on_frame: F) -> Result<GridHandle, BuildError>
    where
        F: FnMut(Vec<usize>) + Send + 'static,
    {
        let animator = GridAnimator::new(self.grid(cells), self.config.grid_tick())?;
        Ok(animator.start(on_frame))
    }
}
