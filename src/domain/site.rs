//! Decision models behind the page's navigation and decoration effects.
//!
//! Each model answers "what should the page look like now" from the
//! events it is fed; applying the answer to elements is left to the caller.

use rand::seq::index;
use rand::Rng;

/// Open/closed state of the mobile navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    /// A closed menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the menu (and hamburger) should carry the active class.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger clicked.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// A navigation link inside the menu was clicked.
    pub fn link_clicked(&mut self) {
        self.open = false;
    }

    /// A click landed somewhere on the page.
    ///
    /// Closes the menu unless the click was inside the hamburger or the
    /// menu itself. Returns whether the state changed.
    pub fn document_clicked(&mut self, in_hamburger: bool, in_menu: bool) -> bool {
        if self.open && !in_hamburger && !in_menu {
            self.open = false;
            true
        } else {
            false
        }
    }
}

/// Scroll offset that brings a section's top just below a fixed navbar.
pub fn scroll_target(section_top: f64, navbar_height: f64) -> f64 {
    (section_top - navbar_height).max(0.0)
}

/// How the fixed navbar should be drawn at a scroll position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavbarAppearance {
    /// Denser background and drop shadow
    pub elevated: bool,
    /// Slid out of view above the viewport
    pub hidden: bool,
}

/// Tracks scroll direction to drive the navbar appearance.
#[derive(Debug, Clone)]
pub struct NavbarTracker {
    elevate_after: f64,
    hide_after: f64,
    last_scroll_y: f64,
    appearance: NavbarAppearance,
}

impl NavbarTracker {
    /// Create a tracker starting at `initial_scroll_y`.
    ///
    /// # Arguments
    /// * `elevate_after` - Scroll offset past which the bar is elevated
    /// * `hide_after` - Scroll offset past which scrolling down hides the bar
    pub fn new(elevate_after: f64, hide_after: f64, initial_scroll_y: f64) -> Self {
        Self {
            elevate_after,
            hide_after,
            last_scroll_y: initial_scroll_y,
            appearance: NavbarAppearance::default(),
        }
    }

    /// Feed a scroll position and get the resulting appearance.
    pub fn on_scroll(&mut self, scroll_y: f64) -> NavbarAppearance {
        let scrolling_down = scroll_y > self.last_scroll_y;
        self.appearance = NavbarAppearance {
            elevated: scroll_y > self.elevate_after,
            hidden: scrolling_down && scroll_y > self.hide_after,
        };
        self.last_scroll_y = scroll_y;
        self.appearance
    }

    /// Appearance after the most recent scroll position.
    pub fn appearance(&self) -> NavbarAppearance {
        self.appearance
    }

    /// Most recent scroll position.
    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y
    }
}

/// One-way "fade in when visible" state of an animated element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealState {
    threshold: f64,
    revealed: bool,
}

impl RevealState {
    /// Hidden element that reveals once `threshold` of it is visible.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            revealed: false,
        }
    }

    /// Report the element's current visible ratio (0.0 to 1.0).
    ///
    /// Returns `true` only on the call that reveals the element.
    pub fn observe(&mut self, intersection_ratio: f64) -> bool {
        if !self.revealed && intersection_ratio > 0.0 && intersection_ratio >= self.threshold {
            self.revealed = true;
            return true;
        }
        false
    }

    /// Whether the element has been revealed.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

/// Picks which cells of the decorative grid light up on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickerGrid {
    cells: usize,
    min_active: usize,
    max_active: usize,
}

impl FlickerGrid {
    /// Grid of `cells` cells lighting between `min_active` and
    /// `max_active` of them (inclusive) per frame.
    pub fn new(cells: usize, min_active: usize, max_active: usize) -> Self {
        Self {
            cells,
            min_active: min_active.min(max_active),
            max_active,
        }
    }

    /// Number of cells in the grid.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Choose the active cells for the next frame.
    ///
    /// Indices are distinct and sorted. The count never exceeds the number
    /// of cells, so small grids light every cell instead of looping.
    pub fn next_frame<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        if self.cells == 0 {
            return Vec::new();
        }
        let wanted = rng.gen_range(self.min_active..=self.max_active);
        let count = wanted.min(self.cells);
        let mut active = index::sample(rng, self.cells, count).into_vec();
        active.sort_unstable();
        active
    }
}
