//! Tunables for the page interactions.
//!
//! The configuration is plain data so it can be embedded in a larger
//! settings file; every field has a default and missing keys fall back to
//! it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Error returned when building [`Interactions`](super::interactions::Interactions) fails.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// The grid animation tick must be greater than zero
    ZeroGridTick,
    /// Notices must stay visible for some time
    ZeroNoticeTtl,
    /// At least one grid cell must light per frame
    ZeroMinActive,
    /// Minimum active cells exceeds the maximum
    ActiveRange {
        /// Configured minimum
        min: usize,
        /// Configured maximum
        max: usize,
    },
    /// Reveal threshold must lie in (0, 1]
    RevealThreshold(f64),
    /// The navbar cannot hide before it is elevated
    NavbarThresholds {
        /// Offset past which the bar is elevated
        elevate_after: f64,
        /// Offset past which the bar may hide
        hide_after: f64,
    },
    /// No scheduler was given and no default is available without `async`
    MissingScheduler,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::ZeroGridTick => write!(f, "grid tick must be greater than 0"),
            BuildError::ZeroNoticeTtl => write!(f, "notice ttl must be greater than 0"),
            BuildError::ZeroMinActive => write!(f, "grid_min_active must be greater than 0"),
            BuildError::ActiveRange { min, max } => write!(
                f,
                "grid_min_active ({}) must not exceed grid_max_active ({})",
                min, max
            ),
            BuildError::RevealThreshold(t) => {
                write!(f, "reveal threshold must be in (0, 1], got {}", t)
            }
            BuildError::NavbarThresholds {
                elevate_after,
                hide_after,
            } => write!(
                f,
                "navbar hide threshold ({}) must not be below the elevate threshold ({})",
                hide_after, elevate_after
            ),
            BuildError::MissingScheduler => {
                write!(f, "a scheduler is required when the async feature is disabled")
            }
        }
    }
}

impl std::error::Error for BuildError {}

#[cfg(feature = "async")]
impl From<crate::application::grid::GridConfigError> for BuildError {
    fn from(err: crate::application::grid::GridConfigError) -> Self {
        match err {
            crate::application::grid::GridConfigError::ZeroTick => BuildError::ZeroGridTick,
        }
    }
}

/// All interaction tunables. Durations are in milliseconds.
///
/// # Example
/// ```
/// use form_throttle::InteractionConfig;
///
/// let config: InteractionConfig =
///     serde_json::from_str(r#"{ "scroll_throttle_ms": 50 }"#).unwrap();
/// assert_eq!(config.scroll_throttle_ms, 50);
/// assert_eq!(config.grid_tick_ms, 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Minimum spacing between handled scroll events
    pub scroll_throttle_ms: u64,
    /// How long a notice stays visible
    pub notice_ttl_ms: u64,
    /// Scroll offset past which the navbar is elevated
    pub navbar_elevate_after: f64,
    /// Scroll offset past which scrolling down hides the navbar
    pub navbar_hide_after: f64,
    /// Visible fraction at which an element is revealed
    pub reveal_threshold: f64,
    /// Flicker grid frame interval
    pub grid_tick_ms: u64,
    /// Fewest cells lit per frame
    pub grid_min_active: usize,
    /// Most cells lit per frame
    pub grid_max_active: usize,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: 100,
            notice_ttl_ms: 5000,
            navbar_elevate_after: 100.0,
            navbar_hide_after: 200.0,
            reveal_threshold: 0.1,
            grid_tick_ms: 2000,
            grid_min_active: 2,
            grid_max_active: 4,
        }
    }
}

impl InteractionConfig {
    /// Check the configuration for values that cannot work.
    ///
    /// # Errors
    /// Returns the first `BuildError` found.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.grid_tick_ms == 0 {
            return Err(BuildError::ZeroGridTick);
        }
        if self.notice_ttl_ms == 0 {
            return Err(BuildError::ZeroNoticeTtl);
        }
        if self.grid_min_active == 0 {
            return Err(BuildError::ZeroMinActive);
        }
        if self.grid_min_active > self.grid_max_active {
            return Err(BuildError::ActiveRange {
                min: self.grid_min_active,
                max: self.grid_max_active,
            });
        }
        if !(self.reveal_threshold > 0.0 && self.reveal_threshold <= 1.0) {
            return Err(BuildError::RevealThreshold(self.reveal_threshold));
        }
        if self.navbar_hide_after < self.navbar_elevate_after {
            return Err(BuildError::NavbarThresholds {
                elevate_after: self.navbar_elevate_after,
                hide_after: self.navbar_hide_after,
            });
        }
        Ok(())
    }

    /// Scroll throttle window.
    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }

    /// Notice time-to-live.
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    /// Flicker grid tick.
    pub fn grid_tick(&self) -> Duration {
        Duration::from_millis(self.grid_tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = InteractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scroll_throttle(), Duration::from_millis(100));
        assert_eq!(config.notice_ttl(), Duration::from_secs(5));
        assert_eq!(config.grid_tick(), Duration::from_secs(2));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: InteractionConfig =
            serde_json::from_str(r#"{ "navbar_hide_after": 300.0 }"#).unwrap();
        assert_eq!(config.navbar_hide_after, 300.0);
        assert_eq!(config.navbar_elevate_after, 100.0);
        assert_eq!(config.grid_max_active, 4);
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = InteractionConfig {
            grid_tick_ms: 750,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: InteractionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            (
                InteractionConfig {
                    grid_tick_ms: 0,
                    ..Default::default()
                },
                BuildError::ZeroGridTick,
            ),
            (
                InteractionConfig {
                    notice_ttl_ms: 0,
                    ..Default::default()
                },
                BuildError::ZeroNoticeTtl,
            ),
            (
                InteractionConfig {
                    grid_min_active: 0,
                    ..Default::default()
                },
                BuildError::ZeroMinActive,
            ),
            (
                InteractionConfig {
                    grid_min_active: 5,
                    grid_max_active: 3,
                    ..Default::default()
                },
                BuildError::ActiveRange { min: 5, max: 3 },
            ),
            (
                InteractionConfig {
                    reveal_threshold: 0.0,
                    ..Default::default()
                },
                BuildError::RevealThreshold(0.0),
            ),
            (
                InteractionConfig {
                    navbar_elevate_after: 300.0,
                    ..Default::default()
                },
                BuildError::NavbarThresholds {
                    elevate_after: 300.0,
                    hide_after: 200.0,
                },
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_nan_threshold_is_rejected() {
        let config = InteractionConfig {
            reveal_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BuildError::RevealThreshold(_))
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            BuildError::ActiveRange { min: 5, max: 3 }.to_string(),
            "grid_min_active (5) must not exceed grid_max_active (3)"
        );
    }
}
