//! Sidebar configuration.
//!
//! Every field has a default, so a fixture may specify only what it wants to
//! change:
//!
//! ```yaml
//! sidebar:
//!   breakpoints: { mobile: 640 }
//!   animation_ms: 200
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Viewport widths (inclusive upper bounds) of the mobile and tablet tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub mobile: u32,
    pub tablet: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: 768,
            tablet: 1024,
        }
    }
}

/// Static tuning for the controller. Immutable once the controller exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    pub breakpoints: Breakpoints,
    /// Minimum horizontal travel, in pixels, for a touch to count as a swipe.
    pub swipe_threshold: f64,
    /// Opening swipes must start strictly closer than this to the left edge.
    pub swipe_edge: f64,
    /// Touches lasting this long or longer are drags, not swipes.
    pub swipe_max_ms: u64,
    pub animation_ms: u64,
    /// Quiet period before a burst of resize events is handled.
    pub debounce_ms: u64,
    /// Delay before a mobile navigation click closes the sidebar.
    pub nav_close_delay_ms: u64,
    /// Delay before the first focusable element is focused after opening.
    pub focus_delay_ms: u64,
    pub loading_hide_ms: u64,
    pub loading_fade_ms: u64,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            swipe_threshold: 100.0,
            swipe_edge: 50.0,
            swipe_max_ms: 300,
            animation_ms: 300,
            debounce_ms: 250,
            nav_close_delay_ms: 150,
            focus_delay_ms: 100,
            loading_hide_ms: 1000,
            loading_fade_ms: 500,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("mobile breakpoint ({mobile}px) must be below the tablet breakpoint ({tablet}px)")]
    Breakpoints { mobile: u32, tablet: u32 },
    #[error("swipe threshold must be a positive number of pixels, got {0}")]
    SwipeThreshold(f64),
    #[error("animation duration must be greater than zero")]
    AnimationDuration,
}

impl SidebarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Breakpoints { mobile, tablet } = self.breakpoints;
        if mobile >= tablet {
            return Err(ConfigError::Breakpoints { mobile, tablet });
        }
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold > 0.0) {
            return Err(ConfigError::SwipeThreshold(self.swipe_threshold));
        }
        if self.animation_ms == 0 {
            return Err(ConfigError::AnimationDuration);
        }
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn swipe_max_duration(&self) -> Duration {
        Duration::from_millis(self.swipe_max_ms)
    }

    pub fn nav_close_delay(&self) -> Duration {
        Duration::from_millis(self.nav_close_delay_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn loading_hide_delay(&self) -> Duration {
        Duration::from_millis(self.loading_hide_ms)
    }

    pub fn loading_fade_delay(&self) -> Duration {
        Duration::from_millis(self.loading_fade_ms)
    }
}
