//! Horizontal swipe recognition.

use tokio::time::Instant;

use crate::config::SidebarConfig;

/// What a recognized swipe asks the sidebar to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Open,
    Close,
}

/// A completed, quick-enough touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub start_x: f64,
    /// Signed travel; positive is rightward.
    pub distance: f64,
}

impl Swipe {
    /// Rightward swipes from the left edge open a closed sidebar; leftward
    /// swipes close an open one. Short swipes do nothing.
    pub fn action(&self, is_open: bool, config: &SidebarConfig) -> Option<SwipeAction> {
        if self.distance.abs() < config.swipe_threshold {
            return None;
        }
        if self.distance > 0.0 && !is_open && self.start_x < config.swipe_edge {
            return Some(SwipeAction::Open);
        }
        if self.distance < 0.0 && is_open {
            return Some(SwipeAction::Close);
        }
        None
    }
}

/// Tracks the start of the current touch.
#[derive(Debug, Default, Clone)]
pub struct SwipeTracker {
    start: Option<(f64, Instant)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, screen_x: f64, at: Instant) {
        self.start = Some((screen_x, at));
    }

    /// Completes the touch. Returns `None` without a matching start or when
    /// the touch lasted `max_duration` or longer.
    pub fn finish(&mut self, screen_x: f64, at: Instant, config: &SidebarConfig) -> Option<Swipe> {
        let (start_x, started_at) = self.start.take()?;
        if at.saturating_duration_since(started_at) >= config.swipe_max_duration() {
            return None;
        }
        Some(Swipe {
            start_x,
            distance: screen_x - start_x,
        })
    }
}
