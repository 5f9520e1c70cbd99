use serde::Serialize;

use crate::config::Breakpoints;

/// Width class of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportTier {
    Mobile,
    Tablet,
    Desktop,
}

impl ViewportTier {
    /// `width <= mobile` is mobile, `mobile < width <= tablet` is tablet,
    /// anything wider is desktop.
    pub fn classify(width: u32, breakpoints: &Breakpoints) -> Self {
        if width <= breakpoints.mobile {
            ViewportTier::Mobile
        } else if width <= breakpoints.tablet {
            ViewportTier::Tablet
        } else {
            ViewportTier::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == ViewportTier::Mobile
    }

    pub fn is_tablet(self) -> bool {
        self == ViewportTier::Tablet
    }

    pub fn presentation(self) -> Presentation {
        if self.is_mobile() { Presentation::Overlay } else { Presentation::PushContent }
    }
}

/// How an open sidebar is laid out relative to the main content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Floats above the content behind a scroll-blocking overlay.
    Overlay,
    /// Shifts the main content aside.
    PushContent,
}
