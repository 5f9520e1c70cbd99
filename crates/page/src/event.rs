use serde::{Deserialize, Serialize};

use crate::{ElementId, EventKind};

/// Keys the page distinguishes. Anything else arrives as `Character` or
/// `Other` and is ignored by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Tab,
    Enter,
    Space,
    Character(char),
    Other(String),
}

/// An input or lifecycle event delivered to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    DomContentLoaded,
    Load,
    Click { target: ElementId },
    /// `target` is the focused element; `None` means the body.
    KeyDown { target: Option<ElementId>, key: Key, shift: bool },
    TouchStart { screen_x: f64 },
    TouchEnd { screen_x: f64 },
    Resize { width: u32, height: u32 },
    FocusIn { target: ElementId },
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::DomContentLoaded => EventKind::DomContentLoaded,
            PageEvent::Load => EventKind::Load,
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::KeyDown { .. } => EventKind::KeyDown,
            PageEvent::TouchStart { .. } => EventKind::TouchStart,
            PageEvent::TouchEnd { .. } => EventKind::TouchEnd,
            PageEvent::Resize { .. } => EventKind::Resize,
            PageEvent::FocusIn { .. } => EventKind::FocusIn,
        }
    }

    /// The element the event originates from, if it has one.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            PageEvent::Click { target } | PageEvent::FocusIn { target } => Some(*target),
            PageEvent::KeyDown { target, .. } => *target,
            _ => None,
        }
    }
}

/// Result of dispatching an event to a component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOutcome {
    /// Set when a handler cancelled the host's default action.
    pub default_prevented: bool,
    /// Events the handlers asked the host to dispatch next, such as a
    /// synthetic click raised by keyboard activation.
    pub synthetic: Vec<PageEvent>,
}

impl EventOutcome {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn dispatch_after(&mut self, event: PageEvent) {
        self.synthetic.push(event);
    }
}
