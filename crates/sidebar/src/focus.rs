//! Keyboard accessibility: tab indices, the active link, and the focus trap.

use sidenav_page::{Document, ElementId};

use crate::elements::{attr, class};

/// First and last focusable elements of an open panel. Tab from `last`
/// wraps to `first`; Shift+Tab from `first` wraps to `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTrap {
    first: ElementId,
    last: ElementId,
}

impl FocusTrap {
    /// Captures the boundaries inside `container`, or `None` if nothing in
    /// it can take focus.
    pub fn capture(document: &Document, container: ElementId) -> Option<Self> {
        let focusable = document.focusable_within(container);
        Some(Self {
            first: *focusable.first()?,
            last: *focusable.last()?,
        })
    }

    pub fn first(&self) -> ElementId {
        self.first
    }

    pub fn last(&self) -> ElementId {
        self.last
    }

    /// Where focus must go instead of the browser default, if the active
    /// element sits on a boundary.
    pub fn wrap_target(&self, active: Option<ElementId>, backwards: bool) -> Option<ElementId> {
        match (active, backwards) {
            (Some(active), true) if active == self.first => Some(self.last),
            (Some(active), false) if active == self.last => Some(self.first),
            _ => None,
        }
    }
}

/// While open only the first link is reachable with Tab; while closed none are.
pub fn update_tab_indices(document: &mut Document, links: &[ElementId], is_open: bool) {
    for (index, link) in links.iter().enumerate() {
        let value = if is_open && index == 0 { "0" } else { "-1" };
        document.set_attribute(*link, attr::TABINDEX, value);
    }
}

/// Makes `active` the single current link.
pub fn mark_active_link(document: &mut Document, links: &[ElementId], active: ElementId) {
    for link in links {
        document.remove_class(*link, class::ACTIVE);
        document.set_attribute(*link, attr::ARIA_CURRENT, "false");
        document.set_attribute(*link, attr::TABINDEX, "-1");
    }
    document.add_class(active, class::ACTIVE);
    document.set_attribute(active, attr::ARIA_CURRENT, "page");
    document.set_attribute(active, attr::TABINDEX, "0");
}
