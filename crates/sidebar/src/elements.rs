//! Element cache and the page contract it resolves.
//!
//! The ids and class names below are the contract between the controller and
//! the host page. They are centralized here so the controller and its tests
//! never spell them out inline.

use sidenav_page::{Document, ElementId, Selector};

use crate::error::SidebarError;

/// Element ids the controller looks up.
pub mod ids {
    pub const TOGGLE: &str = "sidebarToggle";
    pub const SIDEBAR: &str = "sidebar";
    pub const OVERLAY: &str = "sidebarOverlay";
    pub const MAIN_CONTENT: &str = "mainContent";
    pub const LOADING_SCREEN: &str = "loadingScreen";
}

/// Class names the controller reads or writes.
pub mod class {
    pub const NAV_LINK: &str = "nav-link";
    pub const SLIDE: &str = "slide";
    pub const ACTIVE: &str = "active";
    pub const ACTIVE_SLIDE: &str = "active-slide";
    pub const SIDEBAR_ACTIVE: &str = "sidebar-active";
    pub const SIDEBAR_OPEN: &str = "sidebar-open";
    pub const NO_SCROLL: &str = "no-scroll";
    pub const WAS_MOBILE: &str = "was-mobile";
    pub const HIDDEN: &str = "hidden";
}

/// Attribute names the controller reads or writes.
pub mod attr {
    pub const ARIA_EXPANDED: &str = "aria-expanded";
    pub const ARIA_HIDDEN: &str = "aria-hidden";
    pub const ARIA_CURRENT: &str = "aria-current";
    pub const TABINDEX: &str = "tabindex";
    pub const HREF: &str = "href";
    pub const DATA_PAGE: &str = "data-page";
    pub const DATA_SLIDE: &str = "data-slide";
}

/// References resolved once at initialization. Links and slides are static
/// snapshots; elements added later are not picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarElements {
    pub toggle: ElementId,
    pub sidebar: ElementId,
    pub overlay: ElementId,
    pub main_content: ElementId,
    pub body: ElementId,
    pub loading_screen: Option<ElementId>,
    pub nav_links: Vec<ElementId>,
    pub slides: Vec<ElementId>,
}

impl SidebarElements {
    /// Resolves every element, failing on the first required one that is
    /// missing. Errors use the logical name (`toggle`, `mainContent`, ...).
    pub fn resolve(document: &Document) -> Result<Self, SidebarError> {
        let required = |logical: &'static str, id: &str| document.get_element_by_id(id).ok_or(SidebarError::MissingElement(logical));

        Ok(Self {
            toggle: required("toggle", ids::TOGGLE)?,
            sidebar: required("sidebar", ids::SIDEBAR)?,
            overlay: required("overlay", ids::OVERLAY)?,
            main_content: required("mainContent", ids::MAIN_CONTENT)?,
            body: document.body(),
            loading_screen: document.get_element_by_id(ids::LOADING_SCREEN),
            nav_links: document.query_selector_all(&Selector::Class(class::NAV_LINK.to_string())),
            slides: document.query_selector_all(&Selector::Class(class::SLIDE.to_string())),
        })
    }
}
