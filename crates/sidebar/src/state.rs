use serde::Serialize;

/// Slide shown before any navigation happens.
pub const DEFAULT_SLIDE: &str = "home";

/// Mutable flags tracked by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerState {
    pub is_open: bool,
    /// True only inside the animation window of an animated transition.
    pub is_animating: bool,
    pub active_slide: String,
    pub initialized: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            is_open: false,
            is_animating: false,
            active_slide: DEFAULT_SLIDE.to_string(),
            initialized: false,
        }
    }
}

/// Read-only snapshot returned by `SidebarController::state`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarSnapshot {
    pub is_open: bool,
    pub is_animating: bool,
    pub active_slide: String,
    pub viewport: ViewportSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSnapshot {
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub width: u32,
    pub height: u32,
}
