//! # Sidenav sidebar
//!
//! Controller for a collapsible navigation sidebar living on a
//! [`sidenav_page::Document`]: open/close state with an animation window,
//! in-page slide navigation, a keyboard focus trap, edge swipes, and
//! debounced responsive switching between overlay and push-content layouts.
//!
//! Most hosts go through [`PageSession`], which constructs the controller on
//! `DomContentLoaded` and emulates the browser's default actions.

mod config;
mod controller;
mod elements;
mod error;
mod focus;
mod gesture;
pub mod runtime;
mod scheduler;
mod session;
mod state;
mod viewport;

pub use config::{Breakpoints, ConfigError, SidebarConfig};
pub use controller::SidebarController;
pub use elements::{SidebarElements, attr, class, ids};
pub use error::SidebarError;
pub use focus::FocusTrap;
pub use gesture::{Swipe, SwipeAction, SwipeTracker};
pub use scheduler::{Scheduler, TimerId};
pub use session::{PageSession, SessionFixture};
pub use state::{ControllerState, DEFAULT_SLIDE, SidebarSnapshot, ViewportSnapshot};
pub use viewport::{Presentation, ViewportTier};
