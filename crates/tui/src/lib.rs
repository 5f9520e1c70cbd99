//! # Sidenav TUI
//!
//! Interactive terminal host for a [`PageSession`]. The page is drawn as a
//! header with the menu toggle, the sidebar panel and the active slide.
//! Terminal input becomes page events:
//!
//! - keys go to the focused element (`Tab`/`BackTab`, `Enter`, `Space`, `Esc`)
//! - a left click is a tap: touch start, touch end, then a click on whatever
//!   was drawn under the pointer
//! - a horizontal mouse drag is a swipe
//! - terminal resizes become window resizes, scaled by [`TuiOptions`]
//!
//! `Ctrl+C` quits.

mod app;
mod input;
mod runtime;
mod theme;
mod view;

use anyhow::Result;
use sidenav_sidebar::PageSession;

pub use app::App;
pub use input::{TuiOptions, map_key};
pub use view::HitMap;

/// Runs the terminal front end until the user quits.
///
/// # Errors
///
/// Fails if the terminal cannot be put into raw mode or drawn to.
pub async fn run(session: PageSession, options: TuiOptions) -> Result<()> {
    runtime::run_app(session, options).await
}
