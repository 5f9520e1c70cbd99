//! Scripted replay of page events.
//!
//! A script is a JSON or YAML list of steps:
//!
//! ```yaml
//! - click: "#sidebarToggle"
//! - wait_ms: 300
//! - key: { key: Tab, shift: true }
//! - touch: { from: 10, to: 150 }
//! - resize: { width: 375, height: 812 }
//! - focus: "[data-page=about]"
//! - snapshot
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use sidenav_page::{ElementId, Key, PageEvent, Selector, Viewport, load_fixture};
use sidenav_sidebar::runtime::settle;
use sidenav_sidebar::{PageSession, SidebarSnapshot};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Clicks the first element matching a selector.
    Click(String),
    /// Focuses the first element matching a selector.
    Focus(String),
    /// Key press on the focused element.
    Key(KeyPress),
    Touch(TouchGesture),
    Resize(Viewport),
    /// Lets time pass, running timers as they fall due.
    WaitMs(u64),
    Snapshot,
    Load,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyPress {
    pub key: Key,
    #[serde(default)]
    pub shift: bool,
}

/// A single-finger horizontal touch from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TouchGesture {
    pub from: f64,
    pub to: f64,
    #[serde(default = "default_touch_ms")]
    pub duration_ms: u64,
}

fn default_touch_ms() -> u64 {
    100
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    load_fixture(path).with_context(|| format!("failed to load script {}", path.display()))
}

fn find(session: &PageSession, selector: &str) -> Result<ElementId> {
    let parsed = Selector::parse(selector).ok_or_else(|| anyhow!("invalid selector '{selector}'"))?;
    session
        .document()
        .query_selector(&parsed)
        .ok_or_else(|| anyhow!("no element matches '{selector}'"))
}

/// Fires `DomContentLoaded`, runs `steps` and returns the state captured at
/// every `snapshot` step. The state is `None` when the sidebar failed to
/// initialize.
pub async fn replay(session: &mut PageSession, steps: &[Step]) -> Result<Vec<Option<SidebarSnapshot>>> {
    session.dispatch(PageEvent::DomContentLoaded);
    let mut snapshots = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        debug!(index, ?step, "replay step");
        match step {
            Step::Click(selector) => {
                let target = find(session, selector)?;
                session.click(target);
            }
            Step::Focus(selector) => {
                let target = find(session, selector)?;
                session.focus(target);
            }
            Step::Key(press) => {
                session.key_down(press.key.clone(), press.shift);
            }
            Step::Touch(gesture) => {
                session.dispatch(PageEvent::TouchStart { screen_x: gesture.from });
                settle(session, Duration::from_millis(gesture.duration_ms)).await;
                session.dispatch(PageEvent::TouchEnd { screen_x: gesture.to });
            }
            Step::Resize(viewport) => {
                session.resize(viewport.width, viewport.height);
            }
            Step::WaitMs(millis) => {
                settle(session, Duration::from_millis(*millis)).await;
            }
            Step::Snapshot => snapshots.push(session.state()),
            Step::Load => {
                session.dispatch(PageEvent::Load);
            }
        }
    }
    Ok(snapshots)
}
