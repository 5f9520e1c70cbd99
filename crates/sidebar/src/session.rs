//! Page session: the document plus the sidebar living on it.
//!
//! The session plays the part of the browser. It owns the [`Document`],
//! constructs the controller when the DOM is ready, routes events to it and
//! then applies whatever default action the controller did not cancel.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sidenav_page::{Document, ElementId, EventOutcome, Key, PageEvent, PageFixture, Viewport, load_fixture};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::config::SidebarConfig;
use crate::controller::SidebarController;
use crate::elements::attr;
use crate::error::SidebarError;
use crate::state::SidebarSnapshot;

/// A page fixture with an optional `sidebar` configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFixture {
    #[serde(flatten)]
    pub page: PageFixture,
    #[serde(default)]
    pub sidebar: SidebarConfig,
}

#[derive(Debug)]
pub struct PageSession {
    document: Document,
    config: SidebarConfig,
    sidebar: Option<SidebarController>,
    started_at: Instant,
}

impl PageSession {
    /// Wraps a document. No controller exists until `DomContentLoaded` is
    /// dispatched.
    pub fn new(document: Document, config: SidebarConfig) -> Self {
        Self {
            document,
            config,
            sidebar: None,
            started_at: Instant::now(),
        }
    }

    pub fn from_fixture(fixture: &SessionFixture) -> Result<Self, SidebarError> {
        let document = fixture.page.build()?;
        Ok(Self::new(document, fixture.sidebar.clone()))
    }

    /// Loads a JSON or YAML session fixture from disk.
    pub fn load(path: &Path) -> Result<Self, SidebarError> {
        let fixture: SessionFixture = load_fixture(path)?;
        Self::from_fixture(&fixture)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn sidebar(&self) -> Option<&SidebarController> {
        self.sidebar.as_ref()
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    /// Runs `action` against the controller and the document, if a
    /// controller exists.
    pub fn with_sidebar<R>(&mut self, action: impl FnOnce(&mut SidebarController, &mut Document) -> R) -> Option<R> {
        let sidebar = self.sidebar.as_mut()?;
        Some(action(sidebar, &mut self.document))
    }

    pub fn state(&self) -> Option<SidebarSnapshot> {
        self.sidebar.as_ref().map(|sidebar| sidebar.state(&self.document))
    }

    /// Dispatches `event`, then its default action and any events the
    /// handlers raised. Returns the outcome of `event` itself.
    pub fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        debug!(?event, "dispatch");
        match &event {
            PageEvent::DomContentLoaded => self.start_sidebar(),
            PageEvent::Load => {
                info!("Page loaded in {}ms", self.started_at.elapsed().as_millis());
            }
            PageEvent::Resize { width, height } => self.document.set_viewport(Viewport::new(*width, *height)),
            PageEvent::FocusIn { target } => {
                self.document.focus(*target);
            }
            _ => {}
        }

        let outcome = match self.sidebar.as_mut() {
            Some(sidebar) => sidebar.handle_event(&mut self.document, &event),
            None => EventOutcome::default(),
        };

        if !outcome.default_prevented {
            self.default_action(&event);
        }
        for follow_up in outcome.synthetic.iter().cloned() {
            self.dispatch(follow_up);
        }
        outcome
    }

    /// Key press on whatever element currently has focus.
    pub fn key_down(&mut self, key: Key, shift: bool) -> EventOutcome {
        let target = self.document.active_element();
        self.dispatch(PageEvent::KeyDown { target, key, shift })
    }

    pub fn click(&mut self, target: ElementId) -> EventOutcome {
        self.dispatch(PageEvent::Click { target })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> EventOutcome {
        self.dispatch(PageEvent::Resize { width, height })
    }

    /// Moves focus to `target` and fires focus-in on it.
    pub fn focus(&mut self, target: ElementId) -> EventOutcome {
        self.dispatch(PageEvent::FocusIn { target })
    }

    /// Runs deferred controller work that has fallen due.
    pub fn run_due_timers(&mut self) -> usize {
        match self.sidebar.as_mut() {
            Some(sidebar) => sidebar.run_due_timers(&mut self.document),
            None => 0,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.sidebar.as_ref().and_then(SidebarController::next_deadline)
    }

    /// Destroys the controller and drops it.
    pub fn teardown(&mut self) {
        if let Some(mut sidebar) = self.sidebar.take() {
            sidebar.destroy(&mut self.document);
        }
    }

    fn start_sidebar(&mut self) {
        if self.sidebar.is_some() {
            return;
        }
        match SidebarController::new(&mut self.document, self.config.clone()) {
            Ok(sidebar) => self.sidebar = Some(sidebar),
            Err(err) => error!(error = %err, "Failed to initialize sidebar"),
        }
    }

    fn default_action(&mut self, event: &PageEvent) {
        match event {
            PageEvent::KeyDown { key: Key::Tab, shift, .. } => {
                if let Some(next) = self.document.next_tab_stop(*shift) {
                    self.dispatch(PageEvent::FocusIn { target: next });
                }
            }
            PageEvent::KeyDown {
                target: Some(target),
                key: key @ (Key::Enter | Key::Space),
                ..
            } => {
                if self.activates_on(*target, key) {
                    self.dispatch(PageEvent::Click { target: *target });
                }
            }
            PageEvent::Click { target } => self.follow_link(*target),
            _ => {}
        }
    }

    /// Enter activates links and buttons; Space activates buttons only.
    fn activates_on(&self, target: ElementId, key: &Key) -> bool {
        let Some(element) = self.document.element(target) else {
            return false;
        };
        match (element.tag(), key) {
            ("button", _) => true,
            ("a", Key::Enter) => element.attribute(attr::HREF).is_some(),
            _ => false,
        }
    }

    fn follow_link(&mut self, target: ElementId) {
        let href = self
            .document
            .ancestors(target)
            .into_iter()
            .find_map(|id| self.document.attribute(id, attr::HREF))
            .map(str::to_owned);
        let Some(href) = href else {
            return;
        };
        if let Err(err) = self.document.navigate(&href) {
            warn!(error = %err, %href, "link navigation failed");
        }
    }
}
