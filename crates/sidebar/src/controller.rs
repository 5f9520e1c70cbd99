//! The sidebar controller.
//!
//! Owns the element cache, every listener binding, the open/close state
//! machine and the deferred effects that follow transitions. The controller
//! does not own the document: callers pass it in, which keeps the host free
//! to render or mutate the page between events.
//!
//! # Transitions
//!
//! ```text
//!            open()                     animation timer
//! Closed ───────────────▶ Animating ───────────────────▶ Open
//!   ▲                     (is_open)                        │
//!   │   animation timer                         close()    │
//!   └──────────────────── Animating ◀──────────────────────┘
//!     (restores focus)   (!is_open)
//! ```
//!
//! `toggle` and `open` are ignored while animating. `close` is not, so Escape
//! can interrupt an opening sidebar. `close_with(.., false)` skips the
//! animation window entirely.
//!
//! Every open or close cancels the animation, deferred-focus and
//! deferred-close timers left over from the previous transition, so a stale
//! timer can never move focus or flip flags after a newer transition.

use sidenav_page::{Document, ElementId, EventKind, EventOutcome, Key, ListenerId, ListenerTarget, PageEvent, Selector, Viewport};
use tokio::time::Instant;
use tracing::info;

use crate::config::SidebarConfig;
use crate::elements::{SidebarElements, attr, class};
use crate::error::SidebarError;
use crate::focus::{self, FocusTrap};
use crate::gesture::{SwipeAction, SwipeTracker};
use crate::scheduler::{Scheduler, TimerId};
use crate::state::{ControllerState, SidebarSnapshot, ViewportSnapshot};
use crate::viewport::{Presentation, ViewportTier};

/// Which controller routine a listener invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    ToggleClick,
    OverlayClick,
    NavClick(ElementId),
    NavKeyDown(ElementId),
    DocumentKeyDown,
    TouchStart,
    TouchEnd,
    WindowResize,
    SidebarFocusIn,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    listener: ListenerId,
    target: ListenerTarget,
    kind: EventKind,
    handler: Handler,
}

/// Work scheduled to run after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    AnimationSettled { restore_focus: bool },
    FocusFirst(ElementId),
    CloseAfterNavigation,
    ResizeSettled,
    LoadingFade,
    LoadingRemove,
}

/// Handles of the timers the controller may need to cancel.
#[derive(Debug, Default)]
struct PendingTimers {
    animation: Option<TimerId>,
    focus: Option<TimerId>,
    nav_close: Option<TimerId>,
    resize: Option<TimerId>,
    loading: Option<TimerId>,
}

impl PendingTimers {
    fn forget(&mut self, id: TimerId) {
        for slot in [&mut self.animation, &mut self.focus, &mut self.nav_close, &mut self.resize, &mut self.loading] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }
}

/// Drives one sidebar on a [`Document`]: binds its listeners, owns the
/// open/closed state and the timers of its transitions, and mirrors that
/// state into classes, ARIA attributes and focus.
///
/// The controller holds element ids only. Every call takes the document it
/// was built on.
#[derive(Debug)]
pub struct SidebarController {
    config: SidebarConfig,
    elements: SidebarElements,
    state: ControllerState,
    bindings: Vec<Binding>,
    scheduler: Scheduler<Deferred>,
    timers: PendingTimers,
    swipe: SwipeTracker,
    focus_trap: Option<FocusTrap>,
    /// Mobile classification as of the last settled resize.
    was_mobile: bool,
    /// Log lines are only emitted for pages served from a loopback host.
    diagnostics: bool,
}

impl SidebarController {
    /// Validates the configuration, resolves the page elements and
    /// initializes the controller against `document`.
    ///
    /// # Errors
    ///
    /// Fails with [`SidebarError::MissingElement`] naming the first required
    /// element that is absent, or [`SidebarError::Config`] for an invalid
    /// configuration. Nothing is bound to the document on failure.
    pub fn new(document: &mut Document, config: SidebarConfig) -> Result<Self, SidebarError> {
        config.validate()?;
        let elements = SidebarElements::resolve(document)?;
        let mut controller = Self {
            config,
            elements,
            state: ControllerState::default(),
            bindings: Vec::new(),
            scheduler: Scheduler::new(),
            timers: PendingTimers::default(),
            swipe: SwipeTracker::default(),
            focus_trap: None,
            was_mobile: false,
            diagnostics: false,
        };
        controller.start(document);
        Ok(controller)
    }

    /// Re-initializes after [`destroy`](Self::destroy). A no-op while
    /// initialized.
    pub fn init(&mut self, document: &mut Document) -> Result<(), SidebarError> {
        if self.state.initialized {
            return Ok(());
        }
        self.elements = SidebarElements::resolve(document)?;
        self.start(document);
        Ok(())
    }

    fn start(&mut self, document: &mut Document) {
        self.diagnostics = document.location().is_loopback();
        self.bind_events(document);
        self.setup_accessibility(document);
        self.handle_initial_state(document);
        self.hide_loading_screen();
        self.state.initialized = true;
        self.log_info("Sidebar component initialized successfully");
    }

    /// Releases every listener and pending timer registered by this
    /// controller. Element classes and attributes are left as they are.
    pub fn destroy(&mut self, document: &mut Document) {
        for binding in self.bindings.drain(..) {
            document.remove_event_listener(binding.listener);
        }
        let cancelled = self.scheduler.clear();
        self.timers = PendingTimers::default();
        self.state.is_animating = false;
        self.focus_trap = None;
        self.swipe = SwipeTracker::default();
        self.state.initialized = false;
        self.log_info(format!("Sidebar component destroyed ({cancelled} pending timer(s) cancelled)"));
    }

    fn bind_events(&mut self, document: &mut Document) {
        let SidebarElements {
            toggle,
            sidebar,
            overlay,
            ref nav_links,
            ..
        } = self.elements;
        let mut plan = vec![
            (ListenerTarget::Element(toggle), EventKind::Click, false, Handler::ToggleClick),
            (ListenerTarget::Element(overlay), EventKind::Click, false, Handler::OverlayClick),
        ];
        for link in nav_links {
            plan.push((ListenerTarget::Element(*link), EventKind::Click, false, Handler::NavClick(*link)));
            plan.push((ListenerTarget::Element(*link), EventKind::KeyDown, false, Handler::NavKeyDown(*link)));
        }
        plan.extend([
            (ListenerTarget::Document, EventKind::KeyDown, false, Handler::DocumentKeyDown),
            (ListenerTarget::Document, EventKind::TouchStart, true, Handler::TouchStart),
            (ListenerTarget::Document, EventKind::TouchEnd, true, Handler::TouchEnd),
            (ListenerTarget::Window, EventKind::Resize, false, Handler::WindowResize),
            (ListenerTarget::Element(sidebar), EventKind::FocusIn, false, Handler::SidebarFocusIn),
        ]);

        for (target, kind, passive, handler) in plan {
            let listener = document.add_event_listener(target, kind, passive);
            self.bindings.push(Binding {
                listener,
                target,
                kind,
                handler,
            });
        }
    }

    fn setup_accessibility(&mut self, document: &mut Document) {
        document.set_attribute(self.elements.toggle, attr::ARIA_EXPANDED, "false");
        document.set_attribute(self.elements.sidebar, attr::ARIA_HIDDEN, "true");
        document.set_attribute(self.elements.overlay, attr::ARIA_HIDDEN, "true");
        focus::update_tab_indices(document, &self.elements.nav_links, self.state.is_open);
    }

    fn handle_initial_state(&mut self, document: &mut Document) {
        self.was_mobile = self.is_mobile(document);
        document.toggle_class(self.elements.body, class::WAS_MOBILE, self.was_mobile);
        if self.was_mobile {
            self.close_with(document, false);
        }
        self.update_active_nav_link(document);
    }

    fn hide_loading_screen(&mut self) {
        if self.elements.loading_screen.is_some() {
            self.timers.loading = Some(self.scheduler.schedule(self.config.loading_hide_delay(), Deferred::LoadingFade));
        }
    }

    /// Highlights the link whose `href` equals the current path or hash.
    fn update_active_nav_link(&mut self, document: &mut Document) {
        let path = document.location().pathname().to_string();
        let hash = document.location().hash();
        let matching: Vec<ElementId> = self
            .elements
            .nav_links
            .iter()
            .copied()
            .filter(|link| document.attribute(*link, attr::HREF).is_some_and(|href| !href.is_empty() && (href == path || href == hash)))
            .collect();
        for link in matching {
            focus::mark_active_link(document, &self.elements.nav_links, link);
        }
    }

    /// Routes `event` to every live binding along its propagation path.
    ///
    /// Synthetic events requested by handlers are returned in the outcome;
    /// the host dispatches them (see `PageSession`).
    pub fn handle_event(&mut self, document: &mut Document, event: &PageEvent) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        let kind = event.kind();
        for target in document.propagation_path(event) {
            let handlers: Vec<Handler> = self
                .bindings
                .iter()
                .filter(|binding| binding.target == target && binding.kind == kind && document.has_listener(binding.listener))
                .map(|binding| binding.handler)
                .collect();
            for handler in handlers {
                self.run_handler(document, handler, event, &mut outcome);
            }
        }
        outcome
    }

    fn run_handler(&mut self, document: &mut Document, handler: Handler, event: &PageEvent, outcome: &mut EventOutcome) {
        match (handler, event) {
            (Handler::ToggleClick, _) => {
                outcome.prevent_default();
                self.toggle(document);
            }
            (Handler::OverlayClick, _) => {
                if self.state.is_open {
                    self.close(document);
                }
            }
            (Handler::NavClick(link), _) => {
                if self.handle_nav_click(document, link).default_prevented {
                    outcome.prevent_default();
                }
            }
            (Handler::NavKeyDown(link), PageEvent::KeyDown { key: Key::Enter | Key::Space, .. }) => {
                outcome.prevent_default();
                outcome.dispatch_after(PageEvent::Click { target: link });
            }
            (Handler::DocumentKeyDown, PageEvent::KeyDown { key, shift, .. }) => self.handle_key_down(document, key, *shift, outcome),
            (Handler::TouchStart, PageEvent::TouchStart { screen_x }) => self.swipe.begin(*screen_x, Instant::now()),
            (Handler::TouchEnd, PageEvent::TouchEnd { screen_x }) => self.handle_touch_end(document, *screen_x),
            (Handler::WindowResize, PageEvent::Resize { .. }) => self.schedule_resize(),
            (Handler::SidebarFocusIn, _) => {
                if !self.state.is_open {
                    self.open(document);
                }
            }
            _ => {}
        }
    }

    /// Opens or closes depending on the current state. Ignored while
    /// animating.
    pub fn toggle(&mut self, document: &mut Document) {
        if self.state.is_animating {
            return;
        }
        if self.state.is_open {
            self.close(document);
        } else {
            self.open(document);
        }
    }

    /// Opens the sidebar with the presentation of the current viewport and
    /// starts the animation window. Ignored when already open or animating.
    pub fn open(&mut self, document: &mut Document) {
        if self.state.is_open || self.state.is_animating {
            return;
        }
        self.cancel_transition_timers();
        self.state.is_animating = true;
        self.state.is_open = true;

        let SidebarElements { toggle, sidebar, body, .. } = self.elements;
        document.add_class(sidebar, class::ACTIVE);
        document.add_class(body, class::SIDEBAR_ACTIVE);
        document.set_attribute(toggle, attr::ARIA_EXPANDED, "true");
        document.set_attribute(sidebar, attr::ARIA_HIDDEN, "false");
        let presentation = self.tier(document).presentation();
        self.apply_presentation(document, presentation);

        focus::update_tab_indices(document, &self.elements.nav_links, true);
        self.trap_focus(document);

        self.timers.animation = Some(
            self.scheduler
                .schedule(self.config.animation_duration(), Deferred::AnimationSettled { restore_focus: false }),
        );
        self.log_info("Sidebar opened");
    }

    /// Animated close; ignored when already closed.
    pub fn close(&mut self, document: &mut Document) {
        self.close_with(document, true);
    }

    /// Closes the sidebar. With `animate == false` the close is applied even
    /// if the sidebar is already closed, and no animation window or focus
    /// restoration follows.
    pub fn close_with(&mut self, document: &mut Document, animate: bool) {
        if !self.state.is_open && animate {
            return;
        }
        self.cancel_transition_timers();
        if animate {
            self.state.is_animating = true;
        }
        self.state.is_open = false;

        let SidebarElements {
            toggle,
            sidebar,
            overlay,
            main_content,
            body,
            ..
        } = self.elements;
        document.remove_class(sidebar, class::ACTIVE);
        document.remove_class(overlay, class::ACTIVE);
        document.remove_class(body, class::SIDEBAR_ACTIVE);
        document.remove_class(body, class::NO_SCROLL);
        document.remove_class(main_content, class::SIDEBAR_OPEN);
        document.set_attribute(toggle, attr::ARIA_EXPANDED, "false");
        document.set_attribute(sidebar, attr::ARIA_HIDDEN, "true");
        document.set_attribute(overlay, attr::ARIA_HIDDEN, "true");

        focus::update_tab_indices(document, &self.elements.nav_links, false);
        self.focus_trap = None;

        if animate {
            self.timers.animation = Some(
                self.scheduler
                    .schedule(self.config.animation_duration(), Deferred::AnimationSettled { restore_focus: true }),
            );
        }
        self.log_info("Sidebar closed");
    }

    /// Drops timers belonging to an earlier transition. Abandoning an
    /// animation window also ends it.
    fn cancel_transition_timers(&mut self) {
        if let Some(id) = self.timers.animation.take()
            && self.scheduler.cancel(id)
        {
            self.state.is_animating = false;
        }
        for id in [self.timers.focus.take(), self.timers.nav_close.take()].into_iter().flatten() {
            self.scheduler.cancel(id);
        }
    }

    fn apply_presentation(&self, document: &mut Document, presentation: Presentation) {
        let SidebarElements {
            overlay, main_content, body, ..
        } = self.elements;
        let overlay_mode = presentation == Presentation::Overlay;
        document.toggle_class(overlay, class::ACTIVE, overlay_mode);
        document.set_attribute(overlay, attr::ARIA_HIDDEN, if overlay_mode { "false" } else { "true" });
        document.toggle_class(body, class::NO_SCROLL, overlay_mode);
        document.toggle_class(main_content, class::SIDEBAR_OPEN, !overlay_mode);
    }

    /// Captures the sidebar's focus boundaries and focuses the first one
    /// after the configured delay.
    fn trap_focus(&mut self, document: &Document) {
        self.focus_trap = FocusTrap::capture(document, self.elements.sidebar);
        if let Some(trap) = self.focus_trap {
            self.timers.focus = Some(self.scheduler.schedule(self.config.focus_delay(), Deferred::FocusFirst(trap.first())));
        }
    }

    /// Marks `link` active and, for links carrying `data-page`, switches the
    /// visible slide instead of following the link. On mobile an open
    /// sidebar closes shortly afterwards.
    pub fn handle_nav_click(&mut self, document: &mut Document, link: ElementId) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        focus::mark_active_link(document, &self.elements.nav_links, link);

        let page = document
            .attribute(link, attr::DATA_PAGE)
            .filter(|page| !page.is_empty())
            .map(str::to_owned);
        if let Some(page) = page {
            outcome.prevent_default();
            self.navigate_to_slide(document, &page);
        }

        if self.is_mobile(document) && self.state.is_open {
            if let Some(previous) = self.timers.nav_close.take() {
                self.scheduler.cancel(previous);
            }
            self.timers.nav_close = Some(self.scheduler.schedule(self.config.nav_close_delay(), Deferred::CloseAfterNavigation));
        }
        outcome
    }

    /// Shows the element whose `data-slide` equals `slide_id`. Unknown ids
    /// leave the page untouched and return false.
    pub fn navigate_to_slide(&mut self, document: &mut Document, slide_id: &str) -> bool {
        let selector = Selector::Attribute {
            name: attr::DATA_SLIDE.to_string(),
            value: Some(slide_id.to_string()),
        };
        let Some(target) = document.query_selector(&selector) else {
            return false;
        };
        for slide in &self.elements.slides {
            document.remove_class(*slide, class::ACTIVE_SLIDE);
        }
        document.add_class(target, class::ACTIVE_SLIDE);
        document.scroll_into_view(target);
        self.state.active_slide = slide_id.to_string();
        true
    }

    fn handle_key_down(&mut self, document: &mut Document, key: &Key, shift: bool, outcome: &mut EventOutcome) {
        match key {
            Key::Escape if self.state.is_open => {
                outcome.prevent_default();
                self.close(document);
            }
            Key::Tab if self.state.is_open && self.is_mobile(document) => {
                let wrap = self
                    .focus_trap
                    .and_then(|trap| trap.wrap_target(document.active_element(), shift));
                if let Some(target) = wrap {
                    outcome.prevent_default();
                    document.focus(target);
                }
            }
            _ => {}
        }
    }

    fn handle_touch_end(&mut self, document: &mut Document, screen_x: f64) {
        let Some(swipe) = self.swipe.finish(screen_x, Instant::now(), &self.config) else {
            return;
        };
        match swipe.action(self.state.is_open, &self.config) {
            Some(SwipeAction::Open) => self.open(document),
            Some(SwipeAction::Close) => self.close(document),
            None => {}
        }
    }

    fn schedule_resize(&mut self) {
        if let Some(previous) = self.timers.resize.take() {
            self.scheduler.cancel(previous);
        }
        self.timers.resize = Some(self.scheduler.schedule(self.config.debounce_delay(), Deferred::ResizeSettled));
    }

    /// Applies a settled resize: when the mobile classification changed, an
    /// open sidebar switches presentation. The open flag is never touched.
    pub fn handle_resize(&mut self, document: &mut Document) {
        let is_mobile = self.is_mobile(document);
        if is_mobile != self.was_mobile {
            self.was_mobile = is_mobile;
            document.toggle_class(self.elements.body, class::WAS_MOBILE, is_mobile);
            if self.state.is_open {
                let presentation = self.tier(document).presentation();
                self.apply_presentation(document, presentation);
            }
        }

        let Viewport { width, height } = document.viewport();
        if self.diagnostics {
            info!(width, height, "Sidebar: Window resized: {width}x{height}");
        }
    }

    /// Runs every deferred task that is due, one at a time, and returns how
    /// many ran.
    pub fn run_due_timers(&mut self, document: &mut Document) -> usize {
        let mut fired = 0;
        while let Some((id, task)) = self.scheduler.pop_due(Instant::now()) {
            self.timers.forget(id);
            self.run_deferred(document, task);
            fired += 1;
        }
        fired
    }

    fn run_deferred(&mut self, document: &mut Document, task: Deferred) {
        match task {
            Deferred::AnimationSettled { restore_focus } => {
                if restore_focus {
                    document.focus(self.elements.toggle);
                }
                self.state.is_animating = false;
            }
            Deferred::FocusFirst(element) => {
                document.focus(element);
            }
            Deferred::CloseAfterNavigation => self.close(document),
            Deferred::ResizeSettled => self.handle_resize(document),
            Deferred::LoadingFade => {
                if let Some(screen) = self.elements.loading_screen {
                    document.add_class(screen, class::HIDDEN);
                    self.timers.loading = Some(self.scheduler.schedule(self.config.loading_fade_delay(), Deferred::LoadingRemove));
                }
            }
            Deferred::LoadingRemove => {
                if let Some(screen) = self.elements.loading_screen {
                    document.remove(screen);
                }
            }
        }
    }

    /// Deadline of the earliest pending deferred task.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn tier(&self, document: &Document) -> ViewportTier {
        ViewportTier::classify(document.viewport().width, &self.config.breakpoints)
    }

    pub fn is_mobile(&self, document: &Document) -> bool {
        self.tier(document).is_mobile()
    }

    pub fn is_tablet(&self, document: &Document) -> bool {
        self.tier(document).is_tablet()
    }

    pub fn state(&self, document: &Document) -> SidebarSnapshot {
        let Viewport { width, height } = document.viewport();
        let tier = self.tier(document);
        SidebarSnapshot {
            is_open: self.state.is_open,
            is_animating: self.state.is_animating,
            active_slide: self.state.active_slide.clone(),
            viewport: ViewportSnapshot {
                is_mobile: tier.is_mobile(),
                is_tablet: tier.is_tablet(),
                width,
                height,
            },
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn active_slide(&self) -> &str {
        &self.state.active_slide
    }

    pub fn elements(&self) -> &SidebarElements {
        &self.elements
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    pub fn focus_trap(&self) -> Option<FocusTrap> {
        self.focus_trap
    }

    fn log_info(&self, message: impl AsRef<str>) {
        if self.diagnostics {
            info!("Sidebar: {}", message.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sidenav_page::{Location, Viewport};

    use super::*;
    use crate::elements::ids;

    fn page(width: u32) -> Document {
        let mut document = Document::new(Location::parse("http://localhost/").unwrap(), Viewport::new(width, 800));
        let body = document.body();
        for (tag, id) in [("button", ids::TOGGLE), ("div", ids::OVERLAY), ("main", ids::MAIN_CONTENT)] {
            let element = document.append_element(body, tag).unwrap();
            document.set_attribute(element, "id", id);
        }
        let sidebar = document.append_element(body, "nav").unwrap();
        document.set_attribute(sidebar, "id", ids::SIDEBAR);
        for slide in ["home", "about"] {
            let link = document.append_element(sidebar, "a").unwrap();
            document.add_class(link, class::NAV_LINK);
            document.set_attribute(link, attr::HREF, format!("#{slide}"));
            document.set_attribute(link, attr::DATA_PAGE, slide);
        }
        document
    }

    fn controller(document: &mut Document) -> SidebarController {
        SidebarController::new(document, SidebarConfig::default()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn binds_one_listener_per_handler() {
        let mut document = page(1280);
        let sidebar = controller(&mut document);
        assert_eq!(document.listener_count(), 7 + 2 * sidebar.elements().nav_links.len());
    }

    #[tokio::test(start_paused = true)]
    async fn init_is_idempotent_until_destroyed() {
        let mut document = page(1280);
        let mut sidebar = controller(&mut document);
        let bound = document.listener_count();

        sidebar.init(&mut document).unwrap();
        assert_eq!(document.listener_count(), bound);

        sidebar.destroy(&mut document);
        assert_eq!(document.listener_count(), 0);
        assert!(!sidebar.is_initialized());

        sidebar.init(&mut document).unwrap();
        assert_eq!(document.listener_count(), bound);
        assert!(sidebar.is_initialized());
    }

    #[tokio::test(start_paused = true)]
    async fn desktop_open_pushes_content_and_mobile_open_uses_overlay() {
        let mut document = page(1280);
        let mut sidebar = controller(&mut document);
        sidebar.open(&mut document);
        let elements = sidebar.elements().clone();
        assert!(document.has_class(elements.main_content, class::SIDEBAR_OPEN));
        assert!(!document.has_class(elements.overlay, class::ACTIVE));
        assert!(!document.has_class(elements.body, class::NO_SCROLL));

        let mut document = page(375);
        let mut sidebar = controller(&mut document);
        sidebar.open(&mut document);
        assert!(document.has_class(elements.overlay, class::ACTIVE));
        assert_eq!(document.attribute(elements.overlay, attr::ARIA_HIDDEN), Some("false"));
        assert!(document.has_class(elements.body, class::NO_SCROLL));
        assert!(!document.has_class(elements.main_content, class::SIDEBAR_OPEN));
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_is_ignored_while_animating() {
        let mut document = page(1280);
        let mut sidebar = controller(&mut document);
        sidebar.toggle(&mut document);
        sidebar.toggle(&mut document);
        assert!(sidebar.is_open());
        assert!(sidebar.is_animating());

        tokio::time::advance(Duration::from_millis(300)).await;
        sidebar.run_due_timers(&mut document);
        sidebar.toggle(&mut document);
        assert!(!sidebar.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn animated_close_restores_focus_to_toggle() {
        let mut document = page(1280);
        let mut sidebar = controller(&mut document);
        sidebar.open(&mut document);
        tokio::time::advance(Duration::from_millis(300)).await;
        sidebar.run_due_timers(&mut document);
        let first_link = sidebar.elements().nav_links[0];
        assert_eq!(document.active_element(), Some(first_link));

        sidebar.close(&mut document);
        assert!(sidebar.is_animating());
        tokio::time::advance(Duration::from_millis(300)).await;
        sidebar.run_due_timers(&mut document);
        assert_eq!(document.active_element(), Some(sidebar.elements().toggle));
        assert!(!sidebar.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn silent_close_skips_animation_window() {
        let mut document = page(1280);
        let mut sidebar = controller(&mut document);
        sidebar.open(&mut document);
        sidebar.close_with(&mut document, false);

        assert!(!sidebar.is_open());
        assert!(!sidebar.is_animating());
        assert_eq!(sidebar.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_slide_leaves_page_untouched() {
        let mut document = page(1280);
        let mut sidebar = controller(&mut document);
        assert!(!sidebar.navigate_to_slide(&mut document, "missing"));
        assert_eq!(sidebar.active_slide(), "home");
        assert_eq!(document.last_scrolled_into_view(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn initial_link_matches_location_hash() {
        let mut document = page(1280);
        document.navigate("#about").unwrap();
        let sidebar = controller(&mut document);
        let links = &sidebar.elements().nav_links;
        assert!(document.has_class(links[1], class::ACTIVE));
        assert_eq!(document.attribute(links[1], attr::ARIA_CURRENT), Some("page"));
        assert!(!document.has_class(links[0], class::ACTIVE));
    }
}
