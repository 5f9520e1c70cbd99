//! The document tree and window state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::listeners::ListenerRegistry;
use crate::{Element, ElementId, EventKind, Listener, ListenerId, ListenerTarget, Location, PageError, PageEvent, Selector};

/// Inner window dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// Headless document: element arena rooted at `body`, plus focus, listener,
/// location and viewport state.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    body: ElementId,
    active_element: Option<ElementId>,
    viewport: Viewport,
    location: Location,
    listeners: ListenerRegistry,
    scrolled_into_view: Vec<ElementId>,
}

impl Document {
    pub fn new(location: Location, viewport: Viewport) -> Self {
        Self {
            elements: vec![Element::new("body", None)],
            body: ElementId(0),
            active_element: None,
            viewport,
            location,
            listeners: ListenerRegistry::default(),
            scrolled_into_view: Vec::new(),
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn is_connected(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(Element::is_connected)
    }

    /// Creates an element and appends it as the last child of `parent`.
    ///
    /// Returns `None` when `parent` is unknown or detached.
    pub fn append_element(&mut self, parent: ElementId, tag: &str) -> Option<ElementId> {
        if !self.is_connected(parent) {
            return None;
        }
        let id = ElementId(self.elements.len());
        self.elements.push(Element::new(tag, Some(parent)));
        self.element_mut(parent)?.children.push(id);
        Some(id)
    }

    /// Detaches `id` and its subtree. The body cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.body || !self.is_connected(id) {
            return false;
        }
        let subtree: Vec<ElementId> = std::iter::once(id).chain(self.descendants(id)).collect();
        if let Some(parent) = self.element(id).and_then(Element::parent)
            && let Some(parent) = self.element_mut(parent)
        {
            parent.children.retain(|child| *child != id);
        }
        for node in &subtree {
            if let Some(element) = self.element_mut(*node) {
                element.connected = false;
            }
        }
        if self.active_element.is_some_and(|active| subtree.contains(&active)) {
            self.active_element = None;
        }
        debug!(element = id.index(), "removed element subtree of {} node(s)", subtree.len());
        true
    }

    /// Connected elements in document (pre-)order, starting with the body.
    pub fn document_order(&self) -> Vec<ElementId> {
        std::iter::once(self.body).chain(self.descendants(self.body)).collect()
    }

    /// Descendants of `root` in document order, excluding `root` itself.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = match self.element(root) {
            Some(element) => element.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(element) = self.element(node) {
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    /// `node` followed by each ancestor up to the root.
    pub fn ancestors(&self, node: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            out.push(id);
            current = self.element(id).and_then(Element::parent);
        }
        out
    }

    /// True when `node` is `container` or one of its descendants.
    pub fn contains(&self, container: ElementId, node: ElementId) -> bool {
        self.is_connected(node) && self.ancestors(node).contains(&container)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.query_selector(&Selector::Id(id.to_string()))
    }

    pub fn query_selector(&self, selector: &Selector) -> Option<ElementId> {
        self.document_order()
            .into_iter()
            .find(|id| self.element(*id).is_some_and(|element| selector.matches(element)))
    }

    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(|element| selector.matches(element)))
            .collect()
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).is_some_and(|element| element.has_class(class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.element_mut(id) {
            element.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.element_mut(id) {
            element.classes.shift_remove(class);
        }
    }

    /// Adds the class when `force` is true, removes it otherwise.
    pub fn toggle_class(&mut self, id: ElementId, class: &str, force: bool) {
        if force {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attribute(name))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if let Some(element) = self.element_mut(id) {
            element.attributes.shift_remove(name);
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.text = text.into();
        }
    }

    pub fn active_element(&self) -> Option<ElementId> {
        self.active_element
    }

    /// Moves keyboard focus to `id`. Detached elements cannot take focus.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if !self.is_connected(id) {
            return false;
        }
        self.active_element = Some(id);
        true
    }

    pub fn blur(&mut self) {
        self.active_element = None;
    }

    /// Focusable descendants of `container` in document order, using the
    /// focus-trap selector (links with `href`, form controls, and anything
    /// with a `tabindex` other than `-1`).
    pub fn focusable_within(&self, container: ElementId) -> Vec<ElementId> {
        self.descendants(container)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(Element::matches_trap_selector))
            .collect()
    }

    /// Sequential focus navigation order: positive `tabindex` values first
    /// (ascending, ties in document order), then `tabindex=0` and natively
    /// focusable elements in document order. Negative values are skipped.
    pub fn tab_order(&self) -> Vec<ElementId> {
        let mut positive: Vec<(i32, ElementId)> = Vec::new();
        let mut natural: Vec<ElementId> = Vec::new();
        for id in self.descendants(self.body) {
            let Some(element) = self.element(id) else { continue };
            match element.tab_index() {
                Some(index) if index > 0 => positive.push((index, id)),
                Some(0) => natural.push(id),
                Some(_) => {}
                None if element.is_natively_focusable() => natural.push(id),
                None => {}
            }
        }
        positive.sort_by_key(|(index, _)| *index);
        positive.into_iter().map(|(_, id)| id).chain(natural).collect()
    }

    /// The element Tab (or Shift+Tab) would move focus to, wrapping at the
    /// ends of the tab order.
    pub fn next_tab_stop(&self, backwards: bool) -> Option<ElementId> {
        let order = self.tab_order();
        if order.is_empty() {
            return None;
        }
        let position = self.active_element.and_then(|active| order.iter().position(|id| *id == active));
        let next = match (position, backwards) {
            (None, false) => 0,
            (None, true) => order.len() - 1,
            (Some(index), false) => (index + 1) % order.len(),
            (Some(index), true) => (index + order.len() - 1) % order.len(),
        };
        order.get(next).copied()
    }

    pub fn scroll_into_view(&mut self, id: ElementId) {
        if self.is_connected(id) {
            self.scrolled_into_view.push(id);
        }
    }

    /// Most recent element scrolled into view.
    pub fn last_scrolled_into_view(&self) -> Option<ElementId> {
        self.scrolled_into_view.last().copied()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Follows a link target relative to the current location.
    pub fn navigate(&mut self, href: &str) -> Result<(), PageError> {
        self.location = self.location.join(href)?;
        debug!(location = %self.location, "navigated");
        Ok(())
    }

    pub fn add_event_listener(&mut self, target: ListenerTarget, kind: EventKind, passive: bool) -> ListenerId {
        self.listeners.add(Listener { target, kind, passive })
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener(&self, id: ListenerId) -> Option<&Listener> {
        self.listeners.get(id)
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.get(id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listeners_for(&self, target: ListenerTarget, kind: EventKind) -> Vec<ListenerId> {
        self.listeners.matching(target, kind).collect()
    }

    /// Targets an event visits, innermost first. Element events bubble
    /// through their ancestors to the document; touch events are observed at
    /// the document; resize and load fire on the window. Events aimed at a
    /// detached element go nowhere.
    pub fn propagation_path(&self, event: &PageEvent) -> Vec<ListenerTarget> {
        match event {
            PageEvent::Click { target } | PageEvent::FocusIn { target } => self.bubble_path(*target),
            PageEvent::KeyDown { target, .. } => self.bubble_path(target.unwrap_or(self.body)),
            PageEvent::TouchStart { .. } | PageEvent::TouchEnd { .. } | PageEvent::DomContentLoaded => {
                vec![ListenerTarget::Document]
            }
            PageEvent::Resize { .. } | PageEvent::Load => vec![ListenerTarget::Window],
        }
    }

    fn bubble_path(&self, target: ElementId) -> Vec<ListenerTarget> {
        if !self.is_connected(target) {
            return Vec::new();
        }
        self.ancestors(target)
            .into_iter()
            .map(ListenerTarget::Element)
            .chain(std::iter::once(ListenerTarget::Document))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Location::default(), Viewport::default())
    }
}
