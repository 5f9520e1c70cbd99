use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Stable handle to an element stored in a [`Document`](crate::Document).
///
/// Handles are never reused, so a handle to a removed element stays valid
/// for lookups but reports `is_connected() == false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Position of the element in the document arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single node in the document tree.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) classes: IndexSet<String>,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) text: String,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) connected: bool,
}

impl Element {
    pub(crate) fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: IndexSet::new(),
            attributes: IndexMap::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
            connected: true,
        }
    }

    /// Lower-cased tag name (`a`, `button`, `nav`, ...).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute, if present.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute name/value pairs in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Whether the element is still attached to the document tree.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Parsed `tabindex` attribute. Unparseable values are treated as absent.
    pub fn tab_index(&self) -> Option<i32> {
        self.attribute("tabindex").and_then(|value| value.trim().parse().ok())
    }

    /// Elements the browser focuses without an explicit `tabindex`.
    pub(crate) fn is_natively_focusable(&self) -> bool {
        match self.tag.as_str() {
            "a" => self.attributes.contains_key("href"),
            "button" | "select" | "textarea" => true,
            "input" => self.attribute("type") != Some("hidden"),
            _ => false,
        }
    }

    /// Matches the selector used to find focus-trap boundaries:
    /// `a[href], button, textarea, input[type="text"], input[type="radio"],
    /// input[type="checkbox"], select, [tabindex]:not([tabindex="-1"])`.
    pub(crate) fn matches_trap_selector(&self) -> bool {
        let by_tag = match self.tag.as_str() {
            "a" => self.attributes.contains_key("href"),
            "button" | "textarea" | "select" => true,
            "input" => matches!(self.attribute("type"), Some("text" | "radio" | "checkbox")),
            _ => false,
        };
        by_tag || self.attribute("tabindex").is_some_and(|value| value != "-1")
    }
}
