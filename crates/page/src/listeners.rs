//! Listener registry.
//!
//! The registry records which targets listen for which event kinds. It does
//! not store callbacks: the component that registered a listener keeps the
//! returned [`ListenerId`] next to its own handler and checks the registry
//! during dispatch. Removing the id from the registry is what unbinds it.

use indexmap::IndexMap;

use crate::ElementId;

/// Event kinds a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DomContentLoaded,
    Load,
    Click,
    KeyDown,
    TouchStart,
    TouchEnd,
    Resize,
    FocusIn,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Window,
    Document,
    Element(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// A registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub target: ListenerTarget,
    pub kind: EventKind,
    /// Passive listeners promise not to cancel the default action.
    pub passive: bool,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: IndexMap<ListenerId, Listener>,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, listener: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, listener);
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    pub(crate) fn get(&self, id: ListenerId) -> Option<&Listener> {
        self.listeners.get(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn matching(&self, target: ListenerTarget, kind: EventKind) -> impl Iterator<Item = ListenerId> + '_ {
        self.listeners
            .iter()
            .filter(move |(_, listener)| listener.target == target && listener.kind == kind)
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_removal_is_idempotent() {
        let mut registry = ListenerRegistry::default();
        let listener = Listener {
            target: ListenerTarget::Document,
            kind: EventKind::KeyDown,
            passive: false,
        };
        let first = registry.add(listener);
        let second = registry.add(listener);
        assert_ne!(first, second);
        assert_eq!(registry.matching(ListenerTarget::Document, EventKind::KeyDown).count(), 2);

        assert!(registry.remove(first));
        assert!(!registry.remove(first));
        assert_eq!(registry.len(), 1);
        assert!(registry.get(second).is_some());
    }
}
