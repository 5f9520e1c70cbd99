//! # Sidenav page model
//!
//! A small, headless stand-in for the browser document that the sidebar
//! controller drives. It keeps exactly the state the controller reads and
//! writes:
//!
//! - an element tree with ids, classes, attributes and text
//! - keyboard focus and the sequential tab order
//! - a listener registry so bindings can be added and released explicitly
//! - the page location and the viewport dimensions
//!
//! Pages are usually built from a [`PageFixture`] loaded from JSON or YAML.
//! Hosts feed [`PageEvent`]s to whatever component owns the page and apply
//! the default actions reported back through [`EventOutcome`].

mod document;
mod element;
mod error;
mod event;
mod fixture;
mod listeners;
mod location;
mod selector;

pub use document::{Document, Viewport};
pub use element::{Element, ElementId};
pub use error::PageError;
pub use event::{EventOutcome, Key, PageEvent};
pub use fixture::{ElementSpec, FixtureFormat, PageFixture, load_fixture, parse_fixture};
pub use listeners::{EventKind, Listener, ListenerId, ListenerTarget};
pub use location::Location;
pub use selector::Selector;
