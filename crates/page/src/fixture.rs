//! Page fixtures: declarative element trees loaded from JSON or YAML.
//!
//! ```yaml
//! location: http://localhost:8080/#home
//! viewport: { width: 1280, height: 800 }
//! elements:
//!   - tag: button
//!     id: sidebarToggle
//!   - tag: nav
//!     id: sidebar
//!     children:
//!       - tag: a
//!         classes: [nav-link]
//!         attributes: { href: "#home", data-page: home }
//!         text: Home
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Document, ElementId, Location, PageError, Viewport};

/// Serialized description of a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub viewport: Viewport,
    /// Children of `<body>`.
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

/// One element of a fixture tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
}

fn default_location() -> String {
    "http://localhost/".to_string()
}

fn default_tag() -> String {
    "div".to_string()
}

/// Serialization format of a fixture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    Json,
    Yaml,
}

impl FixtureFormat {
    /// `.yaml`/`.yml` files are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => FixtureFormat::Yaml,
            _ => FixtureFormat::Json,
        }
    }
}

/// Parses any fixture-shaped type from a string.
///
/// YAML enums are read as single-key maps (`click: "#id"`), the same shape
/// JSON uses, rather than as `!tag` values.
pub fn parse_fixture<T: DeserializeOwned>(content: &str, format: FixtureFormat) -> Result<T, PageError> {
    match format {
        FixtureFormat::Json => Ok(serde_json::from_str(content)?),
        FixtureFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(content)?;
            Ok(serde_yaml::with::singleton_map_recursive::deserialize(value)?)
        }
    }
}

/// Reads and parses a fixture file, picking the format from its extension.
pub fn load_fixture<T: DeserializeOwned>(path: &Path) -> Result<T, PageError> {
    let content = fs::read_to_string(path).map_err(|source| PageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fixture(&content, FixtureFormat::from_path(path))
}

impl PageFixture {
    /// Builds a live document from the fixture.
    pub fn build(&self) -> Result<Document, PageError> {
        let location = Location::parse(&self.location)?;
        let mut document = Document::new(location, self.viewport);
        let body = document.body();
        for spec in &self.elements {
            append_spec(&mut document, body, spec);
        }
        Ok(document)
    }
}

fn append_spec(document: &mut Document, parent: ElementId, spec: &ElementSpec) {
    let Some(id) = document.append_element(parent, &spec.tag) else {
        return;
    };
    if let Some(element_id) = &spec.id {
        document.set_attribute(id, "id", element_id.clone());
    }
    for class in &spec.classes {
        document.add_class(id, class);
    }
    for (name, value) in &spec.attributes {
        document.set_attribute(id, name, value.clone());
    }
    if !spec.text.is_empty() {
        document.set_text(id, spec.text.clone());
    }
    for child in &spec.children {
        append_spec(document, id, child);
    }
}
