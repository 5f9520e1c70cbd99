//! Single-term selectors: `#id`, `.class`, `[name]`, `[name=value]` and bare
//! tag names. Compound and descendant selectors are not supported.

use std::fmt;

use crate::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
    Tag(String),
}

impl Selector {
    /// Parses a selector; returns `None` for empty or malformed input.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(id) = input.strip_prefix('#') {
            return (!id.is_empty()).then(|| Selector::Id(id.to_string()));
        }
        if let Some(class) = input.strip_prefix('.') {
            return (!class.is_empty()).then(|| Selector::Class(class.to_string()));
        }
        if let Some(body) = input.strip_prefix('[') {
            let body = body.strip_suffix(']')?;
            let (name, value) = match body.split_once('=') {
                Some((name, value)) => (name.trim(), Some(unquote(value.trim()).to_string())),
                None => (body.trim(), None),
            };
            if name.is_empty() {
                return None;
            }
            return Some(Selector::Attribute {
                name: name.to_string(),
                value,
            });
        }
        let valid_tag = !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        valid_tag.then(|| Selector::Tag(input.to_ascii_lowercase()))
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Id(id) => element.id() == Some(id.as_str()),
            Selector::Class(class) => element.has_class(class),
            Selector::Attribute { name, value: None } => element.attribute(name).is_some(),
            Selector::Attribute { name, value: Some(value) } => element.attribute(name) == Some(value.as_str()),
            Selector::Tag(tag) => element.tag() == tag,
        }
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Attribute { name, value: None } => write!(f, "[{name}]"),
            Selector::Attribute { name, value: Some(value) } => write!(f, "[{name}=\"{value}\"]"),
            Selector::Tag(tag) => f.write_str(tag),
        }
    }
}
