//! The upstream contract: elements with resolved styles and the depth-first
//! event stream that carries them.

use quire_style::{ComputedStyles, Display};
use std::str::FromStr;

/// One element as delivered by the parser/cascade layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Local name, lowercased.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    pub styles: ComputedStyles,
}

/// A depth-first traversal event. Enter/exit nesting is always balanced.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    Enter(Element),
    Text(String),
    Exit,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    pub fn with_style(mut self, name: &str, value: impl Into<String>) -> Self {
        self.styles.set(name, value);
        self
    }

    pub fn with_styles(mut self, styles: ComputedStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Attribute lookup; names are case-insensitive.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// A non-empty, trimmed attribute value.
    pub fn attr_text(&self, name: &str) -> Option<String> {
        self.attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Parses an attribute. An unparsable value is reported and treated as
    /// absent so the caller falls back to its default.
    pub fn parse_attr<T: FromStr>(&self, name: &str) -> Option<T> {
        let raw = self.attr(name)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!(
                    "Ignoring invalid {}=\"{}\" on <{}>",
                    name,
                    raw,
                    self.name
                );
                None
            }
        }
    }

    pub fn id(&self) -> Option<String> {
        self.attr_text("id")
    }

    pub fn lang(&self) -> Option<String> {
        self.attr_text("lang").or_else(|| self.attr_text("xml:lang"))
    }

    pub fn display(&self) -> Display {
        self.styles.display()
    }
}

impl DocumentEvent {
    pub fn enter(element: Element) -> Self {
        DocumentEvent::Enter(element)
    }

    pub fn text(text: impl Into<String>) -> Self {
        DocumentEvent::Text(text.into())
    }
}
