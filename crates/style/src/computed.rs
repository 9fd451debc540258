//! The resolved property map handed over by the cascade for each element.
//!
//! The transformation only reads the handful of properties that steer tree
//! construction (`display`, `white-space`, `text-transform`, `column-count`,
//! forced breaks, list markers). Everything else is carried opaquely and
//! handed to the style applier.

use crate::display::Display;
use crate::flow::BreakKind;
use crate::list::ListStyleType;
use crate::parsers::{parse_declarations, StyleParseError};
use crate::text::{TextTransform, WhiteSpace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Properties whose computed value flows from parent to child when the
/// child does not declare its own.
pub const INHERITED_PROPERTIES: &[&str] = &[
    "color",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "line-height",
    "list-style-position",
    "list-style-type",
    "text-align",
    "text-transform",
    "white-space",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComputedStyles {
    properties: BTreeMap<String, String>,
}

impl ComputedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from a `name: value; ...` declaration block. Malformed
    /// declarations are skipped.
    pub fn from_declarations(css: &str) -> Self {
        parse_declarations(css).into_iter().collect()
    }

    /// Property names are case-insensitive; they are stored lowercased.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.properties
            .insert(name.trim().to_ascii_lowercase(), value.into().trim().to_string())
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.properties.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Copies inherited properties from `parent` that are not set here.
    pub fn inherit_from(&mut self, parent: &ComputedStyles) {
        for name in INHERITED_PROPERTIES {
            if !self.contains(name) {
                if let Some(value) = parent.get(name) {
                    self.set(name, value);
                }
            }
        }
    }

    /// Parses a property into a typed value. `Ok(None)` means the property is
    /// not set; `Err` means it is set to something unrecognised.
    pub fn lookup<T>(&self, name: &str) -> Result<Option<T>, StyleParseError>
    where
        T: FromStr<Err = StyleParseError>,
    {
        self.get(name).map(str::parse).transpose()
    }

    /// The effective display class, `inline` when unset or unrecognised.
    pub fn display(&self) -> Display {
        self.lookup("display").ok().flatten().unwrap_or_default()
    }

    pub fn white_space(&self) -> WhiteSpace {
        self.lookup("white-space").ok().flatten().unwrap_or_default()
    }

    pub fn text_transform(&self) -> TextTransform {
        self.lookup("text-transform").ok().flatten().unwrap_or_default()
    }

    pub fn list_style_type(&self) -> Option<ListStyleType> {
        self.lookup("list-style-type").ok().flatten()
    }

    /// `column-count` as a positive integer. `auto` and unset yield `Ok(None)`.
    pub fn column_count(&self) -> Result<Option<u32>, StyleParseError> {
        match self.get("column-count") {
            None => Ok(None),
            Some(v) if v.eq_ignore_ascii_case("auto") => Ok(None),
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .map(Some)
                .ok_or_else(|| StyleParseError::InvalidValue {
                    property: "column-count".to_string(),
                    value: v.to_string(),
                }),
        }
    }

    pub fn break_before(&self) -> Option<BreakKind> {
        self.forced_break("break-before", "page-break-before")
    }

    pub fn break_after(&self) -> Option<BreakKind> {
        self.forced_break("break-after", "page-break-after")
    }

    fn forced_break(&self, name: &str, legacy: &str) -> Option<BreakKind> {
        self.get(name)
            .or_else(|| self.get(legacy))
            .and_then(BreakKind::from_css)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ComputedStyles {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut styles = ComputedStyles::new();
        for (name, value) in iter {
            styles.set(name.as_ref(), value);
        }
        styles
    }
}
