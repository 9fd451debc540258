//! State shared by all workers of one transformation run.

use crate::config::TransformConfig;
use quire_traits::ImageResolver;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Identifies one pending table-cell slot. Tokens are handed out in
/// increasing order and never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotToken(u64);

/// Capabilities a worker passes down to the workers of its children, in
/// place of children inspecting their ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackFrame {
    /// Directly inside a table or row group.
    pub inside_table: bool,
    /// Directly inside a genuine row.
    pub inside_row: bool,
    /// Directly inside a list.
    pub inside_list: bool,
    /// Inside a `select` (options are only meaningful there).
    pub inside_select: bool,
}

impl StackFrame {
    pub fn table() -> Self {
        Self {
            inside_table: true,
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            inside_row: true,
            ..Default::default()
        }
    }

    pub fn list() -> Self {
        Self {
            inside_list: true,
            ..Default::default()
        }
    }

    pub fn select() -> Self {
        Self {
            inside_select: true,
            ..Default::default()
        }
    }
}

/// Allocates document-unique form field names.
///
/// Requested names are sanitized (`.` is reserved as the hierarchy
/// separator of field names downstream) and de-duplicated by appending
/// `_1`, `_2`, ... Radio buttons asking for the same name share one group.
#[derive(Debug)]
pub struct FieldNameResolver {
    prefix: String,
    used: HashSet<String>,
    radio_groups: HashMap<String, String>,
}

impl FieldNameResolver {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = sanitize(&prefix.into());
        Self {
            prefix: if prefix.is_empty() { "field".to_string() } else { prefix },
            used: HashSet::new(),
            radio_groups: HashMap::new(),
        }
    }

    pub fn allocate(&mut self, requested: Option<&str>) -> String {
        let base = requested
            .map(sanitize)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.prefix.clone());
        if self.used.insert(base.clone()) {
            return base;
        }
        let name = (1..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !self.used.contains(candidate))
            .unwrap_or_default();
        self.used.insert(name.clone());
        name
    }

    /// The group name for a radio button. Unnamed radios each get a group
    /// of their own.
    pub fn radio_group(&mut self, requested: Option<&str>) -> String {
        let Some(key) = requested.map(sanitize).filter(|n| !n.is_empty()) else {
            return self.allocate(None);
        };
        if let Some(existing) = self.radio_groups.get(&key) {
            return existing.clone();
        }
        let name = self.allocate(Some(&key));
        self.radio_groups.insert(key, name.clone());
        name
    }
}

fn sanitize(name: &str) -> String {
    name.trim().replace('.', "_")
}

/// Mutable state shared across the worker stack.
#[derive(Debug)]
pub struct ProcessorContext {
    pub config: TransformConfig,
    pub images: Arc<dyn ImageResolver>,
    pub names: FieldNameResolver,
    next_slot: u64,
    /// Text of the first `title` element.
    pub title: Option<String>,
    /// Language declared on the document element.
    pub lang: Option<String>,
}

impl ProcessorContext {
    pub fn new(config: TransformConfig, images: Arc<dyn ImageResolver>) -> Self {
        let names = FieldNameResolver::new(config.form_fields.unnamed_prefix.clone());
        Self {
            config,
            images,
            names,
            next_slot: 0,
            title: None,
            lang: None,
        }
    }

    pub fn next_slot(&mut self) -> SlotToken {
        self.next_slot += 1;
        SlotToken(self.next_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_traits::InMemoryImageResolver;

    #[test]
    fn names_are_deduplicated_and_sanitized() {
        let mut names = FieldNameResolver::new("field");
        assert_eq!(names.allocate(Some("email")), "email");
        assert_eq!(names.allocate(Some("email")), "email_1");
        assert_eq!(names.allocate(Some("email")), "email_2");
        assert_eq!(names.allocate(Some("a.b")), "a_b");
        assert_eq!(names.allocate(Some("  ")), "field");
        assert_eq!(names.allocate(None), "field_1");
    }

    #[test]
    fn radios_share_their_group() {
        let mut names = FieldNameResolver::new("field");
        assert_eq!(names.allocate(Some("size")), "size");
        let first = names.radio_group(Some("size"));
        let second = names.radio_group(Some("size"));
        assert_eq!(first, "size_1");
        assert_eq!(first, second);
        assert_ne!(names.radio_group(None), names.radio_group(None));
    }

    #[test]
    fn slot_tokens_increase() {
        let mut ctx = ProcessorContext::new(
            TransformConfig::default(),
            Arc::new(InMemoryImageResolver::new()),
        );
        let a = ctx.next_slot();
        let b = ctx.next_slot();
        assert!(b > a);
        assert_ne!(a, b);
    }
}
