//! Built-in style appliers.

use quire_style::parsers::apply_style_property;
use quire_style::{ComputedStyles, ElementStyle, StyleParseError};
use quire_traits::{ApplyPhase, ApplyTarget, StyleApplier, StyleContext};

/// Maps the resolved declarations onto the typed [`ElementStyle`] of the
/// finished node.
///
/// Declarations that steer tree construction (`display`, `white-space`,
/// ...) have no `ElementStyle` counterpart and are skipped. Inline leaves
/// and columns keep whatever a closer element already set.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredStyleApplier;

impl DeclaredStyleApplier {
    pub fn new() -> Self {
        Self
    }

    /// Converts a style map, reporting and skipping invalid values.
    pub fn element_style(styles: &ComputedStyles) -> ElementStyle {
        let mut style = ElementStyle::default();
        for (name, value) in styles.iter() {
            match apply_style_property(&mut style, name, value) {
                Ok(()) | Err(StyleParseError::UnsupportedProperty(_)) => {}
                Err(e) => log::warn!("Ignoring {}: {} ({})", name, value, e),
            }
        }
        style
    }
}

impl StyleApplier for DeclaredStyleApplier {
    fn apply(&self, styles: &ComputedStyles, target: ApplyTarget<'_>, context: &StyleContext<'_>) {
        if context.phase != ApplyPhase::End || styles.is_empty() {
            return;
        }
        let style = Self::element_style(styles);
        if style.is_empty() {
            return;
        }
        match target {
            ApplyTarget::Node(node) => {
                if let Some(meta) = node.meta_mut() {
                    meta.style.merge_from(&style);
                }
            }
            ApplyTarget::Leaves(leaves) => {
                for meta in leaves.into_iter().filter_map(|leaf| leaf.meta_mut()) {
                    meta.style.inherit_missing_from(&style);
                }
            }
            ApplyTarget::Columns(columns) => {
                for column in columns {
                    column.style.inherit_missing_from(&style);
                    if column.width.is_none() {
                        column.width = style.width.clone();
                    }
                }
            }
        }
    }
}

/// Leaves every node unstyled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStyleApplier;

impl StyleApplier for NoopStyleApplier {
    fn apply(
        &self,
        _styles: &ComputedStyles,
        _target: ApplyTarget<'_>,
        _context: &StyleContext<'_>,
    ) {
    }
}
