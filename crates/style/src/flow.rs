use serde::{Deserialize, Serialize};

/// A forced break requested before or after a block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BreakKind {
    /// Continue on the next page or area.
    Page,
    /// Continue on the next left-hand page.
    Left,
    /// Continue on the next right-hand page.
    Right,
}

impl BreakKind {
    /// Reads a `break-before`/`page-break-before` style value. Values that
    /// do not force a break (`auto`, `avoid`, `column`, ...) yield `None`.
    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "page" | "always" => Some(BreakKind::Page),
            "left" => Some(BreakKind::Left),
            "right" => Some(BreakKind::Right),
            _ => None,
        }
    }
}
