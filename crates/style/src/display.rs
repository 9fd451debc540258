//! The resolved `display` value of an element.
//!
//! This is the "effective display class" the transformation dispatches on:
//! it decides whether an element's result is placed in line, as a block, or
//! as a part of an implicit table structure, independently of the element's
//! markup name.

use crate::parsers::StyleParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Block,
    #[default]
    Inline,
    InlineBlock,
    ListItem,
    Flex,
    InlineFlex,
    Table,
    InlineTable,
    TableRowGroup,
    TableHeaderGroup,
    TableFooterGroup,
    TableRow,
    TableCell,
    TableColumnGroup,
    TableColumn,
    TableCaption,
    Contents,
    None,
}

impl Display {
    /// True for values that participate in an inline formatting context.
    pub fn is_inline_level(self) -> bool {
        matches!(
            self,
            Display::Inline | Display::InlineBlock | Display::InlineTable | Display::InlineFlex
        )
    }

    /// True for `table` and `inline-table`.
    pub fn is_table(self) -> bool {
        matches!(self, Display::Table | Display::InlineTable)
    }

    pub fn is_row_group(self) -> bool {
        matches!(
            self,
            Display::TableRowGroup | Display::TableHeaderGroup | Display::TableFooterGroup
        )
    }

    pub fn is_column_part(self) -> bool {
        matches!(self, Display::TableColumn | Display::TableColumnGroup)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::Inline => "inline",
            Display::InlineBlock => "inline-block",
            Display::ListItem => "list-item",
            Display::Flex => "flex",
            Display::InlineFlex => "inline-flex",
            Display::Table => "table",
            Display::InlineTable => "inline-table",
            Display::TableRowGroup => "table-row-group",
            Display::TableHeaderGroup => "table-header-group",
            Display::TableFooterGroup => "table-footer-group",
            Display::TableRow => "table-row",
            Display::TableCell => "table-cell",
            Display::TableColumnGroup => "table-column-group",
            Display::TableColumn => "table-column",
            Display::TableCaption => "table-caption",
            Display::Contents => "contents",
            Display::None => "none",
        }
    }
}

impl FromStr for Display {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        let display = match value.as_str() {
            "block" | "run-in" | "flow-root" | "grid" => Display::Block,
            "inline" => Display::Inline,
            "inline-block" | "inline-grid" => Display::InlineBlock,
            "list-item" => Display::ListItem,
            "flex" => Display::Flex,
            "inline-flex" => Display::InlineFlex,
            "table" => Display::Table,
            "inline-table" => Display::InlineTable,
            "table-row-group" => Display::TableRowGroup,
            "table-header-group" => Display::TableHeaderGroup,
            "table-footer-group" => Display::TableFooterGroup,
            "table-row" => Display::TableRow,
            "table-cell" => Display::TableCell,
            "table-column-group" => Display::TableColumnGroup,
            "table-column" => Display::TableColumn,
            "table-caption" => Display::TableCaption,
            "contents" => Display::Contents,
            "none" => Display::None,
            _ => {
                return Err(StyleParseError::InvalidValue {
                    property: "display".to_string(),
                    value: s.to_string(),
                });
            }
        };
        Ok(display)
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords_and_aliases() {
        assert_eq!("table-cell".parse::<Display>().unwrap(), Display::TableCell);
        assert_eq!(" INLINE-BLOCK ".parse::<Display>().unwrap(), Display::InlineBlock);
        assert_eq!("grid".parse::<Display>().unwrap(), Display::Block);
        assert!("sideways".parse::<Display>().is_err());
    }

    #[test]
    fn classifies_inline_level_values() {
        assert!(Display::InlineTable.is_inline_level());
        assert!(Display::Inline.is_inline_level());
        assert!(!Display::TableCell.is_inline_level());
        assert!(!Display::Block.is_inline_level());
    }
}
