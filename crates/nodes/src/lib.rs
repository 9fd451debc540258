//! Layout tree model.
//!
//! The output vocabulary of the transformation: block containers, inline
//! runs, tables, lists, replaced content, form-field placeholders and forced
//! breaks. Pure data; the only behaviour is grid normalization for tables and
//! a few inspection helpers.

pub mod document;
pub mod form;
pub mod image;
pub mod inline;
pub mod list;
pub mod meta;
pub mod node;
pub mod table;

pub use document::Document;
pub use form::{FormFieldKind, FormFieldNode, SelectOption};
pub use image::{ImageNode, ImageSource, SharedData};
pub use inline::{InlineNode, TextRun};
pub use list::{ListItemNode, ListNode};
pub use meta::{InlineMetadata, NodeMetadata, Role, TextStr};
pub use node::{AreaBreakNode, BlockKind, BlockNode, LayoutNode, ParagraphNode};
pub use table::{
    ColumnDefinition, MAX_COL_SPAN, MAX_ROW_SPAN, SectionKind, TableCell, TableNode, TableRow,
    TableSection,
};
