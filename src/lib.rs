//! # quire
//!
//! Converts a styled element tree into the layout tree a pagination engine
//! consumes: block containers, paragraphs of inline runs, rectangular
//! tables, lists of items, images, form-field placeholders and forced
//! breaks.
//!
//! The transformation itself lives in [`quire_core`]. This crate re-exports
//! it and adds [`convert`], which reads XHTML through the bundled markup
//! adapter.
//!
//! ```ignore
//! let doc = quire::convert("<div><p>Hello</p></div>", quire::TransformConfig::default())?;
//! assert_eq!(doc.text_content(), "Hello");
//! ```

pub mod error;

pub use error::QuireError;

pub use quire_core::{
    ChildResult, Contribution, ControlKind, DeclaredStyleApplier, DocumentEvent, Element,
    FormFieldConfig, NoopStyleApplier, TransformConfig, TransformError, Transformer,
    TransformerBuilder,
};
pub use quire_markup::{parse_events, MarkupError};
pub use quire_nodes::{
    BlockKind, BlockNode, ColumnDefinition, Document, FormFieldKind, FormFieldNode, ImageNode,
    ImageSource, InlineNode, LayoutNode, ListItemNode, ListNode, NodeMetadata, ParagraphNode, Role,
    SectionKind, SelectOption, TableCell, TableNode, TableRow, TextRun,
};
pub use quire_style::{
    BreakKind, ComputedStyles, Dimension, Display, ElementStyle, FontWeight, ListStyleType,
};
pub use quire_traits::{
    CollectingSink, DocumentSink, ImageResolver, InMemoryImageResolver, ResolvedImage,
    ResourceError, StyleApplier,
};
pub use quire_types::Size;

/// Transforms XHTML markup with the default collaborators: no images, the
/// declared-style applier and no sink.
pub fn convert(markup: &str, config: TransformConfig) -> Result<Document, QuireError> {
    convert_with(markup, Transformer::builder().with_config(config))
}

/// Transforms XHTML markup with a configured builder.
pub fn convert_with(markup: &str, builder: TransformerBuilder<'_>) -> Result<Document, QuireError> {
    let events = parse_events(markup)?;
    let document = builder.build().transform(events)?;
    log::debug!("Converted markup into {} top-level block(s)", document.children.len());
    Ok(document)
}
