use crate::meta::{InlineMetadata, TextStr};
use crate::node::LayoutNode;

/// Represents an inline-level item within a `Paragraph`.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    /// A run of text sharing one set of inline properties.
    Text(TextRun),
    /// A forced line break.
    LineBreak,
    /// Block-capable content placed on the line as a single unit
    /// (inline blocks, inline images, inline form controls).
    Atomic(Box<LayoutNode>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: TextStr,
    pub meta: InlineMetadata,
    /// Whether spaces in this run may still be collapsed or trimmed at the
    /// edges of a line. `false` for preformatted text.
    pub collapsible: bool,
}

impl TextRun {
    pub fn new(text: impl Into<TextStr>) -> Self {
        Self {
            text: text.into(),
            meta: InlineMetadata::default(),
            collapsible: true,
        }
    }
}

impl InlineNode {
    pub fn text(text: impl Into<TextStr>) -> Self {
        InlineNode::Text(TextRun::new(text))
    }

    pub fn atomic(node: LayoutNode) -> Self {
        InlineNode::Atomic(Box::new(node))
    }

    /// Whether this item produces visible content on a line. Collapsible
    /// white space does not; preserved white space, breaks and atomic
    /// content do.
    pub fn is_significant(&self) -> bool {
        match self {
            InlineNode::Text(run) => {
                if run.collapsible {
                    run.text.chars().any(|c| !c.is_whitespace())
                } else {
                    !run.text.is_empty()
                }
            }
            InlineNode::LineBreak | InlineNode::Atomic(_) => true,
        }
    }

    pub fn meta_mut(&mut self) -> Option<&mut InlineMetadata> {
        match self {
            InlineNode::Text(run) => Some(&mut run.meta),
            InlineNode::LineBreak | InlineNode::Atomic(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            InlineNode::Text(run) => run.text.clone(),
            InlineNode::LineBreak => "\n".to_string(),
            InlineNode::Atomic(node) => node.text_content(),
        }
    }
}
