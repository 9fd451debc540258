use crate::form::FormFieldNode;
use crate::image::ImageNode;
use crate::inline::InlineNode;
use crate::list::{ListItemNode, ListNode};
use crate::meta::NodeMetadata;
use crate::table::{TableCell, TableNode, TableRow};
use quire_style::BreakKind;

/// The kind of box a generic block container establishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// The document root.
    Document,
    #[default]
    Division,
    /// A container whose content flows through `count` columns.
    MultiColumn { count: u32 },
}

/// A generic block container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockNode {
    pub meta: NodeMetadata,
    pub kind: BlockKind,
    pub children: Vec<LayoutNode>,
}

/// A container holding only inline content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphNode {
    pub meta: NodeMetadata,
    pub children: Vec<InlineNode>,
}

impl ParagraphNode {
    /// The anonymous box wrapping a run of inline content.
    pub fn anonymous(children: Vec<InlineNode>) -> Self {
        Self {
            meta: NodeMetadata::anonymous(),
            children,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaBreakNode {
    pub kind: BreakKind,
}

/// Represents a block-level node in the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Block(BlockNode),
    Paragraph(ParagraphNode),
    Table(TableNode),
    TableRow(TableRow),
    TableCell(TableCell),
    List(ListNode),
    ListItem(ListItemNode),
    Image(ImageNode),
    FormField(FormFieldNode),
    AreaBreak(AreaBreakNode),
}

impl LayoutNode {
    pub fn block(kind: BlockKind, meta: NodeMetadata) -> Self {
        LayoutNode::Block(BlockNode {
            meta,
            kind,
            children: Vec::new(),
        })
    }

    pub fn paragraph(meta: NodeMetadata) -> Self {
        LayoutNode::Paragraph(ParagraphNode {
            meta,
            children: Vec::new(),
        })
    }

    pub fn area_break(kind: BreakKind) -> Self {
        LayoutNode::AreaBreak(AreaBreakNode { kind })
    }

    /// Returns a reference to the metadata if the node type supports it.
    pub fn meta(&self) -> Option<&NodeMetadata> {
        match self {
            LayoutNode::Block(n) => Some(&n.meta),
            LayoutNode::Paragraph(n) => Some(&n.meta),
            LayoutNode::Table(n) => Some(&n.meta),
            LayoutNode::TableRow(n) => Some(&n.meta),
            LayoutNode::TableCell(n) => Some(&n.meta),
            LayoutNode::List(n) => Some(&n.meta),
            LayoutNode::ListItem(n) => Some(&n.meta),
            LayoutNode::Image(n) => Some(&n.meta),
            LayoutNode::FormField(n) => Some(&n.meta),
            LayoutNode::AreaBreak(_) => None,
        }
    }

    /// Returns a mutable reference to the metadata if the node type supports it.
    pub fn meta_mut(&mut self) -> Option<&mut NodeMetadata> {
        match self {
            LayoutNode::Block(n) => Some(&mut n.meta),
            LayoutNode::Paragraph(n) => Some(&mut n.meta),
            LayoutNode::Table(n) => Some(&mut n.meta),
            LayoutNode::TableRow(n) => Some(&mut n.meta),
            LayoutNode::TableCell(n) => Some(&mut n.meta),
            LayoutNode::List(n) => Some(&mut n.meta),
            LayoutNode::ListItem(n) => Some(&mut n.meta),
            LayoutNode::Image(n) => Some(&mut n.meta),
            LayoutNode::FormField(n) => Some(&mut n.meta),
            LayoutNode::AreaBreak(_) => None,
        }
    }

    /// Returns a string identifier for the node type.
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutNode::Block(n) => match n.kind {
                BlockKind::Document => "document",
                BlockKind::Division => "block",
                BlockKind::MultiColumn { .. } => "multi-column",
            },
            LayoutNode::Paragraph(_) => "paragraph",
            LayoutNode::Table(_) => "table",
            LayoutNode::TableRow(_) => "table-row",
            LayoutNode::TableCell(_) => "table-cell",
            LayoutNode::List(_) => "list",
            LayoutNode::ListItem(_) => "list-item",
            LayoutNode::Image(_) => "image",
            LayoutNode::FormField(_) => "form-field",
            LayoutNode::AreaBreak(_) => "area-break",
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.meta().is_some_and(|m| m.anonymous)
    }

    /// The block children of nodes that hold block content.
    pub fn block_children(&self) -> Option<&[LayoutNode]> {
        match self {
            LayoutNode::Block(n) => Some(&n.children),
            LayoutNode::TableCell(n) => Some(&n.children),
            LayoutNode::ListItem(n) => Some(&n.children),
            _ => None,
        }
    }

    pub fn block_children_mut(&mut self) -> Option<&mut Vec<LayoutNode>> {
        match self {
            LayoutNode::Block(n) => Some(&mut n.children),
            LayoutNode::TableCell(n) => Some(&mut n.children),
            LayoutNode::ListItem(n) => Some(&mut n.children),
            _ => None,
        }
    }

    /// Concatenated text of the subtree. Block boundaries are not marked;
    /// line breaks become `\n`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            LayoutNode::Paragraph(p) => {
                for child in &p.children {
                    out.push_str(&child.text_content());
                }
            }
            LayoutNode::Table(t) => {
                if let Some(caption) = &t.caption {
                    caption.collect_text(out);
                }
                for cell in t.rows().flat_map(|row| row.cells.iter()) {
                    for child in &cell.children {
                        child.collect_text(out);
                    }
                }
            }
            LayoutNode::TableRow(row) => {
                for child in row.cells.iter().flat_map(|c| c.children.iter()) {
                    child.collect_text(out);
                }
            }
            LayoutNode::List(list) => {
                for child in list.items.iter().flat_map(|i| i.children.iter()) {
                    child.collect_text(out);
                }
            }
            LayoutNode::FormField(field) => {
                for child in &field.content {
                    child.collect_text(out);
                }
            }
            LayoutNode::Image(img) => {
                if let Some(alt) = &img.alt {
                    out.push_str(alt);
                }
            }
            LayoutNode::AreaBreak(_) => {}
            LayoutNode::Block(_) | LayoutNode::TableCell(_) | LayoutNode::ListItem(_) => {
                for child in self.block_children().unwrap_or_default() {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<ParagraphNode> for LayoutNode {
    fn from(node: ParagraphNode) -> Self {
        LayoutNode::Paragraph(node)
    }
}

impl From<TableNode> for LayoutNode {
    fn from(node: TableNode) -> Self {
        LayoutNode::Table(node)
    }
}

impl From<ListNode> for LayoutNode {
    fn from(node: ListNode) -> Self {
        LayoutNode::List(node)
    }
}

impl From<ListItemNode> for LayoutNode {
    fn from(node: ListItemNode) -> Self {
        LayoutNode::ListItem(node)
    }
}

impl From<TableCell> for LayoutNode {
    fn from(node: TableCell) -> Self {
        LayoutNode::TableCell(node)
    }
}
