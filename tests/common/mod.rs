#![allow(dead_code)]

pub mod tree_assertions;

use quire::{
    Document, FormFieldNode, InlineNode, LayoutNode, ListNode, ParagraphNode, QuireError,
    TableCell, TableNode, TransformConfig,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Convert markup with the default configuration
pub fn convert_markup(markup: &str) -> Result<Document, QuireError> {
    init_logger();
    quire::convert(markup, TransformConfig::default())
}

/// The single top-level node of a document
pub fn root(doc: &Document) -> &LayoutNode {
    assert_eq!(doc.children.len(), 1, "Expected one top-level node:\n{}", doc.outline());
    &doc.children[0]
}

pub fn children(node: &LayoutNode) -> &[LayoutNode] {
    node.block_children().unwrap_or_default()
}

pub fn as_table(node: &LayoutNode) -> &TableNode {
    match node {
        LayoutNode::Table(table) => table,
        other => panic!("Expected table, got {}", other.outline()),
    }
}

pub fn as_list(node: &LayoutNode) -> &ListNode {
    match node {
        LayoutNode::List(list) => list,
        other => panic!("Expected list, got {}", other.outline()),
    }
}

pub fn as_paragraph(node: &LayoutNode) -> &ParagraphNode {
    match node {
        LayoutNode::Paragraph(paragraph) => paragraph,
        other => panic!("Expected paragraph, got {}", other.outline()),
    }
}

pub fn cell_text(cell: &TableCell) -> String {
    cell.children.iter().map(LayoutNode::text_content).collect()
}

/// Cell texts of every row in visual order
pub fn table_texts(table: &TableNode) -> Vec<Vec<String>> {
    table
        .rows()
        .map(|row| row.cells.iter().map(cell_text).collect())
        .collect()
}

/// Every form field in the tree, including those placed on a line
pub fn form_fields(doc: &Document) -> Vec<&FormFieldNode> {
    let mut found = Vec::new();
    for child in &doc.children {
        collect_fields(child, &mut found);
    }
    found
}

fn collect_fields<'a>(node: &'a LayoutNode, found: &mut Vec<&'a FormFieldNode>) {
    match node {
        LayoutNode::FormField(field) => found.push(field),
        LayoutNode::Paragraph(paragraph) => {
            for leaf in &paragraph.children {
                if let InlineNode::Atomic(inner) = leaf {
                    collect_fields(inner, found);
                }
            }
        }
        LayoutNode::Table(table) => {
            for cell in table.rows().flat_map(|row| row.cells.iter()) {
                for child in &cell.children {
                    collect_fields(child, found);
                }
            }
        }
        LayoutNode::List(list) => {
            for child in list.items.iter().flat_map(|item| item.children.iter()) {
                collect_fields(child, found);
            }
        }
        other => {
            for child in children(other) {
                collect_fields(child, found);
            }
        }
    }
}
