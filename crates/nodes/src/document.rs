use crate::inline::InlineNode;
use crate::meta::TextStr;
use crate::node::{BlockKind, LayoutNode};
use itertools::Itertools;
use std::fmt::Write;

/// The finished layout tree of one document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub title: Option<TextStr>,
    pub lang: Option<TextStr>,
    pub children: Vec<LayoutNode>,
}

impl Document {
    pub fn text_content(&self) -> String {
        self.children.iter().map(LayoutNode::text_content).collect()
    }

    /// An indented, one-node-per-line dump of the tree for debugging and
    /// test assertions.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            write_node(child, 0, &mut out);
        }
        out
    }
}

impl LayoutNode {
    pub fn outline(&self) -> String {
        let mut out = String::new();
        write_node(self, 0, &mut out);
        out
    }
}

fn label(node: &LayoutNode) -> String {
    let mut label = node.kind().to_string();
    if let LayoutNode::Block(block) = node {
        if let BlockKind::MultiColumn { count } = block.kind {
            let _ = write!(label, "({})", count);
        }
    }
    if let Some(meta) = node.meta() {
        if let Some(id) = &meta.id {
            let _ = write!(label, " #{}", id);
        }
        if meta.anonymous {
            label.push_str(" [anonymous]");
        }
    }
    label
}

fn inline_label(node: &InlineNode) -> String {
    match node {
        InlineNode::Text(run) => format!("{:?}", run.text),
        InlineNode::LineBreak => "<br>".to_string(),
        InlineNode::Atomic(inner) => format!("<{}>", inner.kind()),
    }
}

fn write_node(node: &LayoutNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{}{}", indent, label(node));
    match node {
        LayoutNode::Paragraph(p) => {
            let _ = writeln!(out, " {}", p.children.iter().map(inline_label).join(" "));
            for inner in p.children.iter().filter_map(|c| match c {
                InlineNode::Atomic(inner) => Some(inner),
                _ => None,
            }) {
                write_node(inner, depth + 1, out);
            }
        }
        LayoutNode::Table(table) => {
            let _ = writeln!(out, " cols={}", table.column_count);
            if let Some(caption) = &table.caption {
                write_node(caption, depth + 1, out);
            }
            for (name, section) in [
                ("thead", &table.header),
                ("tbody", &table.body),
                ("tfoot", &table.footer),
            ] {
                if section.rows.is_empty() {
                    continue;
                }
                let _ = writeln!(out, "{}  {}", indent, name);
                for row in &section.rows {
                    let _ = writeln!(out, "{}    table-row", indent);
                    for cell in &row.cells {
                        write_node(&LayoutNode::TableCell(cell.clone()), depth + 3, out);
                    }
                }
            }
        }
        LayoutNode::TableRow(row) => {
            out.push('\n');
            for cell in &row.cells {
                write_node(&LayoutNode::TableCell(cell.clone()), depth + 1, out);
            }
        }
        LayoutNode::List(list) => {
            out.push('\n');
            for (item, ordinal) in list.items.iter().zip(list.ordinals()) {
                let marker = ordinal.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
                let _ = writeln!(
                    out,
                    "{}  list-item {}{}",
                    indent,
                    marker,
                    if item.synthetic { " [synthetic]" } else { "" }
                );
                for child in &item.children {
                    write_node(child, depth + 2, out);
                }
            }
        }
        LayoutNode::FormField(field) => {
            let _ = writeln!(out, " {:?} name={:?}", field.kind, field.name);
        }
        LayoutNode::AreaBreak(b) => {
            let _ = writeln!(out, " {:?}", b.kind);
        }
        _ => {
            out.push('\n');
            for child in node.block_children().unwrap_or_default() {
                write_node(child, depth + 1, out);
            }
        }
    }
}
