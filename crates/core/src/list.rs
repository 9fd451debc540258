//! List assembly: a list's children are always list items, so anything else
//! a list element receives is wrapped into synthetic items, in place.

use crate::context::ProcessorContext;
use crate::dispatch::{place, ChildResult, Contribution, Placement, RunMember};
use crate::inline::InlineBuffer;
use crate::table::TableAssembler;
use quire_nodes::{LayoutNode, ListItemNode};

#[derive(Debug, Default)]
pub struct ListAssembler {
    items: Vec<ListItemNode>,
    inline: InlineBuffer,
}

impl ListAssembler {
    pub fn new(inline: InlineBuffer) -> Self {
        Self {
            items: Vec::new(),
            inline,
        }
    }

    pub fn items(&self) -> &[ListItemNode] {
        &self.items
    }

    pub fn accept_text(&mut self, text: &str) -> bool {
        self.inline.add_text(text);
        true
    }

    pub fn accept(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        let child = match child.content {
            Contribution::Node(LayoutNode::ListItem(item)) => {
                self.push_item(item);
                return true;
            }
            content => ChildResult { content, ..child },
        };
        match place(child) {
            Placement::Inline(leaf) => self.inline.add_leaf(leaf),
            Placement::Run(members) => {
                for member in members {
                    match member {
                        RunMember::Leaf(leaf) => self.inline.add_leaf(leaf),
                        RunMember::Block(node) => self.push_block(node),
                    }
                }
            }
            Placement::Block(node, _) => self.push_block(node),
            Placement::TablePart(part) => {
                let table = TableAssembler::wrap_orphan(part, ctx);
                self.push_block(table);
            }
            Placement::Unplaceable(_) => return false,
        }
        true
    }

    fn push_item(&mut self, item: ListItemNode) {
        self.wrap_pending();
        self.items.push(item);
    }

    /// A raw block gets a synthetic item of its own; a list item is
    /// appended as-is.
    fn push_block(&mut self, node: LayoutNode) {
        match node {
            LayoutNode::ListItem(item) => self.push_item(item),
            node => {
                self.wrap_pending();
                self.items.push(ListItemNode::synthetic(vec![node]));
            }
        }
    }

    /// Wraps inline content buffered since the last item into a synthetic
    /// item. White space alone produces nothing.
    fn wrap_pending(&mut self) {
        let mut children = Vec::new();
        if self.inline.flush_into(&mut children) {
            self.items.push(ListItemNode::synthetic(children));
        }
    }

    /// Wraps trailing content and hands the items over. Safe to call more
    /// than once.
    pub fn finish(&mut self) -> Vec<ListItemNode> {
        self.wrap_pending();
        std::mem::take(&mut self.items)
    }
}
