//! Content of a block container: block children plus the inline run that
//! has not been boxed yet.
//!
//! Each contiguous run of inline content between two blocks becomes an
//! anonymous paragraph of its own. Table parts and list items that show up
//! outside a table or list are collected into an anonymous table or list,
//! which stays open for as long as only such parts (and white space) follow.

use crate::context::ProcessorContext;
use crate::dispatch::{place, Breaks, ChildResult, Contribution, Placement, RunMember};
use crate::inline::InlineBuffer;
use crate::table::TableAssembler;
use quire_nodes::{LayoutNode, ListItemNode, ListNode, NodeMetadata};
use quire_style::{ComputedStyles, Display};

#[derive(Debug)]
enum AnonymousGroup {
    Table(Box<TableAssembler>),
    List(ListNode),
}

#[derive(Debug, Default)]
pub struct BlockContent {
    children: Vec<LayoutNode>,
    inline: InlineBuffer,
    group: Option<AnonymousGroup>,
}

impl BlockContent {
    pub fn new(inline: InlineBuffer) -> Self {
        Self {
            children: Vec::new(),
            inline,
            group: None,
        }
    }

    pub fn for_styles(styles: &ComputedStyles) -> Self {
        Self::new(InlineBuffer::for_styles(styles))
    }

    pub fn inline_mut(&mut self) -> &mut InlineBuffer {
        &mut self.inline
    }

    /// Whether any block-level content has arrived.
    pub fn has_blocks(&self) -> bool {
        !self.children.is_empty() || self.group.is_some()
    }

    pub fn accept_text(&mut self, text: &str) -> bool {
        self.inline.add_text(text);
        true
    }

    pub fn accept(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        match place(child) {
            Placement::Inline(leaf) => self.inline.add_leaf(leaf),
            Placement::Run(members) => {
                for member in members {
                    match member {
                        RunMember::Leaf(leaf) => self.inline.add_leaf(leaf),
                        RunMember::Block(node) => {
                            if !self.add_block(node, Breaks::default(), ctx) {
                                log::debug!("Block inside an inline run was dropped");
                            }
                        }
                    }
                }
            }
            Placement::Block(node, breaks) => return self.add_block(node, breaks, ctx),
            Placement::TablePart(part) => return self.add_table_part(part, ctx),
            Placement::Unplaceable(_) => return false,
        }
        true
    }

    /// Appends a block after boxing the pending inline run, with any forced
    /// breaks around it. Returns false when a stray table part is refused by
    /// the anonymous table.
    pub fn add_block(
        &mut self,
        node: LayoutNode,
        breaks: Breaks,
        ctx: &mut ProcessorContext,
    ) -> bool {
        match node {
            LayoutNode::ListItem(item) => self.add_orphan_item(item, ctx),
            LayoutNode::TableCell(_) | LayoutNode::TableRow(_) => {
                let part = ChildResult::new(Display::Block, Contribution::Node(node));
                return self.add_table_part(part, ctx);
            }
            node => {
                self.flush_inline(ctx);
                self.close_group(ctx);
                if let Some(kind) = breaks.before {
                    self.children.push(LayoutNode::area_break(kind));
                }
                self.children.push(node);
                if let Some(kind) = breaks.after {
                    self.children.push(LayoutNode::area_break(kind));
                }
            }
        }
        true
    }

    fn add_table_part(&mut self, part: ChildResult, ctx: &mut ProcessorContext) -> bool {
        self.flush_inline(ctx);
        if !matches!(self.group, Some(AnonymousGroup::Table(_))) {
            self.close_group(ctx);
            self.group = Some(AnonymousGroup::Table(Box::new(TableAssembler::anonymous())));
        }
        match &mut self.group {
            Some(AnonymousGroup::Table(assembler)) => assembler.accept(part, ctx),
            _ => false,
        }
    }

    fn add_orphan_item(&mut self, item: ListItemNode, ctx: &mut ProcessorContext) {
        self.flush_inline(ctx);
        if !matches!(self.group, Some(AnonymousGroup::List(_))) {
            self.close_group(ctx);
            self.group = Some(AnonymousGroup::List(ListNode::new(NodeMetadata::anonymous())));
        }
        if let Some(AnonymousGroup::List(list)) = &mut self.group {
            list.items.push(item);
        }
    }

    /// Boxes the pending inline run into an anonymous paragraph. White space
    /// alone is discarded without closing an open anonymous group.
    pub fn flush_inline(&mut self, ctx: &mut ProcessorContext) {
        if !self.inline.has_non_whitespace() {
            self.inline.clear();
            return;
        }
        self.close_group(ctx);
        self.inline.flush_into(&mut self.children);
    }

    fn close_group(&mut self, ctx: &mut ProcessorContext) {
        match self.group.take() {
            Some(AnonymousGroup::Table(mut assembler)) => {
                self.children.push(assembler.finish_table(ctx).into());
            }
            Some(AnonymousGroup::List(list)) => self.children.push(list.into()),
            None => {}
        }
    }

    /// Blocks finished so far, for immediate hand-off. The pending inline
    /// run and any open anonymous group stay.
    pub fn take_finished(&mut self) -> Vec<LayoutNode> {
        std::mem::take(&mut self.children)
    }

    /// Flushes everything and hands the children over. Safe to call more
    /// than once.
    pub fn finish(&mut self, ctx: &mut ProcessorContext) -> Vec<LayoutNode> {
        self.flush_inline(ctx);
        self.close_group(ctx);
        std::mem::take(&mut self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;
    use quire_nodes::{BlockKind, InlineNode, TableCell};
    use quire_style::BreakKind;
    use quire_traits::InMemoryImageResolver;
    use std::sync::Arc;

    fn ctx() -> ProcessorContext {
        ProcessorContext::new(TransformConfig::default(), Arc::new(InMemoryImageResolver::new()))
    }

    fn div() -> LayoutNode {
        LayoutNode::block(BlockKind::Division, NodeMetadata::default())
    }

    #[test]
    fn block_interrupts_inline_run() {
        let mut ctx = ctx();
        let mut content = BlockContent::default();
        content.accept_text("A ");
        content.accept(
            ChildResult::new(
                Display::Inline,
                Contribution::Run(vec![RunMember::Leaf(InlineNode::text("bold"))]),
            ),
            &mut ctx,
        );
        content.accept(ChildResult::new(Display::Block, Contribution::Node(div())), &mut ctx);
        content.accept_text("B");
        let children = content.finish(&mut ctx);
        let kinds: Vec<&str> = children.iter().map(LayoutNode::kind).collect();
        assert_eq!(kinds, vec!["paragraph", "block", "paragraph"]);
        assert_eq!(children[0].text_content(), "A bold");
        assert_eq!(children[2].text_content(), "B");
    }

    #[test]
    fn forced_breaks_surround_the_block() {
        let mut ctx = ctx();
        let mut content = BlockContent::default();
        let mut child = ChildResult::new(Display::Block, Contribution::Node(div()));
        child.breaks.before = Some(BreakKind::Page);
        child.breaks.after = Some(BreakKind::Right);
        content.accept(child, &mut ctx);
        let children = content.finish(&mut ctx);
        let kinds: Vec<&str> = children.iter().map(LayoutNode::kind).collect();
        assert_eq!(kinds, vec!["area-break", "block", "area-break"]);
    }

    #[test]
    fn orphan_cells_share_one_anonymous_table() {
        let mut ctx = ctx();
        let mut content = BlockContent::default();
        let cell = || {
            ChildResult::new(Display::TableCell, Contribution::Node(TableCell::default().into()))
        };
        content.accept(cell(), &mut ctx);
        content.accept_text("  ");
        content.accept(cell(), &mut ctx);
        content.accept_text("after");
        let children = content.finish(&mut ctx);
        assert_eq!(children.len(), 2);
        match &children[0] {
            LayoutNode::Table(table) => {
                assert!(table.meta.anonymous);
                assert_eq!(table.body.rows.len(), 1);
                assert_eq!(table.body.rows[0].cells.len(), 2);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn stray_rows_report_their_placement() {
        let mut ctx = ctx();
        let mut content = BlockContent::default();
        let row = LayoutNode::TableRow(quire_nodes::TableRow::default());
        assert!(content.add_block(row, Breaks::default(), &mut ctx));
        assert!(content.add_block(div(), Breaks::default(), &mut ctx));
        let children = content.finish(&mut ctx);
        let kinds: Vec<&str> = children.iter().map(LayoutNode::kind).collect();
        assert_eq!(kinds, vec!["table", "block"]);
    }

    #[test]
    fn orphan_items_share_one_anonymous_list() {
        let mut ctx = ctx();
        let mut content = BlockContent::default();
        let item = || {
            ChildResult::new(
                Display::ListItem,
                Contribution::Node(ListItemNode::new(NodeMetadata::default()).into()),
            )
        };
        content.accept(item(), &mut ctx);
        content.accept(item(), &mut ctx);
        content.accept(ChildResult::new(Display::Block, Contribution::Node(div())), &mut ctx);
        let children = content.finish(&mut ctx);
        assert_eq!(children.len(), 2);
        match &children[0] {
            LayoutNode::List(list) => assert_eq!(list.items.len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
        assert!(content.finish(&mut ctx).is_empty());
    }
}
