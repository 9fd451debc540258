use super::{node_meta, ElementWorker, Shell};
use crate::block::BlockContent;
use crate::context::ProcessorContext;
use crate::dispatch::ChildResult;
use crate::element::Element;
use quire_nodes::{BlockKind, BlockNode, LayoutNode, NodeMetadata, ParagraphNode, Role};
use quire_style::Display;
use quire_traits::{ApplyPhase, ApplyTarget};

/// The document itself: a block container whose children become the
/// document's top-level blocks.
#[derive(Debug)]
pub struct RootWorker {
    shell: Shell,
    content: BlockContent,
}

impl RootWorker {
    pub fn new(element: &Element, ctx: &ProcessorContext) -> Self {
        let meta = NodeMetadata {
            role: ctx.config.tagged.then_some(Role::Document),
            ..Default::default()
        };
        Self {
            shell: Shell::new(LayoutNode::block(BlockKind::Document, meta), element),
            content: BlockContent::for_styles(&element.styles),
        }
    }

    /// Top-level blocks finished so far, for immediate hand-off.
    pub fn take_finished(&mut self) -> Vec<LayoutNode> {
        self.content.take_finished()
    }
}

impl ElementWorker for RootWorker {
    fn display(&self) -> Display {
        Display::Block
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.content.accept_text(text)
    }

    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        self.content.accept(child, ctx)
    }

    fn end(&mut self, _element: &Element, ctx: &mut ProcessorContext) {
        self.shell.finish_children(&mut self.content, ctx);
    }

    fn result(&self) -> Option<&LayoutNode> {
        self.shell.node()
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        self.shell.style_target()
    }

    fn take_result(&mut self) -> ChildResult {
        self.shell.take()
    }
}

/// A generic block container (`div`, `section`, `caption`, inline-block
/// elements, ...). A positive `column-count` turns it into a multi-column
/// container.
#[derive(Debug)]
pub struct BlockWorker {
    shell: Shell,
    content: BlockContent,
}

impl BlockWorker {
    pub fn new(element: &Element, role: Role, ctx: &mut ProcessorContext) -> Self {
        let kind = match element.styles.column_count() {
            Ok(Some(count)) if count > 1 => BlockKind::MultiColumn { count },
            Ok(_) => BlockKind::Division,
            Err(e) => {
                log::warn!("{} on <{}>; using a single column", e, element.name);
                BlockKind::Division
            }
        };
        let node = LayoutNode::block(kind, node_meta(element, role, ctx));
        Self {
            shell: Shell::new(node, element),
            content: BlockContent::for_styles(&element.styles),
        }
    }
}

impl ElementWorker for BlockWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.content.accept_text(text)
    }

    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        self.content.accept(child, ctx)
    }

    fn end(&mut self, _element: &Element, ctx: &mut ProcessorContext) {
        self.shell.finish_children(&mut self.content, ctx);
    }

    fn result(&self) -> Option<&LayoutNode> {
        self.shell.node()
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        self.shell.style_target()
    }

    fn take_result(&mut self) -> ChildResult {
        self.shell.take()
    }
}

/// `p` and `h1`..`h6`. Stays a paragraph while it only receives inline
/// content; a block child turns it into a block container whose inline
/// runs become anonymous paragraphs.
#[derive(Debug)]
pub struct ParagraphWorker {
    shell: Shell,
    content: BlockContent,
}

impl ParagraphWorker {
    pub fn new(element: &Element, role: Role, ctx: &mut ProcessorContext) -> Self {
        let node = LayoutNode::Paragraph(ParagraphNode {
            meta: node_meta(element, role, ctx),
            children: Vec::new(),
        });
        Self {
            shell: Shell::new(node, element),
            content: BlockContent::for_styles(&element.styles),
        }
    }

    fn promote(&mut self, ctx: &mut ProcessorContext) {
        let children = self.content.finish(ctx);
        let Some(node) = self.shell.node_mut() else {
            return;
        };
        let meta = match node {
            LayoutNode::Paragraph(paragraph) => Some(std::mem::take(&mut paragraph.meta)),
            _ => None,
        };
        match meta {
            Some(meta) => {
                log::trace!("Paragraph with block content becomes a block container");
                *node = LayoutNode::Block(BlockNode {
                    meta,
                    kind: BlockKind::Division,
                    children,
                });
            }
            None => {
                if let Some(existing) = node.block_children_mut() {
                    existing.extend(children);
                }
            }
        }
    }
}

impl ElementWorker for ParagraphWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.content.accept_text(text)
    }

    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        self.content.accept(child, ctx)
    }

    fn end(&mut self, _element: &Element, ctx: &mut ProcessorContext) {
        if self.content.has_blocks() {
            self.promote(ctx);
            return;
        }
        if let Some(LayoutNode::Paragraph(paragraph)) = self.shell.node_mut() {
            self.content.inline_mut().flush_into_paragraph(&mut paragraph.children);
        }
    }

    fn result(&self) -> Option<&LayoutNode> {
        self.shell.node()
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        self.shell.style_target()
    }

    fn take_result(&mut self) -> ChildResult {
        self.shell.take()
    }
}
