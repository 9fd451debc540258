use super::ElementWorker;
use crate::context::ProcessorContext;
use crate::dispatch::{place, ChildResult, Contribution, Placement, RunMember};
use crate::element::Element;
use crate::inline::InlineBuffer;
use crate::table::TableAssembler;
use quire_nodes::{InlineNode, LayoutNode};
use quire_style::Display;
use quire_traits::{ApplyPhase, ApplyTarget};

/// An inline element without a box of its own (`span`, `b`, `a`, ...).
///
/// Its content is flattened into a run group: the leaves it produced, in
/// order, interleaved with any block-level results that the parent has to
/// place as blocks. An anchor's link target is attached to every text leaf
/// that does not already carry one.
#[derive(Debug)]
pub struct SpanWorker {
    display: Display,
    inline: InlineBuffer,
    members: Vec<RunMember>,
    id: Option<String>,
    lang: Option<String>,
    link: Option<String>,
}

impl SpanWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let link = match element.name.as_str() {
            "a" => element.attr_text("href").map(|href| {
                if href.starts_with('#') {
                    href
                } else {
                    ctx.config.resolve_uri(&href)
                }
            }),
            _ => None,
        };
        Self {
            display: element.display(),
            inline: InlineBuffer::for_styles(&element.styles),
            members: Vec::new(),
            id: element.id(),
            lang: element.lang(),
            link,
        }
    }

    fn take_leaves(&mut self) {
        let leaves = self.inline.take_leaves();
        self.members.extend(leaves.into_iter().map(RunMember::Leaf));
    }

    fn push_block(&mut self, node: LayoutNode) {
        self.take_leaves();
        self.members.push(RunMember::Block(node));
    }

    fn leaves_mut(&mut self) -> impl Iterator<Item = &mut InlineNode> {
        self.members.iter_mut().filter_map(|member| match member {
            RunMember::Leaf(leaf) => Some(leaf),
            RunMember::Block(_) => None,
        })
    }

    fn annotate(&mut self) {
        let mut id = self.id.take();
        let lang = self.lang.clone();
        let link = self.link.clone();
        for meta in self.leaves_mut().filter_map(InlineNode::meta_mut) {
            if meta.id.is_none() {
                meta.id = id.take();
            }
            if meta.lang.is_none() {
                meta.lang = lang.clone();
            }
            if meta.link.is_none() {
                meta.link = link.clone();
            }
        }
        self.id = id;
    }
}

impl ElementWorker for SpanWorker {
    fn display(&self) -> Display {
        self.display
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.inline.add_text(text);
        true
    }

    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
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
            Placement::Block(node, breaks) => {
                if let Some(kind) = breaks.before {
                    self.push_block(LayoutNode::area_break(kind));
                }
                self.push_block(node);
                if let Some(kind) = breaks.after {
                    self.push_block(LayoutNode::area_break(kind));
                }
            }
            Placement::TablePart(part) => {
                let table = TableAssembler::wrap_orphan(part, ctx);
                self.push_block(table);
            }
            Placement::Unplaceable(_) => return false,
        }
        true
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {
        self.take_leaves();
        self.annotate();
    }

    fn result(&self) -> Option<&LayoutNode> {
        None
    }

    fn style_target(&mut self, phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        match phase {
            ApplyPhase::Start => None,
            ApplyPhase::End => Some(ApplyTarget::Leaves(self.leaves_mut().collect())),
        }
    }

    fn take_result(&mut self) -> ChildResult {
        ChildResult::new(self.display, Contribution::Run(std::mem::take(&mut self.members)))
    }
}

/// `br`: a forced line break in the enclosing run.
#[derive(Debug, Default)]
pub struct LineBreakWorker;

impl ElementWorker for LineBreakWorker {
    fn display(&self) -> Display {
        Display::Inline
    }

    fn accept_text(&mut self, _text: &str, _ctx: &mut ProcessorContext) -> bool {
        false
    }

    fn accept_child(&mut self, _child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        false
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {}

    fn result(&self) -> Option<&LayoutNode> {
        None
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        None
    }

    fn take_result(&mut self) -> ChildResult {
        ChildResult::new(Display::Inline, Contribution::LineBreak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;
    use quire_nodes::{BlockKind, NodeMetadata};
    use quire_traits::InMemoryImageResolver;
    use std::sync::Arc;

    fn ctx() -> ProcessorContext {
        ProcessorContext::new(
            TransformConfig {
                base_uri: Some("https://example.com/docs".into()),
                ..Default::default()
            },
            Arc::new(InMemoryImageResolver::new()),
        )
    }

    fn members(worker: &mut SpanWorker) -> Vec<RunMember> {
        match worker.take_result().content {
            Contribution::Run(members) => members,
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn anchor_links_every_leaf() {
        let mut ctx = ctx();
        let element = Element::new("a").with_attr("href", "page.html").with_attr("id", "ref");
        let mut worker = SpanWorker::new(&element, &mut ctx);
        worker.accept_text("see ", &mut ctx);
        let inner = ChildResult::new(
            Display::Inline,
            Contribution::Run(vec![RunMember::Leaf(InlineNode::text("here"))]),
        );
        assert!(worker.accept_child(inner, &mut ctx));
        worker.end(&element, &mut ctx);
        let leaves = members(&mut worker);
        assert_eq!(leaves.len(), 2);
        let metas: Vec<_> = leaves
            .into_iter()
            .filter_map(|m| match m {
                RunMember::Leaf(InlineNode::Text(run)) => Some(run.meta),
                _ => None,
            })
            .collect();
        let target = Some("https://example.com/docs/page.html");
        assert!(metas.iter().all(|m| m.link.as_deref() == target));
        assert_eq!(metas[0].id.as_deref(), Some("ref"));
        assert_eq!(metas[1].id, None);
    }

    #[test]
    fn fragment_links_are_not_resolved() {
        let mut ctx = ctx();
        let element = Element::new("a").with_attr("href", "#top");
        let mut worker = SpanWorker::new(&element, &mut ctx);
        worker.accept_text("up", &mut ctx);
        worker.end(&element, &mut ctx);
        match members(&mut worker).first() {
            Some(RunMember::Leaf(InlineNode::Text(run))) => {
                assert_eq!(run.meta.link.as_deref(), Some("#top"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn block_inside_span_splits_the_run() {
        let mut ctx = ctx();
        let element = Element::new("span");
        let mut worker = SpanWorker::new(&element, &mut ctx);
        worker.accept_text("a", &mut ctx);
        let block = ChildResult::new(
            Display::Block,
            Contribution::Node(LayoutNode::block(BlockKind::Division, NodeMetadata::default())),
        );
        assert!(worker.accept_child(block, &mut ctx));
        worker.accept_text("b", &mut ctx);
        worker.end(&element, &mut ctx);
        worker.end(&element, &mut ctx);
        let kinds: Vec<&str> = members(&mut worker)
            .iter()
            .map(|m| match m {
                RunMember::Leaf(_) => "leaf",
                RunMember::Block(_) => "block",
            })
            .collect();
        assert_eq!(kinds, vec!["leaf", "block", "leaf"]);
    }

    #[test]
    fn line_break_contributes_a_break() {
        let mut worker = LineBreakWorker;
        assert!(!worker.accept_text("x", &mut ctx()));
        assert_eq!(worker.take_result().content, Contribution::LineBreak);
    }
}
