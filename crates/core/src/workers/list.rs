use super::{node_meta, ElementWorker, Shell};
use crate::block::BlockContent;
use crate::context::{ProcessorContext, StackFrame};
use crate::dispatch::ChildResult;
use crate::element::Element;
use crate::inline::InlineBuffer;
use crate::list::ListAssembler;
use quire_nodes::{LayoutNode, ListItemNode, ListNode, Role};
use quire_style::{Display, ListStyleType};
use quire_traits::{ApplyPhase, ApplyTarget};

/// Marker style: the resolved `list-style-type`, then the legacy `type`
/// attribute, then the element's default.
fn marker_for(element: &Element) -> ListStyleType {
    let fallback = || {
        element
            .attr("type")
            .and_then(ListStyleType::from_html_type)
            .unwrap_or(if element.name == "ol" {
                ListStyleType::Decimal
            } else {
                ListStyleType::Disc
            })
    };
    match element.styles.lookup::<ListStyleType>("list-style-type") {
        Ok(Some(marker)) => marker,
        Ok(None) => fallback(),
        Err(e) => {
            log::warn!("{} on <{}>", e, element.name);
            fallback()
        }
    }
}

/// `ul`, `ol`, `menu`, `dir`.
#[derive(Debug)]
pub struct ListWorker {
    shell: Shell,
    assembler: ListAssembler,
}

impl ListWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let mut list = ListNode::new(node_meta(element, Role::List, ctx));
        list.marker = marker_for(element);
        list.start = element.parse_attr("start");
        list.reversed = element.has_attr("reversed");
        Self {
            shell: Shell::new(list.into(), element),
            assembler: ListAssembler::new(InlineBuffer::for_styles(&element.styles)),
        }
    }
}

impl ElementWorker for ListWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn child_frame(&self, _frame: &StackFrame) -> StackFrame {
        StackFrame::list()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.assembler.accept_text(text)
    }

    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        self.assembler.accept(child, ctx)
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {
        let items = self.assembler.finish();
        if let Some(LayoutNode::List(list)) = self.shell.node_mut() {
            list.items.extend(items);
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

/// `li` and `display: list-item`. A `value` attribute overrides the ordinal.
#[derive(Debug)]
pub struct ListItemWorker {
    shell: Shell,
    content: BlockContent,
}

impl ListItemWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let mut item = ListItemNode::new(node_meta(element, Role::ListItem, ctx));
        item.ordinal = element.parse_attr("value");
        Self {
            shell: Shell::new(item.into(), element),
            content: BlockContent::for_styles(&element.styles),
        }
    }
}

impl ElementWorker for ListItemWorker {
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
