//! Workers that contribute no node of their own.

use super::{collapse_whitespace, ElementWorker};
use crate::context::ProcessorContext;
use crate::dispatch::{ChildResult, Contribution};
use crate::element::{DocumentEvent, Element};
use quire_nodes::LayoutNode;
use quire_style::Display;
use quire_traits::{ApplyPhase, ApplyTarget};

/// `html`, `body` and `display: contents`. The engine forwards this
/// element's text and children to the closest ancestor with a box.
#[derive(Debug)]
pub struct PassThroughWorker {
    display: Display,
}

impl PassThroughWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        if matches!(element.name.as_str(), "html" | "body") && ctx.lang.is_none() {
            ctx.lang = element.lang();
        }
        Self {
            display: element.display(),
        }
    }
}

impl ElementWorker for PassThroughWorker {
    fn display(&self) -> Display {
        self.display
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
        ChildResult::new(self.display, Contribution::Absent)
    }
}

/// `head`, `title`, `style`, `script` and the other document metadata
/// elements. The subtree is consumed here; only the first `title` text is
/// kept, as the document title.
#[derive(Debug)]
pub struct MetadataWorker {
    is_title: bool,
    /// For each open descendant: whether it is a `title`.
    open: Vec<bool>,
    title: String,
    title_done: bool,
}

impl MetadataWorker {
    pub fn new(element: &Element) -> Self {
        Self {
            is_title: element.name == "title",
            open: Vec::new(),
            title: String::new(),
            title_done: false,
        }
    }

    fn in_title(&self) -> bool {
        !self.title_done && self.open.last().copied().unwrap_or(self.is_title)
    }
}

impl ElementWorker for MetadataWorker {
    fn display(&self) -> Display {
        Display::None
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        if self.in_title() {
            self.title.push_str(text);
        }
        true
    }

    fn accept_child(&mut self, _child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        true
    }

    fn end(&mut self, _element: &Element, ctx: &mut ProcessorContext) {
        let title = collapse_whitespace(&std::mem::take(&mut self.title));
        if !title.is_empty() && ctx.title.is_none() {
            ctx.title = Some(title);
        }
    }

    fn result(&self) -> Option<&LayoutNode> {
        None
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        None
    }

    fn take_result(&mut self) -> ChildResult {
        ChildResult::new(Display::None, Contribution::Absent)
    }

    fn captures_subtree(&self) -> bool {
        true
    }

    fn capture(&mut self, event: &DocumentEvent) {
        match event {
            DocumentEvent::Enter(element) => self.open.push(element.name == "title"),
            DocumentEvent::Text(text) => {
                if self.in_title() {
                    self.title.push_str(text);
                }
            }
            DocumentEvent::Exit => {
                if self.open.pop() == Some(true) && !self.title.trim().is_empty() {
                    self.title_done = true;
                }
            }
        }
    }
}

/// `display: none`: the element and its subtree are skipped.
#[derive(Debug, Default)]
pub struct HiddenWorker;

impl ElementWorker for HiddenWorker {
    fn display(&self) -> Display {
        Display::None
    }

    fn accept_text(&mut self, _text: &str, _ctx: &mut ProcessorContext) -> bool {
        true
    }

    fn accept_child(&mut self, _child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        true
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {}

    fn result(&self) -> Option<&LayoutNode> {
        None
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        None
    }

    fn take_result(&mut self) -> ChildResult {
        ChildResult::new(Display::None, Contribution::Absent)
    }

    fn captures_subtree(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;
    use quire_traits::InMemoryImageResolver;
    use std::sync::Arc;

    fn ctx() -> ProcessorContext {
        ProcessorContext::new(TransformConfig::default(), Arc::new(InMemoryImageResolver::new()))
    }

    #[test]
    fn head_keeps_the_first_title() {
        let mut ctx = ctx();
        let head = Element::new("head");
        let mut worker = MetadataWorker::new(&head);
        worker.capture(&DocumentEvent::Enter(Element::new("title")));
        worker.capture(&DocumentEvent::text("  Annual\n report "));
        worker.capture(&DocumentEvent::Exit);
        worker.capture(&DocumentEvent::Enter(Element::new("style")));
        worker.capture(&DocumentEvent::text("p { color: red }"));
        worker.capture(&DocumentEvent::Exit);
        worker.capture(&DocumentEvent::Enter(Element::new("title")));
        worker.capture(&DocumentEvent::text("Second"));
        worker.capture(&DocumentEvent::Exit);
        worker.end(&head, &mut ctx);
        assert_eq!(ctx.title.as_deref(), Some("Annual report"));
        assert!(worker.take_result().content.is_absent());
    }

    #[test]
    fn bare_title_sets_the_title() {
        let mut ctx = ctx();
        let title = Element::new("title");
        let mut worker = MetadataWorker::new(&title);
        worker.accept_text("Doc", &mut ctx);
        worker.end(&title, &mut ctx);
        assert_eq!(ctx.title.as_deref(), Some("Doc"));
    }

    #[test]
    fn html_lang_is_recorded_once() {
        let mut ctx = ctx();
        let html = Element::new("html").with_attr("lang", "de");
        let worker = PassThroughWorker::new(&html, &mut ctx);
        let body = Element::new("body").with_attr("lang", "fr");
        PassThroughWorker::new(&body, &mut ctx);
        assert_eq!(ctx.lang.as_deref(), Some("de"));
        assert_eq!(worker.display(), Display::Inline);
    }
}
