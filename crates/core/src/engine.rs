//! The traversal engine: a stack of workers mirroring the open elements.
//!
//! The engine only dispatches. `enter` starts a worker, `text` hands a
//! fragment to the worker that owns the current content, and `exit` ends the
//! top worker and routes its result to its parent. Everything else happens
//! inside the workers.

use crate::applier::DeclaredStyleApplier;
use crate::config::TransformConfig;
use crate::context::{ProcessorContext, StackFrame};
use crate::dispatch::Contribution;
use crate::element::{DocumentEvent, Element};
use crate::error::TransformError;
use crate::workers::{RootWorker, Worker};
use quire_nodes::{Document, LayoutNode};
use quire_traits::{
    ApplyPhase, DocumentSink, ImageResolver, InMemoryImageResolver, StyleApplier, StyleContext,
};
use std::sync::Arc;

struct StackEntry {
    worker: Worker,
    element: Element,
    frame: StackFrame,
    /// Index of the entry that receives this element's text and children.
    /// A pass-through worker shares its parent's target.
    target: usize,
}

/// Drives one transformation run.
pub struct Transformer<'a> {
    stack: Vec<StackEntry>,
    ctx: ProcessorContext,
    applier: Box<dyn StyleApplier + 'a>,
    sink: Option<Box<dyn DocumentSink + 'a>>,
    /// Open elements swallowed by a capturing worker.
    capture_depth: usize,
}

impl<'a> Transformer<'a> {
    pub fn builder() -> TransformerBuilder<'a> {
        TransformerBuilder::new()
    }

    fn new(
        ctx: ProcessorContext,
        applier: Box<dyn StyleApplier + 'a>,
        sink: Option<Box<dyn DocumentSink + 'a>>,
    ) -> Self {
        let element = Element::new("#document");
        let root = StackEntry {
            worker: Worker::Root(RootWorker::new(&element, &ctx)),
            element,
            frame: StackFrame::default(),
            target: 0,
        };
        Self {
            stack: vec![root],
            ctx,
            applier,
            sink,
            capture_depth: 0,
        }
    }

    /// Number of open elements.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1 + self.capture_depth
    }

    pub fn context(&self) -> &ProcessorContext {
        &self.ctx
    }

    /// The node under construction that the next child would be added to.
    pub fn current_result(&self) -> Option<&LayoutNode> {
        let top = self.stack.last()?;
        self.stack.get(top.target)?.worker.result()
    }

    fn top_captures(&self) -> bool {
        self.capture_depth > 0 || self.stack.last().is_some_and(|e| e.worker.captures_subtree())
    }

    fn capture(&mut self, event: &DocumentEvent) {
        if let Some(top) = self.stack.last_mut() {
            top.worker.capture(event);
        }
    }

    pub fn enter(&mut self, element: Element) {
        if self.top_captures() {
            self.capture(&DocumentEvent::Enter(element));
            self.capture_depth += 1;
            return;
        }
        let parent_target = self.stack.last().map(|e| e.target).unwrap_or(0);
        let frame = match self.stack.get(parent_target) {
            Some(owner) => owner.worker.child_frame(&owner.frame),
            None => StackFrame::default(),
        };
        let worker = Worker::start(&element, &frame, &mut self.ctx);
        let index = self.stack.len();
        let forwards = worker.forwards();
        self.stack.push(StackEntry {
            worker,
            element,
            frame,
            target: if forwards { parent_target } else { index },
        });
        if !forwards {
            self.apply_styles(index, ApplyPhase::Start);
        }
    }

    pub fn text(&mut self, text: &str) {
        if self.top_captures() {
            self.capture(&DocumentEvent::Text(text.to_string()));
            return;
        }
        let target = self.stack.last().map(|e| e.target).unwrap_or(0);
        let Some(owner) = self.stack.get_mut(target) else {
            return;
        };
        if !owner.worker.accept_text(text, &mut self.ctx) && !text.trim().is_empty() {
            log::debug!("Text {:?} dropped by {} worker", text, owner.worker.name());
        }
    }

    pub fn exit(&mut self) -> Result<(), TransformError> {
        if self.capture_depth > 0 {
            self.capture(&DocumentEvent::Exit);
            self.capture_depth -= 1;
            return Ok(());
        }
        if self.stack.len() <= 1 {
            return Err(TransformError::UnbalancedExit);
        }
        let index = self.stack.len() - 1;
        let entry = &mut self.stack[index];
        entry.worker.end(&entry.element, &mut self.ctx);
        if !entry.worker.forwards() {
            self.apply_styles(index, ApplyPhase::End);
        }
        let Some(mut entry) = self.stack.pop() else {
            return Err(TransformError::UnbalancedExit);
        };

        let result = entry.worker.take_result();
        if result.content.is_absent() {
            log::trace!("<{}> contributed nothing", entry.element.name);
            return Ok(());
        }
        let parent = self.stack.last().map(|e| e.target).unwrap_or(0);
        let owner = self
            .stack
            .get_mut(parent)
            .ok_or(TransformError::UnbalancedExit)?;
        if !owner.worker.accept_child(result, &mut self.ctx)? {
            log::debug!(
                "<{}> does not fit into a {} worker; dropped",
                entry.element.name,
                owner.worker.name()
            );
        }
        if parent == 0 && self.ctx.config.immediate_flush {
            self.flush_finished();
        }
        Ok(())
    }

    pub fn dispatch(&mut self, event: DocumentEvent) -> Result<(), TransformError> {
        match event {
            DocumentEvent::Enter(element) => self.enter(element),
            DocumentEvent::Text(text) => self.text(&text),
            DocumentEvent::Exit => self.exit()?,
        }
        Ok(())
    }

    /// Runs a whole event stream and returns the document.
    pub fn transform<I>(mut self, events: I) -> Result<Document, TransformError>
    where
        I: IntoIterator<Item = DocumentEvent>,
    {
        for event in events {
            self.dispatch(event)?;
        }
        self.finish()
    }

    /// Ends the document. In immediate-flush mode the remaining top-level
    /// blocks go to the sink and the returned document has no children.
    pub fn finish(mut self) -> Result<Document, TransformError> {
        let open = self.depth();
        if open > 0 {
            return Err(TransformError::Unclosed(open));
        }
        let mut root = self.stack.pop().ok_or(TransformError::UnbalancedExit)?;
        root.worker.end(&root.element, &mut self.ctx);
        let mut children = match root.worker.take_result().content {
            Contribution::Node(LayoutNode::Block(block)) => block.children,
            _ => Vec::new(),
        };
        if self.ctx.config.immediate_flush {
            if let Some(sink) = self.sink.as_mut() {
                for node in children.drain(..) {
                    sink.accept(node);
                }
            }
        }
        let lang = self.ctx.lang.take().or_else(|| self.ctx.config.default_lang.clone());
        log::debug!("Transformation finished with {} top-level block(s)", children.len());
        Ok(Document {
            title: self.ctx.title.take(),
            lang,
            children,
        })
    }

    fn flush_finished(&mut self) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Some(Worker::Root(root)) = self.stack.first_mut().map(|e| &mut e.worker) {
            for node in root.take_finished() {
                sink.accept(node);
            }
        }
    }

    fn apply_styles(&mut self, index: usize, phase: ApplyPhase) {
        let (ancestors, rest) = self.stack.split_at_mut(index);
        let Some(entry) = rest.first_mut() else {
            return;
        };
        let context = StyleContext::new(
            phase,
            ancestors.iter().rev().map(|e| &e.element.styles).collect(),
        );
        if let Some(target) = entry.worker.style_target(phase) {
            self.applier.apply(&entry.element.styles, target, &context);
        }
    }
}

/// Assembles a [`Transformer`].
pub struct TransformerBuilder<'a> {
    config: TransformConfig,
    images: Option<Arc<dyn ImageResolver>>,
    applier: Option<Box<dyn StyleApplier + 'a>>,
    sink: Option<Box<dyn DocumentSink + 'a>>,
}

impl Default for TransformerBuilder<'_> {
    fn default() -> Self {
        Self {
            config: TransformConfig::default(),
            images: None,
            applier: None,
            sink: None,
        }
    }
}

impl<'a> TransformerBuilder<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: TransformConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads the configuration from JSON (camelCase keys, all optional).
    pub fn with_config_json(mut self, json: &str) -> Result<Self, TransformError> {
        self.config = TransformConfig::from_json(json)?;
        Ok(self)
    }

    pub fn with_image_resolver(mut self, images: Arc<dyn ImageResolver>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_style_applier(mut self, applier: impl StyleApplier + 'a) -> Self {
        self.applier = Some(Box::new(applier));
        self
    }

    /// Receives top-level blocks as they finish when `immediate_flush` is on.
    pub fn with_sink(mut self, sink: impl DocumentSink + 'a) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Transformer<'a> {
        if self.config.immediate_flush && self.sink.is_none() {
            log::warn!("Immediate flush requested without a sink; blocks are returned at the end");
        }
        let images = self
            .images
            .unwrap_or_else(|| Arc::new(InMemoryImageResolver::new()));
        log::debug!(
            "Transformer ready (tagged: {}, immediate flush: {}, images: {})",
            self.config.tagged,
            self.config.immediate_flush,
            images.name()
        );
        let applier = self
            .applier
            .unwrap_or_else(|| Box::new(DeclaredStyleApplier::new()));
        let config = if self.sink.is_none() {
            TransformConfig {
                immediate_flush: false,
                ..self.config
            }
        } else {
            self.config
        };
        Transformer::new(ProcessorContext::new(config, images), applier, self.sink)
    }
}
