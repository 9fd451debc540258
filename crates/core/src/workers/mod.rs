//! The worker family: one worker per element occurrence.
//!
//! A worker is started when its element is entered, receives the element's
//! text and finished children in document order, and is ended when the
//! element is exited. Its contribution is then handed to the parent as a
//! [`ChildResult`]; parents switch on that tag and never look at the child
//! worker itself.

mod container;
mod form;
mod inline;
mod list;
mod replaced;
mod table;
mod transparent;

pub use container::{BlockWorker, ParagraphWorker, RootWorker};
pub use form::{
    ButtonWorker, InputWorker, OptGroupWorker, OptionWorker, SelectWorker, TextAreaWorker,
};
pub use inline::{LineBreakWorker, SpanWorker};
pub use list::{ListItemWorker, ListWorker};
pub use replaced::{ReplacedWorker, SvgWorker, PX_TO_PT};
pub use table::{
    CellWorker, ColumnGroupWorker, ColumnWorker, RowGroupWorker, RowWorker, TableWorker,
};
pub use transparent::{HiddenWorker, MetadataWorker, PassThroughWorker};

use crate::block::BlockContent;
use crate::context::{ProcessorContext, SlotToken, StackFrame};
use crate::dispatch::{Breaks, ChildResult, Contribution, ControlKind};
use crate::element::{DocumentEvent, Element};
use crate::error::TransformError;
use itertools::Itertools;
use quire_nodes::{LayoutNode, NodeMetadata, Role};
use quire_style::Display;
use quire_traits::{ApplyPhase, ApplyTarget};

/// The per-element contract driven by the engine.
pub trait ElementWorker {
    /// The element's effective display class.
    fn display(&self) -> Display;

    /// The frame handed to the workers of this element's children.
    fn child_frame(&self, _frame: &StackFrame) -> StackFrame {
        StackFrame::default()
    }

    fn accept_text(&mut self, text: &str, ctx: &mut ProcessorContext) -> bool;

    /// Consumes a finished child. `false` signals a structural mismatch;
    /// the child's contribution is dropped.
    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool;

    /// Flushes pending content and finalizes assembly. A second call must
    /// not duplicate content.
    fn end(&mut self, element: &Element, ctx: &mut ProcessorContext);

    /// The node under construction, `None` for workers without a box.
    fn result(&self) -> Option<&LayoutNode>;

    /// What the style applier may mutate in `phase`.
    fn style_target(&mut self, phase: ApplyPhase) -> Option<ApplyTarget<'_>>;

    /// Moves the contribution out for the parent.
    fn take_result(&mut self) -> ChildResult;

    /// Whether descendant events go to `capture` instead of getting workers
    /// of their own.
    fn captures_subtree(&self) -> bool {
        false
    }

    fn capture(&mut self, _event: &DocumentEvent) {}
}

/// The node a worker builds, plus what its parent needs to place it.
#[derive(Debug)]
pub struct Shell {
    node: Option<LayoutNode>,
    display: Display,
    breaks: Breaks,
    control: Option<ControlKind>,
    token: Option<SlotToken>,
}

impl Shell {
    pub fn new(node: LayoutNode, element: &Element) -> Self {
        Self {
            node: Some(node),
            ..Self::empty(element)
        }
    }

    /// A shell that will contribute nothing.
    pub fn empty(element: &Element) -> Self {
        Self {
            node: None,
            display: element.display(),
            breaks: Breaks::from_styles(&element.styles),
            control: None,
            token: None,
        }
    }

    pub fn with_control(mut self, control: ControlKind) -> Self {
        self.control = Some(control);
        self
    }

    pub fn with_token(mut self, token: SlotToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn node(&self) -> Option<&LayoutNode> {
        self.node.as_ref()
    }

    pub fn node_mut(&mut self) -> Option<&mut LayoutNode> {
        self.node.as_mut()
    }

    pub fn style_target(&mut self) -> Option<ApplyTarget<'_>> {
        self.node.as_mut().map(ApplyTarget::Node)
    }

    /// Appends the finished content of a block container to the node's
    /// block children.
    pub fn finish_children(&mut self, content: &mut BlockContent, ctx: &mut ProcessorContext) {
        let children = content.finish(ctx);
        match self.node.as_mut().and_then(LayoutNode::block_children_mut) {
            Some(target) => target.extend(children),
            None if !children.is_empty() => {
                log::debug!("Dropped {} block(s) without a container", children.len());
            }
            None => {}
        }
    }

    pub fn take(&mut self) -> ChildResult {
        let content = match self.node.take() {
            Some(node) => Contribution::Node(node),
            None => Contribution::Absent,
        };
        ChildResult {
            display: self.display,
            control: self.control,
            token: self.token,
            breaks: self.breaks,
            content,
        }
    }
}

/// Metadata every declared node starts with.
pub fn node_meta(element: &Element, role: Role, ctx: &ProcessorContext) -> NodeMetadata {
    NodeMetadata {
        id: element.id(),
        lang: element.lang(),
        role: ctx.config.tagged.then_some(role),
        ..Default::default()
    }
}

/// Reads a non-negative pixel length attribute (`"120"` or `"120px"`).
pub(crate) fn pixel_attr(element: &Element, name: &str) -> Option<f32> {
    let raw = element.attr_text(name)?;
    let number = raw.strip_suffix("px").unwrap_or(&raw).trim();
    match number.parse::<f32>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            log::warn!("Ignoring invalid {}=\"{}\" on <{}>", name, raw, element.name);
            None
        }
    }
}

/// Collapses white space the way option labels and titles are read.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Static dispatch over every worker kind.
#[derive(Debug)]
pub enum Worker {
    Root(RootWorker),
    Block(BlockWorker),
    Paragraph(ParagraphWorker),
    Span(SpanWorker),
    LineBreak(LineBreakWorker),
    Table(TableWorker),
    RowGroup(RowGroupWorker),
    Row(RowWorker),
    Cell(CellWorker),
    ColumnGroup(ColumnGroupWorker),
    Column(ColumnWorker),
    List(ListWorker),
    ListItem(ListItemWorker),
    Replaced(ReplacedWorker),
    Svg(SvgWorker),
    Input(InputWorker),
    TextArea(TextAreaWorker),
    Select(SelectWorker),
    OptGroup(OptGroupWorker),
    Choice(OptionWorker),
    Button(ButtonWorker),
    PassThrough(PassThroughWorker),
    Metadata(MetadataWorker),
    Hidden(HiddenWorker),
}

macro_rules! delegate {
    ($self:ident, $worker:ident => $body:expr) => {
        match $self {
            Worker::Root($worker) => $body,
            Worker::Block($worker) => $body,
            Worker::Paragraph($worker) => $body,
            Worker::Span($worker) => $body,
            Worker::LineBreak($worker) => $body,
            Worker::Table($worker) => $body,
            Worker::RowGroup($worker) => $body,
            Worker::Row($worker) => $body,
            Worker::Cell($worker) => $body,
            Worker::ColumnGroup($worker) => $body,
            Worker::Column($worker) => $body,
            Worker::List($worker) => $body,
            Worker::ListItem($worker) => $body,
            Worker::Replaced($worker) => $body,
            Worker::Svg($worker) => $body,
            Worker::Input($worker) => $body,
            Worker::TextArea($worker) => $body,
            Worker::Select($worker) => $body,
            Worker::OptGroup($worker) => $body,
            Worker::Choice($worker) => $body,
            Worker::Button($worker) => $body,
            Worker::PassThrough($worker) => $body,
            Worker::Metadata($worker) => $body,
            Worker::Hidden($worker) => $body,
        }
    };
}

impl Worker {
    /// Short name of the worker kind, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Worker::Root(_) => "root",
            Worker::Block(_) => "block",
            Worker::Paragraph(_) => "paragraph",
            Worker::Span(_) => "span",
            Worker::LineBreak(_) => "line-break",
            Worker::Table(_) => "table",
            Worker::RowGroup(_) => "row-group",
            Worker::Row(_) => "row",
            Worker::Cell(_) => "cell",
            Worker::ColumnGroup(_) => "column-group",
            Worker::Column(_) => "column",
            Worker::List(_) => "list",
            Worker::ListItem(_) => "list-item",
            Worker::Replaced(_) => "replaced",
            Worker::Svg(_) => "svg",
            Worker::Input(_) => "input",
            Worker::TextArea(_) => "textarea",
            Worker::Select(_) => "select",
            Worker::OptGroup(_) => "optgroup",
            Worker::Choice(_) => "option",
            Worker::Button(_) => "button",
            Worker::PassThrough(_) => "pass-through",
            Worker::Metadata(_) => "metadata",
            Worker::Hidden(_) => "hidden",
        }
    }

    /// Pass-through workers have no box; the engine forwards their
    /// operations to the closest ancestor that has one.
    pub fn forwards(&self) -> bool {
        matches!(self, Worker::PassThrough(_))
    }

    pub fn display(&self) -> Display {
        delegate!(self, w => w.display())
    }

    pub fn child_frame(&self, frame: &StackFrame) -> StackFrame {
        delegate!(self, w => w.child_frame(frame))
    }

    pub fn accept_text(&mut self, text: &str, ctx: &mut ProcessorContext) -> bool {
        delegate!(self, w => w.accept_text(text, ctx))
    }

    /// Routes a finished child. An absent contribution is never a valid
    /// child; the engine routes around it before getting here.
    pub fn accept_child(
        &mut self,
        child: ChildResult,
        ctx: &mut ProcessorContext,
    ) -> Result<bool, TransformError> {
        if child.content.is_absent() {
            return Err(TransformError::AbsentResult {
                child: child.display.to_string(),
                parent: self.name().to_string(),
            });
        }
        Ok(delegate!(self, w => w.accept_child(child, ctx)))
    }

    pub fn end(&mut self, element: &Element, ctx: &mut ProcessorContext) {
        delegate!(self, w => w.end(element, ctx))
    }

    pub fn result(&self) -> Option<&LayoutNode> {
        delegate!(self, w => w.result())
    }

    pub fn style_target(&mut self, phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        delegate!(self, w => w.style_target(phase))
    }

    pub fn take_result(&mut self) -> ChildResult {
        delegate!(self, w => w.take_result())
    }

    pub fn captures_subtree(&self) -> bool {
        delegate!(self, w => w.captures_subtree())
    }

    pub fn capture(&mut self, event: &DocumentEvent) {
        delegate!(self, w => w.capture(event))
    }
}
