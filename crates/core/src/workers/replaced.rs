use super::{node_meta, pixel_attr, ElementWorker, Shell};
use crate::context::ProcessorContext;
use crate::dispatch::{ChildResult, ControlKind};
use crate::element::{DocumentEvent, Element};
use quire_nodes::{ImageNode, ImageSource, LayoutNode, Role};
use quire_style::Display;
use quire_traits::{ApplyPhase, ApplyTarget, ResolvedImage};
use quire_types::Size;
use std::fmt::Write;

/// Points per CSS pixel.
pub const PX_TO_PT: f32 = quire_style::parsers::PT_PER_PX;

/// Default replaced-element size in CSS pixels.
const DEFAULT_SIZE_PX: Size = Size {
    width: 300.0,
    height: 150.0,
};

/// Declared `width`/`height` attributes win; a single declared dimension
/// keeps the natural aspect ratio.
fn declared_size(element: &Element, natural: Size) -> Size {
    let ratio = |a: f32, b: f32| if b > 0.0 { a / b } else { 1.0 };
    match (pixel_attr(element, "width"), pixel_attr(element, "height")) {
        (Some(width), Some(height)) => Size::new(width, height),
        (Some(width), None) => Size::new(width, width * ratio(natural.height, natural.width)),
        (None, Some(height)) => Size::new(height * ratio(natural.width, natural.height), height),
        (None, None) => natural,
    }
}

/// `img`, `object` and `embed`. The resource is resolved once, at start;
/// a failed lookup contributes nothing.
#[derive(Debug)]
pub struct ReplacedWorker {
    shell: Shell,
    scale: f32,
}

impl ReplacedWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let control = match element.name.as_str() {
            "img" => ControlKind::Image,
            _ => ControlKind::Object,
        };
        let scale = PX_TO_PT;
        let attr = if element.name == "object" { "data" } else { "src" };
        let Some(reference) = element.attr_text(attr) else {
            log::warn!("<{}> without {}; nothing to place", element.name, attr);
            return Self {
                shell: Shell::empty(element).with_control(control),
                scale,
            };
        };
        let uri = ctx.config.resolve_uri(&reference);
        let shell = match ctx.images.resolve(&uri) {
            Ok(image) => Shell::new(Self::image_node(element, uri, image, scale, ctx), element),
            Err(e) => {
                log::warn!("Image '{}' skipped: {}", uri, e);
                Shell::empty(element)
            }
        };
        Self {
            shell: shell.with_control(control),
            scale,
        }
    }

    fn image_node(
        element: &Element,
        uri: String,
        image: ResolvedImage,
        scale: f32,
        ctx: &ProcessorContext,
    ) -> LayoutNode {
        let natural = Size::new(image.width_px, image.height_px);
        LayoutNode::Image(ImageNode {
            meta: node_meta(element, Role::Figure, ctx),
            source: ImageSource::Url(uri),
            data: Some(image.data),
            alt: element.attr_text("alt"),
            intrinsic: declared_size(element, natural).scaled(scale),
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl ElementWorker for ReplacedWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn accept_text(&mut self, _text: &str, _ctx: &mut ProcessorContext) -> bool {
        false
    }

    fn accept_child(&mut self, _child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        false
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {}

    fn result(&self) -> Option<&LayoutNode> {
        self.shell.node()
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        self.shell.style_target()
    }

    fn take_result(&mut self) -> ChildResult {
        self.shell.take()
    }

    fn captures_subtree(&self) -> bool {
        true
    }
}

fn escape(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

fn open_tag(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        let _ = write!(out, " {}=\"", name);
        escape(value, out);
        out.push('"');
    }
    out.push('>');
}

/// The `viewBox` extent, when well-formed.
fn view_box_size(element: &Element) -> Option<Size> {
    let raw = element.attr("viewBox")?;
    let numbers: Vec<f32> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match numbers.as_slice() {
        [_, _, width, height] if *width > 0.0 && *height > 0.0 => Some(Size::new(*width, *height)),
        _ => {
            log::warn!("Ignoring invalid viewBox=\"{}\"", raw);
            None
        }
    }
}

/// Inline `svg`: the subtree is serialized back to markup and handed on as
/// vector content.
#[derive(Debug)]
pub struct SvgWorker {
    shell: Shell,
    markup: String,
    open: Vec<String>,
    closed: bool,
}

impl SvgWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let mut root = element.clone();
        if !root.has_attr("xmlns") {
            root.attributes
                .push(("xmlns".to_string(), "http://www.w3.org/2000/svg".to_string()));
        }
        let mut markup = String::new();
        open_tag(&root, &mut markup);

        let natural = view_box_size(element).unwrap_or(DEFAULT_SIZE_PX);
        let node = LayoutNode::Image(ImageNode {
            meta: node_meta(element, Role::Figure, ctx),
            source: ImageSource::InlineSvg(String::new()),
            data: None,
            alt: element.attr_text("aria-label"),
            intrinsic: declared_size(element, natural).scaled(PX_TO_PT),
        });
        Self {
            shell: Shell::new(node, element).with_control(ControlKind::Svg),
            markup,
            open: Vec::new(),
            closed: false,
        }
    }
}

impl ElementWorker for SvgWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        escape(text, &mut self.markup);
        true
    }

    fn accept_child(&mut self, _child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        false
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {
        if self.closed {
            return;
        }
        self.closed = true;
        while let Some(name) = self.open.pop() {
            let _ = write!(self.markup, "</{}>", name);
        }
        self.markup.push_str("</svg>");
        if let Some(LayoutNode::Image(image)) = self.shell.node_mut() {
            image.source = ImageSource::InlineSvg(std::mem::take(&mut self.markup));
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

    fn captures_subtree(&self) -> bool {
        true
    }

    fn capture(&mut self, event: &DocumentEvent) {
        match event {
            DocumentEvent::Enter(element) => {
                open_tag(element, &mut self.markup);
                self.open.push(element.name.clone());
            }
            DocumentEvent::Text(text) => escape(text, &mut self.markup),
            DocumentEvent::Exit => {
                if let Some(name) = self.open.pop() {
                    let _ = write!(self.markup, "</{}>", name);
                }
            }
        }
    }
}
