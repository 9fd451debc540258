//! Chooses the worker for an element.

use crate::context::{ProcessorContext, StackFrame};
use crate::element::Element;
use crate::workers::*;
use quire_nodes::Role;
use quire_style::Display;

/// Elements that carry document metadata rather than content.
const METADATA_ELEMENTS: &[&str] = &[
    "head", "title", "style", "script", "meta", "link", "base", "template", "noscript",
];

/// Maps an element to its worker. Tag-specific workers take precedence over
/// display-based ones, except that `display: none` always wins.
pub struct WorkerFactory;

impl WorkerFactory {
    pub fn create(element: &Element, frame: &StackFrame, ctx: &mut ProcessorContext) -> Worker {
        let display = element.display();
        let name = element.name.as_str();

        // `head` is `display: none` by default but still carries the title.
        if METADATA_ELEMENTS.contains(&name) {
            return Worker::Metadata(MetadataWorker::new(element));
        }
        if display == Display::None {
            return Worker::Hidden(HiddenWorker);
        }
        if display == Display::Contents || matches!(name, "html" | "body") {
            return Worker::PassThrough(PassThroughWorker::new(element, ctx));
        }

        match name {
            "br" => return Worker::LineBreak(LineBreakWorker),
            "img" | "object" | "embed" => {
                return Worker::Replaced(ReplacedWorker::new(element, ctx));
            }
            "svg" => return Worker::Svg(SvgWorker::new(element, ctx)),
            "input" => return Worker::Input(InputWorker::new(element, ctx)),
            "textarea" => return Worker::TextArea(TextAreaWorker::new(element, ctx)),
            "select" => return Worker::Select(SelectWorker::new(element, ctx)),
            "button" => return Worker::Button(ButtonWorker::new(element, ctx)),
            "option" if frame.inside_select => return Worker::Choice(OptionWorker::new(element)),
            "optgroup" if frame.inside_select => {
                return Worker::OptGroup(OptGroupWorker::new(element));
            }
            "colgroup" => return Worker::ColumnGroup(ColumnGroupWorker::new(element)),
            "col" => return Worker::Column(ColumnWorker::new(element)),
            "ul" | "ol" | "menu" | "dir" if display == Display::Block => {
                return Worker::List(ListWorker::new(element, ctx));
            }
            "p" if display == Display::Block => {
                return Worker::Paragraph(ParagraphWorker::new(element, Role::Paragraph, ctx));
            }
            _ => {}
        }
        if display == Display::Block {
            if let Some(level) = heading_level(name) {
                return Worker::Paragraph(ParagraphWorker::new(element, Role::Heading(level), ctx));
            }
        }

        match display {
            Display::Table | Display::InlineTable => Worker::Table(TableWorker::new(element, ctx)),
            Display::TableRowGroup | Display::TableHeaderGroup | Display::TableFooterGroup => {
                Worker::RowGroup(RowGroupWorker::new(element))
            }
            Display::TableRow => Worker::Row(RowWorker::new(element, ctx)),
            Display::TableCell => {
                if !(frame.inside_table || frame.inside_row) {
                    log::trace!("<{}> outside a table; it goes into an anonymous one", name);
                }
                Worker::Cell(CellWorker::new(element, ctx))
            }
            // A caption only means something directly inside a table.
            Display::TableCaption if frame.inside_table => {
                Worker::Block(BlockWorker::new(element, Role::Caption, ctx))
            }
            Display::TableCaption => Worker::Block(BlockWorker::new(element, Role::Division, ctx)),
            Display::TableColumnGroup => Worker::ColumnGroup(ColumnGroupWorker::new(element)),
            Display::TableColumn => Worker::Column(ColumnWorker::new(element)),
            Display::ListItem => {
                if !frame.inside_list {
                    log::trace!("<{}> outside a list; it goes into an anonymous one", name);
                }
                Worker::ListItem(ListItemWorker::new(element, ctx))
            }
            Display::Block | Display::Flex | Display::InlineBlock | Display::InlineFlex => {
                let role = match name {
                    "figure" => Role::Figure,
                    "form" => Role::Form,
                    _ => Role::Division,
                };
                Worker::Block(BlockWorker::new(element, role, ctx))
            }
            Display::Inline => Worker::Span(SpanWorker::new(element, ctx)),
            Display::Contents | Display::None => {
                Worker::PassThrough(PassThroughWorker::new(element, ctx))
            }
        }
    }
}

fn heading_level(name: &str) -> Option<u8> {
    let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

impl Worker {
    /// Starts the worker for an element entered under `frame`.
    pub fn start(element: &Element, frame: &StackFrame, ctx: &mut ProcessorContext) -> Self {
        let worker = WorkerFactory::create(element, frame, ctx);
        log::trace!("<{}> started a {} worker", element.name, worker.name());
        worker
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

    fn kind(element: Element, frame: StackFrame) -> &'static str {
        Worker::start(&element, &frame, &mut ctx()).name()
    }

    #[test]
    fn display_decides_structural_workers() {
        let block = |name: &str| Element::new(name).with_style("display", "block");
        assert_eq!(kind(block("div"), StackFrame::default()), "block");
        assert_eq!(kind(block("p"), StackFrame::default()), "paragraph");
        assert_eq!(kind(block("h3"), StackFrame::default()), "paragraph");
        assert_eq!(kind(block("h7"), StackFrame::default()), "block");
        assert_eq!(kind(block("ol"), StackFrame::default()), "list");
        assert_eq!(kind(Element::new("span"), StackFrame::default()), "span");
        assert_eq!(
            kind(Element::new("td").with_style("display", "table-cell"), StackFrame::default()),
            "cell"
        );
        assert_eq!(
            kind(Element::new("div").with_style("display", "table-row"), StackFrame::default()),
            "row"
        );
        let caption = Element::new("caption").with_style("display", "table-caption");
        assert_eq!(kind(caption, StackFrame::default()), "block");
    }

    #[test]
    fn captions_are_captions_only_inside_tables() {
        let caption = || Element::new("caption").with_style("display", "table-caption");
        let mut ctx = ctx();
        let role = |worker: &Worker| worker.result().and_then(|n| n.meta()).and_then(|m| m.role);
        let inside = Worker::start(&caption(), &StackFrame::table(), &mut ctx);
        assert_eq!(role(&inside), Some(Role::Caption));
        let outside = Worker::start(&caption(), &StackFrame::default(), &mut ctx);
        assert_eq!(role(&outside), Some(Role::Division));
    }

    #[test]
    fn hidden_and_metadata_win() {
        assert_eq!(
            kind(Element::new("img").with_style("display", "none"), StackFrame::default()),
            "hidden"
        );
        assert_eq!(kind(Element::new("title"), StackFrame::default()), "metadata");
        assert_eq!(
            kind(Element::new("head").with_style("display", "none"), StackFrame::default()),
            "metadata"
        );
        assert_eq!(kind(Element::new("body"), StackFrame::default()), "pass-through");
        assert_eq!(
            kind(Element::new("section").with_style("display", "contents"), StackFrame::default()),
            "pass-through"
        );
    }

    #[test]
    fn options_only_inside_select() {
        assert_eq!(kind(Element::new("option"), StackFrame::select()), "option");
        assert_eq!(kind(Element::new("option"), StackFrame::default()), "span");
        assert_eq!(kind(Element::new("optgroup"), StackFrame::select()), "optgroup");
    }
}
