use super::{node_meta, ElementWorker, Shell};
use crate::block::BlockContent;
use crate::context::{ProcessorContext, StackFrame};
use crate::dispatch::{ChildResult, Contribution, RowGroup};
use crate::element::Element;
use crate::inline::InlineBuffer;
use crate::table::{AssemblyScope, TableAssembler};
use quire_nodes::{
    ColumnDefinition, LayoutNode, MAX_COL_SPAN, MAX_ROW_SPAN, Role, SectionKind, TableCell,
    TableNode, TableRow,
};
use quire_style::parsers::{parse_dimension, run_parser};
use quire_style::Display;
use quire_traits::{ApplyPhase, ApplyTarget};

/// Reads a span attribute. Unparsable values fall back to 1; `0` is only
/// meaningful where `zero_allowed`. Values above `limit` are capped.
fn span_attribute(element: &Element, name: &str, zero_allowed: bool, limit: usize) -> usize {
    match element.parse_attr::<usize>(name) {
        Some(0) if !zero_allowed => {
            log::warn!("Ignoring {}=\"0\" on <{}>", name, element.name);
            1
        }
        Some(span) if span > limit => {
            log::warn!("Capping {}=\"{}\" on <{}> to {}", name, span, element.name, limit);
            limit
        }
        Some(span) => span,
        None => 1,
    }
}

fn is_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

#[derive(Debug)]
pub struct TableWorker {
    shell: Shell,
    assembler: TableAssembler,
}

impl TableWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let table = TableNode::new(node_meta(element, Role::Table, ctx));
        Self {
            shell: Shell::new(table.into(), element),
            assembler: TableAssembler::new(
                AssemblyScope::Table,
                InlineBuffer::for_styles(&element.styles),
            ),
        }
    }
}

impl ElementWorker for TableWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn child_frame(&self, _frame: &StackFrame) -> StackFrame {
        StackFrame::table()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.assembler.accept_text(text)
    }

    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        self.assembler.accept(child, ctx)
    }

    fn end(&mut self, _element: &Element, ctx: &mut ProcessorContext) {
        if let Some(LayoutNode::Table(table)) = self.shell.node_mut() {
            self.assembler.finish_into(table, ctx);
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

/// `thead`, `tbody`, `tfoot` and the `table-*-group` displays. Has no node of
/// its own; its rows are merged into the matching section of the table.
#[derive(Debug)]
pub struct RowGroupWorker {
    display: Display,
    section: SectionKind,
    lang: Option<String>,
    assembler: TableAssembler,
    rows: Vec<TableRow>,
}

impl RowGroupWorker {
    pub fn new(element: &Element) -> Self {
        let display = element.display();
        let section = match display {
            Display::TableHeaderGroup => SectionKind::Header,
            Display::TableFooterGroup => SectionKind::Footer,
            _ => SectionKind::Body,
        };
        Self {
            display,
            section,
            lang: element.lang(),
            assembler: TableAssembler::new(
                AssemblyScope::RowGroup(section),
                InlineBuffer::for_styles(&element.styles),
            ),
            rows: Vec::new(),
        }
    }
}

impl ElementWorker for RowGroupWorker {
    fn display(&self) -> Display {
        self.display
    }

    fn child_frame(&self, _frame: &StackFrame) -> StackFrame {
        StackFrame::table()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.assembler.accept_text(text)
    }

    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        self.assembler.accept(child, ctx)
    }

    fn end(&mut self, _element: &Element, ctx: &mut ProcessorContext) {
        let rows = self.assembler.finish_rows(ctx);
        self.rows.extend(rows);
    }

    fn result(&self) -> Option<&LayoutNode> {
        None
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        None
    }

    fn take_result(&mut self) -> ChildResult {
        let group = RowGroup {
            section: self.section,
            rows: std::mem::take(&mut self.rows),
            lang: self.lang.clone(),
        };
        ChildResult::new(self.display, Contribution::RowGroup(group))
    }
}

/// A genuine row. Cells are appended verbatim; raw content is wrapped in
/// anonymous cells.
#[derive(Debug)]
pub struct RowWorker {
    shell: Shell,
    assembler: TableAssembler,
}

impl RowWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let row = TableRow {
            meta: node_meta(element, Role::TableRow, ctx),
            cells: Vec::new(),
        };
        Self {
            shell: Shell::new(LayoutNode::TableRow(row), element),
            assembler: TableAssembler::new(
                AssemblyScope::Row,
                InlineBuffer::for_styles(&element.styles),
            ),
        }
    }
}

impl ElementWorker for RowWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn child_frame(&self, _frame: &StackFrame) -> StackFrame {
        StackFrame::row()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.assembler.accept_text(text)
    }

    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        self.assembler.accept(child, ctx)
    }

    fn end(&mut self, _element: &Element, ctx: &mut ProcessorContext) {
        let cells = self.assembler.finish_cells(ctx);
        if let Some(LayoutNode::TableRow(row)) = self.shell.node_mut() {
            row.cells.extend(cells);
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

/// `td`, `th` and `display: table-cell`. The cell's slot token is drawn when
/// the element starts, so the assembler can tell this cell from the next.
#[derive(Debug)]
pub struct CellWorker {
    shell: Shell,
    content: BlockContent,
}

impl CellWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let header = element.name == "th";
        let role = if header { Role::TableHeaderCell } else { Role::TableCell };
        let mut cell = TableCell::new(node_meta(element, role, ctx));
        cell.header = header;
        cell.col_span = span_attribute(element, "colspan", false, MAX_COL_SPAN);
        cell.row_span = span_attribute(element, "rowspan", true, MAX_ROW_SPAN);
        let token = ctx.next_slot();
        Self {
            shell: Shell::new(cell.into(), element).with_token(token),
            content: BlockContent::for_styles(&element.styles),
        }
    }
}

impl ElementWorker for CellWorker {
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

/// `colgroup`. Contributes the definitions of its `col` children, or `span`
/// plain columns when it has none.
#[derive(Debug)]
pub struct ColumnGroupWorker {
    span: usize,
    columns: Vec<ColumnDefinition>,
}

impl ColumnGroupWorker {
    pub fn new(element: &Element) -> Self {
        Self {
            span: span_attribute(element, "span", false, MAX_COL_SPAN),
            columns: Vec::new(),
        }
    }
}

impl ElementWorker for ColumnGroupWorker {
    fn display(&self) -> Display {
        Display::TableColumnGroup
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        is_whitespace(text)
    }

    fn accept_child(&mut self, child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        match child.content {
            Contribution::Columns(columns) => {
                self.columns.extend(columns);
                true
            }
            _ => false,
        }
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {
        if self.columns.is_empty() {
            self.columns = vec![ColumnDefinition::default(); self.span];
        }
    }

    fn result(&self) -> Option<&LayoutNode> {
        None
    }

    fn style_target(&mut self, phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        match phase {
            ApplyPhase::Start => None,
            ApplyPhase::End => Some(ApplyTarget::Columns(&mut self.columns)),
        }
    }

    fn take_result(&mut self) -> ChildResult {
        ChildResult::new(
            Display::TableColumnGroup,
            Contribution::Columns(std::mem::take(&mut self.columns)),
        )
    }
}

/// `col`: `span` identical column definitions.
#[derive(Debug)]
pub struct ColumnWorker {
    columns: Vec<ColumnDefinition>,
}

impl ColumnWorker {
    pub fn new(element: &Element) -> Self {
        let width = element.attr_text("width").and_then(|raw| {
            run_parser(parse_dimension, &raw)
                .map_err(|e| log::warn!("Ignoring width=\"{}\" on <col>: {}", raw, e))
                .ok()
        });
        let column = ColumnDefinition {
            width,
            ..Default::default()
        };
        Self {
            columns: vec![column; span_attribute(element, "span", false, MAX_COL_SPAN)],
        }
    }
}

impl ElementWorker for ColumnWorker {
    fn display(&self) -> Display {
        Display::TableColumn
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        is_whitespace(text)
    }

    fn accept_child(&mut self, _child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        false
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {}

    fn result(&self) -> Option<&LayoutNode> {
        None
    }

    fn style_target(&mut self, phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        match phase {
            ApplyPhase::Start => None,
            ApplyPhase::End => Some(ApplyTarget::Columns(&mut self.columns)),
        }
    }

    fn take_result(&mut self) -> ChildResult {
        ChildResult::new(
            Display::TableColumn,
            Contribution::Columns(std::mem::take(&mut self.columns)),
        )
    }
}
