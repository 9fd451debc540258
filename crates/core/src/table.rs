//! Table assembly.
//!
//! Rebuilds a well-formed grid from whatever a table, row group or row
//! element receives: genuine rows and row groups, cells with or without a
//! row around them, and raw content that belongs in no cell at all. The
//! assembler only decides where rows and cells begin and end; spans and
//! padding are resolved by `TableNode::normalize`.

use crate::context::{ProcessorContext, SlotToken};
use crate::dispatch::{place, ChildResult, Contribution, Placement, RowGroup, RunMember};
use crate::inline::InlineBuffer;
use quire_nodes::{
    ColumnDefinition, LayoutNode, NodeMetadata, SectionKind, TableCell, TableNode, TableRow,
};
use quire_style::Display;

/// The element kind an assembler works for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyScope {
    Table,
    RowGroup(SectionKind),
    Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    NoOpenRow,
    RowOpen,
    CellPending,
}

#[derive(Debug)]
struct PendingCell {
    token: SlotToken,
    cell: TableCell,
    anonymous: bool,
}

#[derive(Debug)]
pub struct TableAssembler {
    scope: AssemblyScope,
    table: TableNode,
    /// Finished rows of a row group.
    rows: Vec<TableRow>,
    open_row: Option<TableRow>,
    pending: Option<PendingCell>,
    /// Raw inline content waiting for an anonymous cell.
    inline: InlineBuffer,
    declared_columns: Vec<ColumnDefinition>,
    columns_applied: bool,
}

fn anonymous_row() -> TableRow {
    TableRow {
        meta: NodeMetadata::anonymous(),
        cells: Vec::new(),
    }
}

impl TableAssembler {
    pub fn new(scope: AssemblyScope, inline: InlineBuffer) -> Self {
        Self {
            scope,
            table: TableNode::default(),
            rows: Vec::new(),
            open_row: (scope == AssemblyScope::Row).then(TableRow::default),
            pending: None,
            inline,
            declared_columns: Vec::new(),
            columns_applied: false,
        }
    }

    /// An assembler for a table the markup never declared.
    pub fn anonymous() -> Self {
        let mut assembler = Self::new(AssemblyScope::Table, InlineBuffer::default());
        assembler.table.meta = NodeMetadata::anonymous();
        assembler
    }

    /// Wraps a single orphan table part into an anonymous table of its own.
    pub fn wrap_orphan(child: ChildResult, ctx: &mut ProcessorContext) -> LayoutNode {
        let mut assembler = Self::anonymous();
        assembler.accept(child, ctx);
        assembler.finish_table(ctx).into()
    }

    pub fn state(&self) -> AssemblyState {
        if self.pending.is_some() {
            AssemblyState::CellPending
        } else if self.open_row.is_some() {
            AssemblyState::RowOpen
        } else {
            AssemblyState::NoOpenRow
        }
    }

    pub fn accept_text(&mut self, text: &str) -> bool {
        self.inline.add_text(text);
        true
    }

    pub fn accept(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        if child.display == Display::TableCaption && self.scope == AssemblyScope::Table {
            if let Contribution::Node(node) = child.content {
                self.table.caption = Some(Box::new(node));
                return true;
            }
            return false;
        }
        let token = child.token;
        match place(child) {
            Placement::TablePart(part) => match part.content {
                Contribution::Node(LayoutNode::TableCell(cell)) => {
                    self.flush_inline(ctx);
                    let token = token.unwrap_or_else(|| ctx.next_slot());
                    self.accept_cell(token, cell, false);
                    true
                }
                Contribution::Node(LayoutNode::TableRow(row)) => self.accept_row(row, ctx),
                Contribution::RowGroup(group) => self.accept_row_group(group, ctx),
                _ => false,
            },
            Placement::Inline(leaf) => {
                self.inline.add_leaf(leaf);
                true
            }
            Placement::Run(members) => {
                for member in members {
                    match member {
                        RunMember::Leaf(leaf) => self.inline.add_leaf(leaf),
                        RunMember::Block(node) => self.accept_raw_block(node, ctx),
                    }
                }
                true
            }
            Placement::Block(node, _) => {
                self.accept_raw_block(node, ctx);
                true
            }
            Placement::Unplaceable(Contribution::Columns(columns)) => self.accept_columns(columns),
            Placement::Unplaceable(_) => false,
        }
    }

    /// A cell arriving with `token`. The same token as the pending cell
    /// means that cell is still being filled and must not be appended again;
    /// a different token means the pending cell is finished.
    fn accept_cell(&mut self, token: SlotToken, cell: TableCell, anonymous: bool) {
        self.open_row_if_needed();
        let incoming = PendingCell {
            token,
            cell,
            anonymous,
        };
        match self.pending.take() {
            Some(same) if same.token == token => {
                log::trace!("Cell slot {:?} still pending", same.token);
            }
            Some(previous) => self.commit(previous),
            None => {}
        }
        self.pending = Some(incoming);
    }

    fn accept_raw_block(&mut self, node: LayoutNode, ctx: &mut ProcessorContext) {
        match node {
            LayoutNode::TableCell(cell) => {
                self.flush_inline(ctx);
                let token = ctx.next_slot();
                self.accept_cell(token, cell, false);
            }
            LayoutNode::TableRow(row) => {
                self.accept_row(row, ctx);
            }
            node => {
                self.flush_inline(ctx);
                self.add_to_anonymous_cell(ctx, |children| children.push(node));
            }
        }
    }

    /// Puts content into the pending anonymous cell, starting one when the
    /// pending cell is a declared one or there is none.
    fn add_to_anonymous_cell(
        &mut self,
        ctx: &mut ProcessorContext,
        fill: impl FnOnce(&mut Vec<LayoutNode>),
    ) {
        let token = match &self.pending {
            Some(pending) if pending.anonymous => pending.token,
            _ => ctx.next_slot(),
        };
        let mut cell = match self.pending.as_mut() {
            Some(pending) if pending.token == token => std::mem::take(&mut pending.cell),
            _ => TableCell::anonymous(),
        };
        fill(&mut cell.children);
        self.accept_cell(token, cell, true);
    }

    fn flush_inline(&mut self, ctx: &mut ProcessorContext) {
        if !self.inline.has_non_whitespace() {
            self.inline.clear();
            return;
        }
        let mut content = Vec::new();
        self.inline.flush_into(&mut content);
        self.add_to_anonymous_cell(ctx, |children| children.extend(content));
    }

    fn accept_row(&mut self, row: TableRow, ctx: &mut ProcessorContext) -> bool {
        if self.scope == AssemblyScope::Row {
            return false;
        }
        self.flush_inline(ctx);
        self.close_row();
        self.apply_columns();
        self.target_rows().push(row);
        true
    }

    fn accept_row_group(&mut self, group: RowGroup, ctx: &mut ProcessorContext) -> bool {
        match self.scope {
            AssemblyScope::Row => false,
            AssemblyScope::RowGroup(_) => {
                self.flush_inline(ctx);
                self.close_row();
                self.rows.extend(group.rows);
                true
            }
            AssemblyScope::Table => {
                self.flush_inline(ctx);
                self.close_row();
                self.apply_columns();
                let section = self.table.section_mut(group.section);
                section.rows.extend(group.rows);
                if group.section != SectionKind::Body && group.lang.is_some() {
                    section.lang = group.lang;
                }
                true
            }
        }
    }

    fn accept_columns(&mut self, columns: Vec<ColumnDefinition>) -> bool {
        if self.scope != AssemblyScope::Table || self.columns_applied {
            return false;
        }
        self.declared_columns.extend(columns);
        true
    }

    /// Declared columns take effect once, when the first row opens.
    fn apply_columns(&mut self) {
        if self.columns_applied {
            return;
        }
        self.columns_applied = true;
        if self.scope == AssemblyScope::Table {
            self.table.columns = std::mem::take(&mut self.declared_columns);
        }
    }

    fn open_row_if_needed(&mut self) {
        if self.open_row.is_none() {
            self.apply_columns();
            self.open_row = Some(anonymous_row());
        }
    }

    fn commit(&mut self, pending: PendingCell) {
        self.open_row
            .get_or_insert_with(anonymous_row)
            .cells
            .push(pending.cell);
    }

    /// Appends the pending cell and, outside a genuine row, closes the
    /// current row.
    fn close_row(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.commit(pending);
        }
        if self.scope == AssemblyScope::Row {
            return;
        }
        if let Some(row) = self.open_row.take() {
            self.target_rows().push(row);
        }
    }

    fn target_rows(&mut self) -> &mut Vec<TableRow> {
        match self.scope {
            AssemblyScope::Table => &mut self.table.body.rows,
            AssemblyScope::RowGroup(_) | AssemblyScope::Row => &mut self.rows,
        }
    }

    /// Flushes everything still pending. Safe to call more than once.
    pub fn finish(&mut self, ctx: &mut ProcessorContext) {
        self.flush_inline(ctx);
        self.close_row();
        self.apply_columns();
    }

    pub fn finish_table(&mut self, ctx: &mut ProcessorContext) -> TableNode {
        let mut table = TableNode::new(std::mem::take(&mut self.table.meta));
        self.finish_into(&mut table, ctx);
        table
    }

    /// Moves everything assembled so far into `target` and normalizes it.
    /// Columns and caption already on `target` are kept.
    pub fn finish_into(&mut self, target: &mut TableNode, ctx: &mut ProcessorContext) {
        self.finish(ctx);
        let TableNode {
            columns,
            caption,
            header,
            body,
            footer,
            ..
        } = std::mem::take(&mut self.table);
        if target.columns.is_empty() {
            target.columns = columns;
        }
        if caption.is_some() {
            target.caption = caption;
        }
        for (into, from) in [
            (&mut target.header, header),
            (&mut target.body, body),
            (&mut target.footer, footer),
        ] {
            into.rows.extend(from.rows);
            if from.lang.is_some() {
                into.lang = from.lang;
            }
        }
        target.normalize();
    }

    pub fn finish_rows(&mut self, ctx: &mut ProcessorContext) -> Vec<TableRow> {
        self.finish(ctx);
        std::mem::take(&mut self.rows)
    }

    pub fn finish_cells(&mut self, ctx: &mut ProcessorContext) -> Vec<TableCell> {
        self.finish(ctx);
        self.open_row
            .as_mut()
            .map(|row| std::mem::take(&mut row.cells))
            .unwrap_or_default()
    }
}
