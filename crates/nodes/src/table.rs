//! Table grid model and the span bookkeeping that keeps it rectangular.

use crate::meta::{NodeMetadata, TextStr};
use crate::node::LayoutNode;
use quire_style::{Border, Dimension, ElementStyle, Margins};

/// Largest `colspan` (and `col`/`colgroup` `span`) a cell or column may have.
pub const MAX_COL_SPAN: usize = 1000;
/// Largest `rowspan` a cell may have.
pub const MAX_ROW_SPAN: usize = 65534;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnDefinition {
    pub width: Option<Dimension>,
    /// Properties inherited by cells in this column unless set on the cell.
    pub style: ElementStyle,
}

/// Which part of the table a group of rows belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionKind {
    Header,
    #[default]
    Body,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSection {
    pub lang: Option<TextStr>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub meta: NodeMetadata,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub meta: NodeMetadata,
    /// Rows covered by this cell. `0` means "to the end of the section"
    /// until the table is normalized.
    pub row_span: usize,
    pub col_span: usize,
    /// Grid column of the cell's first slot, assigned by normalization.
    pub column: usize,
    pub header: bool,
    pub children: Vec<LayoutNode>,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            meta: NodeMetadata::default(),
            row_span: 1,
            col_span: 1,
            column: 0,
            header: false,
            children: Vec::new(),
        }
    }
}

impl TableCell {
    pub fn new(meta: NodeMetadata) -> Self {
        Self {
            meta,
            ..Default::default()
        }
    }

    /// A synthesized cell with no padding and no border, used to wrap
    /// content that appears directly in a table or row, and to pad short rows.
    pub fn anonymous() -> Self {
        let mut meta = NodeMetadata::anonymous();
        meta.style.padding = Some(Margins::zero());
        meta.style.border = Some(Border::none());
        Self::new(meta)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableNode {
    pub meta: NodeMetadata,
    pub columns: Vec<ColumnDefinition>,
    /// Number of grid columns, valid after `normalize`.
    pub column_count: usize,
    pub caption: Option<Box<LayoutNode>>,
    pub header: TableSection,
    pub body: TableSection,
    pub footer: TableSection,
}

impl TableNode {
    pub fn new(meta: NodeMetadata) -> Self {
        Self {
            meta,
            ..Default::default()
        }
    }

    pub fn section(&self, kind: SectionKind) -> &TableSection {
        match kind {
            SectionKind::Header => &self.header,
            SectionKind::Body => &self.body,
            SectionKind::Footer => &self.footer,
        }
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut TableSection {
        match kind {
            SectionKind::Header => &mut self.header,
            SectionKind::Body => &mut self.body,
            SectionKind::Footer => &mut self.footer,
        }
    }

    /// All rows in visual order: header, body, footer.
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.header
            .rows
            .iter()
            .chain(self.body.rows.iter())
            .chain(self.footer.rows.iter())
    }

    fn sections_mut(&mut self) -> [&mut TableSection; 3] {
        [&mut self.header, &mut self.body, &mut self.footer]
    }

    /// Places every cell on the grid, clamps row spans to their section,
    /// fixes `column_count` and pads short rows with anonymous cells so that
    /// every row covers exactly `column_count` slots. Cells then pick up the
    /// properties of their column definition. Calling this again is a no-op.
    pub fn normalize(&mut self) {
        let mut width = self.columns.len();
        for section in self.sections_mut() {
            width = width.max(section.place_cells());
        }
        self.column_count = width;

        let columns = std::mem::take(&mut self.columns);
        for section in self.sections_mut() {
            section.pad_rows(width);
            for cell in section.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
                if let Some(column) = columns.get(cell.column) {
                    cell.meta.style.inherit_missing_from(&column.style);
                }
            }
        }
        self.columns = columns;
    }
}

impl TableSection {
    /// Assigns grid columns and effective row spans. Returns the number of
    /// columns the section occupies.
    fn place_cells(&mut self) -> usize {
        let row_count = self.rows.len();
        let mut grid = Occupancy::default();
        for (r, row) in self.rows.iter_mut().enumerate() {
            let remaining = row_count - r;
            let mut col = 0;
            for cell in &mut row.cells {
                while grid.is_taken(r, col) {
                    col += 1;
                }
                cell.col_span = cell.col_span.clamp(1, MAX_COL_SPAN);
                cell.row_span = match cell.row_span {
                    0 => remaining,
                    n => n.min(remaining),
                };
                cell.column = col;
                grid.take(r, col, cell.row_span, cell.col_span);
                col = col.saturating_add(cell.col_span);
            }
        }
        grid.width()
    }

    fn pad_rows(&mut self, width: usize) {
        let mut grid = Occupancy::default();
        for (r, row) in self.rows.iter().enumerate() {
            for cell in &row.cells {
                grid.take(r, cell.column, cell.row_span, cell.col_span);
            }
        }
        for (r, row) in self.rows.iter_mut().enumerate() {
            let free: Vec<usize> = (0..width).filter(|c| !grid.is_taken(r, *c)).collect();
            if free.is_empty() {
                continue;
            }
            for column in free {
                row.cells.push(TableCell {
                    column,
                    ..TableCell::anonymous()
                });
            }
            row.cells.sort_by_key(|cell| cell.column);
        }
    }

    /// Column slots covered in each row, counting cells that span down into
    /// the row from above.
    pub fn row_occupancy(&self) -> Vec<usize> {
        let mut counts: Vec<usize> = vec![0; self.rows.len()];
        for (r, row) in self.rows.iter().enumerate() {
            for cell in &row.cells {
                let span = cell.row_span.max(1);
                for count in counts.iter_mut().skip(r).take(span) {
                    *count = count.saturating_add(cell.col_span);
                }
            }
        }
        counts
    }
}

#[derive(Default)]
struct Occupancy {
    rows: Vec<Vec<bool>>,
}

impl Occupancy {
    fn is_taken(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    fn take(&mut self, row: usize, col: usize, row_span: usize, col_span: usize) {
        let end = col.saturating_add(col_span);
        for r in row..row.saturating_add(row_span.max(1)) {
            if self.rows.len() <= r {
                self.rows.resize_with(r + 1, Vec::new);
            }
            let slots = &mut self.rows[r];
            if slots.len() < end {
                slots.resize(end, false);
            }
            for slot in &mut slots[col..end] {
                *slot = true;
            }
        }
    }

    fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}
