use core::ops::Range;

/// Background of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    WhiteSmoke,
    LightGrey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
}

/// A cell of a [`Table`], possibly merged with the cells to its right.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    text: String,
    span: usize,
    fill: Option<Fill>,
    bold: bool,
    align: Align,
}

impl Cell {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: 1,
            fill: None,
            bold: false,
            align: Align::default(),
        }
    }

    /// A blank tick-cell.
    #[must_use]
    pub fn tick() -> Self {
        Self::new("")
    }

    #[must_use]
    pub fn span(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    #[must_use]
    pub fn fill(mut self, fill: impl Into<Option<Fill>>) -> Self {
        self.fill = fill.into();
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.span
    }

    #[must_use]
    pub fn background(&self) -> Option<Fill> {
        self.fill
    }

    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    #[must_use]
    pub fn alignment(&self) -> Align {
        self.align
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
    height: Option<f32>,
}

impl Row {
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            height: None,
        }
    }

    /// Fixes the height of the row, otherwise it is sized by its content.
    #[must_use]
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn height(&self) -> Option<f32> {
        self.height
    }

    /// The column range covered by every cell of the row.
    pub fn spans(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.cells.iter().scan(0, |start, cell| {
            let span = *start..*start + cell.columns();
            *start = span.end;
            Some(span)
        })
    }

    /// The number of columns covered by the row.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.cells.iter().map(Cell::columns).sum()
    }
}

/// A grid of cells independent of the output format.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    column_widths: Vec<f32>,
    rows: Vec<Row>,
    font_size: f32,
}

impl Table {
    #[must_use]
    pub fn new(column_widths: Vec<f32>, font_size: f32) -> Self {
        Self {
            column_widths,
            rows: Vec::new(),
            font_size,
        }
    }

    /// Appends a row, every row has to cover all columns of the table.
    pub fn push(&mut self, row: Row) {
        debug_assert_eq!(
            row.columns(),
            self.columns(),
            "row does not cover all columns"
        );
        self.rows.push(row);
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.column_widths.len()
    }

    #[must_use]
    pub fn column_widths(&self) -> &[f32] {
        &self.column_widths
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}
