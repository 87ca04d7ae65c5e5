#![forbid(unsafe_code)]

//! Table shape abstraction and column-width propagation.
//!
//! When a table cell is resized, its width has to follow through the whole
//! logical column: every row of every section, plus the matching column
//! declaration. Merged cells (column spans) make the column index a sum of
//! spans rather than a cell position, and cells or declarations that span
//! several columns are left untouched so merged regions keep their shape.
//!
//! This crate depends only on [`TableShape`], a minimal view of rows, cells
//! with spans, and column groups. Hosts adapt their document model to it.

use std::fmt;

pub mod propagate;

pub use propagate::{
    ColumnPropagation, PropagationOutcome, PropagationSkip, column_index, propagate_column_width,
};

/// A cell together with its column span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedCell<C> {
    pub cell: C,
    pub col_span: u32,
}

impl<C> SpannedCell<C> {
    #[must_use]
    pub const fn new(cell: C, col_span: u32) -> Self {
        Self { cell, col_span }
    }

    /// Effective span; a zero span counts as one column.
    #[must_use]
    pub const fn span(&self) -> u32 {
        if self.col_span == 0 { 1 } else { self.col_span }
    }
}

/// A declared column (`<col>`) with its span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredColumn<C> {
    pub column: C,
    pub span: u32,
}

impl<C> DeclaredColumn<C> {
    #[must_use]
    pub const fn new(column: C, span: u32) -> Self {
        Self { column, span }
    }

    /// Build from a raw `span` attribute; missing, unparsable, or
    /// non-positive values mean one column.
    #[must_use]
    pub fn from_attribute(column: C, span: Option<&str>) -> Self {
        Self::new(column, span.map_or(1, parse_span))
    }

    #[must_use]
    pub const fn span(&self) -> u32 {
        if self.span == 0 { 1 } else { self.span }
    }
}

/// Parse a span attribute by its leading integer (`"2"`, `" 3x"`).
#[must_use]
pub fn parse_span(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<u32>()
        .ok()
        .filter(|span| *span > 0)
        .unwrap_or(1)
}

/// Rows grouped by table section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSections<R> {
    pub head: Option<Vec<R>>,
    pub bodies: Vec<Vec<R>>,
    pub foot: Option<Vec<R>>,
}

impl<R> Default for TableSections<R> {
    fn default() -> Self {
        Self {
            head: None,
            bodies: Vec::new(),
            foot: None,
        }
    }
}

impl<R> TableSections<R> {
    /// Rows in propagation order: head, each body in order, foot.
    pub fn rows_in_order(&self) -> impl Iterator<Item = &R> {
        self.head
            .iter()
            .flatten()
            .chain(self.bodies.iter().flatten())
            .chain(self.foot.iter().flatten())
    }
}

/// Minimal table structure needed for column propagation.
pub trait TableShape {
    type Row: Clone + PartialEq + fmt::Debug;
    type Cell: Clone + PartialEq + fmt::Debug;
    type Column: Clone + fmt::Debug;

    /// Rows of the table, grouped by section.
    fn sections(&self) -> TableSections<Self::Row>;

    /// Row that claims to own `cell`.
    fn owning_row(&self, cell: &Self::Cell) -> Option<Self::Row>;

    /// Cells of `row` in document order.
    fn cells(&self, row: &Self::Row) -> Vec<SpannedCell<Self::Cell>>;

    /// Column span of `cell`.
    fn col_span(&self, cell: &Self::Cell) -> u32;

    /// Column declarations, one inner list per column group.
    fn column_groups(&self) -> Vec<Vec<DeclaredColumn<Self::Column>>>;

    fn set_cell_width(&mut self, cell: &Self::Cell, width: f64);

    fn set_column_width(&mut self, column: &Self::Column, width: f64);
}
