#![forbid(unsafe_code)]

//! Column-width propagation for a resized table cell.

use crate::TableShape;

/// Why propagation declined to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationSkip {
    /// The resized cell covers several columns.
    SpannedCell { col_span: u32 },
    /// No row claims the cell.
    NoOwningRow,
    /// The owning row does not list the cell among its cells.
    CellNotInRow,
}

/// Summary of an applied propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPropagation {
    /// Logical column index of the resized cell.
    pub column_index: u32,
    /// Single-column cells whose width was set (the resized cell included).
    pub cells_updated: usize,
    /// Rows whose cell at the column spans several columns.
    pub spanned_cells_skipped: usize,
    /// Whether a column declaration was updated.
    pub declared_column_updated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationOutcome {
    Applied(ColumnPropagation),
    Skipped(PropagationSkip),
}

impl PropagationOutcome {
    #[must_use]
    pub const fn applied(&self) -> Option<&ColumnPropagation> {
        match self {
            Self::Applied(applied) => Some(applied),
            Self::Skipped(_) => None,
        }
    }
}

/// Logical column index of `cell` within its owning row.
pub fn column_index<T: TableShape>(table: &T, cell: &T::Cell) -> Result<u32, PropagationSkip> {
    let row = table.owning_row(cell).ok_or(PropagationSkip::NoOwningRow)?;
    let mut index = 0u32;
    for current in table.cells(&row) {
        if current.cell == *cell {
            return Ok(index);
        }
        index = index.saturating_add(current.span());
    }
    Err(PropagationSkip::CellNotInRow)
}

/// Apply `width` to every single-column cell in the column of `cell` and to
/// the first column declaration covering that column.
///
/// At most one column declaration is touched per call.
pub fn propagate_column_width<T: TableShape>(
    table: &mut T,
    cell: &T::Cell,
    width: f64,
) -> PropagationOutcome {
    let col_span = table.col_span(cell);
    if col_span > 1 {
        let skip = PropagationSkip::SpannedCell { col_span };
        tracing::trace!(target: "grip.table", reason = ?skip, "column propagation skipped");
        return PropagationOutcome::Skipped(skip);
    }

    let index = match column_index(table, cell) {
        Ok(index) => index,
        Err(skip) => {
            tracing::trace!(target: "grip.table", reason = ?skip, "column propagation skipped");
            return PropagationOutcome::Skipped(skip);
        }
    };

    let mut cells_updated = 0;
    let mut spanned_cells_skipped = 0;
    let rows: Vec<T::Row> = table.sections().rows_in_order().cloned().collect();
    for row in &rows {
        let mut position = 0u32;
        for current in table.cells(row) {
            let span = current.span();
            if index >= position && index < position.saturating_add(span) {
                if span == 1 {
                    table.set_cell_width(&current.cell, width);
                    cells_updated += 1;
                } else {
                    spanned_cells_skipped += 1;
                }
                break;
            }
            position = position.saturating_add(span);
        }
    }

    let mut declared_column_updated = false;
    let mut position = 0u32;
    'groups: for group in table.column_groups() {
        for declared in group {
            let span = declared.span();
            if index >= position && index < position.saturating_add(span) {
                if span == 1 {
                    table.set_column_width(&declared.column, width);
                    declared_column_updated = true;
                }
                break 'groups;
            }
            position = position.saturating_add(span);
        }
    }

    tracing::trace!(
        target: "grip.table",
        column_index = index,
        cells_updated,
        spanned_cells_skipped,
        declared_column_updated,
        width,
        "column width propagated"
    );

    PropagationOutcome::Applied(ColumnPropagation {
        column_index: index,
        cells_updated,
        spanned_cells_skipped,
        declared_column_updated,
    })
}
