//! Property tests for column propagation over random merged grids.
//!
//! Invariants:
//! 1. A spanned source cell never writes anything.
//! 2. Every written cell spans one column and sits at the source's column index.
//! 3. The source cell itself is always written when propagation applies.
//! 4. At most one column declaration is written, and only a single-span one.

use grip_table::{
    DeclaredColumn, PropagationOutcome, SpannedCell, TableSections, TableShape, column_index,
    propagate_column_width,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Grid {
    /// `rows[r][c]` is the span of cell `(r, c)`.
    rows: Vec<Vec<u32>>,
    columns: Vec<u32>,
    cell_widths: BTreeMap<(usize, usize), f64>,
    column_widths: BTreeMap<usize, f64>,
}

impl TableShape for Grid {
    type Row = usize;
    type Cell = (usize, usize);
    type Column = usize;

    fn sections(&self) -> TableSections<usize> {
        TableSections {
            head: None,
            bodies: vec![(0..self.rows.len()).collect()],
            foot: None,
        }
    }

    fn owning_row(&self, cell: &(usize, usize)) -> Option<usize> {
        (cell.0 < self.rows.len()).then_some(cell.0)
    }

    fn cells(&self, row: &usize) -> Vec<SpannedCell<(usize, usize)>> {
        self.rows[*row]
            .iter()
            .enumerate()
            .map(|(c, span)| SpannedCell::new((*row, c), *span))
            .collect()
    }

    fn col_span(&self, cell: &(usize, usize)) -> u32 {
        self.rows[cell.0][cell.1]
    }

    fn column_groups(&self) -> Vec<Vec<DeclaredColumn<usize>>> {
        vec![
            self.columns
                .iter()
                .enumerate()
                .map(|(i, span)| DeclaredColumn::new(i, *span))
                .collect(),
        ]
    }

    fn set_cell_width(&mut self, cell: &(usize, usize), width: f64) {
        self.cell_widths.insert(*cell, width);
    }

    fn set_column_width(&mut self, column: &usize, width: f64) {
        self.column_widths.insert(*column, width);
    }
}

fn grid_strategy() -> impl Strategy<Value = (Grid, usize, usize)> {
    (
        prop::collection::vec(prop::collection::vec(1u32..=3, 1..6), 1..8),
        prop::collection::vec(1u32..=2, 0..6),
    )
        .prop_flat_map(|(rows, columns)| {
            let row_count = rows.len();
            (Just(rows), Just(columns), 0..row_count)
        })
        .prop_flat_map(|(rows, columns, r)| {
            let cell_count = rows[r].len();
            let grid = Grid {
                rows,
                columns,
                cell_widths: BTreeMap::new(),
                column_widths: BTreeMap::new(),
            };
            (Just(grid), Just(r), 0..cell_count)
        })
}

fn start_of(row: &[u32], c: usize) -> u32 {
    row[..c].iter().sum()
}

proptest! {
    #[test]
    fn propagation_respects_spans((mut grid, r, c) in grid_strategy(), width in 10.0f64..500.0) {
        let source_span = grid.rows[r][c];
        let expected_index = start_of(&grid.rows[r], c);
        prop_assert_eq!(column_index(&grid, &(r, c)), Ok(expected_index));

        let outcome = propagate_column_width(&mut grid, &(r, c), width);

        if source_span > 1 {
            let skipped = matches!(outcome, PropagationOutcome::Skipped(_));
            prop_assert!(skipped);
            prop_assert!(grid.cell_widths.is_empty());
            prop_assert!(grid.column_widths.is_empty());
        } else {
            let applied = outcome.applied().copied();
            prop_assert!(applied.is_some());
            prop_assert_eq!(grid.cell_widths.get(&(r, c)).copied(), Some(width));
            for &(row, cell) in grid.cell_widths.keys() {
                prop_assert_eq!(grid.rows[row][cell], 1);
                prop_assert_eq!(start_of(&grid.rows[row], cell), expected_index);
            }
            prop_assert!(grid.column_widths.len() <= 1);
            for column in grid.column_widths.keys() {
                prop_assert_eq!(grid.columns[*column], 1);
                prop_assert_eq!(start_of(&grid.columns, *column), expected_index);
            }
            if let Some(applied) = applied {
                prop_assert_eq!(applied.cells_updated, grid.cell_widths.len());
                prop_assert!(applied.cells_updated + applied.spanned_cells_skipped <= grid.rows.len());
            }
        }
    }
}
