//! committing placements and clearing completed lines

use blast_core::{Cell, Color, Grid};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Full rows and columns empty in place; nothing moves.
    #[default]
    InPlace,
    /// Rows only: a full row is removed and an empty row enters at the top.
    RowCollapse,
}

/// Which lines a placement completed. Indices are ascending.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClearResult {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

impl ClearResult {
    pub fn rows_cleared(&self) -> usize {
        self.rows.len()
    }

    pub fn cols_cleared(&self) -> usize {
        self.cols.len()
    }

    pub fn total_lines(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_lines() == 0
    }
}

/// Paint already-validated cells.
pub fn commit_placement(grid: &mut Grid, cells: &[Cell], color: Color) {
    for cell in cells {
        grid.fill(cell.row, cell.col, color);
    }
}

pub fn clear_completed_lines(grid: &mut Grid, policy: ClearPolicy) -> ClearResult {
    match policy {
        ClearPolicy::InPlace => clear_in_place(grid),
        ClearPolicy::RowCollapse => clear_rows_collapse(grid),
    }
}

/// Lines are found on the post-commit grid before anything is cleared, so
/// an intersection cell counts toward both its row and its column.
fn clear_in_place(grid: &mut Grid) -> ClearResult {
    let n = grid.size();
    let rows: Vec<usize> = (0..n).filter(|&row| grid.is_row_full(row)).collect();
    let cols: Vec<usize> = (0..n).filter(|&col| grid.is_col_full(col)).collect();

    for &row in &rows {
        for col in 0..n {
            grid.clear_cell(row, col);
        }
    }
    for &col in &cols {
        for row in 0..n {
            grid.clear_cell(row, col);
        }
    }

    ClearResult { rows, cols }
}

fn clear_rows_collapse(grid: &mut Grid) -> ClearResult {
    let n = grid.size();
    let rows: Vec<usize> = (0..n).filter(|&row| grid.is_row_full(row)).collect();
    if rows.is_empty() {
        return ClearResult::default();
    }

    // compact surviving rows toward the bottom
    let mut write = n;
    for read in (0..n).rev() {
        if rows.binary_search(&read).is_ok() {
            continue;
        }
        write -= 1;
        if write != read {
            let values = grid.row(read).to_vec();
            grid.set_row(write, &values);
        }
    }
    let blank = vec![None; n];
    for row in 0..write {
        grid.set_row(row, &blank);
    }

    ClearResult {
        rows,
        cols: Vec::new(),
    }
}

pub fn is_board_empty(grid: &Grid) -> bool {
    grid.is_empty()
}
