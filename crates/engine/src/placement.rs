//! placement checks - bounds and occupied cells, all-or-nothing

use blast_core::{Anchor, Cell, Grid, Matrix};
use smallvec::SmallVec;

/// Absolute cells a shape covers. Catalog shapes have at most 6 cells.
pub type PlacementCells = SmallVec<[Cell; 9]>;

/// does every occupied cell land on-grid and on an empty cell?
#[inline]
pub fn fits(matrix: &Matrix, anchor: Anchor, grid: &Grid) -> bool {
    matrix.occupied().all(|(r, c)| match offset(anchor, r, c) {
        Some((row, col)) => grid.occupied_at(row, col) == Some(false),
        None => false,
    })
}

/// Cells covered by `matrix` at `anchor`, in row-major shape order.
/// `None` if any cell is off-grid or taken; nothing partial is returned.
pub fn placement_cells(matrix: &Matrix, anchor: Anchor, grid: &Grid) -> Option<PlacementCells> {
    let mut cells = PlacementCells::new();
    for (r, c) in matrix.occupied() {
        let (row, col) = offset(anchor, r, c)?;
        if grid.occupied_at(row, col) != Some(false) {
            return None;
        }
        cells.push(Cell::new(row as usize, col as usize));
    }
    Some(cells)
}

/// Shape cell `(r, c)` shifted by `anchor`; `None` when that leaves `i32`.
#[inline]
fn offset(anchor: Anchor, r: usize, c: usize) -> Option<(i32, i32)> {
    let row = anchor.row.checked_add(i32::try_from(r).ok()?)?;
    let col = anchor.col.checked_add(i32::try_from(c).ok()?)?;
    Some((row, col))
}

/// Exhaustive scan of all N² anchors.
pub fn can_place(matrix: &Matrix, grid: &Grid) -> bool {
    anchors(grid).any(|anchor| fits(matrix, anchor, grid))
}

pub fn valid_anchors(matrix: &Matrix, grid: &Grid) -> Vec<Anchor> {
    anchors(grid)
        .filter(|&anchor| fits(matrix, anchor, grid))
        .collect()
}

/// Row-major over `[0, N) x [0, N)`.
pub(crate) fn anchors(grid: &Grid) -> impl Iterator<Item = Anchor> {
    let n = grid.size() as i32;
    (0..n).flat_map(move |row| (0..n).map(move |col| Anchor::new(row, col)))
}
