use std::sync::OnceLock;

use blast_core::Grid;
use blast_engine::{can_place, VariantPool};

#[derive(Clone, Debug)]
pub struct EvalWeights {
    pub empty_cells: f32,
    pub open_lines: f32,
    pub isolated_holes: f32,
    pub placeable_variants: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            empty_cells: 1.0,
            open_lines: 2.0,
            isolated_holes: -4.0,
            placeable_variants: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridFeatures {
    pub empty_cells: usize,
    /// Rows plus columns with nothing in them.
    pub open_lines: usize,
    /// Empty cells boxed in on all four sides (walls count).
    pub isolated_holes: usize,
    pub placeable_variants: usize,
}

fn pool() -> &'static VariantPool {
    static POOL: OnceLock<VariantPool> = OnceLock::new();
    POOL.get_or_init(VariantPool::catalog)
}

pub fn grid_features(grid: &Grid) -> GridFeatures {
    let n = grid.size();
    let empty_cells = n * n - grid.filled_count();

    let open_rows = (0..n).filter(|&r| grid.is_row_empty(r)).count();
    let open_cols = (0..n)
        .filter(|&c| (0..n).all(|r| !grid.is_filled(r, c)))
        .count();

    let blocked = |r: i32, c: i32| grid.occupied_at(r, c) != Some(false);
    let mut isolated_holes = 0;
    for r in 0..n as i32 {
        for c in 0..n as i32 {
            if !blocked(r, c)
                && blocked(r - 1, c)
                && blocked(r + 1, c)
                && blocked(r, c - 1)
                && blocked(r, c + 1)
            {
                isolated_holes += 1;
            }
        }
    }

    let placeable_variants = pool()
        .variants()
        .iter()
        .filter(|v| can_place(&v.matrix, grid))
        .count();

    GridFeatures {
        empty_cells,
        open_lines: open_rows + open_cols,
        isolated_holes,
        placeable_variants,
    }
}

pub fn evaluate(grid: &Grid, weights: &EvalWeights) -> f32 {
    let f = grid_features(grid);
    f.empty_cells as f32 * weights.empty_cells
        + f.open_lines as f32 * weights.open_lines
        + f.isolated_holes as f32 * weights.isolated_holes
        + f.placeable_variants as f32 * weights.placeable_variants
}
