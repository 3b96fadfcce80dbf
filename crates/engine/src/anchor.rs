//! Pointer-to-anchor snapping.
//!
//! The pointer marks where the held (pivot) cell should go. Its fractional
//! grid position minus the pivot is rounded each way on both axes, and the
//! valid candidate whose pivot-cell centre is nearest the pointer wins. If
//! none of the nine candidates fits, every anchor on the grid is tried, so
//! a shape dragged past an edge still snaps to the closest legal spot.

use blast_core::{Anchor, Grid, Matrix, Pivot};
use serde::{Deserialize, Serialize};

use crate::placement::{anchors, fits};

pub const DEFAULT_SNAP_DISTANCE: f64 = 250.0;

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen bounding box of the grid, in the pointer's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardMetrics {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoardMetrics {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn cell_width(&self, size: usize) -> f64 {
        self.width / size as f64
    }

    pub fn cell_height(&self, size: usize) -> f64 {
        self.height / size as f64
    }

    /// Farther than `slack` outside the box on any side?
    fn out_of_reach(&self, p: Point, slack: f64) -> bool {
        p.x < self.left - slack
            || p.x > self.right() + slack
            || p.y < self.top - slack
            || p.y > self.bottom() + slack
    }
}

/// The grabbed tray cell when it is an occupied cell of `matrix`,
/// otherwise the first occupied cell.
pub fn resolve_pivot(matrix: &Matrix, grabbed: Option<Pivot>) -> Pivot {
    match grabbed {
        Some(p) if matrix.get(p.row, p.col) => p,
        _ => matrix.default_pivot(),
    }
}

pub fn resolve_anchor(
    matrix: &Matrix,
    pointer: Point,
    pivot: Pivot,
    metrics: &BoardMetrics,
    grid: &Grid,
    snap_distance: f64,
) -> Option<Anchor> {
    let size = grid.size();
    if size == 0 || !metrics.is_usable() || metrics.out_of_reach(pointer, snap_distance) {
        return None;
    }

    let cell_w = metrics.cell_width(size);
    let cell_h = metrics.cell_height(size);
    let col_coord = (pointer.x - metrics.left) / cell_w - pivot.col as f64;
    let row_coord = (pointer.y - metrics.top) / cell_h - pivot.row as f64;

    let distance = |anchor: Anchor| {
        let cx = metrics.left + (anchor.col as f64 + pivot.col as f64 + 0.5) * cell_w;
        let cy = metrics.top + (anchor.row as f64 + pivot.row as f64 + 0.5) * cell_h;
        (pointer.x - cx).hypot(pointer.y - cy)
    };

    let rounders: [fn(f64) -> f64; 3] = [f64::round, f64::floor, f64::ceil];
    let candidates = rounders.iter().flat_map(|round_row| {
        rounders
            .iter()
            .map(move |round_col| Anchor::new(round_row(row_coord) as i32, round_col(col_coord) as i32))
    });

    nearest(candidates, matrix, grid, snap_distance, distance).or_else(|| {
        nearest(anchors(grid), matrix, grid, snap_distance, distance)
    })
}

/// Closest fitting anchor within `budget`; later candidates win ties.
fn nearest(
    candidates: impl Iterator<Item = Anchor>,
    matrix: &Matrix,
    grid: &Grid,
    budget: f64,
    distance: impl Fn(Anchor) -> f64,
) -> Option<Anchor> {
    let mut best = None;
    let mut best_distance = budget;
    for anchor in candidates {
        if !fits(matrix, anchor, grid) {
            continue;
        }
        let d = distance(anchor);
        if d <= best_distance {
            best_distance = d;
            best = Some(anchor);
        }
    }
    best
}
