//! Occupancy matrices - rotation and canonical keys for dedup.
//!
//! A `Matrix` can only be built through `Matrix::new`/`Matrix::from_rows`,
//! both of which reject empty, ragged or fully unoccupied input. Every
//! operation here can therefore assume a well-formed rectangle with at
//! least one occupied cell.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::Pivot;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("matrix has no rows or no columns")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("matrix has no occupied cell")]
    Unoccupied,
}

/// Row-major boolean occupancy grid for one shape orientation.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Matrix {
    pub fn new(rows: Vec<Vec<bool>>) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(MatrixError::Empty);
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(MatrixError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
        }

        let height = rows.len();
        let cells: Vec<bool> = rows.into_iter().flatten().collect();
        if !cells.iter().any(|&c| c) {
            return Err(MatrixError::Unoccupied);
        }
        Ok(Self {
            rows: height,
            cols,
            cells,
        })
    }

    /// Build from `0`/`1` rows, the notation used by the catalog.
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, MatrixError> {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|&v| v != 0).collect())
                .collect(),
        )
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Out-of-range lookups read as unoccupied.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Occupied local cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// 90° clockwise. `rows x cols` becomes `cols x rows`, `(r, c)` lands on
    /// `(c, rows - 1 - r)`.
    pub fn rotate(&self) -> Matrix {
        let (rows, cols) = (self.rows, self.cols);
        let mut cells = vec![false; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                // new shape has `rows` columns
                cells[c * rows + (rows - 1 - r)] = self.cells[r * cols + c];
            }
        }
        Matrix {
            rows: cols,
            cols: rows,
            cells,
        }
    }

    /// Rows of `0`/`1` joined by `|`, e.g. `"10|11"` for an L tromino.
    pub fn canonical_key(&self) -> String {
        let mut key = String::with_capacity(self.rows * (self.cols + 1));
        for r in 0..self.rows {
            if r > 0 {
                key.push('|');
            }
            for c in 0..self.cols {
                key.push(if self.cells[r * self.cols + c] { '1' } else { '0' });
            }
        }
        key
    }

    /// Distinct orientations reachable by rotation, starting with `self`.
    /// Yields 1 (square), 2 (bar) or 4 (L) matrices.
    pub fn unique_rotations(&self) -> Vec<Matrix> {
        let mut seen = FxHashSet::default();
        let mut rotations = Vec::with_capacity(4);
        let mut current = self.clone();
        for _ in 0..4 {
            let next = current.rotate();
            if seen.insert(current.canonical_key()) {
                rotations.push(current);
            }
            current = next;
        }
        rotations
    }

    /// First occupied cell in row-major order.
    pub fn default_pivot(&self) -> Pivot {
        self.occupied()
            .next()
            .map(|(row, col)| Pivot::new(row, col))
            .unwrap_or_default()
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.cols).map(<[bool]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<bool>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        Matrix::new(rows)
    }
}

impl From<Matrix> for Vec<Vec<bool>> {
    fn from(matrix: Matrix) -> Self {
        matrix.to_rows()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(f, "{}", if self.get(r, c) { "[]" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
