//! square play field - row-major `Option<Color>` cells, (0, 0) top-left

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Color;

/// Absolute grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Grid offset of a shape's local origin. Signed so candidates left of or
/// above the grid can be expressed and rejected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Anchor {
    pub row: i32,
    pub col: i32,
}

impl Anchor {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Shape-local cell the player is holding while dragging.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Pivot {
    pub row: usize,
    pub col: usize,
}

impl Pivot {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Grid {
    pub const CLASSIC_SIZE: usize = 8;
    pub const LEGACY_SIZE: usize = 10;

    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.cells[self.index(row, col)]
    }

    #[inline]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)].is_some()
    }

    /// Bounds-checked occupancy lookup for signed coordinates.
    /// `None` when off-grid.
    #[inline]
    pub fn occupied_at(&self, row: i32, col: i32) -> Option<bool> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(self.is_filled(row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<Color>) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    pub fn fill(&mut self, row: usize, col: usize, color: Color) {
        self.set(row, col, Some(color));
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) {
        self.set(row, col, None);
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        (0..self.size).all(|col| self.is_filled(row, col))
    }

    pub fn is_col_full(&self, col: usize) -> bool {
        (0..self.size).all(|row| self.is_filled(row, col))
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        (0..self.size).all(|col| !self.is_filled(row, col))
    }

    /// No occupied cell anywhere.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn row(&self, row: usize) -> &[Option<Color>] {
        let start = self.index(row, 0);
        &self.cells[start..start + self.size]
    }

    /// Replace a whole row - used by the row-collapse clear.
    pub fn set_row(&mut self, row: usize, values: &[Option<Color>]) {
        let start = self.index(row, 0);
        self.cells[start..start + self.size].copy_from_slice(values);
    }

    pub fn to_rows(&self) -> Vec<Vec<Option<Color>>> {
        self.cells.chunks(self.size.max(1)).map(<[_]>::to_vec).collect()
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows: Vec<Vec<Option<Color>>> = Vec::deserialize(deserializer)?;
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(serde::de::Error::custom("expected a square grid"));
        }
        Ok(Grid {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Self::CLASSIC_SIZE)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{}", if self.is_filled(row, col) { "[]" } else { " ." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
