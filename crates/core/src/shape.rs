//! Shape templates (the static catalog) and per-batch shape instances.

use std::fmt;

use serde::Serialize;

use crate::{Color, Matrix};

/// Immutable catalog entry. Cells are `0`/`1` rows so the catalog can be a
/// `static`; call `matrix()` for the validated form.
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeTemplate {
    pub name: &'static str,
    pub color: Color,
    pub cells: &'static [&'static [u8]],
    /// Vertical bars that rotated horizontal bars already cover.
    pub pure_vertical: bool,
}

impl ShapeTemplate {
    const fn new(name: &'static str, color: Color, cells: &'static [&'static [u8]]) -> Self {
        Self {
            name,
            color,
            cells,
            pure_vertical: false,
        }
    }

    const fn vertical(name: &'static str, color: Color, cells: &'static [&'static [u8]]) -> Self {
        Self {
            name,
            color,
            cells,
            pure_vertical: true,
        }
    }

    /// Catalog rows are checked by `test_catalog_matrices_valid`, so
    /// failure here means a malformed custom template.
    pub fn matrix(&self) -> Result<Matrix, crate::MatrixError> {
        Matrix::from_rows(self.cells)
    }
}

pub static CATALOG: [ShapeTemplate; 18] = [
    ShapeTemplate::new("Single", Color::rgb(0xf94144), &[&[1]]),
    ShapeTemplate::new("Domino", Color::rgb(0xf3722c), &[&[1, 1]]),
    ShapeTemplate::new("Bar3", Color::rgb(0xf8961e), &[&[1, 1, 1]]),
    ShapeTemplate::new("Bar4", Color::rgb(0xf9c74f), &[&[1, 1, 1, 1]]),
    ShapeTemplate::vertical("Tall3", Color::rgb(0x90be6d), &[&[1], &[1], &[1]]),
    ShapeTemplate::vertical("Tall4", Color::rgb(0x43aa8b), &[&[1], &[1], &[1], &[1]]),
    ShapeTemplate::new("Tall5", Color::rgb(0x43aa8b), &[&[1], &[1], &[1], &[1], &[1]]),
    ShapeTemplate::new("L1", Color::rgba(0x27c227ff), &[&[1, 1], &[1, 0]]),
    ShapeTemplate::new("L3", Color::rgb(0x577590), &[&[1, 0], &[1, 0], &[1, 1]]),
    ShapeTemplate::new("L4", Color::rgb(0x277da1), &[&[1, 0, 0], &[1, 0, 0], &[1, 1, 1]]),
    ShapeTemplate::new("Square", Color::rgb(0x9b5de5), &[&[1, 1], &[1, 1]]),
    ShapeTemplate::new("T", Color::rgb(0xf15bb5), &[&[1, 1, 1], &[0, 1, 0]]),
    ShapeTemplate::new("Z", Color::rgb(0x00bbf9), &[&[1, 1, 0], &[0, 1, 1]]),
    ShapeTemplate::new("S", Color::rgb(0x00f5d4), &[&[0, 1, 1], &[1, 1, 0]]),
    ShapeTemplate::new("Cross", Color::rgb(0xffbd00), &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]),
    ShapeTemplate::new("BigL", Color::rgb(0xfb5607), &[&[1, 0], &[1, 0], &[1, 0], &[1, 1]]),
    ShapeTemplate::new("Chunk", Color::rgb(0xb5179e), &[&[1, 1, 0], &[1, 1, 1]]),
    ShapeTemplate::new("Block", Color::rgba(0xb57e17ff), &[&[1, 1, 1], &[1, 1, 1]]),
];

pub fn template_by_name(name: &str) -> Option<&'static ShapeTemplate> {
    CATALOG.iter().find(|t| t.name == name)
}

/// Unique per generator; tray widgets key on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

/// A dealt piece. Owns its own (possibly rotated) matrix copy.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ShapeInstance {
    pub id: ShapeId,
    pub name: &'static str,
    pub color: Color,
    pub matrix: Matrix,
}

impl ShapeInstance {
    pub fn new(id: ShapeId, template: &'static ShapeTemplate, matrix: Matrix) -> Self {
        Self {
            id,
            name: template.name,
            color: template.color,
            matrix,
        }
    }
}
