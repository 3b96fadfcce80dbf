//! Blast core crate - fundamental types for the block-placement puzzle.

mod color;
mod grid;
mod matrix;
mod shape;

pub use color::{preview_color, Color, ColorError, FALLBACK_PREVIEW};
pub use grid::{Anchor, Cell, Grid, Pivot};
pub use matrix::{Matrix, MatrixError};
pub use shape::{template_by_name, ShapeId, ShapeInstance, ShapeTemplate, CATALOG};
