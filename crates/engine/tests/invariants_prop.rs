//! Property tests for shape geometry and placement.
//!
//! Invariants covered:
//! - Rotation sets are closed under rotation and hold 1, 2 or 4 shapes.
//! - Four quarter turns return the starting matrix.
//! - Placement cells are the shape's cells translated by the anchor.
//! - Shifting obstacles and anchor together keeps the fit verdict.
//! - Checking a placement never changes the grid.
//! - A session's score only grows and matches the sum of move scores.
use blast_core::{Anchor, Cell, Color, Grid, Matrix, CATALOG};
use blast_engine::{can_place, fits, placement_cells, valid_anchors, GameConfig, Session};
use proptest::prelude::*;

fn catalog_matrix(index: usize) -> Matrix {
    CATALOG[index % CATALOG.len()].matrix().unwrap()
}

fn grid_from_mask(size: usize, mask: &[bool]) -> Grid {
    let mut grid = Grid::new(size);
    for (i, &filled) in mask.iter().enumerate().take(size * size) {
        if filled {
            grid.fill(i / size, i % size, Color::rgb(0x101010));
        }
    }
    grid
}

/// `mask` laid row-major into the k x k window whose corner is `(dr, dc)`.
fn grid_with_window(size: usize, k: usize, dr: usize, dc: usize, mask: &[bool]) -> Grid {
    let mut grid = Grid::new(size);
    for (i, &filled) in mask.iter().enumerate().take(k * k) {
        if filled {
            grid.fill(dr + i / k, dc + i % k, Color::rgb(0x202020));
        }
    }
    grid
}

proptest! {
    #[test]
    fn rotations_closed_and_sized(index in 0usize..18) {
        let rotations = catalog_matrix(index).unique_rotations();
        prop_assert!(matches!(rotations.len(), 1 | 2 | 4));
        for m in &rotations {
            prop_assert!(rotations.contains(&m.rotate()));
        }
    }

    #[test]
    fn four_turns_is_identity(index in 0usize..18) {
        let m = catalog_matrix(index);
        prop_assert_eq!(m.rotate().rotate().rotate().rotate(), m.clone());
        prop_assert_eq!(m.rotate().cell_count(), m.cell_count());
    }

    #[test]
    fn placement_is_translation(index in 0usize..18, row in 0i32..8, col in 0i32..8) {
        let m = catalog_matrix(index);
        let grid = Grid::new(8);
        if let Some(cells) = placement_cells(&m, Anchor::new(row, col), &grid) {
            let expected: Vec<Cell> = m
                .occupied()
                .map(|(r, c)| Cell::new(row as usize + r, col as usize + c))
                .collect();
            prop_assert_eq!(cells.to_vec(), expected);
        } else {
            prop_assert!(row as usize + m.rows() > 8 || col as usize + m.cols() > 8);
        }
    }

    #[test]
    fn fit_survives_shifting_obstacles(
        index in 0usize..18,
        k in 3usize..=6,
        mask in prop::collection::vec(any::<bool>(), 36),
        row in 0usize..6,
        col in 0usize..6,
        dr in 0usize..=5,
        dc in 0usize..=5,
    ) {
        let m = catalog_matrix(index);
        let (dr, dc) = (dr.min(8 - k), dc.min(8 - k));
        let base = grid_with_window(8, k, 0, 0, &mask);
        let shifted = grid_with_window(8, k, dr, dc, &mask);
        if row + m.rows() <= k && col + m.cols() <= k {
            let anchor = Anchor::new(row as i32, col as i32);
            let moved = Anchor::new((row + dr) as i32, (col + dc) as i32);
            prop_assert_eq!(fits(&m, anchor, &base), fits(&m, moved, &shifted));
            let expected = placement_cells(&m, anchor, &base).map(|cells| {
                cells
                    .iter()
                    .map(|cell| Cell::new(cell.row + dr, cell.col + dc))
                    .collect::<Vec<_>>()
            });
            let actual = placement_cells(&m, moved, &shifted).map(|cells| cells.to_vec());
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn checks_do_not_mutate(index in 0usize..18, mask in prop::collection::vec(any::<bool>(), 64)) {
        let m = catalog_matrix(index);
        let grid = grid_from_mask(8, &mask);
        let before = grid.clone();
        let first = can_place(&m, &grid);
        let second = can_place(&m, &grid);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, !valid_anchors(&m, &grid).is_empty());
        prop_assert_eq!(grid, before);
    }

    #[test]
    fn score_accumulates(seed in any::<u64>(), picks in prop::collection::vec(0usize..64, 1..40)) {
        let mut s = Session::with_seed(GameConfig::classic(), seed).unwrap();
        let mut total = 0;
        for pick in picks {
            if s.is_game_over() {
                break;
            }
            let Some(index) = s.tray_availability().iter().position(|&ok| ok) else {
                break;
            };
            prop_assert!(s.select_piece(index));
            let anchors = valid_anchors(&s.tray()[index].matrix, s.grid());
            let out = s.try_place(anchors[pick % anchors.len()]).unwrap();
            prop_assert!(out.score.points >= 10);
            total += out.score.points;
            prop_assert_eq!(s.score(), total);
        }
    }
}
