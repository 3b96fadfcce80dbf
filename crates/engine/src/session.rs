//! Turn-by-turn play: select, drag, commit, refill, game-over.
//!
//! `Session` owns the grid, the tray and the score. Nothing outside it
//! mutates them; every public operation runs to completion synchronously.
//! Once the phase is `GameOver` placements are refused until `reset`.

use blast_core::{Anchor, Cell, Color, Grid, Pivot, ShapeId, ShapeInstance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::anchor::{resolve_anchor, resolve_pivot, BoardMetrics, Point};
use crate::batch::BatchGenerator;
use crate::clear::{clear_completed_lines, commit_placement, ClearResult};
use crate::config::{ConfigError, GameConfig};
use crate::feedback::{classify_clear, Feedback};
use crate::placement::{can_place, placement_cells, PlacementCells};
use crate::scoring::{score_move, FlashTier, MoveScore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fresh grid, nothing placed yet.
    Ready,
    Playing,
    /// No tray piece fits anywhere. Frozen until reset.
    GameOver,
}

/// Why a placement attempt changed nothing. Displays as the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("No moves left. Game over!")]
    GameOver,
    #[error("Select a shape first.")]
    NoSelection,
    #[error("Drag onto the grid to place.")]
    NoHover,
    #[error("That shape does not fit there.")]
    DoesNotFit,
}

/// Everything the presentation layer needs to animate a committed move.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaceOutcome {
    pub piece: ShapeId,
    pub color: Color,
    pub cells: Vec<Cell>,
    pub clear: ClearResult,
    pub score: MoveScore,
    pub flash: Option<FlashTier>,
    pub feedback: Option<Feedback>,
    pub total_score: u64,
    pub board_empty: bool,
    pub refilled: bool,
    pub game_over: bool,
}

/// Read-only view for rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub tray: &'a [ShapeInstance],
    pub availability: Vec<bool>,
    pub selected: Option<usize>,
    pub score: u64,
    pub phase: Phase,
}

pub struct Session<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    tray: Vec<ShapeInstance>,
    selected: Option<usize>,
    pivot: Option<Pivot>,
    last_hover: Option<Anchor>,
    score: u64,
    phase: Phase,
    generator: BatchGenerator<R>,
}

impl Session<StdRng> {
    /// Reproducible session: same config and seed, same deals.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = BatchGenerator::new(rng, config.batch_policy);
        let mut session = Self {
            grid: Grid::new(config.size),
            tray: Vec::new(),
            selected: None,
            pivot: None,
            last_hover: None,
            score: 0,
            phase: Phase::Ready,
            generator,
            config,
        };
        session.reset();
        Ok(session)
    }

    /// Start from an arbitrary position. An empty tray is refilled; the
    /// phase is recomputed from the grid and tray.
    pub fn from_position(
        config: GameConfig,
        grid: Grid,
        tray: Vec<ShapeInstance>,
        score: u64,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.size() != config.size {
            return Err(ConfigError::GridSizeMismatch {
                expected: config.size,
                found: grid.size(),
            });
        }
        let mut generator = BatchGenerator::new(rng, config.batch_policy);
        let tray = if tray.is_empty() {
            generator.generate(&grid, config.batch_size)
        } else {
            tray
        };
        let phase = if grid.is_empty() && score == 0 {
            Phase::Ready
        } else {
            Phase::Playing
        };
        let mut session = Self {
            grid,
            tray,
            selected: None,
            pivot: None,
            last_hover: None,
            score,
            phase,
            generator,
            config,
        };
        session.refresh_game_over();
        Ok(session)
    }

    /// Empty grid, zero score, fresh tray. The random stream carries on.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.config.size);
        self.score = 0;
        self.phase = Phase::Ready;
        self.clear_selection();
        self.tray = self.generator.generate(&self.grid, self.config.batch_size);
        self.refresh_game_over();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tray(&self) -> &[ShapeInstance] {
        &self.tray
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_piece(&self) -> Option<&ShapeInstance> {
        self.selected.and_then(|i| self.tray.get(i))
    }

    pub fn last_hover(&self) -> Option<Anchor> {
        self.last_hover
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Per tray slot: does the piece fit anywhere right now?
    pub fn tray_availability(&self) -> Vec<bool> {
        self.tray
            .iter()
            .map(|shape| can_place(&shape.matrix, &self.grid))
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            tray: &self.tray,
            availability: self.tray_availability(),
            selected: self.selected,
            score: self.score,
            phase: self.phase,
        }
    }

    /// Select a tray piece. Unplaceable or missing pieces clear the
    /// selection and return false.
    pub fn select_piece(&mut self, index: usize) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.pivot = None;
        self.last_hover = None;
        match self.tray.get(index) {
            Some(shape) if can_place(&shape.matrix, &self.grid) => {
                self.selected = Some(index);
                true
            }
            _ => {
                self.selected = None;
                false
            }
        }
    }

    /// Select and start dragging, holding the grabbed tray cell.
    pub fn begin_drag(&mut self, index: usize, grabbed: Option<Pivot>) -> bool {
        if !self.select_piece(index) {
            return false;
        }
        self.pivot = self
            .selected_piece()
            .map(|shape| resolve_pivot(&shape.matrix, grabbed));
        true
    }

    /// Pivot of the current drag, or the selected piece's default.
    pub fn pivot(&self) -> Option<Pivot> {
        let shape = self.selected_piece()?;
        Some(self.pivot.unwrap_or_else(|| shape.matrix.default_pivot()))
    }

    /// Anchor for the selected piece under `pointer`, without side effects.
    pub fn resolve_anchor(
        &self,
        pointer: Point,
        pivot: Pivot,
        metrics: &BoardMetrics,
    ) -> Option<Anchor> {
        let shape = self.selected_piece()?;
        resolve_anchor(
            &shape.matrix,
            pointer,
            pivot,
            metrics,
            &self.grid,
            self.config.snap_distance,
        )
    }

    /// Pointer sample during a drag; remembers the result for `release`.
    pub fn hover(&mut self, pointer: Point, metrics: &BoardMetrics) -> Option<Anchor> {
        self.last_hover = match self.pivot() {
            Some(pivot) if !self.is_game_over() => self.resolve_anchor(pointer, pivot, metrics),
            _ => None,
        };
        self.last_hover
    }

    /// Cells the selected piece would cover at `anchor`.
    pub fn preview(&self, anchor: Anchor) -> Option<PlacementCells> {
        let shape = self.selected_piece()?;
        placement_cells(&shape.matrix, anchor, &self.grid)
    }

    /// Abandon the drag. The piece stays selected; grid, tray and score
    /// are untouched.
    pub fn cancel_drag(&mut self) {
        self.pivot = None;
        self.last_hover = None;
    }

    /// Drop at the last hovered anchor. The drag ends either way; on a
    /// failed drop the piece stays selected.
    pub fn release(&mut self) -> Result<PlaceOutcome, Rejection> {
        let hovered = self.last_hover.take();
        self.pivot = None;
        if self.is_game_over() {
            return Err(Rejection::GameOver);
        }
        let anchor = hovered.ok_or(Rejection::NoHover)?;
        self.try_place(anchor)
    }

    /// Commit the selected piece at `anchor`. On any rejection the grid,
    /// tray and score are left exactly as they were.
    pub fn try_place(&mut self, anchor: Anchor) -> Result<PlaceOutcome, Rejection> {
        if self.is_game_over() {
            return Err(Rejection::GameOver);
        }
        let index = self.selected.ok_or(Rejection::NoSelection)?;
        let shape = self.tray.get(index).ok_or(Rejection::NoSelection)?;
        let cells =
            placement_cells(&shape.matrix, anchor, &self.grid).ok_or(Rejection::DoesNotFit)?;

        let shape = self.tray.remove(index);
        commit_placement(&mut self.grid, &cells, shape.color);
        let clear = clear_completed_lines(&mut self.grid, self.config.clear_policy);
        let score = score_move(cells.len(), clear.total_lines(), &self.config.scoring);
        let board_empty = self.grid.is_empty();
        let feedback = classify_clear(&clear, board_empty)
            .map(|category| Feedback::pick(category, self.generator.rng_mut()));
        self.score += score.points;
        self.phase = Phase::Playing;
        self.clear_selection();

        let refilled = self.tray.is_empty();
        if refilled {
            self.tray = self.generator.generate(&self.grid, self.config.batch_size);
        }
        self.refresh_game_over();

        Ok(PlaceOutcome {
            piece: shape.id,
            color: shape.color,
            cells: cells.into_vec(),
            clear,
            flash: score.flash(),
            score,
            feedback,
            total_score: self.score,
            board_empty,
            refilled,
            game_over: self.is_game_over(),
        })
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.pivot = None;
        self.last_hover = None;
    }

    /// Game over iff no tray piece fits anywhere on the current grid.
    fn refresh_game_over(&mut self) {
        let any_placeable = self
            .tray
            .iter()
            .any(|shape| can_place(&shape.matrix, &self.grid));
        if !any_placeable {
            self.phase = Phase::GameOver;
            self.clear_selection();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blast_core::template_by_name;

    const INK: Color = Color::rgb(0x333333);

    fn session() -> Session {
        Session::with_seed(GameConfig::classic(), 7).unwrap()
    }

    fn piece(name: &'static str, id: u64) -> ShapeInstance {
        let t = template_by_name(name).unwrap();
        ShapeInstance::new(ShapeId(1000 + id), t, t.matrix().unwrap())
    }

    fn set_tray(s: &mut Session, tray: Vec<ShapeInstance>) {
        s.tray = tray;
        s.phase = Phase::Playing;
        s.refresh_game_over();
    }

    #[test]
    fn test_new_session_ready() {
        let s = session();
        assert_eq!(s.phase(), Phase::Ready);
        assert_eq!(s.tray().len(), 3);
        assert_eq!(s.score(), 0);
        assert!(s.grid().is_empty());
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Session::with_seed(GameConfig::classic().with_size(0), 1).is_err());
    }

    #[test]
    fn test_select_out_of_range() {
        let mut s = session();
        assert!(s.select_piece(0));
        assert!(!s.select_piece(9));
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_place_without_selection() {
        let mut s = session();
        assert_eq!(s.try_place(Anchor::new(0, 0)), Err(Rejection::NoSelection));
    }

    #[test]
    fn test_single_scores_ten() {
        let mut s = session();
        set_tray(&mut s, vec![piece("Single", 1), piece("Square", 2)]);
        assert!(s.select_piece(0));
        let out = s.try_place(Anchor::new(0, 0)).unwrap();
        assert_eq!(out.score.points, 10);
        assert!(out.clear.is_empty());
        assert_eq!(out.feedback, None);
        assert_eq!(s.grid().get(0, 0), Some(Color::rgb(0xf94144)));
        assert_eq!(s.score(), 10);
        assert_eq!(s.tray().len(), 1);
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn test_does_not_fit_leaves_state() {
        let mut s = session();
        set_tray(&mut s, vec![piece("Bar4", 1)]);
        assert!(s.select_piece(0));
        let before = s.grid().clone();
        assert_eq!(s.try_place(Anchor::new(0, 6)), Err(Rejection::DoesNotFit));
        assert_eq!(s.grid(), &before);
        assert_eq!(s.score(), 0);
        assert_eq!(s.tray().len(), 1);
        assert_eq!(s.selected(), Some(0));
    }

    #[test]
    fn test_refill_when_tray_empties() {
        let mut s = session();
        set_tray(&mut s, vec![piece("Single", 1)]);
        assert!(s.select_piece(0));
        let out = s.try_place(Anchor::new(4, 4)).unwrap();
        assert!(out.refilled);
        assert_eq!(s.tray().len(), 3);
    }

    #[test]
    fn test_unplaceable_selection_rejected() {
        let mut s = session();
        for row in 0..8 {
            for col in 0..8 {
                if (row, col) != (0, 0) {
                    s.grid.fill(row, col, INK);
                }
            }
        }
        set_tray(&mut s, vec![piece("Square", 1), piece("Single", 2)]);
        assert!(!s.is_game_over());
        assert!(!s.select_piece(0));
        assert_eq!(s.selected(), None);
        assert!(s.select_piece(1));
        assert_eq!(s.tray_availability(), vec![false, true]);
    }

    #[test]
    fn test_drag_hover_release() {
        let mut s = session();
        set_tray(&mut s, vec![piece("Bar3", 1), piece("Single", 2)]);
        let metrics = BoardMetrics::new(0.0, 0.0, 320.0, 320.0);
        assert!(s.begin_drag(0, Some(Pivot::new(0, 2))));
        assert_eq!(s.pivot(), Some(Pivot::new(0, 2)));
        // last cell held over (5, 6) -> origin (5, 4)
        let anchor = s.hover(Point::new(6.0 * 40.0 + 20.0, 5.0 * 40.0 + 20.0), &metrics);
        assert_eq!(anchor, Some(Anchor::new(5, 4)));
        assert_eq!(s.preview(Anchor::new(5, 4)).unwrap().len(), 3);
        let out = s.release().unwrap();
        assert_eq!(out.cells, vec![Cell::new(5, 4), Cell::new(5, 5), Cell::new(5, 6)]);
        assert_eq!(s.last_hover(), None);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_release_without_hover() {
        let mut s = session();
        assert!(s.begin_drag(0, None));
        assert_eq!(s.release(), Err(Rejection::NoHover));
        assert_eq!(s.selected(), Some(0));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_cancel_drag_keeps_selection() {
        let mut s = session();
        let metrics = BoardMetrics::new(0.0, 0.0, 320.0, 320.0);
        assert!(s.begin_drag(1, None));
        assert!(s.hover(Point::new(100.0, 100.0), &metrics).is_some());
        let grid = s.grid().clone();
        let tray = s.tray().to_vec();
        s.cancel_drag();
        assert_eq!(s.selected(), Some(1));
        assert_eq!(s.pivot(), None);
        assert_eq!(s.last_hover(), None);
        assert_eq!(s.release(), Err(Rejection::NoHover));
        assert_eq!(s.grid(), &grid);
        assert_eq!(s.tray(), tray.as_slice());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_far_anchor_does_not_fit() {
        let mut s = session();
        set_tray(&mut s, vec![piece("S", 1), piece("Cross", 2)]);
        for index in 0..2 {
            assert!(s.select_piece(index));
            for anchor in [Anchor::new(0, i32::MAX), Anchor::new(i32::MIN, 0)] {
                assert_eq!(s.preview(anchor), None);
                assert_eq!(s.try_place(anchor), Err(Rejection::DoesNotFit));
            }
        }
        assert!(s.grid().is_empty());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_game_over_when_nothing_fits() {
        let mut s = session();
        for row in 0..8 {
            for col in 0..8 {
                if (row + col) % 2 == 0 {
                    s.grid.fill(row, col, INK);
                }
            }
        }
        set_tray(
            &mut s,
            vec![piece("Domino", 1), piece("Square", 2), piece("Bar3", 3)],
        );
        assert!(s.is_game_over());
        assert!(!s.select_piece(0));
        assert_eq!(s.try_place(Anchor::new(0, 1)), Err(Rejection::GameOver));
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut s = session();
        set_tray(&mut s, Vec::new());
        assert!(s.is_game_over());
        s.reset();
        assert_eq!(s.phase(), Phase::Ready);
        assert_eq!(s.tray().len(), 3);
        assert!(s.grid().is_empty());
    }

    #[test]
    fn test_from_position_checks_grid_size() {
        let err = Session::from_position(
            GameConfig::classic(),
            Grid::new(10),
            Vec::new(),
            0,
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(
            err,
            Err(ConfigError::GridSizeMismatch { expected: 8, found: 10 })
        ));
    }

    #[test]
    fn test_from_position_refills_empty_tray() {
        let mut grid = Grid::new(8);
        grid.fill(4, 4, INK);
        let rng = StdRng::seed_from_u64(1);
        let s =
            Session::from_position(GameConfig::classic(), grid, Vec::new(), 120, rng).unwrap();
        assert_eq!(s.tray().len(), 3);
        assert_eq!(s.score(), 120);
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn test_snapshot_matches_state() {
        let s = session();
        let snap = s.snapshot();
        assert_eq!(snap.tray.len(), 3);
        assert_eq!(snap.availability, vec![true, true, true]);
        assert_eq!(snap.phase, Phase::Ready);
        assert_eq!(snap.selected, None);
    }
}
