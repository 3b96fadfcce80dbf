use std::cmp::Ordering;

use blast_core::{Anchor, Grid, ShapeInstance};
use blast_engine::{
    clear_completed_lines, commit_placement, placement_cells, score_move, valid_anchors,
    GameConfig, Session,
};
use rand::Rng;

use crate::eval::{evaluate, EvalWeights};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    pub index: usize,
    pub anchor: Anchor,
    pub value: f32,
}

/// One-ply player: move points plus the heuristic on the resulting grid.
#[derive(Clone, Debug, Default)]
pub struct GreedyPlayer {
    pub weights: EvalWeights,
}

impl GreedyPlayer {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn choose<R: Rng>(&self, session: &Session<R>) -> Option<Decision> {
        if session.is_game_over() {
            return None;
        }
        self.rank(session.grid(), session.tray(), session.config())
            .into_iter()
            .next()
    }

    /// Every legal (piece, anchor) pair, best first. Ties keep tray then
    /// row-major order.
    pub fn rank(&self, grid: &Grid, tray: &[ShapeInstance], config: &GameConfig) -> Vec<Decision> {
        let mut scored: Vec<Decision> = tray
            .iter()
            .enumerate()
            .flat_map(|(index, shape)| {
                valid_anchors(&shape.matrix, grid)
                    .into_iter()
                    .map(move |anchor| (index, shape, anchor))
            })
            .filter_map(|(index, shape, anchor)| {
                let value = self.value_of(grid, shape, anchor, config)?;
                Some(Decision {
                    index,
                    anchor,
                    value,
                })
            })
            .collect();

        scored.sort_by(|a, b| value_cmp(a.value, b.value));
        scored
    }

    fn value_of(
        &self,
        grid: &Grid,
        shape: &ShapeInstance,
        anchor: Anchor,
        config: &GameConfig,
    ) -> Option<f32> {
        let cells = placement_cells(&shape.matrix, anchor, grid)?;
        let mut next = grid.clone();
        commit_placement(&mut next, &cells, shape.color);
        let clear = clear_completed_lines(&mut next, config.clear_policy);
        let points = score_move(cells.len(), clear.total_lines(), &config.scoring).points;
        Some(points as f32 + evaluate(&next, &self.weights))
    }
}

fn value_cmp(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blast_core::{template_by_name, Color, ShapeId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn piece(name: &'static str) -> ShapeInstance {
        let t = template_by_name(name).unwrap();
        ShapeInstance::new(ShapeId(1), t, t.matrix().unwrap())
    }

    #[test]
    fn test_empty_session_returns_legal_move() {
        let session = Session::with_seed(GameConfig::classic(), 5).unwrap();
        let decision = GreedyPlayer::default().choose(&session).unwrap();
        let shape = &session.tray()[decision.index];
        assert!(valid_anchors(&shape.matrix, session.grid()).contains(&decision.anchor));
    }

    #[test]
    fn test_prefers_line_clear() {
        let mut grid = Grid::new(8);
        for col in 0..7 {
            grid.fill(2, col, Color::rgb(0x777777));
        }
        let tray = vec![piece("Single")];
        let ranked = GreedyPlayer::default().rank(&grid, &tray, &GameConfig::classic());
        assert_eq!(ranked[0].anchor, Anchor::new(2, 7));
        assert!(ranked.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn test_no_decision_when_game_over() {
        let mut grid = Grid::new(8);
        for row in 0..8 {
            for col in 0..8 {
                grid.fill(row, col, Color::rgb(0x777777));
            }
        }
        let rng = StdRng::seed_from_u64(3);
        let session =
            Session::from_position(GameConfig::classic(), grid, Vec::new(), 0, rng).unwrap();
        assert!(session.is_game_over());
        assert_eq!(GreedyPlayer::default().choose(&session), None);
    }
}
