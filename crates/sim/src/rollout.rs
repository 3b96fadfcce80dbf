//! Headless games driven by a `GreedyPlayer`, one seed per game.

use std::time::{Duration, Instant};

use blast_engine::{ConfigError, FeedbackCategory, GameConfig, PlaceOutcome, Session};
use rayon::prelude::*;

use crate::player::GreedyPlayer;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub seed: u64,
    pub score: u64,
    pub moves: u64,
    pub lines: u64,
    pub best_multiplier: u32,
    pub perfect_clears: u64,
    /// False when the game hit `max_moves` first.
    pub game_over: bool,
}

impl GameSummary {
    fn record(&mut self, outcome: &PlaceOutcome) {
        self.moves += 1;
        self.score = outcome.total_score;
        self.lines += outcome.clear.total_lines() as u64;
        self.best_multiplier = self.best_multiplier.max(outcome.score.multiplier);
        if outcome
            .feedback
            .as_ref()
            .is_some_and(|f| f.category == FeedbackCategory::Perfect)
        {
            self.perfect_clears += 1;
        }
    }
}

pub fn play_game(
    config: &GameConfig,
    seed: u64,
    player: &GreedyPlayer,
    max_moves: u64,
) -> Result<GameSummary, ConfigError> {
    play_game_with(config, seed, player, max_moves, |_, _| {})
}

/// Like `play_game`, calling `on_move` after every committed placement.
pub fn play_game_with<F>(
    config: &GameConfig,
    seed: u64,
    player: &GreedyPlayer,
    max_moves: u64,
    mut on_move: F,
) -> Result<GameSummary, ConfigError>
where
    F: FnMut(&Session, &PlaceOutcome),
{
    let mut session = Session::with_seed(config.clone(), seed)?;
    let mut summary = GameSummary {
        seed,
        ..GameSummary::default()
    };

    while summary.moves < max_moves {
        let Some(decision) = player.choose(&session) else {
            break;
        };
        if !session.select_piece(decision.index) {
            break;
        }
        let Ok(outcome) = session.try_place(decision.anchor) else {
            break;
        };
        summary.record(&outcome);
        on_move(&session, &outcome);
    }

    summary.game_over = session.is_game_over();
    Ok(summary)
}

#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub games: u64,
    pub games_over: u64,
    pub total_score: u64,
    pub best_score: u64,
    pub worst_score: u64,
    pub total_moves: u64,
    pub total_lines: u64,
    pub perfect_clears: u64,
    pub best_multiplier: u32,
    pub elapsed: Duration,
}

impl RolloutStats {
    pub fn from_summaries(summaries: &[GameSummary], elapsed: Duration) -> Self {
        Self {
            games: summaries.len() as u64,
            games_over: summaries.iter().filter(|s| s.game_over).count() as u64,
            total_score: summaries.iter().map(|s| s.score).sum(),
            best_score: summaries.iter().map(|s| s.score).max().unwrap_or(0),
            worst_score: summaries.iter().map(|s| s.score).min().unwrap_or(0),
            total_moves: summaries.iter().map(|s| s.moves).sum(),
            total_lines: summaries.iter().map(|s| s.lines).sum(),
            perfect_clears: summaries.iter().map(|s| s.perfect_clears).sum(),
            best_multiplier: summaries.iter().map(|s| s.best_multiplier).max().unwrap_or(0),
            elapsed,
        }
    }

    pub fn avg_score(&self) -> f64 {
        if self.games > 0 {
            self.total_score as f64 / self.games as f64
        } else {
            0.0
        }
    }

    pub fn avg_moves(&self) -> f64 {
        if self.games > 0 {
            self.total_moves as f64 / self.games as f64
        } else {
            0.0
        }
    }

    pub fn lines_per_move(&self) -> f64 {
        if self.total_moves > 0 {
            self.total_lines as f64 / self.total_moves as f64
        } else {
            0.0
        }
    }

    pub fn moves_per_sec(&self) -> f64 {
        let dt = self.elapsed.as_secs_f64();
        if dt > 0.0 {
            self.total_moves as f64 / dt
        } else {
            0.0
        }
    }
}

/// Plays every seed on the rayon pool. Summaries come back in seed order.
pub fn run_games(
    config: &GameConfig,
    seeds: &[u64],
    player: &GreedyPlayer,
    max_moves: u64,
) -> Result<(Vec<GameSummary>, RolloutStats), ConfigError> {
    config.validate()?;
    let t0 = Instant::now();
    let summaries = seeds
        .par_iter()
        .map(|&seed| play_game(config, seed, player, max_moves))
        .collect::<Result<Vec<_>, _>>()?;
    let stats = RolloutStats::from_summaries(&summaries, t0.elapsed());
    Ok((summaries, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_game_respects_move_cap() {
        let summary = play_game(&GameConfig::classic(), 1, &GreedyPlayer::default(), 5).unwrap();
        assert_eq!(summary.moves, 5);
        assert!(!summary.game_over);
        assert!(summary.score >= 50);
    }

    #[test]
    fn test_on_move_sees_every_placement() {
        let mut seen = 0;
        let summary = play_game_with(
            &GameConfig::classic(),
            2,
            &GreedyPlayer::default(),
            12,
            |session, outcome| {
                seen += 1;
                assert_eq!(session.score(), outcome.total_score);
            },
        )
        .unwrap();
        assert_eq!(seen, summary.moves);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let config = GameConfig::classic().with_batch_size(0);
        assert!(play_game(&config, 1, &GreedyPlayer::default(), 10).is_err());
        assert!(run_games(&config, &[1, 2], &GreedyPlayer::default(), 10).is_err());
    }

    #[test]
    fn test_stats_aggregate() {
        let summaries = vec![
            GameSummary {
                seed: 1,
                score: 100,
                moves: 10,
                lines: 2,
                best_multiplier: 2,
                perfect_clears: 0,
                game_over: true,
            },
            GameSummary {
                seed: 2,
                score: 300,
                moves: 30,
                lines: 6,
                best_multiplier: 3,
                perfect_clears: 1,
                game_over: false,
            },
        ];
        let stats = RolloutStats::from_summaries(&summaries, Duration::from_secs(2));
        assert_eq!(stats.games, 2);
        assert_eq!(stats.games_over, 1);
        assert_eq!(stats.best_score, 300);
        assert_eq!(stats.worst_score, 100);
        assert_eq!(stats.avg_score(), 200.0);
        assert_eq!(stats.lines_per_move(), 0.2);
        assert_eq!(stats.moves_per_sec(), 20.0);
        assert_eq!(stats.best_multiplier, 3);
    }
}
