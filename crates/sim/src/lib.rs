//! blast-sim - headless self-play for the block-placement engine.

pub mod eval;
pub mod player;
pub mod rollout;

pub use eval::{evaluate, grid_features, EvalWeights, GridFeatures};
pub use player::{Decision, GreedyPlayer};
pub use rollout::{play_game, play_game_with, run_games, GameSummary, RolloutStats};
