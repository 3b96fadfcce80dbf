use serde::{Deserialize, Serialize};

use crate::batch::BatchPolicy;
use crate::clear::ClearPolicy;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    ZeroSize,
    #[error("batch size must be at least 1")]
    ZeroBatch,
    #[error("snap distance must be positive, got {0}")]
    BadSnapDistance(f64),
    #[error("grid is {found}x{found}, config expects {expected}x{expected}")]
    GridSizeMismatch { expected: usize, found: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    pub points_per_tile: u32,
    pub line_clear_bonus: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            points_per_tile: 10,
            line_clear_bonus: 80,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: usize,
    pub batch_size: usize,
    pub scoring: ScoreRules,
    /// Pointer slack in px around the grid for snapping.
    pub snap_distance: f64,
    pub clear_policy: ClearPolicy,
    pub batch_policy: BatchPolicy,
}

impl GameConfig {
    /// 8x8 grid, three pieces per batch, clear-in-place.
    pub fn classic() -> Self {
        Self {
            size: 8,
            batch_size: 3,
            scoring: ScoreRules::default(),
            snap_distance: 250.0,
            clear_policy: ClearPolicy::InPlace,
            batch_policy: BatchPolicy::Placeable,
        }
    }

    /// 10x10 standalone variant: rows collapse, batches are dealt blind.
    pub fn legacy() -> Self {
        Self {
            size: 10,
            clear_policy: ClearPolicy::RowCollapse,
            batch_policy: BatchPolicy::Blind,
            ..Self::classic()
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatch);
        }
        if !(self.snap_distance > 0.0) {
            return Err(ConfigError::BadSnapDistance(self.snap_distance));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}
