use serde::{Deserialize, Serialize};

use crate::config::ScoreRules;

/// Celebration shown for big multipliers. Nothing below 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashTier {
    Three,
    Four,
    FivePlus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveScore {
    pub points: u64,
    pub multiplier: u32,
}

impl MoveScore {
    pub fn flash(&self) -> Option<FlashTier> {
        match self.multiplier {
            0..=2 => None,
            3 => Some(FlashTier::Three),
            4 => Some(FlashTier::Four),
            _ => Some(FlashTier::FivePlus),
        }
    }
}

/// `(tiles * per_tile + lines * bonus) * max(lines, 1)`
pub fn score_move(tiles: usize, total_lines: usize, rules: &ScoreRules) -> MoveScore {
    let multiplier = total_lines.max(1) as u64;
    let mut points = tiles as u64 * rules.points_per_tile as u64;
    if total_lines > 0 {
        points += total_lines as u64 * rules.line_clear_bonus as u64;
    }
    MoveScore {
        points: points * multiplier,
        multiplier: multiplier as u32,
    }
}
