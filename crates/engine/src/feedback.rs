//! Line-clear feedback: a deterministic category plus a cosmetic message
//! drawn at random from that category's pool.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clear::ClearResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    SingleRow,
    SingleColumn,
    Double,
    Triple,
    Quad,
    ComboBasic,
    ComboStrong,
    ComboEpic,
    Perfect,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 9] = [
        FeedbackCategory::SingleRow,
        FeedbackCategory::SingleColumn,
        FeedbackCategory::Double,
        FeedbackCategory::Triple,
        FeedbackCategory::Quad,
        FeedbackCategory::ComboBasic,
        FeedbackCategory::ComboStrong,
        FeedbackCategory::ComboEpic,
        FeedbackCategory::Perfect,
    ];

    /// Status styling class for the presentation layer.
    pub fn theme(self) -> &'static str {
        match self {
            Self::SingleRow | Self::SingleColumn => "status-theme-single",
            Self::Double => "status-theme-double",
            Self::Triple => "status-theme-triple",
            Self::Quad => "status-theme-quad",
            Self::ComboBasic => "status-theme-combo",
            Self::ComboStrong => "status-theme-combo-strong",
            Self::ComboEpic => "status-theme-combo-epic",
            Self::Perfect => "status-theme-perfect",
        }
    }

    pub fn messages(self) -> &'static [&'static str] {
        match self {
            Self::SingleRow => &["Solo Snap!", "Line Pop!", "Solo Combo!", "Quick Clip!"],
            Self::SingleColumn => &["Column Pop!", "Vertical Combo!", "Tall Tap!", "Slim Slam!"],
            Self::Double => &["Double Deal!", "Two-for-One!", "Twin Combo!", "Double Dash!"],
            Self::Triple => &["Triple Pop!", "3X Heat!", "Hat Trick Combo!", "Triple Zap!"],
            Self::Quad => &[
                "Mega Combo!",
                "4X Blast!",
                "Quad Crush!",
                "Combo Storm!",
                "4X Hype!",
                "Mega Pop!",
            ],
            Self::ComboBasic => &["Combo Cross!", "Grid Mash!", "Swift Combo!", "Combo Flow!"],
            Self::ComboStrong => &["Combo Surge!", "Super Combo!", "Power Mesh!"],
            Self::ComboEpic => &["Mega Grid!", "Combo Nova!"],
            Self::Perfect => &[
                "\u{2728} Perfect Combo!",
                "Board Reset!",
                "Flawless Combo!",
                "Wipeout!",
                "All Clear!",
            ],
        }
    }
}

/// Category for a clear, `None` when nothing cleared.
/// `board_empty` is the grid state after clearing.
pub fn classify_clear(clear: &ClearResult, board_empty: bool) -> Option<FeedbackCategory> {
    let rows = clear.rows_cleared();
    let cols = clear.cols_cleared();
    let total = clear.total_lines();
    if total == 0 {
        return None;
    }
    if board_empty {
        return Some(FeedbackCategory::Perfect);
    }

    let category = if rows > 0 && cols > 0 {
        if total >= 4 {
            FeedbackCategory::ComboEpic
        } else if rows >= 2 && cols >= 2 {
            FeedbackCategory::ComboStrong
        } else {
            FeedbackCategory::ComboBasic
        }
    } else {
        let single = if rows > 0 {
            FeedbackCategory::SingleRow
        } else {
            FeedbackCategory::SingleColumn
        };
        match rows.max(cols) {
            1 => single,
            2 => FeedbackCategory::Double,
            3 => FeedbackCategory::Triple,
            _ => FeedbackCategory::Quad,
        }
    };
    Some(category)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub category: FeedbackCategory,
    pub theme: &'static str,
    pub message: &'static str,
}

impl Feedback {
    pub fn pick<R: Rng + ?Sized>(category: FeedbackCategory, rng: &mut R) -> Self {
        let pool = category.messages();
        Self {
            category,
            theme: category.theme(),
            message: pool.choose(rng).copied().unwrap_or("Clear!"),
        }
    }
}
