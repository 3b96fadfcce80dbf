//! blast-engine - game rules for the block-placement puzzle.
//!
//! Placement checks, line clearing, scoring, batch dealing, pointer
//! snapping and the session state machine that ties them together.

pub mod anchor;
pub mod batch;
pub mod clear;
pub mod config;
pub mod feedback;
pub mod placement;
pub mod scoring;
pub mod session;

pub use anchor::{resolve_anchor, resolve_pivot, BoardMetrics, Point, DEFAULT_SNAP_DISTANCE};
pub use batch::{BatchGenerator, BatchPolicy, Variant, VariantPool};
pub use clear::{clear_completed_lines, commit_placement, is_board_empty, ClearPolicy, ClearResult};
pub use config::{ConfigError, GameConfig, ScoreRules};
pub use feedback::{classify_clear, Feedback, FeedbackCategory};
pub use placement::{can_place, fits, placement_cells, valid_anchors, PlacementCells};
pub use scoring::{score_move, FlashTier, MoveScore};
pub use session::{Phase, PlaceOutcome, Rejection, Session, Snapshot};
