//! Constants for board dimensions, game rules, and AI heuristic weights.
//!
//! Board size and komi are runtime settings (see [`crate::game::GameConfig`]);
//! the values here are the defaults plus every tuning knob the engine uses.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_SIZE: usize = 9;

/// Smallest playable board.
pub const MIN_SIZE: usize = 2;

/// Largest board addressable with letter coordinates (A-Z without I).
pub const MAX_SIZE: usize = 25;

/// Boards at least this large use 4-4 star points instead of 3-3.
pub const LARGE_BOARD: usize = 13;

// =============================================================================
// Game Rules
// =============================================================================

/// Default komi (compensation points for White).
pub const DEFAULT_KOMI: f64 = 3.75;

/// Passes by a single color, without a stone move in between, that forfeit the game.
pub const FORFEIT_PASSES: u32 = 2;

/// Consecutive passes (by either color) that end the game normally.
pub const END_PASSES: u32 = 2;

// =============================================================================
// AI: Candidate Selection
// =============================================================================

/// Moves before which the AI prefers star points and the center outright.
pub const OPENING_BOOK_MOVES: usize = 2;

/// Candidates kept after cheap ranking at [`crate::ai::Strength::Fast`].
pub const CANDIDATES_FAST: usize = 40;

/// Candidates kept after cheap ranking at [`crate::ai::Strength::Full`].
pub const CANDIDATES_FULL: usize = 90;

/// Cheap ranking: bonus per line of distance from the edge.
pub const RANK_EDGE_DIST: f64 = 0.6;

/// Cheap ranking applies star-point proximity before this move.
pub const RANK_OPENING_MOVES: usize = 20;

/// Cheap ranking: star-point bonus by Manhattan distance 0, 1, 2.
pub const RANK_STAR: [f64; 3] = [8.0, 4.0, 2.0];

/// Cheap ranking: extra bonus for the center point.
pub const RANK_CENTER: f64 = 3.0;

/// Cheap ranking favors the first line after this move (endgame boundary plays).
pub const RANK_ENDGAME_MOVES: usize = 40;

/// Cheap ranking: first-line bonus in the endgame.
pub const RANK_ENDGAME_EDGE: f64 = 1.0;

// =============================================================================
// AI: Heuristic Weights
// =============================================================================

/// Score per captured stone.
pub const W_CAPTURE: f64 = 100.0;

/// Penalty when the placed group is left with one liberty.
pub const W_SELF_ATARI: f64 = 35.0;

/// Penalty when the placed group is left with two liberties.
pub const W_TWO_LIBS: f64 = 10.0;

/// Reward per liberty above two.
pub const W_LIBERTY: f64 = 1.2;

/// Cap on the liberty reward.
pub const W_LIBERTY_CAP: f64 = 10.0;

/// Bonus per adjacent opponent group reduced to one liberty.
pub const W_ATARI: f64 = 28.0;

/// Bonus per adjacent opponent group reduced to two liberties.
pub const W_PRESSURE: f64 = 9.0;

/// Bonus per friendly orthogonal neighbor.
pub const W_CONNECT: f64 = 6.0;

/// First-line penalty before [`EARLY_EDGE_MOVES`].
pub const W_EARLY_EDGE: f64 = 6.0;

/// Window for [`W_EARLY_EDGE`].
pub const EARLY_EDGE_MOVES: usize = 14;

/// Bonus for a move that sets up a ko.
pub const W_KO: f64 = 8.0;

/// Groups larger than this are penalized per extra stone.
pub const CLUMP_LIMIT: usize = 5;

/// Penalty per stone above [`CLUMP_LIMIT`].
pub const W_CLUMP: f64 = 12.0;

/// Territory tie-break window (inclusive move numbers).
pub const EVAL_WINDOW: (usize, usize) = (30, 120);

/// Territory tie-break weight at Fast strength.
pub const W_TERRITORY_FAST: f64 = 0.22;

/// Territory tie-break weight at Full strength.
pub const W_TERRITORY_FULL: f64 = 0.35;

/// Opening shape bonuses apply up to and including this move.
pub const SHAPE_OPENING_MOVES: usize = 25;

/// Opening shape: star-point bonus by Manhattan distance 0, 1.
pub const W_SHAPE_STAR: [f64; 2] = [12.0, 6.0];

/// Opening shape: extra center bonus.
pub const W_SHAPE_CENTER: f64 = 5.0;

/// Opening shape: first-line penalty.
pub const W_SHAPE_EDGE: f64 = 20.0;
