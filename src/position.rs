//! Go position and move legality.
//!
//! This module holds the live game state ([`Position`]) and the single rules
//! implementation every caller goes through:
//! - [`Position::try_move`] validates a move and computes its outcome without
//!   touching the position (legality probes, forbidden-point markers, AI).
//! - [`Position::apply_move`] commits a previously validated [`MoveResult`].
//!
//! [`Position::play`] chains the two, so the commit path can never diverge
//! from the probe path.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::board::{Board, BoardKey, Color, Point};
use crate::group::analyze;

/// Reason a move was rejected. No state is changed on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: game is over")]
    GameOver,
    #[error("illegal move: fills own true eye")]
    OwnEye,
    #[error("illegal move: off the board")]
    OutOfBounds,
    #[error("illegal move: point not empty")]
    Occupied,
    #[error("illegal move: retakes ko")]
    Ko,
    #[error("illegal move: repeats an earlier position")]
    Superko,
    #[error("illegal move: suicide")]
    Suicide,
}

/// Why a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Both sides passed back to back.
    Normal,
    /// `loser` passed too many times without playing a stone.
    Forfeit { loser: Color },
    /// Neither side has a legal move left.
    BoardClosed,
    Resignation { loser: Color },
    /// Scoring was requested explicitly.
    Manual,
}

impl EndReason {
    /// Whether this ending is decided by counting the board.
    pub fn is_scored(self) -> bool {
        matches!(
            self,
            EndReason::Normal | EndReason::BoardClosed | EndReason::Manual
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    /// Dead stones are being swept and the board counted.
    Scoring,
    Over(EndReason),
}

/// Outcome of a legal move, computed against a specific position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub point: Point,
    pub color: Color,
    /// Board after placement and captures.
    pub board: Board,
    /// Opponent stones removed by this move.
    pub captured: Vec<Point>,
    /// Point the opponent may not retake on their next move.
    pub ko: Option<Point>,
    /// Liberties of the placed stone's group after captures.
    pub liberties: usize,
}

impl MoveResult {
    pub fn captured_count(&self) -> usize {
        self.captured.len()
    }
}

/// A committed position, restorable by undo.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub key: BoardKey,
    pub board: Board,
    pub to_play: Color,
    pub ko: Option<Point>,
    pub captures: [u32; 2],
    pub move_count: usize,
    pub last: Option<Point>,
}

/// Every board that existed before a committed stone move, in order.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
    seen: FxHashSet<BoardKey>,
}

impl History {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn contains(&self, key: &BoardKey) -> bool {
        self.seen.contains(key)
    }

    fn push(&mut self, snapshot: Snapshot) {
        self.seen.insert(snapshot.key.clone());
        self.snapshots.push(snapshot);
    }

    fn pop(&mut self) -> Option<Snapshot> {
        let snapshot = self.snapshots.pop()?;
        // Superko keeps every key in history unique.
        self.seen.remove(&snapshot.key);
        Some(snapshot)
    }
}

/// The rules inputs for one move evaluation.
struct Context<'a> {
    board: &'a Board,
    ko: Option<Point>,
    history: &'a History,
    /// A board about to enter history (hypothetical follow-up moves).
    pending: Option<&'a BoardKey>,
    over: bool,
}

impl Context<'_> {
    fn repeats(&self, key: &BoardKey) -> bool {
        self.history.contains(key) || self.pending == Some(key)
    }
}

/// Check if `pt` is an empty point whose four orthogonal neighbors are all
/// on the board and all `color`.
///
/// Diagonals are not inspected, and edge or corner points never qualify.
pub fn is_true_eye(board: &Board, pt: Point, color: Color) -> bool {
    if !board.is_empty_at(pt) {
        return false;
    }
    let (x, y) = pt;
    let s = board.size();
    if x == 0 || y == 0 || x + 1 >= s || y + 1 >= s {
        return false;
    }
    board.neighbors(pt).all(|n| board.get(n) == Some(color))
}

fn evaluate(ctx: &Context<'_>, pt: Point, color: Color) -> Result<MoveResult, MoveError> {
    if ctx.over {
        return Err(MoveError::GameOver);
    }
    if is_true_eye(ctx.board, pt, color) {
        return Err(MoveError::OwnEye);
    }
    if !ctx.board.in_bounds(pt) {
        return Err(MoveError::OutOfBounds);
    }
    if ctx.board.get(pt).is_some() {
        return Err(MoveError::Occupied);
    }
    if ctx.ko == Some(pt) {
        return Err(MoveError::Ko);
    }

    let mut next = ctx.board.clone();
    next.set(pt, Some(color));

    let opp = color.opp();
    let mut captured = Vec::new();
    for n in next.neighbors(pt) {
        if next.get(n) != Some(opp) {
            continue;
        }
        if let Some(group) = analyze(&next, n) {
            if group.liberty_count() == 0 {
                next.remove(&group.stones);
                captured.extend(group.stones);
            }
        }
    }

    if ctx.repeats(&next.key()) {
        return Err(MoveError::Superko);
    }

    let (liberties, group_size) =
        analyze(&next, pt).map_or((0, 0), |g| (g.liberty_count(), g.size()));
    if liberties == 0 && captured.is_empty() {
        return Err(MoveError::Suicide);
    }

    let ko = if captured.len() == 1 && group_size == 1 && liberties == 1 {
        Some(captured[0])
    } else {
        None
    };

    Ok(MoveResult {
        point: pt,
        color,
        board: next,
        captured,
        ko,
        liberties,
    })
}

/// A Go game state: board, turn, ko, captures, pass counters and history.
#[derive(Debug, Clone)]
pub struct Position {
    pub board: Board,
    pub to_play: Color,
    /// Point forbidden for immediate recapture.
    pub ko: Option<Point>,
    /// Stones captured by each color, indexed by [`Color::index`].
    pub captures: [u32; 2],
    /// Moves and passes played so far.
    pub move_count: usize,
    /// Passes in a row by either color.
    pub consecutive_passes: u32,
    /// Passes by each color since that color last placed a stone.
    pub passes: [u32; 2],
    /// Last stone placed (None after a pass or at the start).
    pub last: Option<Point>,
    pub komi: f64,
    pub status: Status,
    history: History,
}

impl Position {
    pub fn new(size: usize, komi: f64) -> Self {
        Self::from_board(Board::new(size), Color::Black, komi)
    }

    /// Start from an arbitrary board with empty history.
    pub fn from_board(board: Board, to_play: Color, komi: f64) -> Self {
        Position {
            board,
            to_play,
            ko: None,
            captures: [0, 0],
            move_count: 0,
            consecutive_passes: 0,
            passes: [0, 0],
            last: None,
            komi,
            status: Status::InProgress,
            history: History::default(),
        }
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn captures_by(&self, color: Color) -> u32 {
        self.captures[color.index()]
    }

    pub fn passes_by(&self, color: Color) -> u32 {
        self.passes[color.index()]
    }

    fn context(&self) -> Context<'_> {
        Context {
            board: &self.board,
            ko: self.ko,
            history: &self.history,
            pending: None,
            over: self.is_over(),
        }
    }

    /// Validate a move for `color` and compute its outcome. Never mutates.
    pub fn try_move(&self, pt: Point, color: Color) -> Result<MoveResult, MoveError> {
        evaluate(&self.context(), pt, color)
    }

    /// Commit a result obtained from [`Position::try_move`] on this position.
    pub fn apply_move(&mut self, result: &MoveResult) {
        debug_assert!(self.board.is_empty_at(result.point));
        self.history.push(Snapshot {
            key: self.board.key(),
            board: self.board.clone(),
            to_play: self.to_play,
            ko: self.ko,
            captures: self.captures,
            move_count: self.move_count,
            last: self.last,
        });

        self.board = result.board.clone();
        self.ko = result.ko;
        self.to_play = result.color.opp();
        self.move_count += 1;
        self.consecutive_passes = 0;
        self.passes[result.color.index()] = 0;
        self.captures[result.color.index()] += result.captured_count() as u32;
        self.last = Some(result.point);
    }

    /// Validate and commit a move for the player to move.
    pub fn play(&mut self, pt: Point) -> Result<MoveResult, MoveError> {
        let result = self.try_move(pt, self.to_play)?;
        self.apply_move(&result);
        Ok(result)
    }

    /// Record a pass by the player to move. Clears the ko.
    pub fn pass(&mut self) {
        let color = self.to_play;
        self.passes[color.index()] += 1;
        self.consecutive_passes += 1;
        self.ko = None;
        self.last = None;
        self.to_play = color.opp();
        self.move_count += 1;
    }

    /// Restore the position before the last committed stone move.
    ///
    /// Pass counters are cleared. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.board = snapshot.board;
        self.to_play = snapshot.to_play;
        self.ko = snapshot.ko;
        self.captures = snapshot.captures;
        self.move_count = snapshot.move_count;
        self.last = snapshot.last;
        self.consecutive_passes = 0;
        self.passes = [0, 0];
        true
    }

    /// Whether, after `result`, the opponent has at least one move that
    /// passes validation.
    fn opponent_can_respond(&self, result: &MoveResult) -> bool {
        let pending = self.board.key();
        let ctx = Context {
            board: &result.board,
            ko: result.ko,
            history: &self.history,
            pending: Some(&pending),
            over: false,
        };
        let opp = result.color.opp();
        result
            .board
            .empty_points()
            .any(|pt| evaluate(&ctx, pt, opp).is_ok())
    }

    fn is_candidate(&self, pt: Point, color: Color) -> Option<MoveResult> {
        let result = self.try_move(pt, color).ok()?;
        if is_true_eye(&self.board, pt, color) || !self.opponent_can_respond(&result) {
            return None;
        }
        Some(result)
    }

    /// Legal moves for `color`, excluding moves that leave the opponent
    /// without any legal reply.
    pub fn legal_moves(&self, color: Color) -> Vec<Point> {
        self.board
            .empty_points()
            .filter(|&pt| self.is_candidate(pt, color).is_some())
            .collect()
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.board
            .empty_points()
            .any(|pt| self.is_candidate(pt, color).is_some())
    }

    /// Empty points the player to move may not play, with the reason.
    pub fn forbidden_points(&self) -> Vec<(Point, MoveError)> {
        self.board
            .empty_points()
            .filter_map(|pt| self.try_move(pt, self.to_play).err().map(|e| (pt, e)))
            .collect()
    }
}
