//! Game state machine: turn order, passes, resignation and termination.
//!
//! A [`Game`] owns one [`Position`] and drives it through
//! `InProgress -> Scoring -> Over(reason)`. Stone moves go through
//! [`Position::play`]; after every action the game checks whether the player
//! to move can still play and passes for them automatically if not.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ai::{Ai, Strength};
use crate::board::{Board, Color, Point};
use crate::constants::{
    DEFAULT_KOMI, DEFAULT_SIZE, END_PASSES, FORFEIT_PASSES, MAX_SIZE, MIN_SIZE,
};
use crate::position::{EndReason, MoveError, MoveResult, Position, Status};
use crate::territory::{Score, TerritoryMap, remove_dead_stones, score};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported board size {0} (expected {MIN_SIZE} to {MAX_SIZE})")]
    BoardSize(usize),
    #[error("komi must be a finite number")]
    Komi,
}

/// Board size and komi for a new game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub size: usize,
    pub komi: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            komi: DEFAULT_KOMI,
        }
    }
}

impl GameConfig {
    pub fn new(size: usize, komi: f64) -> Result<Self, ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(ConfigError::BoardSize(size));
        }
        if !komi.is_finite() {
            return Err(ConfigError::Komi);
        }
        Ok(Self { size, komi })
    }
}

/// Whether, and how, the computer plays one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiSettings {
    pub enabled: bool,
    pub color: Color,
    pub strength: Strength,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::White,
            strength: Strength::Full,
        }
    }
}

/// One committed action, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Play {
        color: Color,
        point: Point,
        captured: usize,
    },
    /// `forced` is set when the player had no legal move.
    Pass { color: Color, forced: bool },
    Resign { color: Color },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameResult {
    /// Decided by counting; `winner` is `None` on a tie.
    Counted { winner: Option<Color>, margin: f64 },
    Resignation { winner: Color },
    Forfeit { winner: Color },
}

impl GameResult {
    pub fn winner(&self) -> Option<Color> {
        match *self {
            GameResult::Counted { winner, .. } => winner,
            GameResult::Resignation { winner } | GameResult::Forfeit { winner } => Some(winner),
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Counted {
                winner: Some(c),
                margin,
            } => write!(f, "{}+{margin:.2}", c.letter()),
            GameResult::Counted { winner: None, .. } => write!(f, "0"),
            GameResult::Resignation { winner } => write!(f, "{}+R", winner.letter()),
            GameResult::Forfeit { winner } => write!(f, "{}+F", winner.letter()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    pos: Position,
    turns: Vec<Turn>,
    score: Option<Score>,
    result: Option<GameResult>,
    pub ai: AiSettings,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::from_position(Position::new(config.size, config.komi))
    }

    /// Continue from an arbitrary position. Auto-passes or ends the game
    /// straight away if the player to move is stuck.
    pub fn from_position(pos: Position) -> Self {
        let config = GameConfig {
            size: pos.size(),
            komi: pos.komi,
        };
        let mut game = Self {
            config,
            pos,
            turns: Vec::new(),
            score: None,
            result: None,
            ai: AiSettings::default(),
        };
        game.settle();
        game
    }

    /// Throw away the current game and start an empty board. AI settings are kept.
    pub fn restart(&mut self, config: GameConfig) {
        let ai = self.ai;
        *self = Self::new(config);
        self.ai = ai;
        info!(size = config.size, komi = config.komi, "new game");
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn board(&self) -> &Board {
        &self.pos.board
    }

    pub fn to_play(&self) -> Color {
        self.pos.to_play
    }

    pub fn ko(&self) -> Option<Point> {
        self.pos.ko
    }

    pub fn captures_by(&self, color: Color) -> u32 {
        self.pos.captures_by(color)
    }

    pub fn passes_by(&self, color: Color) -> u32 {
        self.pos.passes_by(color)
    }

    pub fn move_count(&self) -> usize {
        self.pos.move_count
    }

    pub fn last_move(&self) -> Option<Point> {
        self.pos.last
    }

    pub fn status(&self) -> Status {
        self.pos.status
    }

    pub fn is_over(&self) -> bool {
        self.pos.is_over()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Final count, present once a counted ending has been reached.
    pub fn score(&self) -> Option<&Score> {
        self.score.as_ref()
    }

    pub fn territory(&self) -> Option<&TerritoryMap> {
        self.score.as_ref().map(|s| &s.territory)
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Dry-run a move for the player to move.
    pub fn try_move(&self, pt: Point) -> Result<MoveResult, MoveError> {
        self.pos.try_move(pt, self.pos.to_play)
    }

    /// Play a stone for the player to move.
    pub fn play(&mut self, pt: Point) -> Result<MoveResult, MoveError> {
        let color = self.pos.to_play;
        let result = match self.pos.play(pt) {
            Ok(result) => result,
            Err(err) => {
                debug!(%color, x = pt.0, y = pt.1, %err, "move rejected");
                return Err(err);
            }
        };
        debug!(
            %color,
            x = pt.0,
            y = pt.1,
            captured = result.captured_count(),
            ko = ?result.ko,
            "move played"
        );
        self.turns.push(Turn::Play {
            color,
            point: pt,
            captured: result.captured_count(),
        });
        self.settle();
        Ok(result)
    }

    /// Pass for the player to move.
    pub fn pass(&mut self) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        self.record_pass(false);
        self.settle();
        Ok(())
    }

    /// The player to move resigns. No scoring takes place.
    pub fn resign(&mut self) -> Result<GameResult, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let loser = self.pos.to_play;
        self.turns.push(Turn::Resign { color: loser });
        Ok(self.end_uncounted(EndReason::Resignation { loser }, loser))
    }

    /// End the game now and count the board.
    pub fn score_now(&mut self) -> Result<&Score, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        Ok(self.finish(EndReason::Manual))
    }

    /// Take back the last stone move, along with any passes after it.
    pub fn undo(&mut self) -> bool {
        if self.is_over() || !self.pos.undo() {
            return false;
        }
        if let Some(i) = self
            .turns
            .iter()
            .rposition(|t| matches!(t, Turn::Play { .. }))
        {
            self.turns.truncate(i);
        }
        debug!(move_count = self.pos.move_count, "undo");
        true
    }

    /// Let `ai` pick and play a move for the player to move.
    ///
    /// Returns the point played, or `None` if the AI passed. A recommendation
    /// the rules reject is turned into a pass.
    pub fn genmove(&mut self, ai: &mut Ai) -> Result<Option<Point>, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let color = self.pos.to_play;
        match ai.choose_move(&self.pos, color) {
            Some(pt) => match self.play(pt) {
                Ok(_) => Ok(Some(pt)),
                Err(err) => {
                    warn!(%color, x = pt.0, y = pt.1, %err, "AI move rejected, passing");
                    self.pass()?;
                    Ok(None)
                }
            },
            None => {
                self.pass()?;
                Ok(None)
            }
        }
    }

    /// Play for the AI if it is enabled and on move. Returns whether it acted.
    pub fn maybe_ai_move(&mut self, ai: &mut Ai) -> bool {
        if !self.ai.enabled || self.is_over() || self.pos.to_play != self.ai.color {
            return false;
        }
        ai.set_strength(self.ai.strength);
        self.genmove(ai).is_ok()
    }

    fn record_pass(&mut self, forced: bool) {
        let color = self.pos.to_play;
        self.pos.pass();
        self.turns.push(Turn::Pass { color, forced });
        debug!(%color, forced, passes = self.pos.passes_by(color), "pass");

        if self.pos.passes_by(color) >= FORFEIT_PASSES {
            self.end_uncounted(EndReason::Forfeit { loser: color }, color);
        } else if self.pos.consecutive_passes >= END_PASSES {
            self.finish(EndReason::Normal);
        }
    }

    /// Auto-pass for a player with no legal move; close the board if neither has one.
    fn settle(&mut self) {
        while !self.is_over() {
            let color = self.pos.to_play;
            if self.pos.has_legal_move(color) {
                break;
            }
            if !self.pos.has_legal_move(color.opp()) {
                self.finish(EndReason::BoardClosed);
                break;
            }
            info!(%color, "no legal move, passing automatically");
            self.record_pass(true);
        }
    }

    /// Close the game without counting; `loser` concedes it to the opponent.
    fn end_uncounted(&mut self, reason: EndReason, loser: Color) -> GameResult {
        debug_assert!(!reason.is_scored());
        let winner = loser.opp();
        let result = match reason {
            EndReason::Forfeit { .. } => GameResult::Forfeit { winner },
            _ => GameResult::Resignation { winner },
        };
        self.pos.status = Status::Over(reason);
        self.result = Some(result);
        info!(?reason, %result, "game over");
        result
    }

    /// Sweep dead stones, count, and close the game.
    fn finish(&mut self, reason: EndReason) -> &Score {
        debug_assert!(reason.is_scored());
        self.pos.status = Status::Scoring;
        let removed = remove_dead_stones(&mut self.pos.board, &mut self.pos.captures);
        let counted = score(&self.pos.board, self.pos.captures, self.pos.komi);
        let result = GameResult::Counted {
            winner: counted.winner(),
            margin: counted.margin(),
        };
        info!(
            ?reason,
            removed,
            black = counted.total(Color::Black),
            white = counted.total(Color::White),
            %result,
            "game over"
        );
        self.result = Some(result);
        self.pos.status = Status::Over(reason);
        self.score.insert(counted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation() {
        assert!(GameConfig::new(9, 3.75).is_ok());
        assert_eq!(GameConfig::new(1, 3.75), Err(ConfigError::BoardSize(1)));
        assert_eq!(GameConfig::new(26, 3.75), Err(ConfigError::BoardSize(26)));
        assert_eq!(GameConfig::new(9, f64::NAN), Err(ConfigError::Komi));
    }

    #[test]
    fn result_strings() {
        let w = GameResult::Counted {
            winner: Some(Color::White),
            margin: 3.75,
        };
        assert_eq!(w.to_string(), "W+3.75");
        let tie = GameResult::Counted {
            winner: None,
            margin: 0.0,
        };
        assert_eq!(tie.to_string(), "0");
        assert_eq!(
            GameResult::Resignation {
                winner: Color::Black
            }
            .to_string(),
            "B+R"
        );
        assert_eq!(
            GameResult::Forfeit {
                winner: Color::White
            }
            .to_string(),
            "W+F"
        );
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::default();
        game.play((4, 4)).unwrap();
        assert_eq!(game.to_play(), Color::White);
        game.play((2, 2)).unwrap();
        assert_eq!(game.to_play(), Color::Black);
        assert_eq!(game.move_count(), 2);
        assert_eq!(game.turns().len(), 2);
    }

    #[test]
    fn resign_ends_without_scoring() {
        let mut game = Game::default();
        game.play((4, 4)).unwrap();
        let result = game.resign().unwrap();
        assert_eq!(result.winner(), Some(Color::Black));
        assert_eq!(
            game.status(),
            Status::Over(EndReason::Resignation {
                loser: Color::White
            })
        );
        assert!(game.score().is_none());
        assert_eq!(game.play((0, 0)), Err(MoveError::GameOver));
        assert_eq!(game.pass(), Err(MoveError::GameOver));
        assert!(game.resign().is_err());
    }

    #[test]
    fn manual_scoring() {
        let mut game = Game::default();
        game.play((4, 4)).unwrap();
        let score = game.score_now().unwrap();
        // A lone stone claims the whole board.
        assert_eq!(score.territory_of(Color::Black), 80);
        assert_eq!(game.status(), Status::Over(EndReason::Manual));
        assert!(game.territory().is_some());
    }

    #[test]
    fn undo_drops_trailing_turns() {
        let mut game = Game::default();
        game.play((4, 4)).unwrap();
        game.play((2, 2)).unwrap();
        game.pass().unwrap();
        assert!(game.undo());
        assert_eq!(game.turns().len(), 1);
        assert_eq!(game.to_play(), Color::White);
        assert_eq!(game.board().get((2, 2)), None);
        assert_eq!(game.passes_by(Color::Black), 0);
    }

    #[test]
    fn restart_resets_everything_but_ai() {
        let mut game = Game::default();
        game.ai.enabled = true;
        game.play((4, 4)).unwrap();
        game.restart(GameConfig::new(13, 6.5).unwrap());
        assert_eq!(game.board().size(), 13);
        assert_eq!(game.move_count(), 0);
        assert!(game.ai.enabled);
        assert_eq!(game.position().komi, 6.5);
    }

    #[test]
    fn ai_plays_only_its_own_color() {
        let mut game = Game::default();
        game.ai.enabled = true;
        let mut ai = Ai::with_seed(Strength::Fast, 5);
        assert!(!game.maybe_ai_move(&mut ai));
        game.play((4, 4)).unwrap();
        assert!(game.maybe_ai_move(&mut ai));
        assert_eq!(game.to_play(), Color::Black);
    }
}
