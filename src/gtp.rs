//! Go Text Protocol (GTP) front-end.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements GTP version 2 on top of [`Game`], so the engine can
//! be driven by graphical interfaces like Sabaki or GoGui.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Start a new game on a `size` board
//! - `clear_board` - Start a new game with the current settings
//! - `komi <value>` - Set komi (restarts the game)
//! - `play <color> <vertex>` - Play a move (or `pass`) for the player to move
//! - `genmove <color>` - Let the AI choose and play a move
//! - `undo` - Take back the last stone move
//! - `showboard` - Print the board
//! - `final_score` - Count the game (a copy of it, if still in progress)
//! - `nine-go-resign` - The player to move resigns
//! - `nine-go-score_now` - End the game and count it
//!
//! ## Example
//!
//! ```ignore
//! use nine_go::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::ai::{Ai, Strength};
use crate::board::{Color, parse_coord, str_coord};
use crate::game::{Game, GameConfig};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "nine-go-resign",
    "nine-go-score_now",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    game: Game,
    ai: Ai,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Create a new GTP engine with default settings.
    pub fn new() -> Self {
        Self::with_ai(GameConfig::default(), Ai::new(Strength::Full))
    }

    pub fn with_ai(config: GameConfig, ai: Ai) -> Self {
        Self {
            game: Game::new(config),
            ai,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            write!(stdout, "{prefix}{id_str} {message}\n\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn parse_color(arg: &str) -> Option<Color> {
        match arg.to_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }

    /// Check that `color` is on move; GTP clients may not skip turns.
    fn check_turn(&self, arg: &str) -> std::result::Result<(), String> {
        match Self::parse_color(arg) {
            None => Err("invalid color".to_string()),
            Some(c) if c != self.game.to_play() => {
                Err(format!("it is {}'s turn", self.game.to_play()))
            }
            Some(_) => Ok(()),
        }
    }

    fn restart(&mut self, config: GameConfig) {
        self.game.restart(config);
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "nine-go".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let Ok(size) = args[0].parse::<usize>() else {
                    return (false, "invalid size".to_string());
                };
                match GameConfig::new(size, self.game.config().komi) {
                    Ok(config) => {
                        self.restart(config);
                        (true, String::new())
                    }
                    Err(e) => (false, format!("unacceptable size: {e}")),
                }
            }

            "clear_board" => {
                self.restart(self.game.config());
                (true, String::new())
            }

            "komi" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let Ok(komi) = args[0].parse::<f64>() else {
                    return (false, "invalid komi".to_string());
                };
                match GameConfig::new(self.game.config().size, komi) {
                    Ok(config) => {
                        self.restart(config);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                if let Err(msg) = self.check_turn(args[0]) {
                    return (false, msg);
                }

                let vertex = args[1];
                if vertex.eq_ignore_ascii_case("pass") {
                    return match self.game.pass() {
                        Ok(()) => (true, String::new()),
                        Err(e) => (false, e.to_string()),
                    };
                }

                let Some(pt) = parse_coord(vertex, self.game.board().size()) else {
                    return (false, "invalid vertex".to_string());
                };
                match self.game.play(pt) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                if let Err(msg) = self.check_turn(args[0]) {
                    return (false, msg);
                }
                match self.game.genmove(&mut self.ai) {
                    Ok(Some(pt)) => (true, str_coord(pt, self.game.board().size())),
                    Ok(None) => (true, "pass".to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "undo" => {
                if self.game.undo() {
                    (true, String::new())
                } else {
                    (false, "cannot undo".to_string())
                }
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            "final_score" => match self.game.result() {
                Some(result) => (true, result.to_string()),
                None => {
                    let mut copy = self.game.clone();
                    match copy.score_now() {
                        Ok(_) => (true, copy.result().map(|r| r.to_string()).unwrap_or_default()),
                        Err(e) => (false, e.to_string()),
                    }
                }
            },

            "nine-go-resign" => match self.game.resign() {
                Ok(result) => (true, result.to_string()),
                Err(e) => (false, e.to_string()),
            },

            "nine-go-score_now" => match self.game.score_now() {
                Ok(_) => (true, self.game.result().map(|r| r.to_string()).unwrap_or_default()),
                Err(e) => (false, e.to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GtpEngine {
        GtpEngine::with_ai(GameConfig::default(), Ai::with_seed(Strength::Fast, 42))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_and_protocol() {
        let mut engine = engine();
        assert_eq!(engine.execute("name", &[]), (true, "nine-go".to_string()));
        assert_eq!(engine.execute("protocol_version", &[]), (true, "2".to_string()));
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();
        assert_eq!(engine.execute("known_command", &["undo"]).1, "true");
        assert_eq!(engine.execute("known_command", &["unknown_cmd"]).1, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();
        let (success, _) = engine.execute("boardsize", &["13"]);
        assert!(success);
        assert_eq!(engine.game().board().size(), 13);

        let (success, _) = engine.execute("boardsize", &["30"]);
        assert!(!success);
        assert_eq!(engine.game().board().size(), 13);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();
        assert!(engine.execute("play", &["black", "E5"]).0);
        assert_eq!(engine.game().board().get((4, 4)), Some(Color::Black));

        let (success, msg) = engine.execute("play", &["white", "E5"]);
        assert!(!success);
        assert!(msg.contains("not empty"), "got {msg}");

        let (success, _) = engine.execute("play", &["black", "D4"]);
        assert!(!success, "out-of-turn moves are refused");

        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.game().move_count(), 0);
    }

    #[test]
    fn test_genmove_plays_for_side_to_move() {
        let mut engine = engine();
        let (success, vertex) = engine.execute("genmove", &["b"]);
        assert!(success);
        assert!(parse_coord(&vertex, 9).is_some(), "got {vertex}");
        assert_eq!(engine.game().to_play(), Color::White);
    }

    #[test]
    fn test_passes_end_game_with_score() {
        let mut engine = engine();
        assert!(engine.execute("play", &["b", "pass"]).0);
        assert!(engine.execute("play", &["w", "pass"]).0);
        assert!(engine.game().is_over());
        let (success, score) = engine.execute("final_score", &[]);
        assert!(success);
        assert_eq!(score, "W+3.75");
    }

    #[test]
    fn test_final_score_leaves_game_running() {
        let mut engine = engine();
        engine.execute("play", &["b", "E5"]);
        let (success, score) = engine.execute("final_score", &[]);
        assert!(success);
        assert_eq!(score, "B+76.25");
        assert!(!engine.game().is_over());
    }
}
