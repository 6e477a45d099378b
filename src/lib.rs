//! nine-go: a Go rules engine with a heuristic AI.
//!
//! Board size defaults to 9x9 but any size from 2 to 25 is supported. Moves
//! are validated by one rules path shared by the game, the legality markers
//! and the AI, so a probe and a committed move can never disagree.
//!
//! ## Modules
//!
//! - [`constants`] - Board defaults, rule limits and AI weights
//! - [`board`] - Stones on a grid, coordinates, board keys
//! - [`group`] - Connected groups and their liberties
//! - [`position`] - Move legality: captures, ko, superko, suicide, eyes
//! - [`territory`] - Territory assignment, dead-stone sweep, scoring
//! - [`game`] - Turn order, passes, forfeits and game termination
//! - [`ai`] - Heuristic move selection
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use nine_go::ai::{Ai, Strength};
//! use nine_go::board::{Color, parse_coord, str_coord};
//! use nine_go::game::Game;
//!
//! // Create a new 9x9 game and play the center
//! let mut game = Game::default();
//! game.play(parse_coord("E5", 9).unwrap()).unwrap();
//!
//! // Let the AI answer for White
//! let mut ai = Ai::with_seed(Strength::Fast, 1);
//! if let Some(pt) = game.genmove(&mut ai).unwrap() {
//!     println!("White plays {}", str_coord(pt, 9));
//! }
//! assert_eq!(game.to_play(), Color::Black);
//! ```

pub mod ai;
pub mod board;
pub mod constants;
pub mod game;
pub mod group;
pub mod gtp;
pub mod position;
pub mod territory;
