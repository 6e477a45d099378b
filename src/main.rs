//! nine-go: a 9x9 Go rules engine with a heuristic AI.
//!
//! ## Usage
//!
//! - `nine-go` - Let the AI play itself and print the result
//! - `nine-go gtp` - Start GTP server for GUI integration
//! - `nine-go play` - Play against the AI in the terminal
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::io::{self, BufRead, Write};

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nine_go::ai::{Ai, Strength};
use nine_go::board::{Color, parse_coord, str_coord};
use nine_go::constants::{DEFAULT_KOMI, DEFAULT_SIZE};
use nine_go::game::{AiSettings, Game, GameConfig, Turn};
use nine_go::gtp::GtpEngine;

/// nine-go: Go rules engine and heuristic AI
#[derive(Parser)]
#[command(name = "nine-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp(GameArgs),
    /// Play in the terminal, against the AI or another person
    Play {
        #[command(flatten)]
        game: GameArgs,
        /// Color the AI plays
        #[arg(long, value_enum, default_value = "white")]
        ai_color: AiColor,
        /// Disable the AI; both sides are entered by hand
        #[arg(long)]
        two_player: bool,
    },
    /// Let the AI play both sides and print the game
    SelfPlay {
        #[command(flatten)]
        game: GameArgs,
        /// Stop after this many moves and count the board
        #[arg(long, default_value = "300")]
        max_moves: usize,
    },
}

#[derive(Args, Clone)]
struct GameArgs {
    /// Board size
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Compensation points for White
    #[arg(long, default_value_t = DEFAULT_KOMI)]
    komi: f64,
    /// AI strength: 1 considers fewer candidates, 2 more
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u8).range(1..=2))]
    level: u8,
    /// Seed for the AI's random choices
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, ValueEnum)]
enum AiColor {
    Black,
    White,
}

impl From<AiColor> for Color {
    fn from(c: AiColor) -> Self {
        match c {
            AiColor::Black => Color::Black,
            AiColor::White => Color::White,
        }
    }
}

impl GameArgs {
    fn config(&self) -> Result<GameConfig> {
        Ok(GameConfig::new(self.size, self.komi)?)
    }

    fn ai(&self) -> Result<Ai> {
        let strength = Strength::from_level(self.level)
            .ok_or_else(|| anyhow!("unknown AI level {}", self.level))?;
        Ok(match self.seed {
            Some(seed) => Ai::with_seed(strength, seed),
            None => Ai::new(strength),
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp(args)) => {
            info!(size = args.size, komi = args.komi, level = args.level, "GTP engine ready");
            let mut engine = GtpEngine::with_ai(args.config()?, args.ai()?);
            engine.run()
        }
        Some(Commands::Play {
            game,
            ai_color,
            two_player,
        }) => play(&game, ai_color.into(), !two_player),
        Some(Commands::SelfPlay { game, max_moves }) => self_play(&game, max_moves),
        None => {
            let args = GameArgs {
                size: DEFAULT_SIZE,
                komi: DEFAULT_KOMI,
                level: 2,
                seed: None,
            };
            self_play(&args, 300)
        }
    }
}

fn self_play(args: &GameArgs, max_moves: usize) -> Result<()> {
    let mut game = Game::new(args.config()?);
    let mut ai = args.ai()?;
    let size = game.board().size();

    while !game.is_over() && game.move_count() < max_moves {
        game.genmove(&mut ai)?;
    }
    if !game.is_over() {
        game.score_now()?;
    }

    let record: Vec<String> = game
        .turns()
        .iter()
        .map(|t| match *t {
            Turn::Play { color, point, .. } => {
                format!("{}[{}]", color.letter(), str_coord(point, size))
            }
            Turn::Pass { color, .. } => format!("{}[pass]", color.letter()),
            Turn::Resign { color } => format!("{}[resign]", color.letter()),
        })
        .collect();
    println!("{}", record.join(" "));
    println!();
    println!("{}", game.board());

    if let Some(score) = game.score() {
        println!(
            "Territory: Black {} / White {}",
            score.territory_of(Color::Black),
            score.territory_of(Color::White)
        );
        println!(
            "Captures:  Black {} / White {}",
            score.captures[Color::Black.index()],
            score.captures[Color::White.index()]
        );
    }
    if let Some(result) = game.result() {
        println!("Result: {result}");
    }
    Ok(())
}

fn print_status(game: &Game) {
    let size = game.board().size();
    println!("{}", game.board());
    let ko = game
        .ko()
        .map(|pt| str_coord(pt, size))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Move {} | {} to play | captures B {} W {} | passes B {} W {} | ko {ko}",
        game.move_count(),
        game.to_play(),
        game.captures_by(Color::Black),
        game.captures_by(Color::White),
        game.passes_by(Color::Black),
        game.passes_by(Color::White),
    );
}

fn play(args: &GameArgs, ai_color: Color, ai_enabled: bool) -> Result<()> {
    let mut game = Game::new(args.config()?);
    let mut ai = args.ai()?;
    game.ai = AiSettings {
        enabled: ai_enabled,
        color: ai_color,
        strength: ai.strength(),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        while game.maybe_ai_move(&mut ai) {
            let played = game
                .last_move()
                .map(|pt| str_coord(pt, game.board().size()))
                .unwrap_or_else(|| "pass".to_string());
            println!("AI plays {played}");
        }
        print_status(&game);
        if game.is_over() {
            break;
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        let outcome = match input.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "pass" => game.pass().map(|_| ()),
            "resign" => game.resign().map(|_| ()),
            "score" => game.score_now().map(|_| ()),
            "undo" => {
                if !game.undo() {
                    println!("nothing to undo");
                }
                Ok(())
            }
            "forbidden" => {
                let size = game.board().size();
                for (pt, err) in game.position().forbidden_points() {
                    println!("{}: {err}", str_coord(pt, size));
                }
                Ok(())
            }
            vertex => match parse_coord(vertex, game.board().size()) {
                Some(pt) => game.play(pt).map(|_| ()),
                None => {
                    println!("unrecognized input: {input}");
                    Ok(())
                }
            },
        };
        if let Err(e) = outcome {
            println!("{e}");
        }
    }

    if let Some(score) = game.score() {
        println!(
            "Territory: Black {} / White {}",
            score.territory_of(Color::Black),
            score.territory_of(Color::White)
        );
    }
    if let Some(result) = game.result() {
        println!("Result: {result}");
    }
    Ok(())
}
