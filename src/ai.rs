//! Heuristic move selection.
//!
//! No search tree: every legal move is ranked by a cheap positional score, the
//! best few are probed with [`Position::try_move`] and scored by a weighted sum
//! of tactical and shape features. The AI only recommends a point; the caller
//! commits it through the normal rules path.

use tracing::debug;

use crate::board::{Board, Color, Point};
use crate::constants::*;
use crate::group::{analyze, liberty_count};
use crate::position::{MoveResult, Position};
use crate::territory::compute_territory;

/// How much effort the AI spends per move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strength {
    /// Level 1: fewer candidates, lighter territory weighting.
    Fast,
    /// Level 2.
    Full,
}

impl Strength {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Strength::Fast),
            2 => Some(Strength::Full),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Strength::Fast => 1,
            Strength::Full => 2,
        }
    }

    fn candidates(self) -> usize {
        match self {
            Strength::Fast => CANDIDATES_FAST,
            Strength::Full => CANDIDATES_FULL,
        }
    }

    fn territory_weight(self) -> f64 {
        match self {
            Strength::Fast => W_TERRITORY_FAST,
            Strength::Full => W_TERRITORY_FULL,
        }
    }
}

/// Traditional star points for a board of `size`, center last.
pub fn star_points(size: usize) -> Vec<Point> {
    let offset = if size >= LARGE_BOARD { 3 } else { 2 };
    let mut stars = Vec::new();
    if size > 2 * offset + 1 {
        let far = size - 1 - offset;
        stars.extend([(offset, offset), (offset, far), (far, offset), (far, far)]);
    }
    if size % 2 == 1 {
        stars.push(center(size));
    }
    stars
}

pub fn center(size: usize) -> Point {
    (size / 2, size / 2)
}

fn manhattan((ax, ay): Point, (bx, by): Point) -> usize {
    ax.abs_diff(bx) + ay.abs_diff(by)
}

/// Cheap ranking used to prune candidates before probing.
fn positional_score(board: &Board, move_count: usize, pt: Point) -> f64 {
    let edge = board.edge_distance(pt);
    let mut s = edge as f64 * RANK_EDGE_DIST;

    if move_count < RANK_OPENING_MOVES {
        for star in star_points(board.size()) {
            if let Some(bonus) = RANK_STAR.get(manhattan(pt, star)) {
                s += bonus;
            }
        }
        if pt == center(board.size()) {
            s += RANK_CENTER;
        }
    }

    if move_count > RANK_ENDGAME_MOVES && edge == 0 {
        s += RANK_ENDGAME_EDGE;
    }
    s
}

/// Weighted evaluation of a probed move. Higher is better.
fn evaluate_move(pos: &Position, result: &MoveResult, strength: Strength) -> f64 {
    let next = &result.board;
    let pt = result.point;
    let color = result.color;
    let edge = next.edge_distance(pt);
    let mut score = 0.0;

    score += result.captured_count() as f64 * W_CAPTURE;

    score += match result.liberties {
        1 => -W_SELF_ATARI,
        2 => -W_TWO_LIBS,
        libs => (libs as f64 * W_LIBERTY).min(W_LIBERTY_CAP),
    };

    let mut friendly = 0;
    for n in next.neighbors(pt) {
        match next.get(n) {
            Some(c) if c == color => friendly += 1,
            Some(_) => match liberty_count(next, n) {
                1 => score += W_ATARI,
                2 => score += W_PRESSURE,
                _ => {}
            },
            None => {}
        }
    }
    score += friendly as f64 * W_CONNECT;

    if pos.move_count < EARLY_EDGE_MOVES && edge == 0 {
        score -= W_EARLY_EDGE;
    }

    if result.ko.is_some() {
        score += W_KO;
    }

    let (from, to) = EVAL_WINDOW;
    if (from..=to).contains(&pos.move_count) {
        let map = compute_territory(next);
        let black = map.count(Color::Black) as f64;
        let white = map.count(Color::White) as f64 + pos.komi;
        let diff = match color {
            Color::Black => black - white,
            Color::White => white - black,
        };
        score += diff * strength.territory_weight();
    }

    if let Some(group) = analyze(next, pt) {
        if group.size() > CLUMP_LIMIT {
            score -= (group.size() - CLUMP_LIMIT) as f64 * W_CLUMP;
        }
    }

    if pos.move_count <= SHAPE_OPENING_MOVES {
        for star in star_points(next.size()) {
            if let Some(bonus) = W_SHAPE_STAR.get(manhattan(pt, star)) {
                score += bonus;
            }
        }
        if pt == center(next.size()) {
            score += W_SHAPE_CENTER;
        }
        if edge == 0 {
            score -= W_SHAPE_EDGE;
        }
    }

    score
}

/// A heuristic player with its own random source.
pub struct Ai {
    strength: Strength,
    rng: fastrand::Rng,
}

impl Ai {
    pub fn new(strength: Strength) -> Self {
        Self {
            strength,
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic AI for reproducible games.
    pub fn with_seed(strength: Strength, seed: u64) -> Self {
        Self {
            strength,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn set_strength(&mut self, strength: Strength) {
        self.strength = strength;
    }

    /// Recommend a move for `color`, or `None` to pass.
    ///
    /// Never mutates `pos`.
    pub fn choose_move(&mut self, pos: &Position, color: Color) -> Option<Point> {
        let legal = pos.legal_moves(color);
        if legal.is_empty() {
            debug!(%color, "no legal move, AI passes");
            return None;
        }

        if pos.move_count < OPENING_BOOK_MOVES {
            let book = star_points(pos.size());
            let stars: Vec<Point> = legal
                .iter()
                .copied()
                .filter(|pt| book.contains(pt))
                .collect();
            if !stars.is_empty() {
                return Some(stars[self.rng.usize(..stars.len())]);
            }
            let c = center(pos.size());
            if legal.contains(&c) {
                return Some(c);
            }
        }

        let mut ranked: Vec<(Point, f64)> = legal
            .iter()
            .map(|&pt| (pt, positional_score(&pos.board, pos.move_count, pt)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(self.strength.candidates());

        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for (pt, _) in ranked {
            let Ok(result) = pos.try_move(pt, color) else {
                continue;
            };
            let s = evaluate_move(pos, &result, self.strength);
            if s.is_finite() && s > best_score {
                best_score = s;
                best = Some(pt);
            }
        }

        match best {
            Some(pt) => {
                debug!(%color, x = pt.0, y = pt.1, score = best_score, "AI move");
                Some(pt)
            }
            None => {
                let pt = legal[self.rng.usize(..legal.len())];
                debug!(%color, x = pt.0, y = pt.1, "AI falls back to a random legal move");
                Some(pt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_by_nine_star_points() {
        let stars = star_points(9);
        assert_eq!(stars, vec![(2, 2), (2, 6), (6, 2), (6, 6), (4, 4)]);
        assert_eq!(star_points(19).len(), 5);
        assert!(star_points(19).contains(&(3, 3)));
        assert_eq!(star_points(4), vec![]);
    }

    #[test]
    fn strength_levels() {
        assert_eq!(Strength::from_level(1), Some(Strength::Fast));
        assert_eq!(Strength::from_level(2), Some(Strength::Full));
        assert_eq!(Strength::from_level(3), None);
        assert_eq!(Strength::Full.level(), 2);
    }

    #[test]
    fn opening_move_is_a_star_point() {
        let pos = Position::new(9, DEFAULT_KOMI);
        let mut ai = Ai::with_seed(Strength::Full, 7);
        let pt = ai.choose_move(&pos, Color::Black).unwrap();
        assert!(star_points(9).contains(&pt));
    }

    #[test]
    fn takes_a_free_capture() {
        let board = Board::parse(&[
            ".........",
            ".........",
            "...X.....",
            "..XO.....",
            "...X.....",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();
        let mut pos = Position::from_board(board, Color::Black, DEFAULT_KOMI);
        pos.move_count = 10;
        let mut ai = Ai::with_seed(Strength::Full, 1);
        assert_eq!(ai.choose_move(&pos, Color::Black), Some((4, 3)));
    }

    #[test]
    fn passes_without_legal_moves() {
        let board = Board::parse(&[".O.", "OOO", ".O."]).unwrap();
        let pos = Position::from_board(board, Color::Black, DEFAULT_KOMI);
        let mut ai = Ai::with_seed(Strength::Fast, 3);
        assert_eq!(ai.choose_move(&pos, Color::Black), None);
    }

    #[test]
    fn choose_move_leaves_position_untouched() {
        let mut pos = Position::new(9, DEFAULT_KOMI);
        pos.play((4, 4)).unwrap();
        let before = pos.board.clone();
        let mut ai = Ai::with_seed(Strength::Full, 11);
        let pt = ai.choose_move(&pos, Color::White).unwrap();
        assert_eq!(pos.board, before);
        assert!(pos.try_move(pt, Color::White).is_ok());
    }
}
