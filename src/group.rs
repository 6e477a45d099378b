//! Group and liberty analysis.
//!
//! A group is the maximal set of same-colored stones 4-connected to a seed
//! point. Groups are never stored; they are recomputed from the board on demand.

use crate::board::{Board, Color, Point};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub color: Color,
    /// Stones in discovery order, seed first.
    pub stones: Vec<Point>,
    /// Distinct empty points adjacent to any stone of the group.
    pub liberties: Vec<Point>,
}

impl Group {
    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    pub fn size(&self) -> usize {
        self.stones.len()
    }
}

/// Flood-fill the group containing `seed`.
///
/// Returns `None` when `seed` is empty or off the board.
pub fn analyze(board: &Board, seed: Point) -> Option<Group> {
    let color = board.get(seed)?;
    let size = board.size();
    let idx = |(x, y): Point| y * size + x;

    let mut visited = vec![false; size * size];
    let mut liberty_seen = vec![false; size * size];
    let mut stack = vec![seed];
    let mut stones = Vec::new();
    let mut liberties = Vec::new();
    visited[idx(seed)] = true;

    while let Some(pt) = stack.pop() {
        stones.push(pt);
        for n in board.neighbors(pt) {
            match board.get(n) {
                None => {
                    if !liberty_seen[idx(n)] {
                        liberty_seen[idx(n)] = true;
                        liberties.push(n);
                    }
                }
                Some(c) if c == color && !visited[idx(n)] => {
                    visited[idx(n)] = true;
                    stack.push(n);
                }
                _ => {}
            }
        }
    }

    Some(Group {
        color,
        stones,
        liberties,
    })
}

/// Liberty count of the group at `pt`, or 0 for an empty point.
pub fn liberty_count(board: &Board, pt: Point) -> usize {
    analyze(board, pt).map_or(0, |g| g.liberty_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_stone_in_center_has_four_liberties() {
        let board = Board::parse(&[".....", ".....", "..X..", ".....", "....."]).unwrap();
        let g = analyze(&board, (2, 2)).unwrap();
        assert_eq!(g.color, Color::Black);
        assert_eq!(g.size(), 1);
        assert_eq!(g.liberty_count(), 4);
    }

    #[test]
    fn shared_liberty_counted_once() {
        // The two stones share the liberty at (1, 1).
        let board = Board::parse(&["...", "X.X", "XXX"]).unwrap();
        let g = analyze(&board, (0, 1)).unwrap();
        assert_eq!(g.size(), 5);
        assert_eq!(g.liberty_count(), 3);
    }

    #[test]
    fn opponent_stones_are_not_liberties() {
        let board = Board::parse(&["XO.", "O..", "..."]).unwrap();
        let g = analyze(&board, (0, 0)).unwrap();
        assert_eq!(g.liberty_count(), 0);
        assert_eq!(liberty_count(&board, (1, 0)), 2);
    }

    #[test]
    fn empty_seed_has_no_group() {
        let board = Board::new(9);
        assert!(analyze(&board, (4, 4)).is_none());
        assert_eq!(liberty_count(&board, (4, 4)), 0);
    }
}
