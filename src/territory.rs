//! Territory assignment, dead-stone sweep and final scoring.
//!
//! Each maximal region of empty points goes to the color with more stone
//! contacts along its border. Contacts are counted per empty point, so a stone
//! touching two points of the region counts twice. Ties are dame.

use std::collections::VecDeque;

use crate::board::{Board, Color, Point};
use crate::group::analyze;

/// Owner of every intersection after territory assignment.
///
/// Stones map to `None`; so do dame points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerritoryMap {
    size: usize,
    owners: Vec<Option<Color>>,
}

impl TerritoryMap {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn owner(&self, (x, y): Point) -> Option<Color> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.owners[y * self.size + x]
    }

    pub fn count(&self, color: Color) -> usize {
        self.owners.iter().filter(|&&c| c == Some(color)).count()
    }
}

/// Flood-fill every empty region of `board` and assign it by border contact.
pub fn compute_territory(board: &Board) -> TerritoryMap {
    let size = board.size();
    let idx = |(x, y): Point| y * size + x;
    let mut owners = vec![None; size * size];
    let mut visited = vec![false; size * size];

    for start in board.points() {
        if board.get(start).is_some() || visited[idx(start)] {
            continue;
        }

        visited[idx(start)] = true;
        let mut queue = VecDeque::from([start]);
        let mut region = Vec::new();
        let mut influence = [0usize; 2];

        while let Some(pt) = queue.pop_front() {
            region.push(pt);
            for n in board.neighbors(pt) {
                match board.get(n) {
                    None if !visited[idx(n)] => {
                        visited[idx(n)] = true;
                        queue.push_back(n);
                    }
                    None => {}
                    Some(c) => influence[c.index()] += 1,
                }
            }
        }

        let owner = match influence[0].cmp(&influence[1]) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        };
        for pt in region {
            owners[idx(pt)] = owner;
        }
    }

    TerritoryMap { size, owners }
}

/// Remove every group with at most one liberty, repeating until none is left.
///
/// Removed stones are credited to the opposing color in `captures`.
/// Returns the number of stones removed.
pub fn remove_dead_stones(board: &mut Board, captures: &mut [u32; 2]) -> usize {
    let mut total = 0;
    let mut removed = true;
    while removed {
        removed = false;
        for pt in board.points() {
            let Some(group) = analyze(board, pt) else {
                continue;
            };
            if group.liberty_count() <= 1 {
                board.remove(&group.stones);
                captures[group.color.opp().index()] += group.size() as u32;
                total += group.size();
                removed = true;
            }
        }
    }
    total
}

/// Final count: territory plus captures, komi to White.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
    pub territory: TerritoryMap,
    pub captures: [u32; 2],
    pub komi: f64,
}

impl Score {
    pub fn territory_of(&self, color: Color) -> usize {
        self.territory.count(color)
    }

    pub fn total(&self, color: Color) -> f64 {
        let base = self.territory_of(color) as f64 + self.captures[color.index()] as f64;
        match color {
            Color::Black => base,
            Color::White => base + self.komi,
        }
    }

    /// Winner by total, `None` on an exact tie.
    pub fn winner(&self) -> Option<Color> {
        let (b, w) = (self.total(Color::Black), self.total(Color::White));
        if b > w {
            Some(Color::Black)
        } else if w > b {
            Some(Color::White)
        } else {
            None
        }
    }

    pub fn margin(&self) -> f64 {
        (self.total(Color::Black) - self.total(Color::White)).abs()
    }
}

/// Score a board as it stands. Pure: no dead-stone removal is done here.
pub fn score(board: &Board, captures: [u32; 2], komi: f64) -> Score {
    Score {
        territory: compute_territory(board),
        captures,
        komi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_is_dame() {
        let board = Board::new(9);
        let map = compute_territory(&board);
        assert_eq!(map.count(Color::Black), 0);
        assert_eq!(map.count(Color::White), 0);
    }

    #[test]
    fn wall_splits_board() {
        let board = Board::parse(&["..XO.", "..XO.", "..XO.", "..XO.", "..XO."]).unwrap();
        let map = compute_territory(&board);
        assert_eq!(map.count(Color::Black), 10);
        assert_eq!(map.count(Color::White), 5);
        assert_eq!(map.owner((0, 0)), Some(Color::Black));
        assert_eq!(map.owner((4, 4)), Some(Color::White));
        assert_eq!(map.owner((2, 0)), None);
    }

    #[test]
    fn tied_region_is_dame() {
        let board = Board::parse(&["X.O", "...", "..."]).unwrap();
        let map = compute_territory(&board);
        assert_eq!(map.count(Color::Black), 0);
        assert_eq!(map.count(Color::White), 0);
    }

    #[test]
    fn dead_stone_sweep_credits_opponent() {
        // White stone in atari inside Black's area.
        let mut board = Board::parse(&[".X...", "XOX..", ".....", ".....", "....."]).unwrap();
        let mut captures = [0, 0];
        let removed = remove_dead_stones(&mut board, &mut captures);
        assert_eq!(removed, 1);
        assert_eq!(captures, [1, 0]);
        assert_eq!(board.get((1, 1)), None);
    }

    #[test]
    fn score_totals_and_winner() {
        let board = Board::parse(&["..XO.", "..XO.", "..XO.", "..XO.", "..XO."]).unwrap();
        let s = score(&board, [1, 0], 3.75);
        assert_eq!(s.total(Color::Black), 11.0);
        assert_eq!(s.total(Color::White), 8.75);
        assert_eq!(s.winner(), Some(Color::Black));
        assert!((s.margin() - 2.25).abs() < 1e-9);
    }

    #[test]
    fn scoring_is_idempotent() {
        let board = Board::parse(&["..XO.", ".X.O.", "..XO.", "X.XOO", "..XO."]).unwrap();
        assert_eq!(score(&board, [2, 3], 3.75), score(&board, [2, 3], 3.75));
    }

    #[test]
    fn area_accounting_without_dame() {
        let board = Board::parse(&["..XO.", "..XO.", ".XXO.", "..XOO", "..XO."]).unwrap();
        let map = compute_territory(&board);
        let stones = board.stone_count(Color::Black) + board.stone_count(Color::White);
        assert_eq!(map.count(Color::Black) + map.count(Color::White) + stones, 25);
    }
}
