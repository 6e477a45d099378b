//! Board model: an NxN grid of intersections, plus coordinate helpers.
//!
//! The board carries no rules. Stone placement with captures lives in
//! [`crate::position`]; this module only stores and reports cell contents.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opp(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-letter form used by GTP and score strings.
    pub fn letter(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    /// Index for per-color arrays (Black = 0, White = 1).
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// An intersection as `(x, y)`, with `(0, 0)` the top-left corner.
pub type Point = (usize, usize);

/// Compact board encoding: 2 bits per intersection, row-major.
///
/// Two boards of the same size have equal keys exactly when every cell matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardKey(Box<[u8]>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from rows of `X` (Black), `O` (White) and `.` (empty).
    ///
    /// Whitespace inside a row is ignored. Returns `None` unless the rows form
    /// a square.
    pub fn parse(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        let mut board = Board::new(size);
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != size {
                return None;
            }
            for (x, ch) in cells.into_iter().enumerate() {
                let c = match ch {
                    'X' | 'x' | 'B' => Some(Color::Black),
                    'O' | 'o' | 'W' => Some(Color::White),
                    '.' | '+' => None,
                    _ => return None,
                };
                board.set((x, y), c);
            }
        }
        Some(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (x, y): Point) -> usize {
        y * self.size + x
    }

    pub fn in_bounds(&self, (x, y): Point) -> bool {
        x < self.size && y < self.size
    }

    /// Cell contents; off-board points read as empty.
    pub fn get(&self, pt: Point) -> Option<Color> {
        if !self.in_bounds(pt) {
            return None;
        }
        self.cells[self.idx(pt)]
    }

    pub fn is_empty_at(&self, pt: Point) -> bool {
        self.in_bounds(pt) && self.cells[self.idx(pt)].is_none()
    }

    /// Overwrite one cell. No capture logic is applied.
    pub fn set(&mut self, pt: Point, color: Option<Color>) {
        let i = self.idx(pt);
        self.cells[i] = color;
    }

    pub fn remove(&mut self, stones: &[Point]) {
        for &pt in stones {
            self.set(pt, None);
        }
    }

    /// On-board orthogonal neighbors in the order up, right, down, left.
    pub fn neighbors(&self, (x, y): Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        [
            (y > 0).then(|| (x, y - 1)),
            (x + 1 < s).then(|| (x + 1, y)),
            (y + 1 < s).then(|| (x, y + 1)),
            (x > 0).then(|| (x - 1, y)),
        ]
        .into_iter()
        .flatten()
    }

    /// Every intersection in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        (0..s).flat_map(move |y| (0..s).map(move |x| (x, y)))
    }

    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(|&pt| self.get(pt).is_none())
    }

    pub fn stone_count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    /// Lines between `pt` and the nearest edge (0 on the first line).
    pub fn edge_distance(&self, (x, y): Point) -> usize {
        let far = self.size - 1;
        x.min(y).min(far - x).min(far - y)
    }

    pub fn key(&self) -> BoardKey {
        let mut packed = vec![0u8; self.cells.len().div_ceil(4)];
        for (i, c) in self.cells.iter().enumerate() {
            let bits = match c {
                None => 0u8,
                Some(Color::Black) => 1,
                Some(Color::White) => 2,
            };
            packed[i / 4] |= bits << ((i % 4) * 2);
        }
        BoardKey(packed.into_boxed_slice())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            write!(f, "{:>2} ", self.size - y)?;
            for x in 0..self.size {
                let ch = match self.get((x, y)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..self.size {
            write!(f, "{} ", column_letter(x))?;
        }
        writeln!(f)
    }
}

/// Column letter for `x`, skipping 'I' (Go convention to avoid confusion with 'J').
fn column_letter(x: usize) -> char {
    let c = b'A' + x as u8;
    if c >= b'I' { (c + 1) as char } else { c as char }
}

/// Parse a coordinate string (e.g., "D4") for a board of `size`.
///
/// Rows count from the bottom, so "A1" is the bottom-left corner.
/// Returns `None` for malformed or off-board input.
pub fn parse_coord(s: &str, size: usize) -> Option<Point> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return None;
    }

    let col_char = bytes[0].to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == b'I' {
        return None;
    }
    let mut col = (col_char - b'A') as usize;
    if col_char > b'I' {
        col -= 1;
    }

    let row: usize = s[1..].parse().ok()?;
    if col >= size || row == 0 || row > size {
        return None;
    }
    Some((col, size - row))
}

/// Convert a point to a coordinate string (e.g., "D4").
pub fn str_coord((x, y): Point, size: usize) -> String {
    format!("{}{}", column_letter(x), size - y)
}
