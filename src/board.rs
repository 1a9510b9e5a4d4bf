//! Board state: an NxN grid of intersections, each empty or holding a stone.
//!
//! The board is pure data. Rule logic lives in [`crate::group`] and
//! [`crate::rules`]; everything here is geometry, accessors and the text form.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{BOARD_POINTS, DELTA, N};

/// Stone color, which doubles as the player identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Diagram character: `X` for Black, `O` for White.
    pub fn symbol(self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

impl FromStr for Color {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Color::Black),
            "w" | "white" => Ok(Color::White),
            _ => Err(BoardParseError::BadColor(s.to_string())),
        }
    }
}

/// A board coordinate as (row, col), row 0 at the top.
pub type Point = (usize, usize);

/// A turn action: place a stone or pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Place(Point),
    Pass,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected {N} rows, got {0}")]
    RowCount(usize),
    #[error("row {row}: expected {N} cells, got {len}")]
    RowLength { row: usize, len: usize },
    #[error("row {row}: unexpected character {ch:?}")]
    BadCell { row: usize, ch: char },
    #[error("unknown color {0:?}")]
    BadColor(String),
}

/// The NxN grid. `None` is an empty intersection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Color>; BOARD_POINTS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_POINTS],
        }
    }

    #[inline]
    fn idx((row, col): Point) -> usize {
        debug_assert!(row < N && col < N, "point ({row}, {col}) is off the board");
        row * N + col
    }

    #[inline]
    pub fn get(&self, pt: Point) -> Option<Color> {
        self.cells[Self::idx(pt)]
    }

    #[inline]
    pub fn set(&mut self, pt: Point, cell: Option<Color>) {
        self.cells[Self::idx(pt)] = cell;
    }

    #[inline]
    pub fn is_empty_at(&self, pt: Point) -> bool {
        self.get(pt).is_none()
    }

    /// Orthogonal neighbors that lie on the board.
    pub fn neighbors((row, col): Point) -> impl Iterator<Item = Point> {
        DELTA.into_iter().filter_map(move |(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < N && c < N).then_some((r, c))
        })
    }

    /// All points in row-major order.
    pub fn points() -> impl Iterator<Item = Point> {
        (0..N).flat_map(|r| (0..N).map(move |c| (r, c)))
    }

    /// All empty points in row-major order.
    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        Self::points().filter(|&pt| self.is_empty_at(pt))
    }

    /// Number of stones of the given color on the board.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            for col in 0..N {
                let ch = self.get((row, col)).map_or('.', Color::symbol);
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the diagram produced by `Display`: one line per row, `X` Black,
/// `O` White, `.` empty. Spaces inside a row and blank lines are ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != N {
            return Err(BoardParseError::RowCount(rows.len()));
        }
        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != N {
                return Err(BoardParseError::RowLength { row, len: cells.len() });
            }
            for (col, ch) in cells.into_iter().enumerate() {
                let cell = match ch {
                    'X' | 'x' => Some(Color::Black),
                    'O' | 'o' => Some(Color::White),
                    '.' | '+' => None,
                    _ => return Err(BoardParseError::BadCell { row, ch }),
                };
                board.set((row, col), cell);
            }
        }
        Ok(board)
    }
}

/// Parse a GTP vertex (e.g. "D4", "pass").
///
/// Columns use letters A-T skipping I; rows count from 1 at the bottom.
/// Returns `None` for malformed or off-board vertices.
pub fn parse_vertex(s: &str) -> Option<Move> {
    if s.eq_ignore_ascii_case("pass") {
        return Some(Move::Pass);
    }

    let mut chars = s.chars();
    let col_char = chars.next()?.to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == 'I' {
        return None;
    }
    let mut col = (col_char as u8 - b'A') as usize;
    // Skip 'I' column (Go convention to avoid confusion with 'J')
    if col_char > 'I' {
        col -= 1;
    }

    let rank: usize = chars.as_str().parse().ok()?;
    if col >= N || rank == 0 || rank > N {
        return None;
    }
    Some(Move::Place((N - rank, col)))
}

/// Format a move as a GTP vertex.
pub fn vertex(mv: Move) -> String {
    match mv {
        Move::Pass => "pass".into(),
        Move::Place((row, col)) => {
            let mut c = (b'A' + col as u8) as char;
            if c >= 'I' {
                c = (c as u8 + 1) as char;
            }
            format!("{c}{}", N - row)
        }
    }
}
