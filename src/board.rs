//! Board cells, pieces and the border ring.
//!
//! Pieces live in an arena owned by the [`Board`] and are referred to by
//! [`PieceId`] handles. Two pieces of the same color at different times in
//! the same cell are still different pieces: identity is the handle, never
//! the value.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{BOARDSIZE, LAST, N, RING_LEN, SYMBOL_EMPTY, SYMBOL_FIRST, SYMBOL_SECOND};

/// A cell coordinate `(x, y)`: column then row.
pub type Point = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    First,
    Second,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::First, Color::Second];

    /// The other player.
    pub fn next(self) -> Color {
        match self {
            Color::First => Color::Second,
            Color::Second => Color::First,
        }
    }

    /// Pick one of the two colors uniformly.
    pub fn random(rng: &mut fastrand::Rng) -> Color {
        if rng.bool() { Color::First } else { Color::Second }
    }

    pub fn index(self) -> usize {
        match self {
            Color::First => 0,
            Color::Second => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Color::First => SYMBOL_FIRST,
            Color::Second => SYMBOL_SECOND,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::First => write!(f, "first"),
            Color::Second => write!(f, "second"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color: {0}")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "x" => Ok(Color::First),
            "second" | "o" => Ok(Color::Second),
            _ => Err(UnknownColor(s.to_string())),
        }
    }
}

/// Handle to a piece in the board's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(usize);

impl PieceId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    color: Color,
    position: Point,
}

impl Piece {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// Errors raised when putting a new piece on the board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position out of bounds: ({0}, {1})")]
    OutOfBounds(usize, usize),
    #[error("cell ({0}, {1}) is already occupied")]
    Occupied(usize, usize),
}

/// True for the 24 perimeter cells that are not corners.
pub fn is_on_border(x: usize, y: usize) -> bool {
    if x >= N || y >= N {
        return false;
    }
    let on_col = x == 0 || x == LAST;
    let on_row = y == 0 || y == LAST;
    on_col != on_row
}

/// True for the 36 cells of the 6x6 interior.
pub fn is_interior(x: usize, y: usize) -> bool {
    (1..LAST).contains(&x) && (1..LAST).contains(&y)
}

/// The border cells in clockwise order, starting right of the top-left corner.
///
/// Consecutive entries are adjacent along the ring; the last entry is
/// adjacent to the first. Corners are skipped but do not break adjacency.
pub fn border_ring() -> [Point; RING_LEN] {
    let mut ring = [(0, 0); RING_LEN];
    let mut k = 0;
    for x in 1..LAST {
        ring[k] = (x, 0);
        k += 1;
    }
    for y in 1..LAST {
        ring[k] = (LAST, y);
        k += 1;
    }
    for x in (1..LAST).rev() {
        ring[k] = (x, LAST);
        k += 1;
    }
    for y in (1..LAST).rev() {
        ring[k] = (0, y);
        k += 1;
    }
    ring
}

/// An 8x8 grid of optional piece handles plus the arena owning the pieces.
///
/// Invariant: every piece is referenced by exactly one cell, and its
/// `position` is that cell.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Option<PieceId>; BOARDSIZE],
    pieces: Vec<Piece>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARDSIZE],
            pieces: Vec::new(),
        }
    }

    fn idx(x: usize, y: usize) -> usize {
        y * N + x
    }

    /// The piece occupying `(x, y)`, if any. Out of bounds reads as empty.
    pub fn at(&self, x: usize, y: usize) -> Option<PieceId> {
        if x >= N || y >= N {
            return None;
        }
        self.cells[Self::idx(x, y)]
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.at(x, y).and_then(|id| self.piece(id)).map(Piece::color)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// All pieces in creation order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces.iter().enumerate().map(|(i, p)| (PieceId(i), p))
    }

    /// Create a piece of `color` on the empty cell `(x, y)`.
    pub fn add_piece(&mut self, color: Color, x: usize, y: usize) -> Result<PieceId, BoardError> {
        if x >= N || y >= N {
            return Err(BoardError::OutOfBounds(x, y));
        }
        if self.at(x, y).is_some() {
            return Err(BoardError::Occupied(x, y));
        }
        let id = PieceId(self.pieces.len());
        self.pieces.push(Piece {
            color,
            position: (x, y),
        });
        self.set(x, y, Some(id));
        Ok(id)
    }

    /// Write a cell. A piece written to a cell takes that cell as its position.
    ///
    /// The caller is responsible for clearing the piece's previous cell.
    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Option<PieceId>) {
        self.cells[Self::idx(x, y)] = cell;
        if let Some(id) = cell {
            self.pieces[id.0].position = (x, y);
        }
    }

    /// Move a piece from its current cell to `to`, which must be empty or its own.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Point) {
        let (fx, fy) = self.pieces[id.0].position;
        debug_assert_eq!(self.at(fx, fy), Some(id));
        self.set(fx, fy, None);
        debug_assert!(self.at(to.0, to.1).is_none());
        self.set(to.0, to.1, Some(id));
    }

    /// In-bounds orthogonal neighbors of a cell.
    pub fn neighbors(x: usize, y: usize) -> impl Iterator<Item = Point> {
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push((x - 1, y));
        }
        if x + 1 < N {
            v.push((x + 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if y + 1 < N {
            v.push((x, y + 1));
        }
        v.into_iter()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for x in 0..N {
            write!(f, " {x}")?;
        }
        writeln!(f)?;
        for y in 0..N {
            write!(f, "{y}")?;
            for x in 0..N {
                let ch = self.color_at(x, y).map_or(SYMBOL_EMPTY, Color::symbol);
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
