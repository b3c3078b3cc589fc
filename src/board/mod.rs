//! Board representation for Caro
//!
//! The board is a square grid whose side is chosen at construction time
//! (between [`MIN_SIZE`] and [`MAX_SIZE`]). Alongside the cells it keeps an
//! occupancy [`Bitboard`] and a [`RegionIndex`] so that large, sparse boards
//! can be scanned without touching every cell.

pub mod bitboard;
pub mod board;
pub mod error;
pub mod region;


use std::collections::TryReserveError;
use std::fmt;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, MoveRecord};
pub use error::BoardError;
pub use region::{Region, RegionIndex};

/// Smallest supported board side
pub const MIN_SIZE: usize = 15;
/// Largest supported board side
pub const MAX_SIZE: usize = 100;
/// Board side used when none is given
pub const DEFAULT_SIZE: usize = 15;
/// Side of one square region in the region index
pub const REGION_SIZE: usize = 10;

/// Cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stone {
    #[default]
    Empty,
    X,
    O,
}

impl Stone {
    /// Get opponent stone
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::X => Stone::O,
            Stone::O => Stone::X,
            Stone::Empty => Stone::Empty,
        }
    }

    /// True for `X` and `O`
    #[inline]
    pub fn is_player(self) -> bool {
        self != Stone::Empty
    }

    /// Single character used by the text renderer
    pub fn symbol(self) -> char {
        match self {
            Stone::Empty => '.',
            Stone::X => 'X',
            Stone::O => 'O',
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Position on the board
///
/// Ordering is row-major, which is also the order cells are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    /// Step `dist` cells along `(dr, dc)`; `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, dist: i32, size: usize) -> Option<Pos> {
        let r = i32::from(self.row) + dr * dist;
        let c = i32::from(self.col) + dc * dist;
        is_in_range(r, c, size).then(|| Pos::new(r as u8, c as u8))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[inline]
pub(crate) fn is_in_range(row: i32, col: i32, size: usize) -> bool {
    row >= 0 && col >= 0 && (row as usize) < size && (col as usize) < size
}

/// Allocate `len` copies of `value`, reporting failure instead of aborting.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, TryReserveError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, value);
    Ok(buf)
}
