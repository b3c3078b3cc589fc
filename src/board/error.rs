//! Board errors

use thiserror::Error;

/// Errors reported by board construction and mutation.
///
/// All of them are recoverable: a failed call leaves the board untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {size} is outside the supported range {min}..={max}", min = super::MIN_SIZE, max = super::MAX_SIZE)]
    InvalidSize { size: usize },
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: u8, col: u8 },
    #[error("only X or O can be placed")]
    InvalidPlayer,
    #[error("no move to undo")]
    NoHistory,
    #[error("could not allocate a {size}x{size} board")]
    AllocationFailure { size: usize },
}
