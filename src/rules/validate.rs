//! Move validation

use std::fmt;

use crate::board::{Board, Stone};

/// Result of checking a candidate move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveValidity {
    Valid,
    OutOfBounds,
    CellOccupied,
    InvalidPlayer,
}

impl MoveValidity {
    #[inline]
    pub fn is_valid(self) -> bool {
        self == MoveValidity::Valid
    }
}

impl fmt::Display for MoveValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveValidity::Valid => "valid move",
            MoveValidity::OutOfBounds => "position is off the board",
            MoveValidity::CellOccupied => "cell is already occupied",
            MoveValidity::InvalidPlayer => "only X or O can move",
        };
        f.write_str(text)
    }
}

/// Check whether `stone` may be played at `(row, col)`.
///
/// The player is checked first, then bounds, then occupancy. This is advisory:
/// [`Board::place`] performs the same checks.
pub fn validate_move(board: &Board, row: i32, col: i32, stone: Stone) -> MoveValidity {
    if !stone.is_player() {
        return MoveValidity::InvalidPlayer;
    }
    match board.cell_at(row, col) {
        None => MoveValidity::OutOfBounds,
        Some(Stone::Empty) => MoveValidity::Valid,
        Some(_) => MoveValidity::CellOccupied,
    }
}
