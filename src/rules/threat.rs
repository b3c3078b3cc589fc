//! Immediate threat detection
//!
//! A threat here is a single empty cell that ends the game: playing it gives
//! five in a row. None of these functions mutate the board; the cell under
//! test is treated as if it held the stone.

use crate::board::{Board, Pos, Stone};

use super::win::completes_five;

/// Would placing `stone` on the empty cell `pos` win immediately?
#[inline]
pub fn is_winning_threat(board: &Board, pos: Pos, stone: Stone) -> bool {
    stone.is_player() && board.contains(pos) && board.is_empty(pos) && completes_five(board, pos, stone)
}

/// Must `stone` play `pos` to stop the opponent winning there next move?
#[inline]
pub fn is_blocking_threat(board: &Board, pos: Pos, stone: Stone) -> bool {
    is_winning_threat(board, pos, stone.opponent())
}

/// Every empty cell where `stone` wins immediately, row-major.
///
/// Only cells next to a stone can complete a line, so the scan is limited to
/// the radius-1 frontier.
pub fn find_threats(board: &Board, stone: Stone) -> Vec<Pos> {
    let mut threats: Vec<Pos> = board
        .frontier(1)
        .into_iter()
        .filter(|&p| is_winning_threat(board, p, stone))
        .collect();
    threats.sort_unstable();
    threats
}
