//! Win detection for Caro
//!
//! A player wins by owning a straight run of at least [`WIN_LENGTH`] stones
//! horizontally, vertically or diagonally. Overlines count.

use std::fmt;

use crate::board::{Board, Pos, Stone};

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Direction vectors for line checking (4 directions)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Outcome of the game after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    XWin,
    OWin,
    Draw,
}

impl GameStatus {
    /// Status for a win by `stone`
    pub fn won_by(stone: Stone) -> Self {
        match stone {
            Stone::X => GameStatus::XWin,
            Stone::O => GameStatus::OWin,
            Stone::Empty => GameStatus::Playing,
        }
    }

    pub fn winner(self) -> Option<Stone> {
        match self {
            GameStatus::XWin => Some(Stone::X),
            GameStatus::OWin => Some(Stone::O),
            GameStatus::Playing | GameStatus::Draw => None,
        }
    }

    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Playing => "Playing",
            GameStatus::XWin => "X wins",
            GameStatus::OWin => "O wins",
            GameStatus::Draw => "Draw",
        };
        f.write_str(text)
    }
}

/// Number of consecutive `stone` cells starting one step from `pos` along `(dr, dc)`
#[inline]
pub fn count_direction(board: &Board, pos: Pos, dr: i32, dc: i32, stone: Stone) -> usize {
    let size = board.size();
    let mut count = 0;
    let mut dist = 1;
    while let Some(p) = pos.offset(dr, dc, dist, size) {
        if board.get(p) != stone {
            break;
        }
        count += 1;
        dist += 1;
    }
    count
}

/// Length of the run through `pos` along one axis, counting `pos` itself as `stone`
#[inline]
pub fn run_length(board: &Board, pos: Pos, dr: i32, dc: i32, stone: Stone) -> usize {
    1 + count_direction(board, pos, dr, dc, stone) + count_direction(board, pos, -dr, -dc, stone)
}

/// Would a `stone` at `pos` be part of five in a row?
///
/// The cell's current content is ignored, so this works both for stones
/// already on the board and for hypothetical placements.
#[inline]
pub fn completes_five(board: &Board, pos: Pos, stone: Stone) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_length(board, pos, dr, dc, stone) >= WIN_LENGTH)
}

/// True iff the cell at `pos` holds `stone` and lies on a run of five or more.
pub fn check_win_at(board: &Board, pos: Pos, stone: Stone) -> bool {
    stone.is_player()
        && board.contains(pos)
        && board.get(pos) == stone
        && completes_five(board, pos, stone)
}

/// Game status judged from the last move only.
///
/// A win anywhere else on the board is not noticed; callers pass the move
/// that was just played.
pub fn game_status(board: &Board, last_move: Option<Pos>) -> GameStatus {
    if let Some(pos) = last_move.filter(|&p| board.contains(p)) {
        let stone = board.get(pos);
        if check_win_at(board, pos, stone) {
            return GameStatus::won_by(stone);
        }
    }
    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::Playing
    }
}

/// Cells of the winning run through `pos`, in line order.
///
/// Returns the whole maximal run (which may exceed five), or `None` if the
/// stone at `pos` has not won.
pub fn winning_line(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    if !board.contains(pos) {
        return None;
    }
    let stone = board.get(pos);
    if !stone.is_player() {
        return None;
    }
    let size = board.size();

    for &(dr, dc) in &DIRECTIONS {
        let back = count_direction(board, pos, -dr, -dc, stone);
        let forward = count_direction(board, pos, dr, dc, stone);
        if back + forward + 1 < WIN_LENGTH {
            continue;
        }
        let line = (-(back as i32)..=forward as i32)
            .filter_map(|dist| pos.offset(dr, dc, dist, size))
            .collect();
        return Some(line);
    }
    None
}
