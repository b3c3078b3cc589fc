//! Game rules for Caro
//!
//! - Any run of five or more stones wins
//! - Moves must land on an empty cell inside the board

pub mod threat;
pub mod validate;
pub mod win;

pub use threat::{find_threats, is_blocking_threat, is_winning_threat};
pub use validate::{validate_move, MoveValidity};
pub use win::{
    check_win_at, completes_five, count_direction, game_status, run_length, winning_line,
    GameStatus, DIRECTIONS, WIN_LENGTH,
};
