//! Candidate move generation and ordering

use std::fmt;

use crate::board::{Board, Pos, Stone};
use crate::eval::evaluate_position;
use crate::rules::{is_blocking_threat, is_winning_threat};

/// Neighbourhood radius for candidate cells
pub const CANDIDATE_RADIUS: usize = 2;

/// Ordering score of a move that wins on the spot
pub const WIN_MOVE_SCORE: i64 = 1_000_000;

/// Ordering score of a move that stops an immediate loss
pub const BLOCK_MOVE_SCORE: i64 = 999_999;

/// A scored move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvaluation {
    pub pos: Pos,
    pub score: i64,
    /// Search depth the score comes from (0 for static scores)
    pub depth: u8,
    pub is_winning: bool,
    pub is_blocking: bool,
}

impl MoveEvaluation {
    #[inline]
    pub fn new(pos: Pos, score: i64) -> Self {
        Self {
            pos,
            score,
            depth: 0,
            is_winning: false,
            is_blocking: false,
        }
    }

    #[inline]
    pub fn winning(pos: Pos) -> Self {
        Self {
            is_winning: true,
            ..Self::new(pos, WIN_MOVE_SCORE)
        }
    }

    #[inline]
    pub fn blocking(pos: Pos) -> Self {
        Self {
            is_blocking: true,
            ..Self::new(pos, BLOCK_MOVE_SCORE)
        }
    }

    #[inline]
    pub fn with_depth(self, depth: u8) -> Self {
        Self { depth, ..self }
    }
}

impl fmt::Display for MoveEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} score {} depth {}", self.pos, self.score, self.depth)?;
        if self.is_winning {
            write!(f, " (win)")?;
        } else if self.is_blocking {
            write!(f, " (block)")?;
        }
        Ok(())
    }
}

/// Candidate moves for `mover`, best first, at most `max` of them.
///
/// Cells within [`CANDIDATE_RADIUS`] of a stone are considered. Immediate
/// wins come first, then forced blocks, then the rest ordered by
/// [`evaluate_position`]. The sort is stable so equal scores keep frontier
/// order.
pub fn generate_candidates(board: &Board, mover: Stone, max: usize) -> Vec<MoveEvaluation> {
    let mut moves: Vec<MoveEvaluation> = board
        .frontier(CANDIDATE_RADIUS)
        .into_iter()
        .map(|p| score_move(board, p, mover))
        .collect();
    moves.sort_by(|a, b| b.score.cmp(&a.score));
    moves.truncate(max);
    moves
}

/// Ordering score of a single empty cell for `mover`
pub fn score_move(board: &Board, pos: Pos, mover: Stone) -> MoveEvaluation {
    if is_winning_threat(board, pos, mover) {
        MoveEvaluation::winning(pos)
    } else if is_blocking_threat(board, pos, mover) {
        MoveEvaluation::blocking(pos)
    } else {
        MoveEvaluation::new(pos, evaluate_position(board, pos, mover))
    }
}

/// First empty cell (row-major) where `stone` wins immediately, scanning the whole board
pub fn find_immediate(board: &Board, stone: Stone) -> Option<Pos> {
    board
        .empty_cells()
        .into_iter()
        .find(|&p| is_winning_threat(board, p, stone))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new(15).unwrap();
        for &(r, c, s) in stones {
            board.place(Pos::new(r, c), s).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_has_no_candidates() {
        let board = Board::new(15).unwrap();
        assert!(generate_candidates(&board, Stone::X, 20).is_empty());
    }

    #[test]
    fn test_candidates_near_stones_only() {
        let board = board_with(&[(7, 7, Stone::X)]);
        let moves = generate_candidates(&board, Stone::O, 100);
        assert_eq!(moves.len(), 24);
        for m in &moves {
            assert!((i32::from(m.pos.row) - 7).abs() <= 2);
            assert!((i32::from(m.pos.col) - 7).abs() <= 2);
        }
    }

    #[test]
    fn test_candidates_truncated_and_sorted() {
        let board = board_with(&[(7, 7, Stone::X), (7, 8, Stone::O), (8, 7, Stone::X)]);
        let moves = generate_candidates(&board, Stone::X, 8);
        assert_eq!(moves.len(), 8);
        for pair in moves.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_win_before_block() {
        // X can win at (3,5); O threatens to win at (10,5)
        let mut stones: Vec<_> = (1..5).map(|c| (3, c, Stone::X)).collect();
        stones.push((3, 0, Stone::O));
        stones.extend((6..10).map(|c| (10, c, Stone::O)));
        stones.push((10, 10, Stone::X));
        let board = board_with(&stones);

        let moves = generate_candidates(&board, Stone::X, 5);
        assert_eq!(moves[0].pos, Pos::new(3, 5));
        assert!(moves[0].is_winning);
        assert_eq!(moves[1].pos, Pos::new(10, 5));
        assert!(moves[1].is_blocking);
        assert_eq!(moves[1].score, BLOCK_MOVE_SCORE);
    }

    #[test]
    fn test_find_immediate() {
        let stones: Vec<_> = (10..14).map(|r| (r, 2, Stone::O)).collect();
        let board = board_with(&stones);
        assert_eq!(find_immediate(&board, Stone::O), Some(Pos::new(9, 2)));
        assert_eq!(find_immediate(&board, Stone::X), None);
    }

    #[test]
    fn test_move_evaluation_display() {
        let m = MoveEvaluation::winning(Pos::new(1, 2)).with_depth(3);
        assert_eq!(m.to_string(), "(1, 2) score 1000000 depth 3 (win)");
    }
}
