//! Heuristic evaluation of cells and positions
//!
//! Cells are scored by the line patterns a player would own through them.
//! Positions are scored from the engine's point of view: its potential on
//! the frontier minus the opponent's, plus a style bias.

use crate::board::{Board, Pos, Stone};
use crate::config::PlayStyle;
use crate::rules::{count_direction, DIRECTIONS};

use super::patterns::{LineRun, Pattern};

/// Radius around stones that counts as the frontier during evaluation
pub const FRONTIER_RADIUS: usize = 2;

/// Half side of the centre window used by positional play
const CENTER_WINDOW: i32 = 3;

/// Weight per Manhattan step inside the centre window
const CENTER_WEIGHT: i64 = 10;

/// Run of `stone` through `pos` along `(dr, dc)`, treating `pos` as `stone`.
///
/// Open ends are read from the cells just past the two true ends of the run.
pub fn line_run(board: &Board, pos: Pos, dr: i32, dc: i32, stone: Stone) -> LineRun {
    let forward = count_direction(board, pos, dr, dc, stone);
    let back = count_direction(board, pos, -dr, -dc, stone);
    let size = board.size();

    let is_open = |dist: i32| {
        pos.offset(dr, dc, dist, size)
            .is_some_and(|p| board.is_empty(p))
    };
    let open_ends = u8::from(is_open(forward as i32 + 1)) + u8::from(is_open(-(back as i32) - 1));

    LineRun {
        length: forward + back + 1,
        open_ends,
    }
}

/// Pattern `stone` owns through `pos` along one axis
pub fn classify_line(board: &Board, pos: Pos, dr: i32, dc: i32, stone: Stone) -> Pattern {
    line_run(board, pos, dr, dc, stone).pattern()
}

/// Value of `pos` to `stone`, summed over the four axes.
///
/// Works for an empty cell (hypothetical placement) and for a cell already
/// holding `stone`. A cell held by the other player is worth nothing.
#[must_use]
pub fn evaluate_position(board: &Board, pos: Pos, stone: Stone) -> i64 {
    if !stone.is_player() || !board.contains(pos) {
        return 0;
    }
    let current = board.get(pos);
    if current != Stone::Empty && current != stone {
        return 0;
    }
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| line_run(board, pos, dr, dc, stone).score())
        .sum()
}

/// Sum of [`evaluate_position`] over every empty cell
#[must_use]
pub fn evaluate_board(board: &Board, stone: Stone) -> i64 {
    board
        .empty_cells()
        .into_iter()
        .map(|p| evaluate_position(board, p, stone))
        .sum()
}

/// Sum of [`evaluate_position`] over the given cells
pub fn potential(board: &Board, cells: &[Pos], stone: Stone) -> i64 {
    cells.iter().map(|&p| evaluate_position(board, p, stone)).sum()
}

/// Pattern value of the stones `stone` already has on the board
pub fn stone_patterns(board: &Board, stone: Stone) -> i64 {
    board
        .stones(stone)
        .map(|p| evaluate_position(board, p, stone))
        .sum()
}

/// Bonus for `stone` holding cells near the board centre.
///
/// Covers a 7x7 window; each stone scores `(4 - manhattan distance) * 10`.
pub fn center_control(board: &Board, stone: Stone) -> i64 {
    let center = board.center();
    let mut score = 0;
    for dr in -CENTER_WINDOW..=CENTER_WINDOW {
        for dc in -CENTER_WINDOW..=CENTER_WINDOW {
            let Some(p) = center.offset(dr, dc, 1, board.size()) else {
                continue;
            };
            if board.get(p) == stone {
                let distance = i64::from(dr.abs() + dc.abs());
                score += (4 - distance) * CENTER_WEIGHT;
            }
        }
    }
    score
}

/// Style adjustment added to the base evaluation for `ai`
pub fn style_bias(board: &Board, ai: Stone, style: PlayStyle) -> i64 {
    match style {
        PlayStyle::Balanced => 0,
        PlayStyle::Aggressive => stone_patterns(board, ai) / 2,
        PlayStyle::Defensive => -(stone_patterns(board, ai.opponent()) / 2),
        PlayStyle::Positional => center_control(board, ai),
    }
}

/// Static evaluation from `ai`'s point of view. Positive favours `ai`.
#[must_use]
pub fn evaluate(board: &Board, ai: Stone, style: PlayStyle) -> i64 {
    let frontier = board.frontier(FRONTIER_RADIUS);
    let base = potential(board, &frontier, ai) - potential(board, &frontier, ai.opponent());
    base + style_bias(board, ai, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::PatternScore;

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new(15).unwrap();
        for &(r, c, s) in stones {
            board.place(Pos::new(r, c), s).unwrap();
        }
        board
    }

    fn swapped(board: &Board) -> Board {
        let mut out = Board::new(board.size()).unwrap();
        for record in board.history() {
            out.place(record.pos, record.stone.opponent()).unwrap();
        }
        out
    }

    #[test]
    fn test_evaluate_empty_board() {
        let board = Board::new(15).unwrap();
        assert_eq!(evaluate(&board, Stone::X, PlayStyle::Balanced), 0);
        // Lone cell in the middle: four open ones
        assert_eq!(evaluate_position(&board, Pos::new(7, 7), Stone::X), 4 * PatternScore::OPEN_ONE);
    }

    #[test]
    fn test_corner_is_worth_less() {
        let board = Board::new(15).unwrap();
        let corner = evaluate_position(&board, Pos::new(0, 0), Stone::X);
        let center = evaluate_position(&board, Pos::new(7, 7), Stone::X);
        assert!(corner < center, "corner {} should be below center {}", corner, center);
    }

    #[test]
    fn test_open_ends_from_true_run_ends() {
        // _XXX_ with the anchor at the left stone
        let board = board_with(&[(7, 5, Stone::X), (7, 6, Stone::X), (7, 7, Stone::X)]);
        let run = line_run(&board, Pos::new(7, 5), 0, 1, Stone::X);
        assert_eq!(run, LineRun { length: 3, open_ends: 2 });

        // OXXX_ blocked on the left
        let board = board_with(&[
            (7, 4, Stone::O),
            (7, 5, Stone::X),
            (7, 6, Stone::X),
            (7, 7, Stone::X),
        ]);
        assert_eq!(classify_line(&board, Pos::new(7, 7), 0, 1, Stone::X), Pattern::ClosedThree);
    }

    #[test]
    fn test_edge_counts_as_blocked() {
        let board = board_with(&[(0, 0, Stone::X), (0, 1, Stone::X)]);
        let run = line_run(&board, Pos::new(0, 0), 0, 1, Stone::X);
        assert_eq!(run, LineRun { length: 2, open_ends: 1 });
    }

    #[test]
    fn test_hypothetical_open_four() {
        let board = board_with(&[(7, 5, Stone::X), (7, 6, Stone::X), (7, 7, Stone::X)]);
        let score = evaluate_position(&board, Pos::new(7, 8), Stone::X);
        assert!(score >= PatternScore::OPEN_FOUR, "got {}", score);
        assert_eq!(classify_line(&board, Pos::new(7, 8), 0, 1, Stone::X), Pattern::OpenFour);
    }

    #[test]
    fn test_completing_five_scores_five() {
        let stones: Vec<_> = (5..9).map(|c| (7, c, Stone::O)).collect();
        let board = board_with(&stones);
        assert!(evaluate_position(&board, Pos::new(7, 9), Stone::O) >= PatternScore::FIVE);
    }

    #[test]
    fn test_dead_four_scores_nothing_on_that_axis() {
        let board = board_with(&[
            (7, 3, Stone::O),
            (7, 4, Stone::X),
            (7, 5, Stone::X),
            (7, 6, Stone::X),
            (7, 8, Stone::O),
        ]);
        assert_eq!(classify_line(&board, Pos::new(7, 7), 0, 1, Stone::X), Pattern::Dead);
    }

    #[test]
    fn test_opponent_cell_scores_zero() {
        let board = board_with(&[(7, 7, Stone::O)]);
        assert_eq!(evaluate_position(&board, Pos::new(7, 7), Stone::X), 0);
        assert!(evaluate_position(&board, Pos::new(7, 7), Stone::O) > 0);
    }

    #[test]
    fn test_position_symmetric_under_relabelling() {
        let board = board_with(&[
            (7, 7, Stone::X),
            (7, 8, Stone::O),
            (8, 8, Stone::X),
            (6, 6, Stone::X),
            (9, 9, Stone::O),
        ]);
        let mirror = swapped(&board);
        for p in board.frontier(2) {
            assert_eq!(
                evaluate_position(&board, p, Stone::X),
                evaluate_position(&mirror, p, Stone::O),
                "asymmetric at {}",
                p
            );
        }
        assert_eq!(
            evaluate(&board, Stone::X, PlayStyle::Balanced),
            evaluate(&mirror, Stone::O, PlayStyle::Balanced)
        );
    }

    #[test]
    fn test_evaluate_perspective() {
        let board = board_with(&[(7, 5, Stone::X), (7, 6, Stone::X), (7, 7, Stone::X), (0, 0, Stone::O)]);
        assert!(evaluate(&board, Stone::X, PlayStyle::Balanced) > 0);
        assert!(evaluate(&board, Stone::O, PlayStyle::Balanced) < 0);
    }

    #[test]
    fn test_evaluate_board_counts_empty_cells_only() {
        let board = board_with(&[(7, 7, Stone::X)]);
        let total = evaluate_board(&board, Stone::X);
        let by_hand: i64 = board
            .empty_cells()
            .into_iter()
            .map(|p| evaluate_position(&board, p, Stone::X))
            .sum();
        assert_eq!(total, by_hand);
    }

    #[test]
    fn test_style_bias() {
        let board = board_with(&[(7, 7, Stone::O), (7, 8, Stone::O), (3, 3, Stone::X)]);
        assert_eq!(style_bias(&board, Stone::O, PlayStyle::Balanced), 0);
        assert!(style_bias(&board, Stone::O, PlayStyle::Aggressive) > 0);
        assert!(style_bias(&board, Stone::O, PlayStyle::Defensive) < 0);
        // (7,7) is the centre: 40, (7,8) is one step away: 30
        assert_eq!(style_bias(&board, Stone::O, PlayStyle::Positional), 70);
        assert_eq!(center_control(&board, Stone::X), 0);
    }
}
