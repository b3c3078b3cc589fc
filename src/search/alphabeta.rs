//! Minimax search with alpha-beta pruning
//!
//! The searcher plays on a scratch board owned by the caller, placing and
//! undoing stones as it walks the tree. Scores are always from the engine's
//! point of view: the engine's turns maximize, the opponent's minimize.
//!
//! # Example
//!
//! ```
//! use caro::board::{Board, Pos, Stone};
//! use caro::config::PlayStyle;
//! use caro::search::{generate_candidates, SearchStats, Searcher};
//!
//! let mut board = Board::new(15).unwrap();
//! board.place(Pos::new(7, 7), Stone::X).unwrap();
//!
//! let searcher = Searcher::new(Stone::O, PlayStyle::Balanced, 8);
//! let candidates = generate_candidates(&board, Stone::O, 8);
//! let mut stats = SearchStats::default();
//! let best = searcher.search_root(&mut board, &candidates, 2, &mut stats);
//! assert!(best.is_ok());
//! ```

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::board::{Board, Pos, Stone};
use crate::config::PlayStyle;
use crate::eval::evaluate;
use crate::rules::check_win_at;

use super::candidates::{generate_candidates, MoveEvaluation};

/// Score of a won position before the depth bonus
pub const WIN_SCORE: i64 = 100_000_000;

/// Infinity score for alpha-beta bounds
pub const INF: i64 = WIN_SCORE * 10;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited
    pub nodes: u64,
    /// Sibling cutoffs (beta <= alpha)
    pub prunes: u64,
    /// Deepest ply reached below the root
    pub max_depth_reached: u8,
    /// Wall-clock time of the whole call
    pub elapsed: Duration,
}

impl SearchStats {
    /// Nodes per second over the whole call
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.nodes as f64 / secs
        }
    }
}

/// The deadline passed before the pass finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search deadline reached")]
pub struct Aborted;

/// Depth-first minimax searcher
#[derive(Debug, Clone, Copy)]
pub struct Searcher {
    ai: Stone,
    style: PlayStyle,
    max_candidates: usize,
    deadline: Option<Instant>,
}

impl Searcher {
    pub fn new(ai: Stone, style: PlayStyle, max_candidates: usize) -> Self {
        Self {
            ai,
            style,
            max_candidates,
            deadline: None,
        }
    }

    /// Abort cooperatively once `deadline` has passed
    pub fn with_deadline(self, deadline: Option<Instant>) -> Self {
        Self { deadline, ..self }
    }

    #[inline]
    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Score every root candidate at `depth` plies and return the best.
    ///
    /// Ties go to the earliest candidate. `depth` counts the root move, so
    /// each child is searched with `depth - 1`.
    pub fn search_root(
        &self,
        board: &mut Board,
        candidates: &[MoveEvaluation],
        depth: u8,
        stats: &mut SearchStats,
    ) -> Result<Option<MoveEvaluation>, Aborted> {
        let mut best: Option<MoveEvaluation> = None;
        let mut alpha = -INF;

        for (i, cand) in candidates.iter().enumerate() {
            if i > 0 && self.out_of_time() {
                return Err(Aborted);
            }
            let child = depth.saturating_sub(1);
            let Some(result) = with_move(board, cand.pos, self.ai, |b| {
                self.minimax(b, child, false, alpha, INF, Some(cand.pos), 1, stats)
            }) else {
                continue;
            };
            let score = result?;
            if best.map_or(true, |b| score > b.score) {
                best = Some(MoveEvaluation {
                    score,
                    depth,
                    ..*cand
                });
                alpha = alpha.max(score);
            }
        }
        Ok(best)
    }

    /// Exact minimax score of every candidate (no window sharing between siblings)
    pub fn score_each(
        &self,
        board: &mut Board,
        candidates: &[MoveEvaluation],
        depth: u8,
        stats: &mut SearchStats,
    ) -> Vec<MoveEvaluation> {
        let mut scored = Vec::with_capacity(candidates.len());
        for cand in candidates {
            let child = depth.saturating_sub(1);
            let result = with_move(board, cand.pos, self.ai, |b| {
                self.minimax(b, child, false, -INF, INF, Some(cand.pos), 1, stats)
            });
            if let Some(Ok(score)) = result {
                scored.push(MoveEvaluation {
                    score,
                    depth,
                    ..*cand
                });
            }
        }
        scored
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `last_move` is the move that led here; if it completed five the node is
    /// terminal and scores `±(WIN_SCORE + depth)`, so faster wins score higher
    /// and slower losses score less negative. The board is restored before
    /// returning, including on abort.
    #[allow(clippy::too_many_arguments)]
    pub fn minimax(
        &self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i64,
        mut beta: i64,
        last_move: Option<Pos>,
        ply: u8,
        stats: &mut SearchStats,
    ) -> Result<i64, Aborted> {
        stats.nodes += 1;
        stats.max_depth_reached = stats.max_depth_reached.max(ply);

        if let Some(pos) = last_move {
            let stone = board.get(pos);
            if check_win_at(board, pos, stone) {
                let score = WIN_SCORE + i64::from(depth);
                return Ok(if stone == self.ai { score } else { -score });
            }
        }
        if depth == 0 {
            return Ok(evaluate(board, self.ai, self.style));
        }

        let mover = if maximizing { self.ai } else { self.ai.opponent() };
        let candidates = generate_candidates(board, mover, self.max_candidates);
        if candidates.is_empty() {
            return Ok(evaluate(board, self.ai, self.style));
        }

        let mut best = if maximizing { -INF } else { INF };
        for (i, cand) in candidates.iter().enumerate() {
            if i > 0 && self.out_of_time() {
                return Err(Aborted);
            }
            let Some(result) = with_move(board, cand.pos, mover, |b| {
                self.minimax(b, depth - 1, !maximizing, alpha, beta, Some(cand.pos), ply + 1, stats)
            }) else {
                continue;
            };
            let score = result?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                stats.prunes += 1;
                break;
            }
        }
        Ok(best)
    }
}

/// Play `stone` at `pos`, run `f`, then take the stone back.
///
/// Returns `None` without calling `f` if the move cannot be placed.
fn with_move<T>(board: &mut Board, pos: Pos, stone: Stone, f: impl FnOnce(&mut Board) -> T) -> Option<T> {
    board.place(pos, stone).ok()?;
    let out = f(board);
    let undone = board.undo_last();
    debug_assert_eq!(undone.map(|r| r.pos), Ok(pos));
    Some(out)
}
