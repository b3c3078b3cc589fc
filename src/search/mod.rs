//! Search module for the Caro AI
//!
//! Contains:
//! - Candidate generation with win/block detection and move ordering
//! - Minimax with alpha-beta pruning and a cooperative deadline

pub mod alphabeta;
pub mod candidates;

pub use alphabeta::{Aborted, SearchStats, Searcher, INF, WIN_SCORE};
pub use candidates::{
    find_immediate, generate_candidates, score_move, MoveEvaluation, BLOCK_MOVE_SCORE,
    CANDIDATE_RADIUS, WIN_MOVE_SCORE,
};
