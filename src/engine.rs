//! Main AI engine
//!
//! Picks a move for the configured player. The search follows a priority
//! system:
//!
//! 1. **Opening**: on an empty board play the centre
//! 2. **Immediate win**: any cell that completes five for the engine
//! 3. **Defense**: any cell where the opponent would complete five
//! 4. **Alpha-Beta**: minimax over ordered candidates, optionally with
//!    iterative deepening under a time budget
//! 5. **Fallback**: a random empty cell when nothing else applies
//!
//! # Example
//!
//! ```
//! use caro::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut engine = AIEngine::new();
//! engine.set_difficulty(Difficulty::Easy);
//!
//! let mut board = Board::new(15).unwrap();
//! board.place(Pos::new(7, 7), Stone::X).unwrap();
//!
//! let result = engine.get_move_with_stats(&board).unwrap();
//! println!("Best move: {}", result.evaluation);
//! println!("Search type: {:?}", result.search_type);
//! println!("Nodes: {}", result.stats.nodes);
//! ```

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::{Difficulty, EngineConfig, PlayStyle};
use crate::search::{find_immediate, generate_candidates, MoveEvaluation, SearchStats, Searcher};

/// Score reported for the opening move
pub const OPENING_SCORE: i64 = 1_000;

/// Deepest ply used when ranking moves for hints
const TOP_MOVES_MAX_DEPTH: u8 = 3;

/// Which phase of the search produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Centre of an empty board
    Opening,
    /// Completes five
    ImmediateWin,
    /// Blocks the opponent's five
    Defense,
    /// Regular alpha-beta search result
    AlphaBeta,
    /// Random empty cell, no candidate was found
    Fallback,
}

/// A chosen move with search metadata
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub evaluation: MoveEvaluation,
    pub search_type: SearchType,
    pub stats: SearchStats,
}

/// Main AI Engine for Caro.
///
/// The engine never mutates the board it is given: every search runs on a
/// private copy.
#[derive(Debug, Clone)]
pub struct AIEngine {
    ai: Stone,
    difficulty: Difficulty,
    style: PlayStyle,
    time_limit: Option<Duration>,
    rng: StdRng,
    last_stats: SearchStats,
}

impl AIEngine {
    /// Engine playing `O` at medium difficulty with a balanced style
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ai = if config.ai_player.is_player() { config.ai_player } else { Stone::O };
        Self {
            ai,
            difficulty: config.difficulty,
            style: config.style,
            time_limit: config.time_limit,
            rng,
            last_stats: SearchStats::default(),
        }
    }

    /// Best move for the engine, or `None` if the board is full.
    pub fn find_best_move(&mut self, board: &Board) -> Option<MoveEvaluation> {
        self.get_move_with_stats(board).map(|r| r.evaluation)
    }

    /// Convenience wrapper returning only the position
    pub fn get_move(&mut self, board: &Board) -> Option<Pos> {
        self.find_best_move(board).map(|m| m.pos)
    }

    /// Best move together with how it was found and search statistics.
    pub fn get_move_with_stats(&mut self, board: &Board) -> Option<MoveResult> {
        let start = Instant::now();
        let mut stats = SearchStats::default();

        let found = self.choose(board, start, &mut stats);

        stats.elapsed = start.elapsed();
        if let Some((evaluation, search_type)) = &found {
            debug!(
                player = %self.ai,
                pos = %evaluation.pos,
                score = evaluation.score,
                depth = evaluation.depth,
                ?search_type,
                nodes = stats.nodes,
                prunes = stats.prunes,
                elapsed_ms = stats.elapsed.as_millis() as u64,
                "move chosen"
            );
        }
        self.last_stats = stats.clone();
        found.map(|(evaluation, search_type)| MoveResult {
            evaluation,
            search_type,
            stats,
        })
    }

    fn choose(
        &mut self,
        board: &Board,
        start: Instant,
        stats: &mut SearchStats,
    ) -> Option<(MoveEvaluation, SearchType)> {
        if board.is_full() {
            return None;
        }

        // 1. Opening
        if board.is_board_empty() {
            let opening = MoveEvaluation::new(board.center(), OPENING_SCORE);
            return Some((opening, SearchType::Opening));
        }

        // 2. Win on the spot, anywhere on the board
        if let Some(pos) = find_immediate(board, self.ai) {
            return Some((MoveEvaluation::winning(pos), SearchType::ImmediateWin));
        }

        // 3. Block the opponent's five
        if let Some(pos) = find_immediate(board, self.opponent()) {
            return Some((MoveEvaluation::blocking(pos), SearchType::Defense));
        }

        // 4. Alpha-beta
        let candidates = generate_candidates(board, self.ai, self.difficulty.max_candidates());
        if !candidates.is_empty() {
            if let Some(best) = self.search(board, &candidates, start, stats) {
                return Some((best, SearchType::AlphaBeta));
            }
        }

        // 5. Nothing to search
        let pos = *board.empty_cells().choose(&mut self.rng)?;
        warn!(%pos, "no candidate moves, playing a random cell");
        Some((MoveEvaluation::new(pos, 0), SearchType::Fallback))
    }

    /// Full-depth search, or iterative deepening when a time limit is set.
    ///
    /// Under a time limit only completed passes count; the depth-1 pass always
    /// runs to completion.
    fn search(
        &self,
        board: &Board,
        candidates: &[MoveEvaluation],
        start: Instant,
        stats: &mut SearchStats,
    ) -> Option<MoveEvaluation> {
        let max_depth = self.difficulty.max_depth();
        let searcher = Searcher::new(self.ai, self.style, self.difficulty.max_candidates());
        let mut scratch = board.clone();

        let Some(limit) = self.time_limit else {
            return searcher
                .search_root(&mut scratch, candidates, max_depth, stats)
                .ok()
                .flatten();
        };

        let deadline = start + limit;
        let mut best = None;
        for depth in 1..=max_depth {
            let pass = if depth == 1 { searcher } else { searcher.with_deadline(Some(deadline)) };
            match pass.search_root(&mut scratch, candidates, depth, stats) {
                Ok(Some(found)) => {
                    trace!(depth, pos = %found.pos, score = found.score, "pass complete");
                    best = Some(found);
                }
                Ok(None) => break,
                Err(_) => {
                    trace!(depth, "pass aborted");
                    break;
                }
            }
            if Instant::now() >= deadline {
                break;
            }
        }
        best
    }

    /// The `count` best candidates, each scored by a shallow minimax.
    ///
    /// Used for hints. An empty board yields the centre.
    pub fn get_top_moves(&mut self, board: &Board, count: usize) -> Vec<MoveEvaluation> {
        let start = Instant::now();
        let mut stats = SearchStats::default();

        if board.is_board_empty() {
            return vec![MoveEvaluation::new(board.center(), OPENING_SCORE)];
        }

        let depth = self.difficulty.max_depth().saturating_sub(1).clamp(1, TOP_MOVES_MAX_DEPTH);
        let candidates = generate_candidates(board, self.ai, self.difficulty.max_candidates());
        let searcher = Searcher::new(self.ai, self.style, self.difficulty.max_candidates());
        let mut scratch = board.clone();

        let mut scored = searcher.score_each(&mut scratch, &candidates, depth, &mut stats);
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(count);

        stats.elapsed = start.elapsed();
        self.last_stats = stats;
        scored
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_play_style(&mut self, style: PlayStyle) {
        self.style = style;
    }

    /// `None` removes the limit
    pub fn set_time_limit(&mut self, limit: Option<Duration>) {
        self.time_limit = limit;
    }

    /// Change which player the engine plays; the opponent follows. `Empty` is ignored.
    pub fn set_ai_player(&mut self, stone: Stone) {
        if stone.is_player() {
            self.ai = stone;
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn play_style(&self) -> PlayStyle {
        self.style
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    pub fn ai_player(&self) -> Stone {
        self.ai
    }

    pub fn opponent(&self) -> Stone {
        self.ai.opponent()
    }

    /// Statistics of the most recent search
    pub fn last_stats(&self) -> &SearchStats {
        &self.last_stats
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{BLOCK_MOVE_SCORE, WIN_MOVE_SCORE};

    fn board_with(size: usize, stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(r, c, s) in stones {
            board.place(Pos::new(r, c), s).unwrap();
        }
        board
    }

    fn engine(ai: Stone, difficulty: Difficulty) -> AIEngine {
        AIEngine::with_config(EngineConfig {
            ai_player: ai,
            difficulty,
            seed: Some(7),
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.ai_player(), Stone::O);
        assert_eq!(engine.opponent(), Stone::X);
        assert_eq!(engine.difficulty(), Difficulty::Medium);
        assert_eq!(engine.play_style(), PlayStyle::Balanced);
        assert_eq!(engine.time_limit(), None);
    }

    #[test]
    fn test_engine_empty_board_plays_center() {
        let mut engine = engine(Stone::X, Difficulty::Expert);
        let board = Board::new(15).unwrap();
        let result = engine.get_move_with_stats(&board).unwrap();
        assert_eq!(result.evaluation.pos, Pos::new(7, 7));
        assert_eq!(result.evaluation.score, OPENING_SCORE);
        assert_eq!(result.search_type, SearchType::Opening);
        assert_eq!(result.stats.nodes, 0);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut stones: Vec<_> = (2..6).map(|r| (r, 3, Stone::O)).collect();
        stones.extend([(7, 7, Stone::X), (7, 8, Stone::X), (7, 9, Stone::X), (7, 10, Stone::X)]);
        let board = board_with(15, &stones);

        let mut engine = engine(Stone::O, Difficulty::Medium);
        let result = engine.get_move_with_stats(&board).unwrap();
        // Own win beats blocking the open four
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert!(result.evaluation.is_winning);
        assert_eq!(result.evaluation.score, WIN_MOVE_SCORE);
        assert!(result.evaluation.pos == Pos::new(1, 3) || result.evaluation.pos == Pos::new(6, 3));
    }

    #[test]
    fn test_engine_blocks_open_four() {
        let stones: Vec<_> = (5..9).map(|c| (7, c, Stone::O)).collect();
        let board = board_with(15, &stones);

        let mut engine = engine(Stone::X, Difficulty::Medium);
        let result = engine.get_move_with_stats(&board).unwrap();
        assert_eq!(result.search_type, SearchType::Defense);
        assert!(result.evaluation.is_blocking);
        assert_eq!(result.evaluation.score, BLOCK_MOVE_SCORE);
        let pos = result.evaluation.pos;
        assert!(pos == Pos::new(7, 4) || pos == Pos::new(7, 9), "got {}", pos);
    }

    #[test]
    fn test_engine_uses_search_otherwise() {
        let board = board_with(15, &[(7, 7, Stone::X), (7, 8, Stone::O), (8, 8, Stone::X)]);
        let mut engine = engine(Stone::O, Difficulty::Easy);
        let result = engine.get_move_with_stats(&board).unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert_eq!(result.evaluation.depth, 2);
        assert!(board.is_empty(result.evaluation.pos));
        assert!(result.stats.nodes > 0);
        assert_eq!(engine.last_stats().nodes, result.stats.nodes);
    }

    #[test]
    fn test_engine_does_not_touch_board() {
        let board = board_with(15, &[(7, 7, Stone::X), (6, 6, Stone::O)]);
        let before = board.cells().to_vec();
        let mut engine = engine(Stone::O, Difficulty::Easy);
        let _ = engine.find_best_move(&board);
        assert_eq!(board.cells(), &before[..]);
        assert_eq!(board.move_count(), 2);
    }

    #[test]
    fn test_engine_full_board_has_no_move() {
        let mut board = Board::new(15).unwrap();
        for row in 0..15u8 {
            for col in 0..15u8 {
                let stone = if ((col / 2) + row) % 2 == 0 { Stone::X } else { Stone::O };
                board.place(Pos::new(row, col), stone).unwrap();
            }
        }
        let mut engine = engine(Stone::O, Difficulty::Beginner);
        assert!(engine.find_best_move(&board).is_none());
        assert!(engine.get_move(&board).is_none());
    }

    #[test]
    fn test_engine_time_limited_search() {
        let board = board_with(15, &[(7, 7, Stone::X), (7, 8, Stone::O), (8, 7, Stone::X)]);
        let mut engine = AIEngine::with_config(EngineConfig {
            ai_player: Stone::O,
            difficulty: Difficulty::Expert,
            time_limit: Some(Duration::from_millis(50)),
            seed: Some(1),
            ..EngineConfig::default()
        });
        let start = Instant::now();
        let result = engine.get_move_with_stats(&board).unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert!(result.evaluation.depth >= 1);
        assert!(board.is_empty(result.evaluation.pos));
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[test]
    fn test_get_top_moves() {
        let stones: Vec<_> = (5..8).map(|c| (7, c, Stone::O)).collect();
        let board = board_with(15, &stones);
        let mut engine = engine(Stone::O, Difficulty::Medium);

        let top = engine.get_top_moves(&board, 5);
        assert_eq!(top.len(), 5);
        for pair in top.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(top.iter().all(|m| m.depth == 3));
        assert!(top.iter().all(|m| board.is_empty(m.pos)));

        let empty = Board::new(15).unwrap();
        let opening = engine.get_top_moves(&empty, 5);
        assert_eq!(opening, vec![MoveEvaluation::new(Pos::new(7, 7), OPENING_SCORE)]);
    }

    #[test]
    fn test_engine_setters() {
        let mut engine = AIEngine::default();
        engine.set_difficulty(Difficulty::Hard);
        engine.set_play_style(PlayStyle::Positional);
        engine.set_time_limit(Some(Duration::from_millis(250)));
        engine.set_ai_player(Stone::X);
        engine.set_ai_player(Stone::Empty);

        assert_eq!(engine.difficulty(), Difficulty::Hard);
        assert_eq!(engine.play_style(), PlayStyle::Positional);
        assert_eq!(engine.time_limit(), Some(Duration::from_millis(250)));
        assert_eq!(engine.ai_player(), Stone::X);
        assert_eq!(engine.opponent(), Stone::O);
    }

    #[test]
    fn test_large_board_center_and_block() {
        let mut engine = engine(Stone::X, Difficulty::Easy);
        let empty = Board::new(100).unwrap();
        assert_eq!(engine.get_move(&empty), Some(Pos::new(50, 50)));

        let stones: Vec<_> = (90..94).map(|r| (r, 95, Stone::O)).collect();
        let board = board_with(100, &stones);
        let pos = engine.get_move(&board).unwrap();
        assert!(pos == Pos::new(89, 95) || pos == Pos::new(94, 95), "got {}", pos);
    }
}
