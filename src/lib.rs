//! Caro (five in a row) engine
//!
//! Board state, rules and an alpha-beta AI for five-in-a-row on square boards
//! from 15x15 up to 100x100:
//! - Five or more stones in a row wins (overlines count)
//! - No captures, no forbidden moves
//! - Draw when the board fills up
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Grid, move history, occupancy bitboard and region index
//! - [`rules`]: Move validation, win detection and immediate threats
//! - [`eval`]: Line patterns and heuristic evaluation
//! - [`search`]: Candidate generation and minimax with alpha-beta pruning
//! - [`engine`]: Main AI engine integrating all components
//! - [`config`]: Difficulty, play style and engine settings
//! - [`ui`]: Desktop front end
//!
//! # Quick Start
//!
//! ```
//! use caro::{game_status, AIEngine, Board, Difficulty, GameStatus, Pos, Stone};
//!
//! let mut board = Board::new(15).unwrap();
//! let mut engine = AIEngine::new();
//! engine.set_difficulty(Difficulty::Easy);
//!
//! board.place(Pos::new(7, 7), Stone::X).unwrap();
//!
//! // AI responds as O
//! if let Some(best) = engine.find_best_move(&board) {
//!     board.place(best.pos, Stone::O).unwrap();
//!     println!("AI plays at {}", best.pos);
//! }
//! assert_eq!(game_status(&board, board.last_move()), GameStatus::Playing);
//! ```
//!
//! # Search Priority
//!
//! The AI engine follows this search priority:
//! 1. Centre of an empty board
//! 2. Immediate winning move anywhere on the board
//! 3. Block of the opponent's immediate win
//! 4. Alpha-beta search over ordered candidates near existing stones
//!
//! # Performance
//!
//! Large boards stay cheap because scans only visit regions that hold stones:
//! - Occupancy bitboard for iterating stones
//! - Region index maintained incrementally on every move and undo
//! - Move ordering for better pruning

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, Pos, Stone, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
pub use config::{Difficulty, EngineConfig, PlayStyle};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use rules::{game_status, GameStatus};
pub use search::{MoveEvaluation, SearchStats};
