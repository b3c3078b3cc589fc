//! Position evaluation

pub mod heuristic;
pub mod patterns;

pub use heuristic::{
    center_control, classify_line, evaluate, evaluate_board, evaluate_position, line_run,
    potential, stone_patterns, style_bias, FRONTIER_RADIUS,
};
pub use patterns::{LineRun, Pattern, PatternScore};
