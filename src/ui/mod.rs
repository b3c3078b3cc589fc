//! Desktop front end for Caro, built on egui/eframe
//!
//! The AI runs on a worker thread so the window stays responsive.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::CaroApp;
pub use game_state::{next_turn, AiState, GameMode, GameState};
