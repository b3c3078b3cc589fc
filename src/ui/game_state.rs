//! Game session state for the Caro GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

use crate::board::BoardError;
use crate::rules::{game_status, validate_move, winning_line, GameStatus, MoveValidity};
use crate::search::MoveEvaluation;
use crate::{AIEngine, Board, Difficulty, EngineConfig, MoveResult, PlayStyle, Pos, Stone};

/// Number of moves shown by the hint overlay
const HINT_COUNT: usize = 5;

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human: Stone },
    /// Player vs Player (hotseat)
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Stone::X }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Option<MoveResult>>,
        start_time: Instant,
    },
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Stone,
    pub status: GameStatus,
    pub winning_line: Option<Vec<Pos>>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub hints: Vec<MoveEvaluation>,
    pub message: Option<String>,
    pub turn_started: Instant,
    pub last_ai_time: Option<Duration>,
    engine: AIEngine,
}

impl GameState {
    pub fn new(mode: GameMode, board: Board, config: EngineConfig) -> Self {
        Self {
            board,
            mode,
            current_turn: Stone::X,
            status: GameStatus::Playing,
            winning_line: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            hints: Vec::new(),
            message: None,
            turn_started: Instant::now(),
            last_ai_time: None,
            engine: AIEngine::with_config(config),
        }
    }

    /// Clear the board and start over in `mode`, keeping the size
    pub fn restart(&mut self, mode: GameMode) {
        self.board.reset();
        self.mode = mode;
        self.after_board_change();
        self.last_ai_result = None;
        self.last_ai_time = None;
    }

    /// Start over on a board of a different size
    pub fn restart_with_size(&mut self, mode: GameMode, size: usize) -> Result<(), BoardError> {
        self.board.reset_with_size(size)?;
        self.restart(mode);
        Ok(())
    }

    /// Resize mid-game, keeping stones that still fit
    pub fn resize(&mut self, size: usize) -> Result<(), BoardError> {
        if self.is_ai_thinking() {
            return Ok(());
        }
        self.board.resize(size)?;
        self.after_board_change();
        Ok(())
    }

    pub fn difficulty(&self) -> Difficulty {
        self.engine.difficulty()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.engine.set_difficulty(difficulty);
    }

    pub fn play_style(&self) -> PlayStyle {
        self.engine.play_style()
    }

    pub fn set_play_style(&mut self, style: PlayStyle) {
        self.engine.set_play_style(style);
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn == human,
            GameMode::PvP => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Would the current player be allowed to play `pos`?
    pub fn can_play(&self, pos: Pos) -> bool {
        !self.is_over()
            && validate_move(&self.board, pos.row.into(), pos.col.into(), self.current_turn).is_valid()
    }

    /// Attempt to place a stone for the human player
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        match validate_move(&self.board, pos.row.into(), pos.col.into(), self.current_turn) {
            MoveValidity::Valid => {}
            invalid => return Err(invalid.to_string()),
        }
        self.execute_move(pos).map_err(|e| e.to_string())
    }

    /// Play a move for whoever is on turn
    fn execute_move(&mut self, pos: Pos) -> Result<(), BoardError> {
        let stone = self.current_turn;
        self.board.place(pos, stone)?;
        self.hints.clear();
        self.message = None;

        self.status = game_status(&self.board, Some(pos));
        if self.status.is_over() {
            self.winning_line = winning_line(&self.board, pos);
            info!(status = %self.status, moves = self.board.move_count(), "game over");
            return Ok(());
        }

        self.current_turn = stone.opponent();
        self.turn_started = Instant::now();
        Ok(())
    }

    /// Start the AI on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.is_over() {
            return;
        }

        let board = self.board.clone();
        let mut engine = self.engine.clone();
        engine.set_ai_player(self.current_turn);

        let (tx, rx) = channel();
        thread::spawn(move || {
            let result = engine.get_move_with_stats(&board);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Poll the worker and apply its move if ready
    pub fn check_ai_result(&mut self) {
        let AiState::Thinking { receiver, start_time } = &self.ai_state else {
            return;
        };
        let received = receiver.try_recv();
        let elapsed = start_time.elapsed();

        let result = match received {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.ai_state = AiState::Idle;
                self.message = Some("AI worker stopped without a move".to_string());
                return;
            }
        };
        self.ai_state = AiState::Idle;
        self.last_ai_time = Some(elapsed);

        match result {
            Some(result) => {
                let pos = result.evaluation.pos;
                self.last_ai_result = Some(result);
                if let Err(err) = self.execute_move(pos) {
                    self.message = Some(format!("AI move rejected: {}", err));
                }
            }
            None => self.message = Some("AI could not find a move".to_string()),
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Rank the best moves for the player on turn
    pub fn request_hints(&mut self) {
        if self.is_over() || self.is_ai_thinking() {
            return;
        }
        let mut engine = self.engine.clone();
        engine.set_ai_player(self.current_turn);
        self.hints = engine.get_top_moves(&self.board, HINT_COUNT);
    }

    /// Take back the last move, or the last exchange against the AI
    pub fn undo(&mut self) {
        if self.is_ai_thinking() || self.board.move_count() == 0 {
            return;
        }
        let count = match self.mode {
            GameMode::PvE { human } => {
                // Undo back to a position where the human is on turn
                let last = self.board.history().last().map(|r| r.stone);
                if last == Some(human) || self.board.move_count() < 2 { 1 } else { 2 }
            }
            GameMode::PvP => 1,
        };
        if let Err(err) = self.board.undo_moves(count) {
            self.message = Some(err.to_string());
        }
        self.after_board_change();
    }

    /// Recompute turn and status from the board
    fn after_board_change(&mut self) {
        self.current_turn = next_turn(&self.board);
        self.status = game_status(&self.board, self.board.last_move());
        self.winning_line = self.board.last_move().and_then(|p| winning_line(&self.board, p));
        self.ai_state = AiState::Idle;
        self.hints.clear();
        self.message = None;
        self.turn_started = Instant::now();
    }
}

/// X opens; afterwards turns alternate
pub fn next_turn(board: &Board) -> Stone {
    board
        .history()
        .last()
        .map_or(Stone::X, |r| r.stone.opponent())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(mode: GameMode) -> GameState {
        let config = EngineConfig {
            difficulty: Difficulty::Beginner,
            seed: Some(3),
            ..EngineConfig::default()
        };
        GameState::new(mode, Board::new(15).unwrap(), config)
    }

    #[test]
    fn test_pvp_alternates_turns() {
        let mut state = session(GameMode::PvP);
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        assert_eq!(state.current_turn, Stone::O);
        state.try_place_stone(Pos::new(7, 8)).unwrap();
        assert_eq!(state.current_turn, Stone::X);
        assert!(state.try_place_stone(Pos::new(7, 8)).is_err());
    }

    #[test]
    fn test_pve_rejects_move_on_ai_turn() {
        let mut state = session(GameMode::PvE { human: Stone::O });
        assert!(state.is_ai_turn());
        assert_eq!(state.try_place_stone(Pos::new(0, 0)), Err("Not your turn".to_string()));
    }

    #[test]
    fn test_win_ends_game() {
        let mut state = session(GameMode::PvP);
        for c in 0..4 {
            state.try_place_stone(Pos::new(0, c)).unwrap();
            state.try_place_stone(Pos::new(1, c)).unwrap();
        }
        state.try_place_stone(Pos::new(0, 4)).unwrap();
        assert_eq!(state.status, GameStatus::XWin);
        assert_eq!(state.winning_line.as_ref().map(Vec::len), Some(5));
        assert!(state.try_place_stone(Pos::new(5, 5)).is_err());
        assert!(!state.can_play(Pos::new(5, 5)));
    }

    #[test]
    fn test_undo_in_pvp_and_pve() {
        let mut pvp = session(GameMode::PvP);
        pvp.try_place_stone(Pos::new(7, 7)).unwrap();
        pvp.try_place_stone(Pos::new(7, 8)).unwrap();
        pvp.undo();
        assert_eq!(pvp.board.move_count(), 1);
        assert_eq!(pvp.current_turn, Stone::O);

        let mut pve = session(GameMode::PvE { human: Stone::X });
        pve.board.place(Pos::new(7, 7), Stone::X).unwrap();
        pve.board.place(Pos::new(7, 8), Stone::O).unwrap();
        pve.undo();
        assert_eq!(pve.board.move_count(), 0);
        assert_eq!(pve.current_turn, Stone::X);
    }

    #[test]
    fn test_undo_reopens_finished_game() {
        let mut state = session(GameMode::PvP);
        for c in 0..4 {
            state.try_place_stone(Pos::new(0, c)).unwrap();
            state.try_place_stone(Pos::new(1, c)).unwrap();
        }
        state.try_place_stone(Pos::new(0, 4)).unwrap();
        state.undo();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.winning_line, None);
        assert_eq!(state.current_turn, Stone::X);
    }

    #[test]
    fn test_ai_move_arrives() {
        let mut state = session(GameMode::PvE { human: Stone::X });
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        state.start_ai_thinking();
        assert!(state.is_ai_thinking());

        let start = Instant::now();
        while state.is_ai_thinking() && start.elapsed() < Duration::from_secs(30) {
            thread::sleep(Duration::from_millis(5));
            state.check_ai_result();
        }
        assert_eq!(state.board.move_count(), 2);
        assert_eq!(state.current_turn, Stone::X);
        assert!(state.last_ai_result.is_some());
    }

    #[test]
    fn test_hints() {
        let mut state = session(GameMode::PvP);
        state.request_hints();
        assert_eq!(state.hints.len(), 1);
        assert_eq!(state.hints[0].pos, Pos::new(7, 7));

        state.try_place_stone(Pos::new(7, 7)).unwrap();
        assert!(state.hints.is_empty());
        state.request_hints();
        assert!(!state.hints.is_empty() && state.hints.len() <= HINT_COUNT);
    }

    #[test]
    fn test_resize_and_restart() {
        let mut state = session(GameMode::PvP);
        state.try_place_stone(Pos::new(3, 3)).unwrap();
        state.resize(25).unwrap();
        assert_eq!(state.board.size(), 25);
        assert_eq!(state.board.get(Pos::new(3, 3)), Stone::X);
        assert_eq!(state.current_turn, Stone::O);

        state.restart_with_size(GameMode::PvE { human: Stone::O }, 19).unwrap();
        assert_eq!(state.board.size(), 19);
        assert!(state.board.is_board_empty());
        assert!(state.is_ai_turn());
        assert!(state.resize(5).is_err());
    }
}
