//! Caro desktop game and headless AI-vs-AI runner

use std::time::Duration;

use caro::config::{parse_player, Difficulty, EngineConfig, PlayStyle};
use caro::ui::{CaroApp, GameMode, GameState};
use caro::{game_status, AIEngine, Board, BoardError, GameStatus, Stone};
use clap::Parser;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(about = "Caro (five in a row) with an alpha-beta AI")]
struct Args {
    /// Board side length, 15 to 100
    #[arg(short, long, default_value_t = caro::DEFAULT_SIZE)]
    size: usize,

    /// AI difficulty: beginner, easy, medium, hard or expert
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// AI style: balanced, aggressive, defensive or positional
    #[arg(long, default_value = "balanced")]
    style: PlayStyle,

    /// Per-move time budget in milliseconds; unlimited when absent
    #[arg(short, long)]
    time_limit_ms: Option<u64>,

    /// Side played by the human: x, o, or none for hotseat
    #[arg(long, default_value = "x", value_parser = parse_player)]
    human: Stone,

    /// Let two engines play each other in the terminal
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// RNG seed for the engines
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn engine_config(&self, ai_player: Stone) -> EngineConfig {
        EngineConfig {
            ai_player,
            difficulty: self.difficulty,
            style: self.style,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
            seed: self.seed,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Gui(#[from] eframe::Error),
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let board = Board::new(args.size)?;
    if args.headless {
        play_headless(&args, board);
        return Ok(());
    }

    let mode = if args.human.is_player() {
        GameMode::PvE { human: args.human }
    } else {
        GameMode::PvP
    };
    let state = GameState::new(mode, board, args.engine_config(args.human.opponent()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Caro"),
        ..Default::default()
    };
    eframe::run_native(
        "Caro",
        options,
        Box::new(|cc| Ok(Box::new(CaroApp::new(cc, state)))),
    )?;
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Engine against engine, printing the board after every move
fn play_headless(args: &Args, mut board: Board) {
    let mut x = AIEngine::with_config(args.engine_config(Stone::X));
    let mut o = AIEngine::with_config(EngineConfig {
        seed: args.seed.map(|s| s.wrapping_add(1)),
        ..args.engine_config(Stone::O)
    });

    let mut turn = Stone::X;
    let mut status = GameStatus::Playing;
    while status == GameStatus::Playing {
        let engine = if turn == Stone::X { &mut x } else { &mut o };
        let Some(result) = engine.get_move_with_stats(&board) else {
            break;
        };
        let pos = result.evaluation.pos;
        if let Err(err) = board.place(pos, turn) {
            warn!(%pos, %err, "engine produced an illegal move");
            break;
        }
        info!(
            player = %turn,
            move_number = board.move_count(),
            %pos,
            search = ?result.search_type,
            nodes = result.stats.nodes,
            "move played"
        );
        println!("{board}");

        status = game_status(&board, Some(pos));
        turn = turn.opponent();
    }
    println!("Result: {status} after {} moves", board.move_count());
}
