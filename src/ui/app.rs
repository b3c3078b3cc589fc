//! Main application for the Caro GUI

use eframe::egui;
use egui::{CentralPanel, ComboBox, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use super::board_view::{BoardView, Overlay};
use super::game_state::{GameMode, GameState};
use super::theme::*;
use crate::{Difficulty, GameStatus, PlayStyle, Stone, MAX_SIZE, MIN_SIZE};

/// Main Caro application
pub struct CaroApp {
    state: GameState,
    board_view: BoardView,
    /// Size chosen on the slider, applied on the next new game
    pending_size: usize,
    show_stats: bool,
    show_regions: bool,
}

impl CaroApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, state: GameState) -> Self {
        let pending_size = state.board.size();
        Self {
            state,
            board_view: BoardView::default(),
            pending_size,
            show_stats: true,
            show_regions: false,
        }
    }

    fn new_game(&mut self, mode: GameMode) {
        if let Err(err) = self.state.restart_with_size(mode, self.pending_size) {
            self.state.message = Some(err.to_string());
        }
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (play X)").clicked() {
                        self.new_game(GameMode::PvE { human: Stone::X });
                        ui.close_menu();
                    }
                    if ui.button("New Game (play O)").clicked() {
                        self.new_game(GameMode::PvE { human: Stone::O });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_stats, "AI Stats (S)");
                    ui.checkbox(&mut self.show_regions, "Active Regions (R)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human } => format!("PvE - You: {}", human),
                        GameMode::PvP => "PvP - Hotseat".to_string(),
                    };
                    let size = self.state.board.size();
                    ui.label(format!("{}  |  {}x{}", mode_text, size, size));
                });
            });
        });
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("CARO").size(22.0).strong().color(TEXT_PRIMARY));
                ui.label(RichText::new("five in a row").size(11.0).color(TEXT_MUTED));
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);
                self.render_settings_card(ui);
                ui.add_space(10.0);
                self.render_actions_card(ui);

                if self.show_stats {
                    ui.add_space(10.0);
                    self.render_stats_card(ui);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Frame::new()
                        .fill(egui::Color32::from_rgb(80, 60, 30))
                        .corner_radius(CornerRadius::same(8))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                        });
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn card_title(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(10.0).color(TEXT_MUTED));
        ui.add_space(6.0);
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "TURN");

            let (headline, color) = match self.state.status {
                GameStatus::Playing => (
                    format!("{} to move", self.state.current_turn),
                    mark_color(self.state.current_turn),
                ),
                GameStatus::Draw => ("Draw".to_string(), TEXT_PRIMARY),
                status => (status.to_string(), WIN_HIGHLIGHT),
            };
            ui.label(RichText::new(headline).size(18.0).strong().color(color));

            let (detail, detail_color) = if self.state.is_ai_thinking() {
                let secs = self
                    .state
                    .ai_thinking_elapsed()
                    .map_or(0.0, |d| d.as_secs_f32());
                let color = if secs < 1.0 {
                    TIMER_NORMAL
                } else if secs < 3.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                (format!("AI thinking... {:.2}s", secs), color)
            } else if self.state.is_over() {
                ("Game over".to_string(), TEXT_SECONDARY)
            } else {
                let secs = self.state.turn_started.elapsed().as_secs_f32();
                (format!("{:.1}s on this move", secs), TEXT_SECONDARY)
            };
            ui.label(RichText::new(detail).size(12.0).color(detail_color));
            ui.label(
                RichText::new(format!("Move #{}", self.state.board.move_count()))
                    .size(11.0)
                    .color(TEXT_MUTED),
            );
        });
    }

    fn render_settings_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "AI SETTINGS");

            let mut difficulty = self.state.difficulty();
            ComboBox::from_label("Difficulty")
                .selected_text(difficulty.name())
                .show_ui(ui, |ui| {
                    for d in Difficulty::ALL {
                        ui.selectable_value(&mut difficulty, d, d.name());
                    }
                });
            if difficulty != self.state.difficulty() {
                self.state.set_difficulty(difficulty);
            }

            let mut style = self.state.play_style();
            ComboBox::from_label("Style")
                .selected_text(style.name())
                .show_ui(ui, |ui| {
                    for s in PlayStyle::ALL {
                        ui.selectable_value(&mut style, s, s.name());
                    }
                });
            if style != self.state.play_style() {
                self.state.set_play_style(style);
            }

            ui.add_space(6.0);
            ui.add(egui::Slider::new(&mut self.pending_size, MIN_SIZE..=MAX_SIZE).text("Board size"));
            ui.horizontal(|ui| {
                if ui.button("New game").clicked() {
                    self.new_game(self.state.mode);
                }
                let enabled = self.pending_size != self.state.board.size() && !self.state.is_ai_thinking();
                if ui.add_enabled(enabled, egui::Button::new("Resize")).clicked() {
                    if let Err(err) = self.state.resize(self.pending_size) {
                        self.state.message = Some(err.to_string());
                    }
                }
            });
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "ACTIONS");
            ui.horizontal(|ui| {
                if ui.button("Undo (U)").clicked() {
                    self.state.undo();
                }
                let can_hint = self.state.is_human_turn() && !self.state.is_over();
                if ui.add_enabled(can_hint, egui::Button::new("Hint (H)")).clicked() {
                    self.state.request_hints();
                }
            });

            if !self.state.hints.is_empty() {
                ui.add_space(6.0);
                for (rank, hint) in self.state.hints.iter().enumerate() {
                    ui.label(
                        RichText::new(format!("{}. {} score {}", rank + 1, hint.pos, hint.score))
                            .size(11.0)
                            .color(HINT_MARKER),
                    );
                }
            }
        });
    }

    fn render_stats_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "AI STATS");

            let Some(result) = &self.state.last_ai_result else {
                ui.label(RichText::new("No AI move yet").size(10.0).color(TEXT_MUTED));
                return;
            };
            let stats = &result.stats;
            ui.label(
                RichText::new(format!("{:?} -> {}", result.search_type, result.evaluation.pos))
                    .size(12.0)
                    .strong()
                    .color(TIMER_NORMAL),
            );
            for line in [
                format!("Score: {}", result.evaluation.score),
                format!("Depth: {}", result.evaluation.depth),
                format!("Nodes: {}  Prunes: {}", stats.nodes, stats.prunes),
                format!("Time: {} ms", stats.elapsed.as_millis()),
                format!("{:.0} nodes/s", stats.nodes_per_second()),
            ] {
                ui.label(RichText::new(line).size(10.0).color(TEXT_SECONDARY));
            }
            if let Some(wall) = self.state.last_ai_time {
                ui.label(
                    RichText::new(format!("Round trip: {:.3}s", wall.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_MUTED),
                );
            }
        });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let overlay = Overlay {
                winning_line: self.state.winning_line.as_deref(),
                hints: &self.state.hints,
                show_regions: self.show_regions,
                interactive: self.state.is_human_turn()
                    && !self.state.is_over()
                    && !self.state.is_ai_thinking(),
            };
            let clicked = self
                .board_view
                .show(ui, &self.state.board, self.state.current_turn, overlay);

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    fn handle_input(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (stats, regions, hint, undo, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::S),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::H),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
            )
        });
        if stats {
            self.show_stats = !self.show_stats;
        }
        if regions {
            self.show_regions = !self.show_regions;
        }
        if hint && self.state.is_human_turn() {
            self.state.request_hints();
        }
        if undo {
            self.state.undo();
        }
        if new_game {
            self.new_game(self.state.mode);
        }
    }
}

impl eframe::App for CaroApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();
        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && !self.state.is_over() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() || !self.state.is_over() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
