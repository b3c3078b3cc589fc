//! Board rendering for the Caro GUI
//!
//! Marks sit inside the squares of the grid, as on paper.

use egui::{Align2, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::search::MoveEvaluation;
use crate::{Board, Pos, Stone};

use super::theme::*;

/// What to draw on top of the stones
#[derive(Default)]
pub struct Overlay<'a> {
    pub winning_line: Option<&'a [Pos]>,
    pub hints: &'a [MoveEvaluation],
    pub show_regions: bool,
    /// Whether clicks and hover previews are accepted
    pub interactive: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    cell_size: f32,
    board_rect: Rect,
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
            size: crate::DEFAULT_SIZE,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        current_turn: Stone,
        overlay: Overlay<'_>,
    ) -> Option<Pos> {
        self.size = board.size();
        let available = ui.available_size();
        let side = (available.x.min(available.y) - 10.0).max(2.0 * BOARD_MARGIN + self.size as f32);
        self.cell_size = (side - 2.0 * BOARD_MARGIN) / self.size as f32;

        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        if overlay.show_regions {
            self.draw_regions(&painter, board);
        }
        if let Some(pos) = board.last_move() {
            painter.rect_filled(self.cell_rect(pos).shrink(1.0), CornerRadius::ZERO, LAST_MOVE_BG);
        }
        self.draw_grid(&painter);
        self.draw_coordinates(&painter);
        self.draw_marks(&painter, board);

        if let Some(line) = overlay.winning_line {
            self.draw_winning_line(&painter, line);
        }
        for (rank, hint) in overlay.hints.iter().enumerate() {
            self.draw_hint(&painter, hint.pos, rank + 1);
        }

        if !overlay.interactive {
            return None;
        }

        let hovered = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        let is_valid = board.is_empty(hovered) && current_turn.is_player();
        let color = if is_valid { hover_valid() } else { hover_invalid() };
        painter.rect_filled(self.cell_rect(hovered).shrink(2.0), CornerRadius::same(2), color);

        (response.clicked() && is_valid).then_some(hovered)
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let origin = self.origin();
        let span = self.size as f32 * self.cell_size;

        for i in 0..=self.size {
            let offset = i as f32 * self.cell_size;
            painter.line_segment(
                [origin + Vec2::new(offset, 0.0), origin + Vec2::new(offset, span)],
                stroke,
            );
            painter.line_segment(
                [origin + Vec2::new(0.0, offset), origin + Vec2::new(span, offset)],
                stroke,
            );
        }
    }

    /// Zero-based row and column numbers; sparse on dense boards
    fn draw_coordinates(&self, painter: &Painter) {
        let step = if self.cell_size < DENSE_CELL { 5 } else { 1 };
        let font = FontId::proportional((self.cell_size * 0.5).clamp(8.0, 12.0));
        let origin = self.origin();
        let half = self.cell_size * 0.5;

        for i in (0..self.size).step_by(step) {
            let along = i as f32 * self.cell_size + half;
            let label = i.to_string();
            painter.text(
                Pos2::new(origin.x + along, origin.y - BOARD_MARGIN * 0.5),
                Align2::CENTER_CENTER,
                &label,
                font.clone(),
                COORD_TEXT,
            );
            painter.text(
                Pos2::new(origin.x - BOARD_MARGIN * 0.5, origin.y + along),
                Align2::CENTER_CENTER,
                label,
                font.clone(),
                COORD_TEXT,
            );
        }
    }

    /// Only occupied cells are visited
    fn draw_marks(&self, painter: &Painter, board: &Board) {
        let width = (self.cell_size * 0.12).max(1.5);
        for pos in board.occupied_cells() {
            let stone = board.get(pos);
            let center = self.cell_center(pos);
            let r = self.cell_size * MARK_RATIO;
            let stroke = Stroke::new(width, mark_color(stone));
            match stone {
                Stone::X => {
                    painter.line_segment([center + Vec2::new(-r, -r), center + Vec2::new(r, r)], stroke);
                    painter.line_segment([center + Vec2::new(-r, r), center + Vec2::new(r, -r)], stroke);
                }
                Stone::O => {
                    painter.circle_stroke(center, r, stroke);
                }
                Stone::Empty => {}
            }
        }
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let (Some(first), Some(last)) = (line.first(), line.last()) else {
            return;
        };
        let stroke = Stroke::new((self.cell_size * 0.15).max(2.0), WIN_HIGHLIGHT);
        painter.line_segment([self.cell_center(*first), self.cell_center(*last)], stroke);
    }

    fn draw_hint(&self, painter: &Painter, pos: Pos, rank: usize) {
        let rect = self.cell_rect(pos).shrink(2.0);
        painter.rect_stroke(
            rect,
            CornerRadius::same(2),
            Stroke::new(2.0, HINT_MARKER),
            egui::StrokeKind::Inside,
        );
        if self.cell_size >= DENSE_CELL {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                rank.to_string(),
                FontId::proportional(self.cell_size * 0.45),
                HINT_MARKER,
            );
        }
    }

    /// Shade the regions the board currently treats as active
    fn draw_regions(&self, painter: &Painter, board: &Board) {
        for region in board.active_regions() {
            let (top_left, bottom_right) = region.cell_bounds(self.size);
            let rect = Rect::from_min_max(
                self.cell_rect(top_left).min,
                self.cell_rect(bottom_right).max,
            );
            painter.rect_filled(rect, CornerRadius::ZERO, active_region());
        }
    }

    fn origin(&self) -> Pos2 {
        self.board_rect.min + Vec2::splat(BOARD_MARGIN)
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.origin()
            + Vec2::new(pos.col as f32 * self.cell_size, pos.row as f32 * self.cell_size);
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    fn cell_center(&self, pos: Pos) -> Pos2 {
        self.cell_rect(pos).center()
    }

    /// Convert screen coordinates to a board cell
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.origin();
        if relative.x < 0.0 || relative.y < 0.0 {
            return None;
        }
        let col = (relative.x / self.cell_size) as usize;
        let row = (relative.y / self.cell_size) as usize;
        (row < self.size && col < self.size).then(|| Pos::new(row as u8, col as u8))
    }
}
