//! Colours and sizes for the Caro GUI

use egui::Color32;

// Board - squared paper
pub const BOARD_BG: Color32 = Color32::from_rgb(245, 240, 225);
pub const GRID_LINE: Color32 = Color32::from_rgb(150, 170, 200);
pub const COORD_TEXT: Color32 = Color32::from_rgb(90, 95, 110);

// Marks
pub const X_MARK: Color32 = Color32::from_rgb(200, 40, 45);
pub const O_MARK: Color32 = Color32::from_rgb(30, 80, 190);

// Overlays
pub const LAST_MOVE_BG: Color32 = Color32::from_rgb(255, 230, 140);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 200, 90);
pub const HINT_MARKER: Color32 = Color32::from_rgb(120, 70, 200);

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 60)
}

pub fn active_region() -> Color32 {
    Color32::from_rgba_unmultiplied(120, 180, 255, 30)
}

// Panel text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 32.0;
pub const MARK_RATIO: f32 = 0.32;
pub const GRID_LINE_WIDTH: f32 = 1.0;
/// Below this cell size coordinates are drawn only every fifth line
pub const DENSE_CELL: f32 = 14.0;

pub fn mark_color(stone: crate::Stone) -> Color32 {
    match stone {
        crate::Stone::X => X_MARK,
        crate::Stone::O => O_MARK,
        crate::Stone::Empty => Color32::TRANSPARENT,
    }
}
