//! Theme constants for the Isolation GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(46, 52, 64);
pub const CELL_OPEN: Color32 = Color32::from_rgb(222, 184, 135);
pub const CELL_CLOSED: Color32 = Color32::from_rgb(88, 70, 52);
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 40, 20);

// Pieces
pub const FIRST_PLAYER: Color32 = Color32::from_rgb(25, 25, 30);
pub const FIRST_PLAYER_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 80);
pub const SECOND_PLAYER: Color32 = Color32::from_rgb(250, 250, 252);
pub const SECOND_PLAYER_SHADOW: Color32 = Color32::from_rgb(190, 190, 195);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn legal_move() -> Color32 {
    Color32::from_rgba_unmultiplied(50, 160, 80, 110)
}

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(50, 220, 50, 160)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 30.0;
pub const PIECE_RADIUS_RATIO: f32 = 0.38;
pub const CELL_GAP: f32 = 2.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
