//! Board rendering for the Isolation GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::rules::PlayerId;
use crate::{Board, Pos};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked legal cell, if any.
    ///
    /// `legal` lists the cells the human may move to; it is empty when the
    /// board should not accept input.
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, last_move: Option<Pos>, legal: &[Pos]) -> Option<Pos> {
        let available = ui.available_size();
        let cols = BOARD_WIDTH as f32;
        let rows = BOARD_HEIGHT as f32;

        self.cell_size = ((available.x - 2.0 * BOARD_MARGIN) / cols)
            .min((available.y - 2.0 * BOARD_MARGIN) / rows)
            .max(10.0);
        let size = Vec2::new(
            cols * self.cell_size + 2.0 * BOARD_MARGIN,
            rows * self.cell_size + 2.0 * BOARD_MARGIN,
        );

        let (response, painter) = ui.allocate_painter(size, Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);

        self.draw_cells(&painter, board);
        self.draw_coordinates(&painter);

        for &pos in legal {
            painter.rect_filled(self.cell_rect(pos).shrink(CELL_GAP * 2.0), CornerRadius::same(3), legal_move());
        }

        for player in [PlayerId::First, PlayerId::Second] {
            if let Some(pos) = board.loc(player) {
                self.draw_piece(&painter, pos, player);
            }
        }

        if let Some(pos) = last_move {
            painter.circle_filled(
                self.cell_rect(pos).right_top() + Vec2::new(-8.0, 8.0),
                LAST_MOVE_MARKER_RADIUS,
                LAST_MOVE_MARKER,
            );
        }

        let hovered = response.hover_pos().and_then(|p| self.screen_to_board(p));
        let target = hovered.filter(|pos| legal.contains(pos))?;

        painter.rect_stroke(
            self.cell_rect(target).shrink(CELL_GAP),
            CornerRadius::same(3),
            Stroke::new(2.0, hover_valid()),
            egui::StrokeKind::Inside,
        );

        response.clicked().then_some(target)
    }

    /// Draw open and closed cells
    fn draw_cells(&self, painter: &Painter, board: &Board) {
        for row in 0..BOARD_HEIGHT as u8 {
            for col in 0..BOARD_WIDTH as u8 {
                let pos = Pos::new(row, col);
                let fill = if board.is_open(pos) { CELL_OPEN } else { CELL_CLOSED };
                let rect = self.cell_rect(pos).shrink(CELL_GAP / 2.0);
                painter.rect_filled(rect, CornerRadius::same(2), fill);
                painter.rect_stroke(rect, CornerRadius::same(2), Stroke::new(0.5, GRID_LINE), egui::StrokeKind::Inside);
            }
        }
    }

    /// Column letters along the bottom, row numbers on the left
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for col in 0..BOARD_WIDTH as u8 {
            let letter = (b'a' + col) as char;
            let center = self.cell_rect(Pos::new(0, col)).center_bottom() + Vec2::new(0.0, BOARD_MARGIN / 2.0);
            painter.text(center, egui::Align2::CENTER_CENTER, letter, font.clone(), TEXT_SECONDARY);
        }

        for row in 0..BOARD_HEIGHT as u8 {
            let center = self.cell_rect(Pos::new(row, 0)).left_center() - Vec2::new(BOARD_MARGIN / 2.0, 0.0);
            painter.text(center, egui::Align2::CENTER_CENTER, format!("{}", row + 1), font.clone(), TEXT_SECONDARY);
        }
    }

    /// Draw a player's piece
    fn draw_piece(&self, painter: &Painter, pos: Pos, player: PlayerId) {
        let center = self.cell_rect(pos).center();
        let radius = self.cell_size * PIECE_RADIUS_RATIO;

        painter.circle_filled(center + Vec2::new(2.0, 2.0), radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));

        match player {
            PlayerId::First => {
                painter.circle_filled(center, radius, FIRST_PLAYER);
                painter.circle_filled(
                    center + Vec2::new(-radius * 0.3, -radius * 0.3),
                    radius * 0.2,
                    FIRST_PLAYER_HIGHLIGHT,
                );
            }
            PlayerId::Second => {
                painter.circle_filled(center, radius, SECOND_PLAYER);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, SECOND_PLAYER_SHADOW));
            }
        }
    }

    /// Screen rectangle of a cell; row 0 is drawn at the bottom
    fn cell_rect(&self, pos: Pos) -> Rect {
        let flipped = (BOARD_HEIGHT - 1) as f32 - f32::from(pos.row);
        let min = self.board_rect.min
            + Vec2::new(
                BOARD_MARGIN + f32::from(pos.col) * self.cell_size,
                BOARD_MARGIN + flipped * self.cell_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min - Vec2::splat(BOARD_MARGIN);
        let col = (relative.x / self.cell_size).floor() as i32;
        let flipped = (relative.y / self.cell_size).floor() as i32;
        let row = BOARD_HEIGHT as i32 - 1 - flipped;

        if (0..BOARD_WIDTH as i32).contains(&col) && (0..BOARD_HEIGHT as i32).contains(&row) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }
}
