//! Main application for the Isolation GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use super::board_view::BoardView;
use super::session::{GameOver, Session};
use super::theme::*;
use crate::arena::WinReason;
use crate::engine::DecisionKind;
use crate::rules::PlayerId;

fn side_name(player: PlayerId) -> &'static str {
    match player {
        PlayerId::First => "Player 1",
        PlayerId::Second => "Player 2",
    }
}

/// Human-vs-agent Isolation application
pub struct IsolationApp {
    session: Session,
    board_view: BoardView,
    show_debug: bool,
}

impl Default for IsolationApp {
    fn default() -> Self {
        Self {
            session: Session::new(PlayerId::First),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }
}

impl IsolationApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (move first)").clicked() {
                        self.session = Session::new(PlayerId::First);
                        ui.close_menu();
                    }
                    if ui.button("New Game (move second)").clicked() {
                        self.session = Session::new(PlayerId::Second);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("You: {}", side_name(self.session.human)));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.label(RichText::new("ISOLATION").size(22.0).strong().color(TEXT_PRIMARY));
                });
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.session.game_over {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, result);
                }

                if let Some(msg) = &self.session.message {
                    ui.add_space(10.0);
                    Self::card_frame().fill(egui::Color32::from_rgb(80, 60, 30)).show(ui, |ui| {
                        ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                    });
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let active = self.session.board.active_player();
            ui.label(RichText::new(side_name(active)).size(18.0).strong().color(TEXT_PRIMARY));

            let (status, color) = if self.session.game_over.is_some() {
                ("Game Over", WIN_HIGHLIGHT)
            } else if self.session.is_agent_thinking() {
                ("Agent thinking...", TIMER_WARNING)
            } else {
                ("Your turn", TIMER_NORMAL)
            };
            ui.label(RichText::new(status).size(12.0).color(color));
            ui.label(
                RichText::new(format!("Ply {}", self.session.board.plies()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.session.agent_thinking_elapsed() {
                let fraction = elapsed.as_secs_f32() / self.session.time_limit().as_secs_f32();
                let color = if fraction < 0.5 {
                    TIMER_NORMAL
                } else if fraction < 0.85 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{:.2}s", elapsed.as_secs_f32())).size(28.0).strong().color(color));
            } else {
                let elapsed = self.session.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(t) = self.session.move_timer.agent_thinking_time {
                ui.add_space(4.0);
                ui.label(RichText::new(format!("Last agent move: {:.3}s", t.as_secs_f32())).size(10.0).color(TEXT_SECONDARY));
            }
        });
    }

    /// Latest publication of the agent
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AGENT").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(decision) = self.session.latest_decision() else {
                ui.label(RichText::new("No decision yet").size(10.0).color(TEXT_MUTED));
                return;
            };

            let kind = match decision.kind {
                DecisionKind::Opening => "Opening",
                DecisionKind::Forced => "Forced",
                DecisionKind::Search => "Search",
                DecisionKind::Fallback => "Fallback",
            };
            ui.label(RichText::new(kind).size(11.0).strong().color(TIMER_NORMAL));
            ui.label(RichText::new(format!("Depth: {}", decision.depth)).size(10.0).color(TEXT_SECONDARY));
            if let Some(score) = decision.score {
                ui.label(RichText::new(format!("Score: {score}")).size(10.0).color(TEXT_SECONDARY));
            }
            ui.label(RichText::new(format!("{} nodes", decision.nodes)).size(10.0).color(TEXT_MUTED));

            let pos = decision.action;
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("-> {}{}", (b'a' + pos.col) as char, pos.row + 1))
                    .size(12.0)
                    .strong()
                    .color(WIN_HIGHLIGHT),
            );
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: GameOver) {
        let reason = match result.reason {
            WinReason::Isolation => "isolation",
            WinReason::Timeout => "timeout",
            WinReason::IllegalMove => "illegal move",
            WinReason::AgentFailure => "agent failure",
        };
        let headline = if result.winner == self.session.human { "YOU WIN" } else { "AGENT WINS" };

        Self::card_frame().fill(egui::Color32::from_rgb(45, 80, 55)).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                ui.label(
                    RichText::new(format!("{} by {reason}", side_name(result.winner)))
                        .size(11.0)
                        .color(TEXT_SECONDARY),
                );
                ui.add_space(8.0);
                if ui.button("New Game (N)").clicked() {
                    self.session.reset();
                }
            });
        });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let legal = self.session.human_moves();
            let clicked = self.board_view.show(ui, &self.session.board, self.session.last_move, &legal);

            if let Some(pos) = clicked {
                if let Err(msg) = self.session.try_move(pos) {
                    self.session.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            // D - Toggle debug panel
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // N - New game
            if i.key_pressed(egui::Key::N) {
                self.session.reset();
            }
        });
    }
}

impl eframe::App for IsolationApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.session.poll_agent();
        self.session.start_agent_turn();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.session.is_agent_thinking() {
            ctx.request_repaint();
        }
    }
}
