//! GUI module for playing Isolation against the agent
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod session;
mod theme;

pub use app::IsolationApp;
pub use session::{GameOver, Session, AGENT_TIME_LIMIT};
