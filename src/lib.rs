//! Anytime alpha-beta agent for knight Isolation
//!
//! Knight Isolation is played on an 11x9 board. Each player first places
//! its piece on any open cell, then moves like a chess knight. Every cell a
//! player lands on is closed for the rest of the game. The first player
//! left without a legal move loses.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`rules`]: The [`GameState`] contract the search depends on, and the
//!   knight movement and win rules of the reference engine
//! - [`board`]: Board representation with bitboards
//! - [`eval`]: Mobility heuristics for frontier positions
//! - [`search`]: Depth-limited alpha-beta (and plain minimax)
//! - [`engine`]: Anytime agent publishing one decision per completed depth
//! - [`players`]: Sample opponents
//! - [`arena`]: Timed turns, games, and matches
//! - [`ui`]: egui front end for playing against the agent
//!
//! # Quick Start
//!
//! ```
//! use isolation::{AgentConfig, AnytimeAgent, Board, GameState, PlayerId, Pos};
//!
//! // Both players placed, First to move
//! let board = Board::from_parts(&[], [Some(Pos::new(4, 5)), Some(Pos::new(1, 1))], 4);
//! let mut agent = AnytimeAgent::new(PlayerId::First, AgentConfig::default().with_max_depth(4)).unwrap();
//!
//! let mut published = Vec::new();
//! agent.get_action(&board, &mut published).unwrap();
//!
//! // One decision per depth, the deepest one last
//! let best = published.last().unwrap();
//! assert_eq!(best.depth, 4);
//! assert!(board.actions().unwrap().contains(&best.action));
//! ```
//!
//! # Time control
//!
//! The agent never reads a clock. Its supervisor (see [`arena::timed_turn`])
//! runs it on a separate thread, keeps the last decision received before the
//! deadline, and drops the channel; the agent stops at its next publication.

pub mod arena;
pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod players;
pub mod rules;
pub mod search;
pub mod ui;

pub use arena::{play_game, run_match, timed_turn, GameRecord, MatchConfig, MatchSummary, TurnOutcome, WinReason};
pub use board::{Board, Pos};
pub use engine::{AgentConfig, AnytimeAgent, Decision, DecisionKind, Publisher};
pub use error::{ConfigError, IsolationError, IsolationResult, PublishError};
pub use eval::{Evaluate, Heuristic, MobilityEvaluator};
pub use players::{Player, PlayerKind};
pub use rules::{GameState, PlayerId};
pub use search::{AlphaBeta, Minimax, SearchResult};
