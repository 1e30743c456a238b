//! Error types for the Isolation agent
//!
//! The search core never defines errors of its own: failures raised by a
//! rules engine flow through it unchanged. The types here belong to the
//! reference rules engine, configuration parsing, and the publication channel.

use thiserror::Error;

use crate::board::Pos;
use crate::rules::PlayerId;

/// Errors raised by the reference knight-Isolation rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IsolationError {
    /// The action is not in `actions()` for the active player
    #[error("illegal move to ({}, {}) for {player:?}", to.row, to.col)]
    IllegalMove { player: PlayerId, to: Pos },
}

/// Errors raised while parsing or validating configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown heuristic `{0}`")]
    UnknownHeuristic(String),

    #[error("unknown player kind `{0}`")]
    UnknownPlayer(String),

    #[error("search depth {0} out of range (expected 1..=64)")]
    InvalidDepth(u8),

    #[error("time limit must be greater than zero")]
    ZeroTimeLimit,
}

/// Errors raised when handing a decision to the supervisor.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    /// The supervisor dropped its end of the channel
    #[error("publication channel disconnected")]
    Disconnected,
}

/// Result type alias for the reference rules engine
pub type IsolationResult<T> = Result<T, IsolationError>;
