//! Depth-limited alpha-beta search
//!
//! This module implements the search engine the anytime agent runs at each
//! iteration depth. It is a plain minimax search with alpha-beta pruning,
//! written as two mutually recursive functions (`max_value`/`min_value`).
//!
//! # Features
//!
//! - Exact minimax value within the explored tree (pruning never changes the move)
//! - Bounds passed by value, so every frame owns its own alpha and beta
//! - Terminal states scored by their utility, frontier states by the evaluator
//! - Ties at the root go to the first action the rules engine yields
//!
//! # Example
//!
//! ```
//! use isolation::board::{Board, Pos};
//! use isolation::eval::{Heuristic, MobilityEvaluator};
//! use isolation::rules::PlayerId;
//! use isolation::search::AlphaBeta;
//!
//! let board = Board::from_parts(&[], [Some(Pos::new(4, 5)), Some(Pos::new(0, 0))], 2);
//! let evaluator = MobilityEvaluator::new(PlayerId::First, Heuristic::default());
//! let mut searcher = AlphaBeta::new(PlayerId::First, &evaluator);
//!
//! let result = searcher.search(&board, 3).unwrap();
//! assert!(result.best_move.is_some());
//! ```

use crate::eval::Evaluate;
use crate::rules::{GameState, PlayerId};

use super::SearchResult;

/// Alpha-beta searcher for one fixed player.
///
/// The player id decides whose utility terminal states are scored with,
/// at both max and min nodes.
pub struct AlphaBeta<'a, E> {
    player: PlayerId,
    evaluator: &'a E,
    nodes: u64,
}

impl<'a, E> AlphaBeta<'a, E> {
    #[must_use]
    pub fn new(player: PlayerId, evaluator: &'a E) -> Self {
        Self {
            player,
            evaluator,
            nodes: 0,
        }
    }

    /// Nodes visited since construction
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Find the best move at a fixed depth limit.
    ///
    /// Every root action is scored with `min_value` at `depth - 1`. The
    /// best move only changes on a strict improvement, so the earliest action
    /// wins ties, and an action set where every move scores negative infinity
    /// yields no move at all.
    ///
    /// # Errors
    ///
    /// Any error raised by the rules engine, unchanged.
    pub fn search<S>(&mut self, state: &S, depth: i8) -> Result<SearchResult<S::Action>, S::Error>
    where
        S: GameState,
        E: Evaluate<S>,
    {
        let start_nodes = self.nodes;
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best_score = f64::NEG_INFINITY;
        let mut best_move = None;

        for action in state.actions()? {
            let value = self.min_value(&state.result(&action)?, alpha, beta, depth - 1)?;
            alpha = alpha.max(value);

            if value > best_score {
                best_score = value;
                best_move = Some(action);
            }
        }

        Ok(SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes - start_nodes,
        })
    }

    /// Value of a state where the searching player is to move.
    ///
    /// Returns as soon as a child reaches `beta`.
    ///
    /// # Errors
    ///
    /// Any error raised by the rules engine, unchanged.
    pub fn max_value<S>(&mut self, state: &S, mut alpha: f64, beta: f64, depth: i8) -> Result<f64, S::Error>
    where
        S: GameState,
        E: Evaluate<S>,
    {
        self.nodes += 1;

        if state.terminal_test()? {
            return state.utility(self.player);
        }

        if depth <= 0 {
            return Ok(self.evaluator.evaluate(state));
        }

        let mut value = f64::NEG_INFINITY;
        for action in state.actions()? {
            value = value.max(self.min_value(&state.result(&action)?, alpha, beta, depth - 1)?);
            if value >= beta {
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    /// Value of a state where the opponent is to move.
    ///
    /// Returns as soon as a child drops to `alpha`.
    ///
    /// # Errors
    ///
    /// Any error raised by the rules engine, unchanged.
    pub fn min_value<S>(&mut self, state: &S, alpha: f64, mut beta: f64, depth: i8) -> Result<f64, S::Error>
    where
        S: GameState,
        E: Evaluate<S>,
    {
        self.nodes += 1;

        if state.terminal_test()? {
            return state.utility(self.player);
        }

        if depth <= 0 {
            return Ok(self.evaluator.evaluate(state));
        }

        let mut value = f64::INFINITY;
        for action in state.actions()? {
            value = value.min(self.max_value(&state.result(&action)?, alpha, beta, depth - 1)?);
            if value <= alpha {
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }
}
