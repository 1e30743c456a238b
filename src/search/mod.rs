//! Search module for the Isolation agent
//!
//! Contains:
//! - Depth-limited alpha-beta search (the agent's engine)
//! - Plain depth-limited minimax (reference opponent and pruning check)

pub mod alphabeta;
pub mod minimax;

#[cfg(test)]
pub(crate) mod test_tree;

pub use alphabeta::AlphaBeta;
pub use minimax::Minimax;

/// Best move found by one fixed-depth search, with statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<A> {
    /// Best move found, `None` when no move beats negative infinity
    pub best_move: Option<A>,
    /// Backed-up value of the best move
    pub score: f64,
    /// Depth limit the search ran with
    pub depth: i8,
    /// Nodes visited
    pub nodes: u64,
}
