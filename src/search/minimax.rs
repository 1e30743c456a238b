//! Depth-limited minimax without pruning
//!
//! Visits every node up to the depth limit. The fixed-depth sample opponent
//! plays with it, and it is the reference the alpha-beta engine must agree with.

use crate::eval::Evaluate;
use crate::rules::{GameState, PlayerId};

use super::SearchResult;

/// Full-width minimax searcher for one fixed player.
pub struct Minimax<'a, E> {
    player: PlayerId,
    evaluator: &'a E,
    nodes: u64,
}

impl<'a, E> Minimax<'a, E> {
    #[must_use]
    pub fn new(player: PlayerId, evaluator: &'a E) -> Self {
        Self {
            player,
            evaluator,
            nodes: 0,
        }
    }

    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Find the best move at a fixed depth limit (first action wins ties).
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
        let mut best_score = f64::NEG_INFINITY;
        let mut best_move = None;

        for action in state.actions()? {
            let value = self.value(&state.result(&action)?, depth - 1, false)?;
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

    fn value<S>(&mut self, state: &S, depth: i8, maximizing: bool) -> Result<f64, S::Error>
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

        let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        for action in state.actions()? {
            let v = self.value(&state.result(&action)?, depth - 1, !maximizing)?;
            best = if maximizing { best.max(v) } else { best.min(v) };
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_tree::{LeafValue, TreeBuilder};

    #[test]
    fn test_minimax_backs_up_values() {
        let mut b = TreeBuilder::new();
        let l3 = b.leaf(3.0);
        let l12 = b.leaf(12.0);
        let l8 = b.leaf(8.0);
        let r2 = b.leaf(2.0);
        let r4 = b.leaf(4.0);
        let r6 = b.leaf(6.0);
        let left = b.branch(0.0, &[l3, l12, l8]);
        let right = b.branch(0.0, &[r2, r4, r6]);
        let tree = b.finish_root(&[left, right]);

        let mut searcher = Minimax::new(PlayerId::First, &LeafValue);
        let result = searcher.search(&tree, 2).unwrap();
        assert_eq!(result.best_move, Some(left));
        assert_eq!(result.score, 3.0);
        // root children + grandchildren
        assert_eq!(result.nodes, 8);
    }

    #[test]
    fn test_minimax_uses_utility_for_second_player() {
        let mut b = TreeBuilder::new();
        let win_for_first = b.terminal(f64::INFINITY);
        let draw = b.terminal(0.0);
        let tree = b.finish_root(&[win_for_first, draw]);

        let mut searcher = Minimax::new(PlayerId::Second, &LeafValue);
        let result = searcher.search(&tree, 1).unwrap();
        assert_eq!(result.best_move, Some(draw));
    }
}
