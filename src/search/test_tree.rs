//! Synthetic game trees for search tests

use std::cell::Cell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;

use crate::eval::Evaluate;
use crate::rules::{GameState, PlayerId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum TreeError {
    #[error("node {0} is not a child of the current node")]
    NotAChild(usize),
    #[error("rules engine failure at node {0}")]
    Broken(usize),
}

#[derive(Debug, Clone)]
struct Node {
    value: f64,
    terminal: bool,
    broken: bool,
    children: Vec<usize>,
}

/// A position in an explicit tree. Values are from `PlayerId::First`'s view.
#[derive(Debug, Clone)]
pub(crate) struct Tree {
    nodes: Rc<Vec<Node>>,
    at: usize,
    ply: u32,
    actions_calls: Rc<Cell<u64>>,
}

impl Tree {
    /// Number of `actions()` calls made on any state of this tree
    pub(crate) fn actions_calls(&self) -> u64 {
        self.actions_calls.get()
    }

    pub(crate) fn with_ply(mut self, ply: u32) -> Self {
        self.ply = ply;
        self
    }

    fn value(&self) -> f64 {
        self.nodes[self.at].value
    }
}

impl GameState for Tree {
    type Action = usize;
    type Location = PlayerId;
    type Error = TreeError;

    fn ply_count(&self) -> u32 {
        self.ply
    }

    fn location(&self, player: PlayerId) -> Option<PlayerId> {
        Some(player)
    }

    fn liberties(&self, _loc: Option<PlayerId>) -> Vec<PlayerId> {
        Vec::new()
    }

    fn actions(&self) -> Result<Vec<usize>, TreeError> {
        self.actions_calls.set(self.actions_calls.get() + 1);
        let node = &self.nodes[self.at];
        if node.broken {
            return Err(TreeError::Broken(self.at));
        }
        Ok(node.children.clone())
    }

    fn result(&self, action: &usize) -> Result<Self, TreeError> {
        if !self.nodes[self.at].children.contains(action) {
            return Err(TreeError::NotAChild(*action));
        }
        Ok(Tree {
            nodes: Rc::clone(&self.nodes),
            at: *action,
            ply: self.ply + 1,
            actions_calls: Rc::clone(&self.actions_calls),
        })
    }

    fn terminal_test(&self) -> Result<bool, TreeError> {
        Ok(self.nodes[self.at].terminal)
    }

    fn utility(&self, player: PlayerId) -> Result<f64, TreeError> {
        Ok(match player {
            PlayerId::First => self.value(),
            PlayerId::Second => -self.value(),
        })
    }
}

/// Frontier evaluator reading the stored node value
pub(crate) struct LeafValue;

impl Evaluate<Tree> for LeafValue {
    fn evaluate(&self, state: &Tree) -> f64 {
        state.value()
    }
}

#[derive(Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, value: f64, terminal: bool, broken: bool, children: &[usize]) -> usize {
        self.nodes.push(Node {
            value,
            terminal,
            broken,
            children: children.to_vec(),
        });
        self.nodes.len() - 1
    }

    /// Non-terminal node with no children; only reachable as a frontier
    pub(crate) fn leaf(&mut self, value: f64) -> usize {
        self.push(value, false, false, &[])
    }

    pub(crate) fn terminal(&mut self, value: f64) -> usize {
        self.push(value, true, false, &[])
    }

    pub(crate) fn broken(&mut self) -> usize {
        self.push(0.0, false, true, &[])
    }

    /// Internal node; `value` is what the evaluator sees if it becomes a frontier
    pub(crate) fn branch(&mut self, value: f64, children: &[usize]) -> usize {
        self.push(value, false, false, children)
    }

    /// Terminal node that still lists children, to check they are never expanded
    pub(crate) fn terminal_with_children(&mut self, value: f64, children: &[usize]) -> usize {
        self.push(value, true, false, children)
    }

    /// Add a root over `children` and finish
    pub(crate) fn finish_root(mut self, children: &[usize]) -> Tree {
        let root = self.branch(0.0, children);
        self.finish(root)
    }

    pub(crate) fn finish(self, root: usize) -> Tree {
        Tree {
            nodes: Rc::new(self.nodes),
            at: root,
            ply: 0,
            actions_calls: Rc::new(Cell::new(0)),
        }
    }
}

/// Uniform random tree with small integer values so ties are common.
/// Some nodes are terminal, occasionally with infinite utility.
pub(crate) fn random_tree(rng: &mut StdRng, depth: u32, max_branching: usize) -> Tree {
    fn grow(b: &mut TreeBuilder, rng: &mut StdRng, depth: u32, max_branching: usize) -> usize {
        let value = f64::from(rng.gen_range(-4..=4));
        if depth == 0 {
            return b.leaf(value);
        }
        if rng.gen_bool(0.1) {
            let utility = match rng.gen_range(0..4) {
                0 => f64::INFINITY,
                1 => f64::NEG_INFINITY,
                _ => value,
            };
            return b.terminal(utility);
        }
        let n = rng.gen_range(1..=max_branching);
        let children: Vec<usize> = (0..n).map(|_| grow(b, rng, depth - 1, max_branching)).collect();
        b.branch(value, &children)
    }

    let mut builder = TreeBuilder::new();
    let n = rng.gen_range(2..=max_branching.max(2));
    let children: Vec<usize> = (0..n)
        .map(|_| grow(&mut builder, rng, depth.saturating_sub(1), max_branching))
        .collect();
    builder.finish_root(&children)
}
