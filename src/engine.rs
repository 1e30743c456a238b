//! Anytime agent driving the alpha-beta search
//!
//! The agent searches the root position at depth 1, 2, 3, ... and publishes
//! the best move after every completed depth. Whoever holds the receiving end
//! (see [`crate::arena`]) decides when time is up and uses the last
//! publication it received. The search itself never looks at a clock.
//!
//! Move policy, by plies already played:
//!
//! 1. **Opening** (ply < 2): a uniformly random legal move, no search
//! 2. **Shallow** (ply < 4): one depth-1 search
//! 3. **Forced**: a single legal move is published without searching
//! 4. **Iterative deepening**: depth 1 up to `max_depth`, one publication per depth
//! 5. **Fallback**: if a depth yields no move, a random legal move ends the turn
//!
//! # Example
//!
//! ```
//! use isolation::board::Board;
//! use isolation::engine::{AgentConfig, AnytimeAgent, DecisionKind};
//! use isolation::rules::{GameState, PlayerId};
//!
//! let config = AgentConfig::default().with_seed(7);
//! let mut agent = AnytimeAgent::new(PlayerId::First, config).unwrap();
//! let board = Board::new();
//!
//! let mut published = Vec::new();
//! agent.get_action(&board, &mut published).unwrap();
//!
//! assert_eq!(published.len(), 1);
//! assert_eq!(published[0].kind, DecisionKind::Opening);
//! assert!(board.actions().unwrap().contains(&published[0].action));
//! ```

use std::sync::mpsc::Sender;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::{ConfigError, PublishError};
use crate::eval::{Heuristic, MobilityEvaluator};
use crate::rules::{GameState, PlayerId};
use crate::search::AlphaBeta;

/// Plies played before which the opening move is random
pub const OPENING_PLIES: u32 = 2;
/// Plies played before which a single depth-1 search is used
pub const SHALLOW_PLIES: u32 = 4;
/// Default iterative deepening limit
pub const DEFAULT_MAX_DEPTH: u8 = 16;
/// Largest accepted depth limit
pub const MAX_DEPTH_LIMIT: u8 = 64;

/// How a published move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// Random opening move
    Opening,
    /// Only legal move
    Forced,
    /// Result of a completed alpha-beta depth
    Search,
    /// Random move not backed by a search
    Fallback,
}

/// One publication from the agent to its supervisor.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    /// Move to play
    pub action: A,
    /// Completed depth (0 when no search ran)
    pub depth: u8,
    pub kind: DecisionKind,
    /// Backed-up score for searched moves
    pub score: Option<f64>,
    /// Nodes visited by the depth that produced this move
    pub nodes: u64,
}

impl<A> Decision<A> {
    #[inline]
    pub fn opening(action: A) -> Self {
        Self {
            action,
            depth: 0,
            kind: DecisionKind::Opening,
            score: None,
            nodes: 0,
        }
    }

    #[inline]
    pub fn forced(action: A) -> Self {
        Self {
            action,
            depth: 0,
            kind: DecisionKind::Forced,
            score: None,
            nodes: 0,
        }
    }

    #[inline]
    pub fn searched(action: A, depth: u8, score: f64, nodes: u64) -> Self {
        Self {
            action,
            depth,
            kind: DecisionKind::Search,
            score: Some(score),
            nodes,
        }
    }

    #[inline]
    pub fn fallback(action: A, depth: u8, nodes: u64) -> Self {
        Self {
            action,
            depth,
            kind: DecisionKind::Fallback,
            score: None,
            nodes,
        }
    }
}

/// Receiving side of the agent's publications.
///
/// Called at least once per turn whenever a legal move exists. The last
/// publication received before the deadline is the agent's move.
pub trait Publisher<A> {
    /// Hand over a decision
    ///
    /// # Errors
    ///
    /// [`PublishError::Disconnected`] once the supervisor stopped listening.
    fn publish(&mut self, decision: Decision<A>) -> Result<(), PublishError>;
}

impl<A> Publisher<A> for Sender<Decision<A>> {
    fn publish(&mut self, decision: Decision<A>) -> Result<(), PublishError> {
        self.send(decision).map_err(|_| PublishError::Disconnected)
    }
}

impl<A> Publisher<A> for Vec<Decision<A>> {
    fn publish(&mut self, decision: Decision<A>) -> Result<(), PublishError> {
        self.push(decision);
        Ok(())
    }
}

/// Random source from an optional seed, falling back to entropy
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Agent configuration.
///
/// Default configuration:
/// - Maximum depth of 16
/// - Progressively offensive heuristic
/// - Random source seeded from entropy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentConfig {
    /// Deepest iteration of the iterative deepening loop
    pub max_depth: u8,
    /// Frontier scoring strategy
    pub heuristic: Heuristic,
    /// Seed for random choices; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            heuristic: Heuristic::default(),
            seed: None,
        }
    }
}

impl AgentConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidDepth`] unless `max_depth` is in `1..=64`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::InvalidDepth(self.max_depth));
        }
        Ok(())
    }
}

/// Iterative deepening alpha-beta agent for one side.
///
/// The player id is fixed for the agent's lifetime; it decides which
/// location counts as "own" in evaluation and whose utility terminal
/// states are scored with.
pub struct AnytimeAgent<R = StdRng> {
    player: PlayerId,
    config: AgentConfig,
    evaluator: MobilityEvaluator,
    rng: R,
}

impl AnytimeAgent<StdRng> {
    /// Create an agent, seeding its random source from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(player: PlayerId, config: AgentConfig) -> Result<Self, ConfigError> {
        Self::with_rng(player, config, seeded_rng(config.seed))
    }
}

impl<R: Rng> AnytimeAgent<R> {
    /// Create an agent with an injected random source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_rng(player: PlayerId, config: AgentConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            player,
            config,
            evaluator: MobilityEvaluator::new(player, config.heuristic),
            rng,
        })
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Choose a move for `state`, publishing every improvement.
    ///
    /// Publishes at least once whenever `state` has a legal action.
    /// Depths are published in increasing order, one publication per
    /// completed depth. Returns early, without error, once the publisher
    /// reports that nobody is listening any more.
    ///
    /// # Errors
    ///
    /// Any error raised by the rules engine, unchanged.
    pub fn get_action<S, P>(&mut self, state: &S, publisher: &mut P) -> Result<(), S::Error>
    where
        S: GameState,
        P: Publisher<S::Action> + ?Sized,
    {
        let ply = state.ply_count();
        let actions = state.actions()?;

        if actions.is_empty() {
            warn!(player = ?self.player, ply, "no legal action to publish");
            return Ok(());
        }

        if ply < OPENING_PLIES {
            if let Some(action) = actions.choose(&mut self.rng) {
                self.send(publisher, Decision::opening(action.clone()));
            }
            return Ok(());
        }

        if ply >= SHALLOW_PLIES && actions.len() == 1 {
            self.send(publisher, Decision::forced(actions[0].clone()));
            return Ok(());
        }

        let last_depth = if ply < SHALLOW_PLIES {
            1
        } else {
            self.config.max_depth
        };
        let evaluator = self.evaluator;
        let mut searcher = AlphaBeta::new(self.player, &evaluator);

        for depth in 1..=last_depth {
            #[allow(clippy::cast_possible_wrap)]
            let result = searcher.search(state, depth as i8)?;
            debug!(
                player = ?self.player,
                depth,
                score = result.score,
                nodes = result.nodes,
                "depth completed"
            );

            let decision = match result.best_move.clone() {
                Some(action) => Decision::searched(action, depth, result.score, result.nodes),
                None => {
                    if let Some(action) = actions.choose(&mut self.rng) {
                        self.send(publisher, Decision::fallback(action.clone(), depth, result.nodes));
                    }
                    return Ok(());
                }
            };

            if !self.send(publisher, decision) {
                return Ok(());
            }
        }

        Ok(())
    }

    /// Publish, reporting whether the supervisor is still listening
    fn send<A, P>(&self, publisher: &mut P, decision: Decision<A>) -> bool
    where
        A: std::fmt::Debug,
        P: Publisher<A> + ?Sized,
    {
        debug!(
            player = ?self.player,
            action = ?decision.action,
            depth = decision.depth,
            kind = ?decision.kind,
            "publishing"
        );
        match publisher.publish(decision) {
            Ok(()) => true,
            Err(e) => {
                debug!(player = ?self.player, "stopping: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Pos};
    use crate::search::test_tree::{TreeBuilder, TreeError};
    use std::sync::mpsc::channel;

    fn agent(player: PlayerId, max_depth: u8, seed: u64) -> AnytimeAgent {
        let config = AgentConfig::default().with_max_depth(max_depth).with_seed(seed);
        AnytimeAgent::new(player, config).unwrap()
    }

    /// Mid-game position with plenty of room for both sides
    fn midgame() -> Board {
        Board::from_parts(
            &[Pos::new(3, 3), Pos::new(6, 8)],
            [Some(Pos::new(4, 5)), Some(Pos::new(2, 2))],
            6,
        )
    }

    /// Accepts the first publication, then reports a closed channel
    #[derive(Default)]
    struct HangsUpAfterOne {
        attempts: usize,
        received: Vec<Decision<Pos>>,
    }

    impl Publisher<Pos> for HangsUpAfterOne {
        fn publish(&mut self, decision: Decision<Pos>) -> Result<(), PublishError> {
            self.attempts += 1;
            if self.received.is_empty() {
                self.received.push(decision);
                Ok(())
            } else {
                Err(PublishError::Disconnected)
            }
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.heuristic, Heuristic::ProgressivelyOffensive);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_depth() {
        let zero = AgentConfig::default().with_max_depth(0);
        assert_eq!(zero.validate(), Err(ConfigError::InvalidDepth(0)));
        let deep = AgentConfig::default().with_max_depth(65);
        assert!(AnytimeAgent::new(PlayerId::First, deep).is_err());
    }

    #[test]
    fn test_opening_move_is_random_and_legal() {
        for seed in 0..20 {
            let board = Board::new();
            let mut published = Vec::new();
            agent(PlayerId::First, 16, seed).get_action(&board, &mut published).unwrap();

            assert_eq!(published.len(), 1);
            assert_eq!(published[0].kind, DecisionKind::Opening);
            assert_eq!(published[0].depth, 0);
            assert!(board.actions().unwrap().contains(&published[0].action));
        }
    }

    #[test]
    fn test_opening_move_is_reproducible_with_seed() {
        let board = Board::new().result(&Pos::new(4, 5)).unwrap();
        let mut a = Vec::new();
        let mut b = Vec::new();
        agent(PlayerId::Second, 16, 42).get_action(&board, &mut a).unwrap();
        agent(PlayerId::Second, 16, 42).get_action(&board, &mut b).unwrap();
        assert_eq!(a, b);
        assert_ne!(a[0].action, Pos::new(4, 5));
    }

    #[test]
    fn test_shallow_phase_runs_single_search() {
        let board = Board::from_parts(&[], [Some(Pos::new(4, 5)), Some(Pos::new(2, 2))], 2);
        let mut published = Vec::new();
        agent(PlayerId::First, 16, 1).get_action(&board, &mut published).unwrap();

        assert_eq!(published.len(), 1);
        assert_eq!(published[0].kind, DecisionKind::Search);
        assert_eq!(published[0].depth, 1);
        assert!(board.actions().unwrap().contains(&published[0].action));
    }

    #[test]
    fn test_forced_move_skips_search() {
        let mut b = TreeBuilder::new();
        let only = b.leaf(0.0);
        let tree = b.finish_root(&[only]).with_ply(8);

        let config = AgentConfig::default().with_seed(3);
        let mut agent = AnytimeAgent::new(PlayerId::First, config).unwrap();
        let mut published = Vec::new();
        agent.get_action(&tree, &mut published).unwrap();

        assert_eq!(published.len(), 1);
        assert_eq!(published[0].kind, DecisionKind::Forced);
        assert_eq!(published[0].action, only);
        // Only the driver's own enumeration of the root
        assert_eq!(tree.actions_calls(), 1);
    }

    #[test]
    fn test_depths_are_published_in_order() {
        let board = midgame();
        let mut published = Vec::new();
        agent(PlayerId::First, 5, 9).get_action(&board, &mut published).unwrap();

        let depths: Vec<u8> = published.iter().map(|d| d.depth).collect();
        assert_eq!(depths, vec![1, 2, 3, 4, 5]);
        assert!(published.iter().all(|d| d.kind == DecisionKind::Search));
        let legal = board.actions().unwrap();
        assert!(published.iter().all(|d| legal.contains(&d.action)));
    }

    #[test]
    fn test_publications_are_deterministic() {
        let board = midgame();
        let mut a = Vec::new();
        let mut b = Vec::new();
        agent(PlayerId::First, 4, 1).get_action(&board, &mut a).unwrap();
        agent(PlayerId::First, 4, 2).get_action(&board, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_when_every_move_loses() {
        let mut b = TreeBuilder::new();
        let l1 = b.terminal(f64::NEG_INFINITY);
        let l2 = b.terminal(f64::NEG_INFINITY);
        let tree = b.finish_root(&[l1, l2]).with_ply(10);

        let config = AgentConfig::default().with_seed(5);
        let mut agent = AnytimeAgent::new(PlayerId::First, config).unwrap();
        let mut published = Vec::new();
        agent.get_action(&tree, &mut published).unwrap();

        assert_eq!(published.len(), 1);
        assert_eq!(published[0].kind, DecisionKind::Fallback);
        assert_eq!(published[0].depth, 1);
        assert!(published[0].action == l1 || published[0].action == l2);
    }

    #[test]
    fn test_empty_root_publishes_nothing() {
        let tree = TreeBuilder::new().finish_root(&[]).with_ply(12);
        let config = AgentConfig::default().with_seed(5);
        let mut agent = AnytimeAgent::new(PlayerId::First, config).unwrap();
        let mut published = Vec::new();
        agent.get_action(&tree, &mut published).unwrap();
        assert!(published.is_empty());
    }

    #[test]
    fn test_rules_error_propagates() {
        let mut b = TreeBuilder::new();
        let broken = b.broken();
        let other = b.leaf(1.0);
        let tree = b.finish_root(&[broken, other]).with_ply(6);

        let config = AgentConfig::default().with_seed(5);
        let mut agent = AnytimeAgent::new(PlayerId::First, config).unwrap();
        let mut published = Vec::new();
        let err = agent.get_action(&tree, &mut published).unwrap_err();
        assert_eq!(err, TreeError::Broken(broken));
        // Depth 1 only evaluates the broken node; depth 2 expands it
        assert_eq!(published.len(), 1);
    }

    #[test]
    fn test_stops_when_supervisor_hangs_up() {
        let board = midgame();
        let mut publisher = HangsUpAfterOne::default();
        agent(PlayerId::First, 8, 1).get_action(&board, &mut publisher).unwrap();
        assert_eq!(publisher.received.len(), 1);
        assert_eq!(publisher.attempts, 2);
    }

    #[test]
    fn test_channel_publisher() {
        let board = midgame();
        let (mut tx, rx) = channel();
        agent(PlayerId::First, 3, 1).get_action(&board, &mut tx).unwrap();
        drop(tx);
        let received: Vec<Decision<Pos>> = rx.iter().collect();
        assert_eq!(received.len(), 3);
        assert_eq!(received.last().map(|d| d.depth), Some(3));
    }

    #[test]
    fn test_dropped_receiver_is_not_an_error() {
        let board = midgame();
        let (mut tx, rx) = channel::<Decision<Pos>>();
        drop(rx);
        assert!(agent(PlayerId::First, 6, 1).get_action(&board, &mut tx).is_ok());
    }
}
