//! Sample opponents and the player abstraction used by the arena
//!
//! Every player publishes its move through a [`Publisher`], exactly like the
//! anytime agent, so the arena can supervise them all the same way.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Pos};
use crate::engine::{seeded_rng, AgentConfig, AnytimeAgent, Decision, Publisher};
use crate::error::{ConfigError, IsolationResult};
use crate::eval::{Evaluate, Heuristic, MobilityEvaluator};
use crate::rules::{GameState, PlayerId};
use crate::search::Minimax;

/// Search depth of the fixed-depth minimax opponent
pub const MINIMAX_DEPTH: i8 = 3;

/// Something that can take a turn on a [`Board`].
pub trait Player: Send {
    /// Side this player moves for
    fn id(&self) -> PlayerId;

    fn name(&self) -> &'static str;

    /// Publish one or more moves for `board`; the last one published in time counts.
    ///
    /// # Errors
    ///
    /// Any error raised by the rules engine.
    fn get_action(&mut self, board: &Board, publisher: &mut dyn Publisher<Pos>) -> IsolationResult<()>;
}

impl<R: Rng + Send> Player for AnytimeAgent<R> {
    fn id(&self) -> PlayerId {
        self.player()
    }

    fn name(&self) -> &'static str {
        "alphabeta"
    }

    fn get_action(&mut self, board: &Board, publisher: &mut dyn Publisher<Pos>) -> IsolationResult<()> {
        AnytimeAgent::get_action(self, board, publisher)
    }
}

/// Plays a uniformly random legal move.
pub struct RandomPlayer {
    id: PlayerId,
    rng: StdRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(id: PlayerId, rng: StdRng) -> Self {
        Self { id, rng }
    }
}

impl Player for RandomPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "random"
    }

    fn get_action(&mut self, board: &Board, publisher: &mut dyn Publisher<Pos>) -> IsolationResult<()> {
        let actions = board.actions()?;
        if let Some(&action) = actions.choose(&mut self.rng) {
            // A closed channel just means the turn is already over
            let _ = publisher.publish(Decision::fallback(action, 0, 0));
        }
        Ok(())
    }
}

/// Plays the move whose successor scores best, one ply deep.
pub struct GreedyPlayer {
    id: PlayerId,
    evaluator: MobilityEvaluator,
}

impl GreedyPlayer {
    #[must_use]
    pub fn new(id: PlayerId, heuristic: Heuristic) -> Self {
        Self {
            id,
            evaluator: MobilityEvaluator::new(id, heuristic),
        }
    }
}

impl Player for GreedyPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "greedy"
    }

    fn get_action(&mut self, board: &Board, publisher: &mut dyn Publisher<Pos>) -> IsolationResult<()> {
        let actions = board.actions()?;
        let mut best: Option<(Pos, f64)> = None;

        for &action in &actions {
            let next = board.result(&action)?;
            let score = if next.terminal_test()? {
                next.utility(self.id)?
            } else {
                self.evaluator.evaluate(&next)
            };
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((action, score));
            }
        }

        if let Some((action, score)) = best {
            let _ = publisher.publish(Decision::searched(action, 1, score, actions.len() as u64));
        }
        Ok(())
    }
}

/// Fixed-depth minimax without pruning.
pub struct MinimaxPlayer {
    id: PlayerId,
    depth: i8,
    evaluator: MobilityEvaluator,
    rng: StdRng,
}

impl MinimaxPlayer {
    /// Minimax opponent with the baseline heuristic
    #[must_use]
    pub fn new(id: PlayerId, depth: i8, rng: StdRng) -> Self {
        Self {
            id,
            depth,
            evaluator: MobilityEvaluator::new(id, Heuristic::Baseline),
            rng,
        }
    }
}

impl Player for MinimaxPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "minimax"
    }

    fn get_action(&mut self, board: &Board, publisher: &mut dyn Publisher<Pos>) -> IsolationResult<()> {
        let mut searcher = Minimax::new(self.id, &self.evaluator);
        let result = searcher.search(board, self.depth)?;

        #[allow(clippy::cast_sign_loss)]
        let decision = match result.best_move {
            Some(action) => Decision::searched(action, self.depth as u8, result.score, result.nodes),
            None => match board.actions()?.choose(&mut self.rng) {
                Some(&action) => Decision::fallback(action, self.depth as u8, result.nodes),
                None => return Ok(()),
            },
        };
        let _ = publisher.publish(decision);
        Ok(())
    }
}

/// Selectable player implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Random,
    Greedy,
    Minimax,
    /// The anytime alpha-beta agent with its configuration
    AlphaBeta(AgentConfig),
}

impl PlayerKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PlayerKind::Random => "random",
            PlayerKind::Greedy => "greedy",
            PlayerKind::Minimax => "minimax",
            PlayerKind::AlphaBeta(_) => "alphabeta",
        }
    }

    /// Instantiate a player for side `id`.
    ///
    /// `seed` overrides any seed carried by an agent configuration; `None`
    /// keeps it (or draws from entropy when there is none).
    ///
    /// # Errors
    ///
    /// Returns an error if an agent configuration is invalid.
    pub fn build(self, id: PlayerId, seed: Option<u64>) -> Result<Box<dyn Player>, ConfigError> {
        Ok(match self {
            PlayerKind::Random => Box::new(RandomPlayer::new(id, seeded_rng(seed))),
            PlayerKind::Greedy => Box::new(GreedyPlayer::new(id, Heuristic::Baseline)),
            PlayerKind::Minimax => Box::new(MinimaxPlayer::new(id, MINIMAX_DEPTH, seeded_rng(seed))),
            PlayerKind::AlphaBeta(mut config) => {
                if seed.is_some() {
                    config.seed = seed;
                }
                Box::new(AnytimeAgent::new(id, config)?)
            }
        })
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "random" => Ok(PlayerKind::Random),
            "greedy" => Ok(PlayerKind::Greedy),
            "minimax" => Ok(PlayerKind::Minimax),
            "alphabeta" | "agent" => Ok(PlayerKind::AlphaBeta(AgentConfig::default())),
            _ => Err(ConfigError::UnknownPlayer(s.to_string())),
        }
    }
}
