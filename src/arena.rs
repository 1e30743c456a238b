//! Timed games and matches between players
//!
//! Every turn runs on its own thread. The supervisor collects publications
//! until the time limit expires, keeps the most recent one, and hangs up.
//! A player still searching when the receiver is dropped notices on its
//! next publication and returns.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::board::{Board, Pos};
use crate::engine::{seeded_rng, Decision};
use crate::error::ConfigError;
use crate::players::{Player, PlayerKind};
use crate::rules::{winner, GameState, PlayerId};

/// Default time limit per move
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(150);
/// Default number of rounds (two games each)
pub const DEFAULT_ROUNDS: u32 = 5;

/// What the supervisor got out of one turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Last publication received before the deadline
    Decided(Decision<Pos>),
    /// Nothing published in time
    NoDecision,
    /// The player returned an error or panicked
    Failed(String),
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    /// The loser had no legal move
    Isolation,
    /// The loser published nothing before the deadline
    Timeout,
    /// The loser published a move the rules reject
    IllegalMove,
    /// The loser's turn failed with an error or panic
    AgentFailure,
}

impl WinReason {
    /// Whether the loser gave the game away rather than being isolated
    #[must_use]
    pub fn is_forfeit(self) -> bool {
        self != WinReason::Isolation
    }
}

/// Result of one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub reason: WinReason,
    /// Moves played from the initial board, in order
    pub moves: Vec<Pos>,
}

/// Match configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Rounds to play; each round is two games with sides swapped
    pub rounds: u32,
    /// Time each player gets per move
    pub time_limit: Duration,
    /// Start both games of a round from the same random two-ply opening
    pub fair: bool,
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            time_limit: DEFAULT_TIME_LIMIT,
            fair: false,
            seed: None,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    #[must_use]
    pub fn with_fair(mut self, fair: bool) -> Self {
        self.fair = fair;
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
    /// [`ConfigError::ZeroTimeLimit`] if the time limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit.is_zero() {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}

/// Outcome of a match, from the agent's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchSummary {
    pub wins: u32,
    pub losses: u32,
    pub games: u32,
    /// Games the agent lost by forfeit
    pub forfeits: u32,
}

impl MatchSummary {
    /// Fraction of games won, in `0.0..=1.0`
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.games)
    }
}

/// Run one turn of `player` on its own thread, under `time_limit`.
///
/// Returns as soon as the player finishes or the deadline passes,
/// whichever comes first. On a deadline the thread is left to finish
/// on its own, and an error or panic it raises after the deadline is
/// reported as [`TurnOutcome::NoDecision`].
pub fn timed_turn(mut player: Box<dyn Player>, board: &Board, time_limit: Duration) -> TurnOutcome {
    let deadline = Instant::now() + time_limit;
    let (mut tx, rx) = mpsc::channel();
    let name = player.name();
    let board = board.clone();

    let handle = match thread::Builder::new()
        .name(format!("turn-{name}"))
        .spawn(move || player.get_action(&board, &mut tx))
    {
        Ok(handle) => handle,
        Err(e) => return TurnOutcome::Failed(format!("failed to spawn turn thread: {e}")),
    };

    let mut last: Option<Decision<Pos>> = None;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match rx.recv_timeout(remaining) {
            Ok(decision) => last = Some(decision),
            Err(RecvTimeoutError::Timeout) => break,
            Err(RecvTimeoutError::Disconnected) => {
                // Player finished before the deadline
                return match handle.join() {
                    Ok(Ok(())) => last.map_or(TurnOutcome::NoDecision, TurnOutcome::Decided),
                    Ok(Err(e)) => TurnOutcome::Failed(e.to_string()),
                    Err(_) => TurnOutcome::Failed(format!("{name} panicked")),
                };
            }
        }
    }

    debug!(player = name, "deadline reached, abandoning turn");
    drop(rx);
    last.map_or(TurnOutcome::NoDecision, TurnOutcome::Decided)
}

/// Play a game from `initial` until someone is isolated or forfeits.
///
/// `kinds[0]` plays `PlayerId::First`. A fresh player is built for every
/// turn, seeded from `rng`.
///
/// # Errors
///
/// Returns an error if a player cannot be built from its kind.
pub fn play_game(
    kinds: [PlayerKind; 2],
    initial: Board,
    time_limit: Duration,
    rng: &mut StdRng,
) -> Result<GameRecord, ConfigError> {
    let mut board = initial;
    let mut moves = Vec::new();

    let finish = |loser: PlayerId, reason: WinReason, moves: Vec<Pos>| {
        let winner = loser.opponent();
        info!(
            winner = %kinds[winner.index()],
            loser = %kinds[loser.index()],
            ?reason,
            moves = moves.len(),
            "game over"
        );
        GameRecord {
            winner,
            loser,
            reason,
            moves,
        }
    };

    loop {
        if let Some(won) = winner(&board) {
            return Ok(finish(won.opponent(), WinReason::Isolation, moves));
        }

        let active = board.active_player();
        let kind = kinds[active.index()];
        let player = kind.build(active, Some(rng.gen()))?;

        let action = match timed_turn(player, &board, time_limit) {
            TurnOutcome::Decided(decision) => decision.action,
            TurnOutcome::NoDecision => {
                warn!(player = %kind, ply = board.plies(), "no move before the deadline");
                return Ok(finish(active, WinReason::Timeout, moves));
            }
            TurnOutcome::Failed(reason) => {
                warn!(player = %kind, ply = board.plies(), %reason, "turn failed");
                return Ok(finish(active, WinReason::AgentFailure, moves));
            }
        };

        board = match board.result(&action) {
            Ok(next) => next,
            Err(e) => {
                warn!(player = %kind, error = %e, "illegal move");
                return Ok(finish(active, WinReason::IllegalMove, moves));
            }
        };
        moves.push(action);
    }
}

/// Board after two random placements, one per player
fn random_opening(rng: &mut StdRng) -> Board {
    let mut board = Board::new();
    for _ in 0..2 {
        let Ok(actions) = board.actions() else {
            break;
        };
        let Some(&action) = actions.choose(rng) else {
            break;
        };
        if let Ok(next) = board.result(&action) {
            board = next;
        }
    }
    board
}

/// Play `config.rounds` rounds of `agent` against `opponent`.
///
/// Each round is two games, one with the agent moving first and one with
/// it moving second.
///
/// # Errors
///
/// Returns an error if the configuration or a player kind is invalid.
pub fn run_match(agent: PlayerKind, opponent: PlayerKind, config: &MatchConfig) -> Result<MatchSummary, ConfigError> {
    config.validate()?;
    let mut rng = seeded_rng(config.seed);
    let mut summary = MatchSummary::default();

    for round in 0..config.rounds {
        let opening = if config.fair {
            random_opening(&mut rng)
        } else {
            Board::new()
        };

        for agent_side in [PlayerId::First, PlayerId::Second] {
            let kinds = match agent_side {
                PlayerId::First => [agent, opponent],
                PlayerId::Second => [opponent, agent],
            };
            let record = play_game(kinds, opening.clone(), config.time_limit, &mut rng)?;

            summary.games += 1;
            if record.winner == agent_side {
                summary.wins += 1;
            } else {
                summary.losses += 1;
                if record.reason.is_forfeit() {
                    summary.forfeits += 1;
                }
            }
        }

        debug!(round, wins = summary.wins, games = summary.games, "round complete");
    }

    info!(
        agent = %agent,
        opponent = %opponent,
        wins = summary.wins,
        games = summary.games,
        win_rate = summary.win_rate(),
        "match complete"
    );
    Ok(summary)
}
