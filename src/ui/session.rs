//! Game session state for the Isolation GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::arena::WinReason;
use crate::engine::{AgentConfig, AnytimeAgent, Decision};
use crate::rules::{winner, GameState, PlayerId};
use crate::{Board, Pos};

/// Time the agent gets per move in the GUI
pub const AGENT_TIME_LIMIT: Duration = Duration::from_millis(1000);

/// Agent computation state
pub enum AgentTurn {
    Idle,
    Thinking {
        receiver: Receiver<Decision<Pos>>,
        start_time: Instant,
        /// Most recent publication so far
        latest: Option<Decision<Pos>>,
    },
}

/// How the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub winner: PlayerId,
    pub reason: WinReason,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub agent_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            agent_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }
}

/// One human-vs-agent game
pub struct Session {
    pub board: Board,
    /// Side the human plays
    pub human: PlayerId,
    pub game_over: Option<GameOver>,
    pub last_move: Option<Pos>,
    pub history: Vec<Pos>,
    /// Decision the agent's last move was taken from
    pub last_decision: Option<Decision<Pos>>,
    pub agent: AgentTurn,
    pub move_timer: MoveTimer,
    pub message: Option<String>,

    config: AgentConfig,
    time_limit: Duration,
}

impl Session {
    pub fn new(human: PlayerId) -> Self {
        Self::with_agent(human, AgentConfig::default(), AGENT_TIME_LIMIT)
    }

    pub fn with_agent(human: PlayerId, config: AgentConfig, time_limit: Duration) -> Self {
        Self {
            board: Board::new(),
            human,
            game_over: None,
            last_move: None,
            history: Vec::new(),
            last_decision: None,
            agent: AgentTurn::Idle,
            move_timer: MoveTimer::default(),
            message: None,
            config,
            time_limit,
        }
    }

    /// Start over with the same sides and agent
    pub fn reset(&mut self) {
        *self = Self::with_agent(self.human, self.config, self.time_limit);
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn is_human_turn(&self) -> bool {
        self.board.active_player() == self.human
    }

    pub fn is_agent_thinking(&self) -> bool {
        matches!(self.agent, AgentTurn::Thinking { .. })
    }

    /// Destinations the human may click on right now
    pub fn human_moves(&self) -> Vec<Pos> {
        if self.game_over.is_some() || !self.is_human_turn() {
            return Vec::new();
        }
        self.board.actions().unwrap_or_default()
    }

    /// Attempt a human move
    pub fn try_move(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_agent_thinking() || !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        self.apply(pos).map_err(|e| e.to_string())
    }

    fn apply(&mut self, pos: Pos) -> Result<(), crate::IsolationError> {
        self.board = self.board.result(&pos)?;
        self.history.push(pos);
        self.last_move = Some(pos);
        self.message = None;

        if let Some(won) = winner(&self.board) {
            info!(winner = ?won, moves = self.history.len(), "game over");
            self.game_over = Some(GameOver {
                winner: won,
                reason: WinReason::Isolation,
            });
        } else {
            self.move_timer.start();
        }
        Ok(())
    }

    fn forfeit(&mut self, loser: PlayerId, reason: WinReason) {
        warn!(?loser, ?reason, "agent forfeits");
        self.game_over = Some(GameOver {
            winner: loser.opponent(),
            reason,
        });
    }

    /// Start the agent's turn on a background thread
    pub fn start_agent_turn(&mut self) {
        if self.is_human_turn() || self.is_agent_thinking() || self.game_over.is_some() {
            return;
        }

        let agent_id = self.human.opponent();
        let mut agent = match AnytimeAgent::new(agent_id, self.config) {
            Ok(agent) => agent,
            Err(e) => {
                self.message = Some(e.to_string());
                return;
            }
        };
        let board = self.board.clone();
        let (mut tx, rx) = channel();

        thread::spawn(move || {
            if let Err(e) = agent.get_action(&board, &mut tx) {
                warn!(error = %e, "agent turn failed");
            }
        });

        self.agent = AgentTurn::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            latest: None,
        };
    }

    /// Collect publications; play the latest once the agent is done or out of time
    pub fn poll_agent(&mut self) {
        let (finished, elapsed, decision) = match &mut self.agent {
            AgentTurn::Thinking {
                receiver,
                start_time,
                latest,
            } => {
                let mut finished = false;
                loop {
                    match receiver.try_recv() {
                        Ok(decision) => *latest = Some(decision),
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            finished = true;
                            break;
                        }
                    }
                }
                (finished, start_time.elapsed(), latest.clone())
            }
            AgentTurn::Idle => return,
        };

        if !finished && elapsed < self.time_limit {
            return;
        }

        // Dropping the receiver ends the search at its next publication
        self.agent = AgentTurn::Idle;
        self.move_timer.agent_thinking_time = Some(elapsed);
        let agent_id = self.human.opponent();

        match decision {
            Some(decision) => {
                debug!(action = ?decision.action, depth = decision.depth, "agent plays");
                let action = decision.action;
                self.last_decision = Some(decision);
                if let Err(e) = self.apply(action) {
                    self.message = Some(e.to_string());
                    self.forfeit(agent_id, WinReason::IllegalMove);
                }
            }
            None if finished => self.forfeit(agent_id, WinReason::AgentFailure),
            None => self.forfeit(agent_id, WinReason::Timeout),
        }
    }

    /// Agent thinking elapsed time
    pub fn agent_thinking_elapsed(&self) -> Option<Duration> {
        match &self.agent {
            AgentTurn::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AgentTurn::Idle => None,
        }
    }

    /// Latest publication of the running turn, or the one last played
    pub fn latest_decision(&self) -> Option<&Decision<Pos>> {
        match &self.agent {
            AgentTurn::Thinking { latest: Some(d), .. } => Some(d),
            _ => self.last_decision.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for_agent(session: &mut Session) {
        session.start_agent_turn();
        while session.is_agent_thinking() {
            thread::sleep(Duration::from_millis(5));
            session.poll_agent();
        }
    }

    #[test]
    fn test_human_moves_first_as_first_player() {
        let mut session = Session::new(PlayerId::First);
        assert!(session.is_human_turn());
        assert_eq!(session.human_moves().len(), 99);
        session.try_move(Pos::new(4, 5)).unwrap();
        assert!(!session.is_human_turn());
        assert!(session.try_move(Pos::new(0, 0)).is_err());
    }

    #[test]
    fn test_closed_cell_is_rejected() {
        let mut session = Session::new(PlayerId::Second);
        session.board = Board::from_parts(&[], [Some(Pos::new(4, 5)), None], 1);
        assert!(session.try_move(Pos::new(4, 5)).is_err());
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_agent_replies_within_time_limit() {
        let config = AgentConfig::default().with_seed(2).with_max_depth(4);
        let mut session = Session::with_agent(PlayerId::Second, config, Duration::from_millis(300));
        wait_for_agent(&mut session);

        assert_eq!(session.history.len(), 1);
        assert!(session.is_human_turn());
        assert!(session.last_decision.is_some());
        assert!(session.game_over.is_none());
    }

    #[test]
    fn test_reset_keeps_sides() {
        let mut session = Session::new(PlayerId::Second);
        session.message = Some("x".to_string());
        session.reset();
        assert_eq!(session.human, PlayerId::Second);
        assert!(session.message.is_none());
        assert!(session.history.is_empty());
    }
}
