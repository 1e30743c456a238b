//! [`GameState`] implementation for the reference knight-Isolation board

use super::knight::{is_legal_move, liberties};
use super::win::winner;
use super::{GameState, PlayerId};
use crate::board::{Board, Pos};
use crate::error::IsolationError;

impl GameState for Board {
    type Action = Pos;
    type Location = Pos;
    type Error = IsolationError;

    #[inline]
    fn ply_count(&self) -> u32 {
        self.ply_count
    }

    #[inline]
    fn location(&self, player: PlayerId) -> Option<Pos> {
        self.loc(player)
    }

    fn liberties(&self, loc: Option<Pos>) -> Vec<Pos> {
        liberties(self, loc)
    }

    fn actions(&self) -> Result<Vec<Pos>, IsolationError> {
        Ok(liberties(self, self.loc(self.active_player())))
    }

    fn result(&self, action: &Pos) -> Result<Board, IsolationError> {
        if !is_legal_move(self, *action) {
            return Err(IsolationError::IllegalMove {
                player: self.active_player(),
                to: *action,
            });
        }
        Ok(self.apply(*action))
    }

    fn terminal_test(&self) -> Result<bool, IsolationError> {
        Ok(winner(self).is_some())
    }

    fn utility(&self, player: PlayerId) -> Result<f64, IsolationError> {
        Ok(match winner(self) {
            None => 0.0,
            Some(w) if w == player => f64::INFINITY,
            Some(_) => f64::NEG_INFINITY,
        })
    }
}
