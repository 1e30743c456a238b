//! Mobility features extracted from a position

use crate::rules::{GameState, PlayerId};

/// Raw inputs every heuristic is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobilityFeatures {
    /// Liberties of the evaluating player
    pub own_liberties: usize,
    /// Liberties of the opposing player
    pub opponent_liberties: usize,
    /// Half-moves played so far
    pub ply_count: u32,
}

impl MobilityFeatures {
    /// Extract features for `player` from any game state.
    #[must_use]
    pub fn extract<S: GameState>(state: &S, player: PlayerId) -> Self {
        let own = state.location(player);
        let opponent = state.location(player.opponent());
        Self {
            own_liberties: state.liberties(own).len(),
            opponent_liberties: state.liberties(opponent).len(),
            ply_count: state.ply_count(),
        }
    }
}
