//! Win condition for knight Isolation
//!
//! The game ends as soon as either player has no liberty left. The player to
//! move wins if it can still move; otherwise the opponent wins.

use super::knight::liberties;
use super::PlayerId;
use crate::board::Board;

/// Check whether a player has at least one legal destination.
#[inline]
#[must_use]
pub fn has_liberties(board: &Board, player: PlayerId) -> bool {
    !liberties(board, board.loc(player)).is_empty()
}

/// Winner of a finished game, `None` while both players can move.
#[must_use]
pub fn winner(board: &Board) -> Option<PlayerId> {
    let active = board.active_player();
    let active_free = has_liberties(board, active);
    let other_free = has_liberties(board, active.opponent());

    if active_free && other_free {
        return None;
    }

    Some(if active_free { active } else { active.opponent() })
}
