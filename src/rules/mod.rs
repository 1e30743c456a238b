//! Game rules and the contract the search core relies on
//!
//! - [`GameState`]: what the search needs from any rules engine
//! - Knight movement and liberties for the reference engine
//! - Terminal detection and utility (isolation win condition)

pub mod isolation;
pub mod knight;
pub mod win;

use std::fmt::Debug;

// Re-exports for convenient access
pub use knight::{is_legal_move, liberties, KNIGHT_OFFSETS};
pub use win::{has_liberties, winner};

/// Identifies one of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    /// Moves on even plies
    First,
    /// Moves on odd plies
    Second,
}

impl PlayerId {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::First => 0,
            PlayerId::Second => 1,
        }
    }

    #[inline]
    pub fn from_index(idx: usize) -> Option<PlayerId> {
        match idx {
            0 => Some(PlayerId::First),
            1 => Some(PlayerId::Second),
            _ => None,
        }
    }

    /// Get the opposing side
    #[inline]
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }
}

/// Read-only view of a game position, as consumed by the search core.
///
/// Implementations own their states; the search only borrows them and
/// obtains successors through [`GameState::result`]. Errors are the
/// implementation's own and pass through the search untouched.
pub trait GameState: Sized {
    /// One legal move
    type Action: Clone + PartialEq + Debug;
    /// A board location
    type Location: Copy + PartialEq + Debug;
    /// Failure raised by the rules engine
    type Error: std::error::Error;

    /// Half-moves played so far
    fn ply_count(&self) -> u32;

    /// Current location of a player, `None` before it has been placed
    fn location(&self, player: PlayerId) -> Option<Self::Location>;

    /// Legal single-step destinations from `loc` (every open cell for `None`)
    fn liberties(&self, loc: Option<Self::Location>) -> Vec<Self::Location>;

    /// Legal actions for the player to move, in engine order
    fn actions(&self) -> Result<Vec<Self::Action>, Self::Error>;

    /// Successor state after `action`; the receiver is left unchanged
    fn result(&self, action: &Self::Action) -> Result<Self, Self::Error>;

    fn terminal_test(&self) -> Result<bool, Self::Error>;

    /// Utility of a terminal state for `player`
    fn utility(&self, player: PlayerId) -> Result<f64, Self::Error>;
}
