//! Board structure with player locations and ply tracking

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, BOARD_HEIGHT, BOARD_WIDTH};
use crate::rules::PlayerId;

/// Knight Isolation position.
///
/// Cells start open and are closed for good once a player lands on them.
/// Boards are never mutated by the search: every move produces a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Open cells bitboard
    pub(crate) open: Bitboard,
    /// Current location of each player (`None` before the first placement)
    pub(crate) locs: [Option<Pos>; 2],
    /// Half-moves played so far
    pub(crate) ply_count: u32,
}

impl Board {
    /// Create an empty board with both players still to be placed.
    pub fn new() -> Self {
        Self {
            open: Bitboard::full(),
            locs: [None, None],
            ply_count: 0,
        }
    }

    /// Build a position directly.
    ///
    /// Cells in `blocked` and the cells under each placed player are closed.
    pub fn from_parts(blocked: &[Pos], locs: [Option<Pos>; 2], ply_count: u32) -> Self {
        let mut board = Self::new();
        for &pos in blocked {
            board.open.clear(pos);
        }
        for pos in locs.iter().flatten() {
            board.open.clear(*pos);
        }
        board.locs = locs;
        board.ply_count = ply_count;
        board
    }

    /// Check if a cell is still open
    #[inline]
    pub fn is_open(&self, pos: Pos) -> bool {
        self.open.get(pos)
    }

    /// Open cells bitboard
    #[inline]
    pub fn open_cells(&self) -> &Bitboard {
        &self.open
    }

    /// Current location of a player
    #[inline]
    pub fn loc(&self, player: PlayerId) -> Option<Pos> {
        self.locs[player.index()]
    }

    /// Half-moves played so far
    #[inline]
    pub fn plies(&self) -> u32 {
        self.ply_count
    }

    /// Player to move
    #[inline]
    pub fn active_player(&self) -> PlayerId {
        if self.ply_count % 2 == 0 {
            PlayerId::First
        } else {
            PlayerId::Second
        }
    }

    /// Move the active player to `to`, closing the cell (no legality check).
    /// Use `GameState::result` for game moves.
    pub(crate) fn apply(&self, to: Pos) -> Board {
        let mut next = self.clone();
        next.open.clear(to);
        next.locs[self.active_player().index()] = Some(to);
        next.ply_count += 1;
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_HEIGHT).rev() {
            for col in 0..BOARD_WIDTH {
                let pos = Pos::new(row as u8, col as u8);
                let cell = if self.locs[0] == Some(pos) {
                    '1'
                } else if self.locs[1] == Some(pos) {
                    '2'
                } else if self.is_open(pos) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{cell}")?;
                if col + 1 < BOARD_WIDTH {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
