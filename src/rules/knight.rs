//! Knight movement
//!
//! After its opening placement a player moves like a chess knight and may
//! only land on open cells.

use crate::board::{Board, Pos};

/// Knight offsets as `(row, col)` deltas, rows growing northward.
///
/// Order: NNE, ENE, ESE, SSE, SSW, WSW, WNW, NNW.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Legal destinations from `loc`.
///
/// For `None` (a player not yet placed) every open cell is a destination.
#[must_use]
pub fn liberties(board: &Board, loc: Option<Pos>) -> Vec<Pos> {
    match loc {
        None => board.open_cells().iter_ones().collect(),
        Some(from) => KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| from.offset(dr, dc))
            .filter(|&to| board.is_open(to))
            .collect(),
    }
}

/// Check whether the active player may move to `to`.
#[must_use]
pub fn is_legal_move(board: &Board, to: Pos) -> bool {
    if !board.is_open(to) {
        return false;
    }
    match board.loc(board.active_player()) {
        None => true,
        Some(from) => {
            let dr = i32::from(to.row) - i32::from(from.row);
            let dc = i32::from(to.col) - i32::from(from.col);
            KNIGHT_OFFSETS.contains(&(dr, dc))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::PlayerId;

    #[test]
    fn test_center_has_eight_liberties() {
        let board = Board::from_parts(&[], [Some(Pos::new(4, 5)), None], 1);
        let libs = liberties(&board, Some(Pos::new(4, 5)));
        assert_eq!(libs.len(), 8);
        assert_eq!(libs[0], Pos::new(6, 6)); // NNE first
        assert_eq!(libs[7], Pos::new(6, 4)); // NNW last
    }

    #[test]
    fn test_corner_has_two_liberties() {
        let board = Board::from_parts(&[], [Some(Pos::new(0, 0)), None], 1);
        let libs = liberties(&board, Some(Pos::new(0, 0)));
        assert_eq!(libs, vec![Pos::new(2, 1), Pos::new(1, 2)]);
    }

    #[test]
    fn test_closed_cells_are_not_liberties() {
        let board = Board::from_parts(&[Pos::new(2, 1)], [Some(Pos::new(0, 0)), None], 1);
        assert_eq!(liberties(&board, Some(Pos::new(0, 0))), vec![Pos::new(1, 2)]);
    }

    #[test]
    fn test_unplaced_player_sees_every_open_cell() {
        let board = Board::from_parts(&[Pos::new(3, 3)], [Some(Pos::new(4, 5)), None], 1);
        assert_eq!(liberties(&board, None).len(), 97);
    }

    #[test]
    fn test_is_legal_move() {
        let board = Board::from_parts(&[], [Some(Pos::new(4, 5)), Some(Pos::new(0, 0))], 2);
        assert_eq!(board.active_player(), PlayerId::First);
        assert!(is_legal_move(&board, Pos::new(6, 6)));
        assert!(!is_legal_move(&board, Pos::new(5, 5)));
        assert!(!is_legal_move(&board, Pos::new(0, 0)));

        let opening = Board::new();
        assert!(is_legal_move(&opening, Pos::new(8, 10)));
    }
}
