//! Shared value types for grid games: players, moves, and movement rules.

use std::fmt;

/// Player handle. Search code only routes it to evaluation and never branches
/// on which player it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Player1 => write!(f, "player1"),
            PlayerId::Player2 => write!(f, "player2"),
        }
    }
}

/// A grid coordinate `(row, col)` to occupy.
///
/// `Move::NONE` (`(-1, -1)`) is reserved for "no legal move" and is never a
/// board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    pub const NONE: Move = Move { row: -1, col: -1 };

    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.row == Self::NONE.row && self.col == Self::NONE.col
    }

    #[inline]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl From<(i32, i32)> for Move {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// How a placed player may move once it is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementRule {
    /// Chess-knight L-shaped jumps.
    #[default]
    Knight,
    /// One step in any of the eight directions.
    King,
}

impl MovementRule {
    #[inline]
    pub const fn offsets(self) -> &'static [(i32, i32); 8] {
        match self {
            MovementRule::Knight => &KNIGHT_OFFSETS,
            MovementRule::King => &KING_OFFSETS,
        }
    }
}
