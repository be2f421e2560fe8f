//! Score + move pair produced by every search call.

use crate::game_state::game_types::Move;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub score: f64,
    pub best_move: Move,
}

impl ScoredMove {
    #[inline]
    pub const fn new(score: f64, best_move: Move) -> Self {
        Self { score, best_move }
    }

    /// Starting point for a node that has not examined any child yet: the
    /// worst score for the side and no move.
    #[inline]
    pub const fn unexplored(maximizing: bool) -> Self {
        let score = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        Self::new(score, Move::NONE)
    }

    /// Whether a child scoring `score` replaces `self` for the given side.
    ///
    /// Only strictly better scores win, so among equal scores the first one
    /// examined is kept. A node that still holds no move takes any child, so
    /// a node with legal moves always reports one of them.
    #[inline]
    pub fn is_improved_by(&self, score: f64, maximizing: bool) -> bool {
        if self.best_move.is_none() {
            return true;
        }
        if maximizing {
            score > self.score
        } else {
            score < self.score
        }
    }

    #[inline]
    pub fn consider(&mut self, score: f64, mv: Move, maximizing: bool) {
        if self.is_improved_by(score, maximizing) {
            *self = Self::new(score, mv);
        }
    }
}
