//! Game-state capability consumed by search and evaluation.
//!
//! Search never mutates a state. It enumerates moves for the active player and
//! asks for forecasted successors, each of which is an independent snapshot.
//! Move enumeration order must be deterministic because ties are broken by it.

use crate::errors::BoardError;
use crate::game_state::game_types::{Move, PlayerId};

pub trait GameState: Sized {
    /// Player whose turn it is.
    fn active_player(&self) -> PlayerId;

    /// Legal moves for `player`, in a stable order.
    fn legal_moves(&self, player: PlayerId) -> Vec<Move>;

    /// Successor state after the active player occupies `mv`. The receiver is
    /// left untouched.
    fn forecast(&self, mv: Move) -> Result<Self, BoardError>;

    fn is_winner(&self, player: PlayerId) -> bool;

    fn is_loser(&self, player: PlayerId) -> bool;

    fn opponent_of(&self, player: PlayerId) -> PlayerId {
        player.opposite()
    }

    /// Square held by `player`, or `None` before its first placement.
    fn player_location(&self, player: PlayerId) -> Option<Move>;

    fn blank_spaces(&self) -> Vec<Move>;

    /// Number of moves applied since the empty board.
    fn ply_count(&self) -> usize;

    /// Grid size as `(height, width)`.
    fn dimensions(&self) -> (i32, i32);

    #[inline]
    fn active_legal_moves(&self) -> Vec<Move> {
        self.legal_moves(self.active_player())
    }
}
