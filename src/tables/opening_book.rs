//! Fixed opening rule for the placement plies.
//!
//! While either player is still unplaced the agent skips search and takes the
//! center square, or the square just left of it when the center is gone.

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningPolicy {
    pub enabled: bool,
    /// The rule applies while `ply_count() < opening_plies`.
    pub opening_plies: usize,
}

impl Default for OpeningPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            opening_plies: 2,
        }
    }
}

impl OpeningPolicy {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            opening_plies: 2,
        }
    }

    /// Center of a `(height, width)` grid.
    #[inline]
    pub const fn preferred_square(dims: (i32, i32)) -> Move {
        Move::new(dims.0 / 2, dims.1 / 2)
    }

    #[inline]
    pub const fn fallback_square(dims: (i32, i32)) -> Move {
        Move::new(dims.0 / 2, dims.1 / 2 - 1)
    }

    /// The opening move for `state`, or `None` when search should decide.
    pub fn choose<G: GameState>(&self, state: &G, legal_moves: &[Move]) -> Option<Move> {
        if !self.enabled || state.ply_count() >= self.opening_plies {
            return None;
        }
        let dims = state.dimensions();
        [Self::preferred_square(dims), Self::fallback_square(dims)]
            .into_iter()
            .find(|square| legal_moves.contains(square))
    }
}

#[cfg(test)]
mod tests {
    use super::OpeningPolicy;
    use crate::game_state::game_state::GameState;
    use crate::game_state::game_types::{Move, MovementRule};
    use crate::game_state::isolation_board::IsolationBoard;

    #[test]
    fn first_player_takes_center() {
        let board = IsolationBoard::default();
        let legal = board.active_legal_moves();
        assert_eq!(
            OpeningPolicy::default().choose(&board, &legal),
            Some(Move::new(3, 3))
        );
    }

    #[test]
    fn second_player_falls_back_when_center_is_taken() {
        let mut board = IsolationBoard::default();
        board.apply_move(Move::new(3, 3)).expect("placement");
        let legal = board.active_legal_moves();
        assert_eq!(
            OpeningPolicy::default().choose(&board, &legal),
            Some(Move::new(3, 2))
        );
    }

    #[test]
    fn declines_after_placement_plies_or_when_disabled() {
        let mut board = IsolationBoard::default();
        board.apply_move(Move::new(0, 0)).expect("placement");
        board.apply_move(Move::new(6, 6)).expect("placement");
        let legal = board.active_legal_moves();
        assert_eq!(OpeningPolicy::default().choose(&board, &legal), None);

        let fresh = IsolationBoard::new(5, 5, MovementRule::King).expect("5x5");
        let legal = fresh.active_legal_moves();
        assert_eq!(OpeningPolicy::disabled().choose(&fresh, &legal), None);
    }
}
