//! Seeded position generators shared by search tests.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::errors::SearchOutcome;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{MovementRule, PlayerId};
use crate::game_state::isolation_board::IsolationBoard;
use crate::search::board_scoring::{Evaluator, ImprovedScore};
use crate::search::search_context::SearchContext;
use crate::search::time_budget::TimeBudget;

/// Play up to `plies` uniformly random legal moves from an empty board.
pub(crate) fn random_position(
    rng: &mut StdRng,
    size: i32,
    rule: MovementRule,
    plies: usize,
) -> IsolationBoard {
    let mut board = IsolationBoard::new(size, size, rule).expect("board dimensions are valid");
    for _ in 0..plies {
        let moves = board.active_legal_moves();
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        board.apply_move(mv).expect("chosen move is legal");
    }
    board
}

/// Mobility difference with a coarse resolution so ties are common.
pub(crate) fn coarse_score(state: &IsolationBoard, player: PlayerId) -> SearchOutcome<f64> {
    let score = ImprovedScore.score(state, player)?;
    if score.is_finite() {
        Ok((score / 2.0).floor())
    } else {
        Ok(score)
    }
}

/// Search context from player 1's point of view.
pub(crate) fn player1_context<'a>(
    evaluator: &'a dyn Evaluator<IsolationBoard>,
    time_budget: &'a dyn TimeBudget,
    timeout_threshold_ms: f64,
) -> SearchContext<'a, IsolationBoard> {
    SearchContext::new(PlayerId::Player1, evaluator, time_budget, timeout_threshold_ms)
}
