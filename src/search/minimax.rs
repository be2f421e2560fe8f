//! Exhaustive depth-limited minimax.
//!
//! Scores are always from the perspective of the context's player: maximizing
//! layers are that player's turns, minimizing layers the opponent's.

use crate::errors::SearchOutcome;
use crate::game_state::game_state::GameState;
use crate::search::scored_move::ScoredMove;
use crate::search::search_context::SearchContext;

pub fn minimax<G: GameState>(
    ctx: &mut SearchContext<'_, G>,
    state: &G,
    depth: u32,
    maximizing: bool,
) -> SearchOutcome<ScoredMove> {
    ctx.enter_node()?;

    if depth == 0 {
        return ctx.leaf(state);
    }

    let moves = state.active_legal_moves();
    if moves.is_empty() {
        return ctx.leaf(state);
    }

    let mut best = ScoredMove::unexplored(maximizing);
    for mv in moves {
        let child = state.forecast(mv)?;
        let reply = minimax(ctx, &child, depth - 1, !maximizing)?;
        best.consider(reply.score, mv, maximizing);
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::minimax;
    use crate::errors::SearchError;
    use crate::game_state::game_state::GameState;
    use crate::game_state::game_types::{Move, MovementRule, PlayerId};
    use crate::game_state::isolation_board::IsolationBoard;
    use crate::search::board_scoring::{Evaluator, ImprovedScore, NullScore};
    use crate::search::time_budget::Unlimited;
    use crate::utils::board_parser::parse_board;
    use crate::utils::test_positions::player1_context;

    fn toy_board() -> IsolationBoard {
        parse_board("1 . .\n. . .\n. . 2", MovementRule::King).expect("board")
    }

    #[test]
    fn depth_zero_returns_evaluation_and_sentinel() {
        let board = toy_board();
        let mut ctx = player1_context(&ImprovedScore, &Unlimited, 10.0);

        let result = minimax(&mut ctx, &board, 0, true).expect("search should run");

        assert_eq!(result.best_move, Move::NONE);
        assert_eq!(
            Ok(result.score),
            ImprovedScore.score(&board, PlayerId::Player1)
        );
        assert_eq!(ctx.nodes(), 1);
    }

    #[test]
    fn no_legal_moves_scores_current_state() {
        let board = parse_board("1 2", MovementRule::King).expect("board");
        let mut ctx = player1_context(&ImprovedScore, &Unlimited, 10.0);

        let result = minimax(&mut ctx, &board, 3, true).expect("search should run");

        assert_eq!(result.best_move, Move::NONE);
        assert_eq!(result.score, f64::NEG_INFINITY);
    }

    #[test]
    fn ties_keep_first_move_in_enumeration_order() {
        let board = toy_board();
        let mut ctx = player1_context(&NullScore, &Unlimited, 10.0);

        let result = minimax(&mut ctx, &board, 1, true).expect("search should run");

        assert_eq!(result.best_move, board.active_legal_moves()[0]);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn depth_one_picks_best_immediate_reply() {
        let board = toy_board();
        let mut ctx = player1_context(&ImprovedScore, &Unlimited, 10.0);

        let result = minimax(&mut ctx, &board, 1, true).expect("search should run");

        let mut expected = f64::NEG_INFINITY;
        for mv in board.active_legal_moves() {
            let child = board.forecast(mv).expect("forecast");
            expected = expected.max(ImprovedScore.score(&child, PlayerId::Player1).expect("score"));
        }
        assert_eq!(result.score, expected);
        // Stepping to the center keeps the most exits.
        assert_eq!(result.best_move, Move::new(1, 1));
    }

    #[test]
    fn wins_are_found_through_the_tree() {
        // Stepping right strands player 2; stepping left strands player 1.
        let board = parse_board(". 1 .\nX X 2", MovementRule::King).expect("board");
        let mut ctx = player1_context(&ImprovedScore, &Unlimited, 10.0);

        let result = minimax(&mut ctx, &board, 2, true).expect("search should run");

        assert_eq!(result.best_move, Move::new(0, 2));
        assert_eq!(result.score, f64::INFINITY);
    }

    #[test]
    fn timeout_unwinds_from_deep_in_the_tree() {
        let board = toy_board();
        let remaining = Cell::new(100.0);
        let budget = || {
            let left = remaining.get();
            remaining.set(left - 10.0);
            left
        };
        let mut ctx = player1_context(&ImprovedScore, &budget, 50.0);

        let err = minimax(&mut ctx, &board, 6, true).expect_err("budget runs out");

        assert_eq!(err, SearchError::Timeout);
        assert_eq!(ctx.nodes(), 6);
    }

    #[test]
    fn evaluation_failures_propagate() {
        let board = toy_board();
        let failing = |_: &IsolationBoard, _: PlayerId| -> crate::errors::SearchOutcome<f64> {
            Err(SearchError::Evaluation("broken formula".to_owned()))
        };
        let mut ctx = player1_context(&failing, &Unlimited, 10.0);

        let err = minimax(&mut ctx, &board, 2, true).expect_err("evaluation fails");

        assert!(matches!(err, SearchError::Evaluation(_)));
    }
}
