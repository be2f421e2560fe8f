//! Minimax with alpha-beta pruning.
//!
//! Fail-hard formulation: a maximizing node starts from `alpha` and a
//! minimizing node from `beta`, children only replace the running best when
//! strictly better, and a node returns as soon as its best reaches the
//! opposite bound (`>=` / `<=`). At the root window `(-inf, +inf)` the score
//! equals plain minimax. The chosen move can differ from minimax only among
//! moves with equal scores.

use crate::errors::SearchOutcome;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Move;
use crate::search::scored_move::ScoredMove;
use crate::search::search_context::SearchContext;

/// Search from the root with the full `(-inf, +inf)` window.
pub fn alpha_beta_root<G: GameState>(
    ctx: &mut SearchContext<'_, G>,
    state: &G,
    depth: u32,
) -> SearchOutcome<ScoredMove> {
    alpha_beta(ctx, state, depth, f64::NEG_INFINITY, f64::INFINITY, true)
}

pub fn alpha_beta<G: GameState>(
    ctx: &mut SearchContext<'_, G>,
    state: &G,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
) -> SearchOutcome<ScoredMove> {
    debug_assert!(alpha <= beta, "malformed window: alpha {alpha} > beta {beta}");

    ctx.enter_node()?;

    if depth == 0 {
        return ctx.leaf(state);
    }

    let moves = state.active_legal_moves();
    let Some(&first_move) = moves.first() else {
        return ctx.leaf(state);
    };

    let mut best = ScoredMove::new(if maximizing { alpha } else { beta }, Move::NONE);

    for mv in moves {
        let child = state.forecast(mv)?;
        let score = alpha_beta(ctx, &child, depth - 1, alpha, beta, !maximizing)?.score;

        if maximizing {
            if score > best.score {
                best = ScoredMove::new(score, mv);
                alpha = score;
            }
            if best.score >= beta {
                return Ok(with_move(best, first_move));
            }
        } else {
            if score < best.score {
                best = ScoredMove::new(score, mv);
                beta = score;
            }
            if best.score <= alpha {
                return Ok(with_move(best, first_move));
            }
        }
    }

    Ok(with_move(best, first_move))
}

/// No child beat the inherited bound: report the first legal move so callers
/// never receive the sentinel while moves exist. The score is unchanged.
#[inline]
fn with_move(mut result: ScoredMove, fallback: Move) -> ScoredMove {
    if result.best_move.is_none() {
        result.best_move = fallback;
    }
    result
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{alpha_beta, alpha_beta_root};
    use crate::errors::SearchError;
    use crate::game_state::game_state::GameState;
    use crate::game_state::game_types::{Move, MovementRule};
    use crate::search::board_scoring::{ImprovedScore, OffensiveDeeper};
    use crate::search::minimax::minimax;
    use crate::search::time_budget::Unlimited;
    use crate::utils::board_parser::parse_board;
    use crate::utils::test_positions::{coarse_score, player1_context, random_position};

    #[test]
    fn matches_minimax_score_on_random_positions() {
        let mut rng = StdRng::seed_from_u64(7);
        for trial in 0..40 {
            let rule = if trial % 2 == 0 {
                MovementRule::King
            } else {
                MovementRule::Knight
            };
            let plies = 2 + trial % 9;
            let board = random_position(&mut rng, 5, rule, plies);

            for depth in 0..=3 {
                let mut mm = player1_context(&coarse_score, &Unlimited, 10.0);
                let mut ab = player1_context(&coarse_score, &Unlimited, 10.0);
                let expected = minimax(&mut mm, &board, depth, true).expect("minimax");
                let got = alpha_beta_root(&mut ab, &board, depth).expect("alpha-beta");

                assert_eq!(
                    got.score, expected.score,
                    "trial {trial} depth {depth} disagrees"
                );
                assert!(
                    ab.nodes() <= mm.nodes(),
                    "alpha-beta visited {} nodes, minimax {}",
                    ab.nodes(),
                    mm.nodes()
                );
                if !board.active_legal_moves().is_empty() && depth > 0 {
                    assert!(board.active_legal_moves().contains(&got.best_move));
                }
            }
        }
    }

    #[test]
    fn pruning_skips_work_on_open_boards() {
        let board = parse_board(
            ". . . . .\n. 1 . . .\n. . . . .\n. . . 2 .\n. . . . .",
            MovementRule::King,
        )
        .expect("board");
        let mut mm = player1_context(&OffensiveDeeper, &Unlimited, 10.0);
        let mut ab = player1_context(&OffensiveDeeper, &Unlimited, 10.0);

        let expected = minimax(&mut mm, &board, 3, true).expect("minimax");
        let got = alpha_beta_root(&mut ab, &board, 3).expect("alpha-beta");

        assert_eq!(got.score, expected.score);
        assert!(ab.nodes() < mm.nodes());
    }

    #[test]
    fn root_children_agree_at_depth_two_on_toy_grid() {
        let board = parse_board("1 . .\n. . .\n. . 2", MovementRule::King).expect("board");
        for mv in board.active_legal_moves() {
            let child = board.forecast(mv).expect("forecast");
            let mut mm = player1_context(&ImprovedScore, &Unlimited, 10.0);
            let mut ab = player1_context(&ImprovedScore, &Unlimited, 10.0);

            let expected = minimax(&mut mm, &child, 2, false).expect("minimax");
            let got = alpha_beta(
                &mut ab,
                &child,
                2,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
            )
            .expect("alpha-beta");

            assert_eq!(got.score, expected.score, "root move {mv} disagrees");
        }
    }

    #[test]
    fn depth_zero_returns_sentinel() {
        let board = parse_board("1 . .\n. . .\n. . 2", MovementRule::King).expect("board");
        let mut ab = player1_context(&ImprovedScore, &Unlimited, 10.0);

        let result = alpha_beta_root(&mut ab, &board, 0).expect("alpha-beta");

        assert_eq!(result.best_move, Move::NONE);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn all_losing_root_still_reports_a_move() {
        // Player 1's only step boxes it in; player 2 still has room.
        let board = parse_board("1 . X\nX X X\n. 2 .", MovementRule::King).expect("board");
        let mut ab = player1_context(&ImprovedScore, &Unlimited, 10.0);

        let result = alpha_beta_root(&mut ab, &board, 3).expect("alpha-beta");

        assert_eq!(result.score, f64::NEG_INFINITY);
        assert_eq!(result.best_move, Move::new(0, 1));
    }

    #[test]
    fn below_threshold_times_out_immediately() {
        let board = parse_board("1 . .\n. . .\n. . 2", MovementRule::King).expect("board");
        let budget = || 5.0;
        let mut ab = player1_context(&ImprovedScore, &budget, 10.0);

        let err = alpha_beta_root(&mut ab, &board, 2).expect_err("no time left");

        assert_eq!(err, SearchError::Timeout);
        assert_eq!(ab.nodes(), 0);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "malformed window")]
    fn inverted_window_is_a_defect() {
        let board = parse_board("1 . .\n. . .\n. . 2", MovementRule::King).expect("board");
        let mut ab = player1_context(&ImprovedScore, &Unlimited, 10.0);
        let _ = alpha_beta(&mut ab, &board, 1, 1.0, -1.0, true);
    }
}
