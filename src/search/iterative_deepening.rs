//! Iterative deepening under a polled time budget.
//!
//! The driver runs a depth-limited search at depth 0, 1, 2, ... and keeps the
//! move of the last iteration that finished. A `SearchError::Timeout` raised
//! anywhere inside an iteration discards that iteration; every other error is
//! returned to the caller untouched.

use log::{debug, trace};

use crate::errors::{SearchError, SearchOutcome};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Move;
use crate::search::scored_move::ScoredMove;
use crate::search::time_budget::TimeBudget;
use crate::tables::opening_book::OpeningPolicy;

pub const DEFAULT_TIMEOUT_THRESHOLD_MS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Search aborts once fewer than this many milliseconds remain. Must
    /// exceed the cost of the most expensive single node.
    pub timeout_threshold_ms: f64,
    /// Deepest iteration to run; `None` deepens until time runs out.
    pub max_depth: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_threshold_ms: DEFAULT_TIMEOUT_THRESHOLD_MS,
            max_depth: None,
        }
    }
}

/// Where the returned move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    NoLegalMoves,
    Opening,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepeningResult {
    pub best_move: Move,
    /// Score of the last completed iteration.
    pub best_score: Option<f64>,
    pub completed_depth: Option<u32>,
    /// An iteration was abandoned because the budget ran out.
    pub timed_out: bool,
    pub source: MoveSource,
}

impl DeepeningResult {
    const fn immediate(best_move: Move, source: MoveSource) -> Self {
        Self {
            best_move,
            best_score: None,
            completed_depth: None,
            timed_out: false,
            source,
        }
    }
}

/// Choose a move for `state`.
///
/// `search_fn(state, depth)` runs one complete depth-limited search. It is
/// never invoked when there are no legal moves or the opening rule applies.
/// If the first iteration cannot finish, the sentinel `Move::NONE` is
/// returned.
pub fn iterative_deepening<G, F>(
    state: &G,
    legal_moves: &[Move],
    opening: &OpeningPolicy,
    time_budget: &dyn TimeBudget,
    config: SearchConfig,
    mut search_fn: F,
) -> SearchOutcome<DeepeningResult>
where
    G: GameState,
    F: FnMut(&G, u32) -> SearchOutcome<ScoredMove>,
{
    if let Some(decided) = decide_without_search(state, legal_moves, opening) {
        return Ok(decided);
    }

    let mut result = DeepeningResult::immediate(Move::NONE, MoveSource::Search);
    let mut depth = 0u32;

    loop {
        if config.max_depth.is_some_and(|max| depth > max) {
            break;
        }
        if time_budget.time_left_ms() <= config.timeout_threshold_ms {
            break;
        }

        match search_fn(state, depth) {
            Ok(scored) => {
                debug!(
                    "depth {depth} complete: move {} score {}",
                    scored.best_move, scored.score
                );
                result.best_move = scored.best_move;
                result.best_score = Some(scored.score);
                result.completed_depth = Some(depth);
            }
            Err(SearchError::Timeout) => {
                debug!(
                    "depth {depth} abandoned on timeout, keeping {}",
                    result.best_move
                );
                result.timed_out = true;
                break;
            }
            Err(err) => return Err(err),
        }

        depth += 1;
    }

    Ok(result)
}

/// Single search at a fixed `depth`, with the same no-move and opening
/// handling as `iterative_deepening`. A timeout yields the sentinel.
pub fn fixed_depth<G, F>(
    state: &G,
    legal_moves: &[Move],
    opening: &OpeningPolicy,
    depth: u32,
    search_fn: F,
) -> SearchOutcome<DeepeningResult>
where
    G: GameState,
    F: FnOnce(&G, u32) -> SearchOutcome<ScoredMove>,
{
    if let Some(decided) = decide_without_search(state, legal_moves, opening) {
        return Ok(decided);
    }

    let mut result = DeepeningResult::immediate(Move::NONE, MoveSource::Search);
    match search_fn(state, depth) {
        Ok(scored) => {
            result.best_move = scored.best_move;
            result.best_score = Some(scored.score);
            result.completed_depth = Some(depth);
        }
        Err(SearchError::Timeout) => {
            debug!("fixed depth {depth} abandoned on timeout");
            result.timed_out = true;
        }
        Err(err) => return Err(err),
    }
    Ok(result)
}

fn decide_without_search<G: GameState>(
    state: &G,
    legal_moves: &[Move],
    opening: &OpeningPolicy,
) -> Option<DeepeningResult> {
    if legal_moves.is_empty() {
        return Some(DeepeningResult::immediate(Move::NONE, MoveSource::NoLegalMoves));
    }
    let opening_move = opening.choose(state, legal_moves)?;
    trace!("opening rule plays {opening_move}");
    Some(DeepeningResult::immediate(opening_move, MoveSource::Opening))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::{fixed_depth, iterative_deepening, MoveSource, SearchConfig};
    use crate::errors::SearchError;
    use crate::game_state::game_state::GameState;
    use crate::game_state::game_types::{Move, MovementRule, PlayerId};
    use crate::game_state::isolation_board::IsolationBoard;
    use crate::search::alpha_beta::alpha_beta;
    use crate::search::board_scoring::ImprovedScore;
    use crate::search::minimax::minimax;
    use crate::search::scored_move::ScoredMove;
    use crate::search::search_method::SearchMethod;
    use crate::search::time_budget::Unlimited;
    use crate::tables::opening_book::OpeningPolicy;
    use crate::utils::board_parser::parse_board;
    use crate::utils::test_positions::player1_context;

    fn toy_board() -> IsolationBoard {
        parse_board("1 . .\n. . .\n. . 2", MovementRule::King).expect("board")
    }

    fn must_not_search(_: &IsolationBoard, _: u32) -> crate::errors::SearchOutcome<ScoredMove> {
        panic!("search must not run");
    }

    #[test]
    fn no_legal_moves_returns_sentinel() {
        let board = parse_board("1 2", MovementRule::King).expect("board");
        let result = iterative_deepening(
            &board,
            &[],
            &OpeningPolicy::default(),
            &Unlimited,
            SearchConfig::default(),
            must_not_search,
        )
        .expect("driver should run");

        assert_eq!(result.best_move, Move::new(-1, -1));
        assert_eq!(result.source, MoveSource::NoLegalMoves);
    }

    #[test]
    fn opening_plies_bypass_search() {
        let board = IsolationBoard::default();
        let legal = board.active_legal_moves();
        let result = iterative_deepening(
            &board,
            &legal,
            &OpeningPolicy::default(),
            &Unlimited,
            SearchConfig::default(),
            must_not_search,
        )
        .expect("driver should run");
        assert_eq!(result.best_move, Move::new(3, 3));
        assert_eq!(result.source, MoveSource::Opening);

        let mut board = IsolationBoard::default();
        board.apply_move(Move::new(3, 3)).expect("placement");
        let legal = board.active_legal_moves();
        let result = iterative_deepening(
            &board,
            &legal,
            &OpeningPolicy::default(),
            &Unlimited,
            SearchConfig::default(),
            must_not_search,
        )
        .expect("driver should run");
        assert_eq!(result.best_move, Move::new(3, 2));
    }

    #[test]
    fn deepens_until_max_depth() {
        let board = toy_board();
        let legal = board.active_legal_moves();
        let depths = Cell::new(Vec::new());
        let result = iterative_deepening(
            &board,
            &legal,
            &OpeningPolicy::disabled(),
            &Unlimited,
            SearchConfig {
                max_depth: Some(3),
                ..SearchConfig::default()
            },
            |_, depth| {
                let mut seen = depths.take();
                seen.push(depth);
                depths.set(seen);
                Ok(ScoredMove::new(f64::from(depth), Move::new(0, depth as i32)))
            },
        )
        .expect("driver should run");

        assert_eq!(depths.take(), vec![0, 1, 2, 3]);
        assert_eq!(result.completed_depth, Some(3));
        assert_eq!(result.best_move, Move::new(0, 3));
        assert!(!result.timed_out);
    }

    #[test]
    fn timeout_keeps_last_completed_depth() {
        let board = toy_board();
        let legal = board.active_legal_moves();
        let result = iterative_deepening(
            &board,
            &legal,
            &OpeningPolicy::disabled(),
            &Unlimited,
            SearchConfig::default(),
            |_, depth| {
                if depth < 3 {
                    Ok(ScoredMove::new(1.0, legal[depth as usize]))
                } else {
                    Err(SearchError::Timeout)
                }
            },
        )
        .expect("driver should run");

        assert!(result.timed_out);
        assert_eq!(result.completed_depth, Some(2));
        assert_eq!(result.best_move, legal[2]);
    }

    #[test]
    fn timeout_before_any_depth_returns_sentinel() {
        let board = toy_board();
        let legal = board.active_legal_moves();
        let result = iterative_deepening(
            &board,
            &legal,
            &OpeningPolicy::disabled(),
            &Unlimited,
            SearchConfig::default(),
            |_, _| Err(SearchError::Timeout),
        )
        .expect("timeout is not an error");

        assert_eq!(result.best_move, Move::NONE);
        assert_eq!(result.completed_depth, None);
    }

    #[test]
    fn exhausted_budget_skips_search() {
        let board = toy_board();
        let legal = board.active_legal_moves();
        let budget = || 3.0;
        let result = iterative_deepening(
            &board,
            &legal,
            &OpeningPolicy::disabled(),
            &budget,
            SearchConfig::default(),
            must_not_search,
        )
        .expect("driver should run");

        assert_eq!(result.best_move, Move::NONE);
        assert!(!result.timed_out);
    }

    #[test]
    fn hard_errors_propagate() {
        let board = toy_board();
        let legal = board.active_legal_moves();
        let err = iterative_deepening(
            &board,
            &legal,
            &OpeningPolicy::disabled(),
            &Unlimited,
            SearchConfig::default(),
            |_, _| Err(SearchError::Evaluation("bad input".to_owned())),
        )
        .expect_err("evaluation errors are fatal");

        assert!(matches!(err, SearchError::Evaluation(_)));
    }

    #[test]
    fn fixed_depth_runs_exactly_once() {
        let board = toy_board();
        let legal = board.active_legal_moves();
        let calls = Cell::new(0);
        let result = fixed_depth(&board, &legal, &OpeningPolicy::disabled(), 4, |_, depth| {
            calls.set(calls.get() + 1);
            assert_eq!(depth, 4);
            Ok(ScoredMove::new(2.0, legal[1]))
        })
        .expect("search should run");

        assert_eq!(calls.get(), 1);
        assert_eq!(result.completed_depth, Some(4));
        assert_eq!(result.best_move, legal[1]);
    }

    #[test]
    fn fixed_depth_timeout_returns_sentinel() {
        let board = toy_board();
        let legal = board.active_legal_moves();
        let result = fixed_depth(&board, &legal, &OpeningPolicy::disabled(), 4, |_, _| {
            Err(SearchError::Timeout)
        })
        .expect("timeout is not an error");

        assert!(result.timed_out);
        assert_eq!(result.best_move, Move::NONE);
    }

    #[test]
    fn toy_grid_driver_picks_a_depth_two_maximizer() {
        let board = toy_board();
        let legal = board.active_legal_moves();

        let mut root_scores = Vec::new();
        for &mv in &legal {
            let child = board.forecast(mv).expect("forecast");
            let mut mm = player1_context(&ImprovedScore, &Unlimited, 10.0);
            let mut ab = player1_context(&ImprovedScore, &Unlimited, 10.0);
            let mm_score = minimax(&mut mm, &child, 1, false).expect("minimax").score;
            let ab_score = alpha_beta(&mut ab, &child, 1, f64::NEG_INFINITY, f64::INFINITY, false)
                .expect("alpha-beta")
                .score;
            assert_eq!(mm_score, ab_score);
            root_scores.push((mv, mm_score));
        }
        let best_score = root_scores
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);

        for method in [SearchMethod::Minimax, SearchMethod::AlphaBeta] {
            let mut ctx = player1_context(&ImprovedScore, &Unlimited, 10.0);
            let result = iterative_deepening(
                &board,
                &legal,
                &OpeningPolicy::disabled(),
                &Unlimited,
                SearchConfig {
                    max_depth: Some(2),
                    ..SearchConfig::default()
                },
                |state, depth| method.search(&mut ctx, state, depth),
            )
            .expect("driver should run");

            assert_eq!(result.completed_depth, Some(2));
            assert_eq!(result.best_score, Some(best_score));
            let chosen = root_scores
                .iter()
                .find(|(mv, _)| *mv == result.best_move)
                .expect("driver picks a legal root move");
            assert_eq!(chosen.1, best_score, "{method} picked a non-maximizing move");
            assert_eq!(ctx.player(), PlayerId::Player1);
        }
    }
}
