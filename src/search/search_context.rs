//! Per-search state shared by minimax and alpha-beta: whose perspective leaf
//! scores use, the time budget polled at each node, and a visit counter.

use crate::errors::{SearchError, SearchOutcome};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Move, PlayerId};
use crate::search::board_scoring::Evaluator;
use crate::search::scored_move::ScoredMove;
use crate::search::time_budget::TimeBudget;

pub struct SearchContext<'a, G: GameState> {
    player: PlayerId,
    evaluator: &'a dyn Evaluator<G>,
    time_budget: &'a dyn TimeBudget,
    timeout_threshold_ms: f64,
    nodes: u64,
}

impl<'a, G: GameState> SearchContext<'a, G> {
    pub fn new(
        player: PlayerId,
        evaluator: &'a dyn Evaluator<G>,
        time_budget: &'a dyn TimeBudget,
        timeout_threshold_ms: f64,
    ) -> Self {
        Self {
            player,
            evaluator,
            time_budget,
            timeout_threshold_ms,
            nodes: 0,
        }
    }

    #[inline]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Nodes entered so far, across every search run with this context.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn time_left_ms(&self) -> f64 {
        self.time_budget.time_left_ms()
    }

    #[inline]
    pub fn timeout_threshold_ms(&self) -> f64 {
        self.timeout_threshold_ms
    }

    /// Poll the clock on entry to a node. Below the threshold the whole
    /// in-progress search unwinds with `SearchError::Timeout`.
    #[inline]
    pub(crate) fn enter_node(&mut self) -> SearchOutcome<()> {
        if self.time_budget.time_left_ms() < self.timeout_threshold_ms {
            return Err(SearchError::Timeout);
        }
        self.nodes += 1;
        Ok(())
    }

    /// Terminal result: the state's own evaluation and no move.
    #[inline]
    pub(crate) fn leaf(&self, state: &G) -> SearchOutcome<ScoredMove> {
        let score = self.evaluator.score(state, self.player)?;
        Ok(ScoredMove::new(score, Move::NONE))
    }
}
