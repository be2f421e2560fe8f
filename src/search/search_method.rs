//! Selection between the two root searches.

use std::fmt;
use std::str::FromStr;

use crate::errors::SearchOutcome;
use crate::game_state::game_state::GameState;
use crate::search::alpha_beta::alpha_beta_root;
use crate::search::minimax::minimax;
use crate::search::scored_move::ScoredMove;
use crate::search::search_context::SearchContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMethod {
    #[default]
    Minimax,
    AlphaBeta,
}

impl SearchMethod {
    /// Depth-limited search from the root, which is always a maximizing layer
    /// for the context's player.
    pub fn search<G: GameState>(
        self,
        ctx: &mut SearchContext<'_, G>,
        state: &G,
        depth: u32,
    ) -> SearchOutcome<ScoredMove> {
        match self {
            SearchMethod::Minimax => minimax(ctx, state, depth, true),
            SearchMethod::AlphaBeta => alpha_beta_root(ctx, state, depth),
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMethod::Minimax => f.write_str("minimax"),
            SearchMethod::AlphaBeta => f.write_str("alphabeta"),
        }
    }
}

impl FromStr for SearchMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(SearchMethod::Minimax),
            "alphabeta" | "alpha_beta" | "alpha-beta" => Ok(SearchMethod::AlphaBeta),
            _ => Err(format!("unknown search method '{s}'")),
        }
    }
}
