//! Search-based agent: iterative deepening (or a single fixed-depth search)
//! over minimax or alpha-beta, scored by a configurable heuristic.
//!
//! Options accepted by `set_option`:
//! - `Method`: `minimax` | `alphabeta`
//! - `Iterative`: `true` | `false`
//! - `SearchDepth`: depth used when not iterative
//! - `MaxDepth`: deepest iterative depth, `none` for unbounded
//! - `TimeoutMs`: abort threshold in milliseconds
//! - `Heuristic`: any `HeuristicKind` name
//! - `OwnBook`: enable the opening rule

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::SearchOutcome;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Move;
use crate::search::board_scoring::{Evaluator, HeuristicKind};
use crate::search::iterative_deepening::{
    fixed_depth, iterative_deepening, DeepeningResult, SearchConfig, DEFAULT_TIMEOUT_THRESHOLD_MS,
};
use crate::search::search_context::SearchContext;
use crate::search::search_method::SearchMethod;
use crate::search::time_budget::TimeBudget;
use crate::tables::opening_book::OpeningPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentConfig {
    pub search_depth: u32,
    pub iterative: bool,
    pub method: SearchMethod,
    pub timeout_ms: f64,
    pub max_depth: Option<u32>,
    pub heuristic: HeuristicKind,
    pub opening: OpeningPolicy,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            iterative: true,
            method: SearchMethod::Minimax,
            timeout_ms: DEFAULT_TIMEOUT_THRESHOLD_MS,
            max_depth: None,
            heuristic: HeuristicKind::default(),
            opening: OpeningPolicy::default(),
        }
    }
}

impl AgentConfig {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            timeout_threshold_ms: self.timeout_ms,
            max_depth: self.max_depth,
        }
    }
}

pub struct CustomEngine<G: GameState> {
    config: AgentConfig,
    evaluator: Box<dyn Evaluator<G>>,
    last_nodes: u64,
}

impl<G: GameState + 'static> CustomEngine<G> {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            evaluator: config.heuristic.evaluator(),
            config,
            last_nodes: 0,
        }
    }

    /// Use a caller-supplied evaluator instead of the configured heuristic.
    pub fn with_evaluator(config: AgentConfig, evaluator: Box<dyn Evaluator<G>>) -> Self {
        Self {
            config,
            evaluator,
            last_nodes: 0,
        }
    }
}

impl<G: GameState> CustomEngine<G> {
    #[inline]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Nodes visited while choosing the previous move.
    #[inline]
    pub fn last_nodes(&self) -> u64 {
        self.last_nodes
    }

    /// Run the configured search for the active player of `state`.
    pub fn search(
        &mut self,
        state: &G,
        legal_moves: &[Move],
        time_left: &dyn TimeBudget,
    ) -> SearchOutcome<DeepeningResult> {
        let config = self.config;
        let mut ctx = SearchContext::new(
            state.active_player(),
            self.evaluator.as_ref(),
            time_left,
            config.timeout_ms,
        );
        let method = config.method;

        let result = if config.iterative {
            iterative_deepening(
                state,
                legal_moves,
                &config.opening,
                time_left,
                config.search_config(),
                |s, depth| method.search(&mut ctx, s, depth),
            )
        } else {
            fixed_depth(
                state,
                legal_moves,
                &config.opening,
                config.search_depth,
                |s, depth| method.search(&mut ctx, s, depth),
            )
        };

        self.last_nodes = ctx.nodes();
        result
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("invalid boolean '{value}'")),
    }
}

impl<G: GameState + 'static> Engine<G> for CustomEngine<G> {
    fn name(&self) -> &str {
        "custom"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        if name.eq_ignore_ascii_case("Method") {
            self.config.method = value.parse()?;
        } else if name.eq_ignore_ascii_case("Iterative") {
            self.config.iterative = parse_bool(value)?;
        } else if name.eq_ignore_ascii_case("SearchDepth") {
            self.config.search_depth = value
                .parse()
                .map_err(|_| format!("invalid SearchDepth value '{value}'"))?;
        } else if name.eq_ignore_ascii_case("MaxDepth") {
            self.config.max_depth = if value.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid MaxDepth value '{value}'"))?,
                )
            };
        } else if name.eq_ignore_ascii_case("TimeoutMs") {
            let parsed: f64 = value
                .parse()
                .map_err(|_| format!("invalid TimeoutMs value '{value}'"))?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(format!("TimeoutMs must be a non-negative number, got '{value}'"));
            }
            self.config.timeout_ms = parsed;
        } else if name.eq_ignore_ascii_case("Heuristic") {
            self.config.heuristic = value.parse()?;
            self.evaluator = self.config.heuristic.evaluator();
        } else if name.eq_ignore_ascii_case("OwnBook") {
            self.config.opening.enabled = parse_bool(value)?;
        } else {
            return Err(format!("unknown option '{name}'"));
        }
        Ok(())
    }

    fn get_move(
        &mut self,
        state: &G,
        legal_moves: &[Move],
        time_left: &dyn TimeBudget,
    ) -> Result<EngineOutput, String> {
        let result = self
            .search(state, legal_moves, time_left)
            .map_err(|e| e.to_string())?;

        let mut out = EngineOutput {
            best_move: result.best_move,
            ..EngineOutput::default()
        };
        out.info_lines.push(format!(
            "info source {:?} depth {} score {} nodes {} timed_out {}",
            result.source,
            result
                .completed_depth
                .map_or_else(|| "none".to_owned(), |d| d.to_string()),
            result
                .best_score
                .map_or_else(|| "none".to_owned(), |s| s.to_string()),
            self.last_nodes,
            result.timed_out
        ));
        out.info_lines.push(format!(
            "info string custom_engine method {} heuristic {} iterative {}",
            self.config.method, self.config.heuristic, self.config.iterative
        ));
        Ok(out)
    }
}
