//! One-ply greedy agent: scores each successor with its evaluator and plays
//! the best one, breaking ties at random.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Move;
use crate::search::board_scoring::{Evaluator, HeuristicKind};
use crate::search::time_budget::TimeBudget;

pub struct GreedyEngine<G: GameState> {
    heuristic: HeuristicKind,
    evaluator: Box<dyn Evaluator<G>>,
    rng: StdRng,
}

impl<G: GameState + 'static> GreedyEngine<G> {
    pub fn new(heuristic: HeuristicKind) -> Self {
        Self {
            heuristic,
            evaluator: heuristic.evaluator(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(heuristic: HeuristicKind, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(heuristic)
        }
    }
}

impl<G: GameState + 'static> Engine<G> for GreedyEngine<G> {
    fn name(&self) -> &str {
        "greedy"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Heuristic") {
            self.heuristic = value.parse()?;
            self.evaluator = self.heuristic.evaluator();
        }
        Ok(())
    }

    fn get_move(
        &mut self,
        state: &G,
        legal_moves: &[Move],
        _time_left: &dyn TimeBudget,
    ) -> Result<EngineOutput, String> {
        let mut out = EngineOutput::default();
        if legal_moves.is_empty() {
            return Ok(out);
        }

        let player = state.active_player();
        let mut best_value = f64::NEG_INFINITY;
        let mut best_moves = Vec::new();

        for &mv in legal_moves {
            let next = state.forecast(mv).map_err(|e| e.to_string())?;
            let value = self
                .evaluator
                .score(&next, player)
                .map_err(|e| e.to_string())?;

            if value > best_value || best_moves.is_empty() {
                best_value = value;
                best_moves.clear();
                best_moves.push(mv);
            } else if value == best_value {
                best_moves.push(mv);
            }
        }

        let picked = best_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or("failed to choose greedy best move")?;

        out.info_lines.push(format!(
            "info string greedy_engine heuristic {} score {}",
            self.heuristic, best_value
        ));
        out.best_move = *picked;
        Ok(out)
    }
}
