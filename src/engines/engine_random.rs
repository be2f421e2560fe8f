//! Uniform random agent.
//!
//! Baseline opponent for match series and a cheap stand-in in harness tests.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Move;
use crate::search::time_budget::TimeBudget;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GameState> Engine<G> for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn get_move(
        &mut self,
        _state: &G,
        legal_moves: &[Move],
        _time_left: &dyn TimeBudget,
    ) -> Result<EngineOutput, String> {
        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        if let Some(picked) = legal_moves.choose(&mut self.rng) {
            out.best_move = *picked;
        }
        Ok(out)
    }
}
