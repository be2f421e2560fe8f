//! Agent abstraction used by the match runner.
//!
//! Every agent answers the same question: given a state, its legal moves and
//! a "milliseconds left" callback, which square to take. Returning after the
//! callback goes negative forfeits the game.

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Move;
use crate::search::time_budget::TimeBudget;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    /// `Move::NONE` when the agent passes.
    pub best_move: Move,
    pub info_lines: Vec<String>,
}

impl Default for EngineOutput {
    fn default() -> Self {
        Self {
            best_move: Move::NONE,
            info_lines: Vec::new(),
        }
    }
}

pub trait Engine<G: GameState> {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn get_move(
        &mut self,
        state: &G,
        legal_moves: &[Move],
        time_left: &dyn TimeBudget,
    ) -> Result<EngineOutput, String>;
}
