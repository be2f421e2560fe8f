//! Crate root module declarations for the Isolation search agent.
//!
//! Exposes the game model, the adversarial search core, the agents built on
//! top of it, and the match tooling so the binary, tests and benches can
//! import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod game_state;
    pub mod game_types;
    pub mod isolation_board;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod minimax;
    pub mod scored_move;
    pub mod search_context;
    pub mod search_method;
    pub mod time_budget;
}

pub mod tables {
    pub mod opening_book;
}

pub mod engines {
    pub mod engine_custom;
    pub mod engine_greedy;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod board_parser;
    pub mod engine_match_harness;
    pub mod render_game_state;
    #[cfg(test)]
    pub mod test_positions;
}
