//! `isolation-match`: play a series of Isolation games between two agents.
//!
//! `RUST_LOG=info cargo run --release -- --games 20 --a-method alphabeta`

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::error;

use isolation_agent::engines::engine_custom::{AgentConfig, CustomEngine};
use isolation_agent::engines::engine_greedy::GreedyEngine;
use isolation_agent::engines::engine_random::RandomEngine;
use isolation_agent::engines::engine_trait::Engine;
use isolation_agent::game_state::game_types::MovementRule;
use isolation_agent::game_state::isolation_board::{IsolationBoard, DEFAULT_BOARD_SIZE};
use isolation_agent::search::board_scoring::HeuristicKind;
use isolation_agent::search::search_method::SearchMethod;
use isolation_agent::utils::engine_match_harness::{
    play_match_series, MatchConfig, MatchSeriesConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    Custom,
    Greedy,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RuleArg {
    Knight,
    King,
}

impl From<RuleArg> for MovementRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Knight => MovementRule::Knight,
            RuleArg::King => MovementRule::King,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Run an Isolation match series between two agents")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: u16,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Wall-clock budget per turn.
    #[arg(long, default_value_t = 150)]
    time_ms: u64,
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: i32,
    #[arg(long, value_enum, default_value_t = RuleArg::Knight)]
    rule: RuleArg,
    #[arg(long, default_value_t = 2)]
    random_opening_plies: u8,

    #[arg(long, value_enum, default_value_t = AgentKind::Custom)]
    a: AgentKind,
    #[arg(long, default_value_t = SearchMethod::AlphaBeta)]
    a_method: SearchMethod,
    #[arg(long, default_value_t = HeuristicKind::OffensiveDeeper)]
    a_heuristic: HeuristicKind,
    #[arg(long)]
    a_fixed_depth: Option<u32>,

    #[arg(long, value_enum, default_value_t = AgentKind::Custom)]
    b: AgentKind,
    #[arg(long, default_value_t = SearchMethod::Minimax)]
    b_method: SearchMethod,
    #[arg(long, default_value_t = HeuristicKind::Improved)]
    b_heuristic: HeuristicKind,
    #[arg(long)]
    b_fixed_depth: Option<u32>,
}

fn build_agent(
    kind: AgentKind,
    method: SearchMethod,
    heuristic: HeuristicKind,
    fixed_depth: Option<u32>,
) -> Box<dyn Engine<IsolationBoard>> {
    match kind {
        AgentKind::Custom => {
            let defaults = AgentConfig::default();
            Box::new(CustomEngine::<IsolationBoard>::new(AgentConfig {
                method,
                heuristic,
                iterative: fixed_depth.is_none(),
                search_depth: fixed_depth.unwrap_or(defaults.search_depth),
                ..defaults
            }))
        }
        AgentKind::Greedy => Box::new(GreedyEngine::<IsolationBoard>::new(heuristic)),
        AgentKind::Random => Box::new(RandomEngine::new()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = MatchSeriesConfig {
        games: args.games,
        base_seed: args.seed,
        per_game: MatchConfig {
            width: args.size,
            height: args.size,
            rule: args.rule.into(),
            time_limit_ms: args.time_ms,
            random_opening_plies: args.random_opening_plies,
        },
    };

    let stats = play_match_series(
        || build_agent(args.a, args.a_method, args.a_heuristic, args.a_fixed_depth),
        || build_agent(args.b, args.b_method, args.b_heuristic, args.b_fixed_depth),
        config,
    );

    match stats {
        Ok(stats) => {
            println!("{}", stats.report());
            println!("outcomes: {:?}", stats.outcomes);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("match series failed: {e}");
            ExitCode::FAILURE
        }
    }
}
