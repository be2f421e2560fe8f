//! Minimal head-to-head match runner for local testing.
//!
//! Plays two `Engine` implementations against each other on an Isolation
//! board with a wall-clock budget per turn and an optional seeded random
//! placement prefix. A player loses when it is stuck, returns after its clock
//! went negative, or answers with a move that is not legal.

use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::engines::engine_trait::Engine;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Move, MovementRule, PlayerId};
use crate::game_state::isolation_board::{IsolationBoard, DEFAULT_BOARD_SIZE};
use crate::search::time_budget::{TimeBudget, TurnClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    NoLegalMoves,
    Timeout,
    IllegalMove(Move),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub width: i32,
    pub height: i32,
    pub rule: MovementRule,
    pub time_limit_ms: u64,
    /// Random placements applied before the engines take over, one per
    /// player at most.
    pub random_opening_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_SIZE,
            height: DEFAULT_BOARD_SIZE,
            rule: MovementRule::Knight,
            time_limit_ms: 150,
            random_opening_plies: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub winner: PlayerId,
    pub reason: LossReason,
    pub final_board: IsolationBoard,
    pub opening_moves: Vec<Move>,
    pub played_moves: Vec<Move>,
    pub move_counts: [u32; 2],
    pub total_time_ns: [u128; 2],
}

/// Which of the two series contestants an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contestant {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesOutcome {
    pub winner: Contestant,
    pub winner_seat: PlayerId,
    pub reason: LossReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub a_wins: u16,
    pub b_wins: u16,
    pub timeouts: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub a_moves: u32,
    pub b_moves: u32,
    pub a_total_time_ns: u128,
    pub b_total_time_ns: u128,
    pub a_avg_move_time_ms: f64,
    pub b_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn win_rate_a(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.a_wins) / f64::from(self.games)
        }
    }

    pub fn report(&self) -> String {
        format!(
            "games={} a_wins={} b_wins={} timeouts={} a_win_rate={:.1}% a_avg_ms={:.3} b_avg_ms={:.3}",
            self.games,
            self.a_wins,
            self.b_wins,
            self.timeouts,
            self.win_rate_a() * 100.0,
            self.a_avg_move_time_ms,
            self.b_avg_move_time_ms
        )
    }
}

/// Play one seeded match. `first` moves first as `PlayerId::Player1`.
pub fn play_match(
    first: &mut dyn Engine<IsolationBoard>,
    second: &mut dyn Engine<IsolationBoard>,
    seed: u64,
    config: MatchConfig,
) -> Result<MatchResult, String> {
    let mut board =
        IsolationBoard::new(config.width, config.height, config.rule).map_err(|e| e.to_string())?;
    first.new_game();
    second.new_game();

    let opening_moves = apply_seeded_random_opening(&mut board, seed, config.random_opening_plies)?;
    let mut played_moves = Vec::new();
    let mut move_counts = [0u32; 2];
    let mut total_time_ns = [0u128; 2];

    loop {
        let active = board.active_player();
        let legal = board.active_legal_moves();

        let loss = if legal.is_empty() {
            Some(LossReason::NoLegalMoves)
        } else {
            let engine: &mut dyn Engine<IsolationBoard> = match active {
                PlayerId::Player1 => &mut *first,
                PlayerId::Player2 => &mut *second,
            };
            let clock = TurnClock::from_millis(config.time_limit_ms);
            let started_at = Instant::now();
            let out = engine.get_move(&board, &legal, &clock)?;
            let time_left = clock.time_left_ms();

            move_counts[active.index()] += 1;
            total_time_ns[active.index()] += started_at.elapsed().as_nanos();
            for line in &out.info_lines {
                debug!("{} {}: {line}", engine.name(), active);
            }

            if time_left < 0.0 {
                Some(LossReason::Timeout)
            } else if !legal.contains(&out.best_move) {
                Some(LossReason::IllegalMove(out.best_move))
            } else {
                board.apply_move(out.best_move).map_err(|e| e.to_string())?;
                played_moves.push(out.best_move);
                debug!(
                    "{active} plays {} with {time_left:.1} ms left",
                    out.best_move
                );
                None
            }
        };

        if let Some(reason) = loss {
            let winner = active.opposite();
            info!(
                "{winner} wins after {} plies: {active} lost by {reason:?}",
                board.ply_count()
            );
            return Ok(MatchResult {
                winner,
                reason,
                final_board: board,
                opening_moves,
                played_moves,
                move_counts,
                total_time_ns,
            });
        }
    }
}

/// Play a series with seats alternating every game so neither contestant
/// always moves first.
pub fn play_match_series<FA, FB>(
    factory_a: FA,
    factory_b: FB,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, String>
where
    FA: Fn() -> Box<dyn Engine<IsolationBoard>>,
    FB: Fn() -> Box<dyn Engine<IsolationBoard>>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };

    for i in 0..config.games {
        let a_moves_first = i % 2 == 0;
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut engine_a = factory_a();
        let mut engine_b = factory_b();

        let result = if a_moves_first {
            play_match(engine_a.as_mut(), engine_b.as_mut(), seed, config.per_game)?
        } else {
            play_match(engine_b.as_mut(), engine_a.as_mut(), seed, config.per_game)?
        };

        let (a_seat, b_seat) = if a_moves_first {
            (PlayerId::Player1, PlayerId::Player2)
        } else {
            (PlayerId::Player2, PlayerId::Player1)
        };
        stats.a_moves += result.move_counts[a_seat.index()];
        stats.b_moves += result.move_counts[b_seat.index()];
        stats.a_total_time_ns += result.total_time_ns[a_seat.index()];
        stats.b_total_time_ns += result.total_time_ns[b_seat.index()];

        let winner = if result.winner == a_seat {
            stats.a_wins += 1;
            Contestant::A
        } else {
            stats.b_wins += 1;
            Contestant::B
        };
        if result.reason == LossReason::Timeout {
            stats.timeouts += 1;
        }
        stats.outcomes.push(SeriesOutcome {
            winner,
            winner_seat: result.winner,
            reason: result.reason,
        });

        info!(
            "game {}/{} seed={seed} winner={winner:?} a_wins={} b_wins={}",
            i + 1,
            config.games,
            stats.a_wins,
            stats.b_wins
        );
    }

    stats.a_avg_move_time_ms = avg_ns_per_move_ms(stats.a_total_time_ns, stats.a_moves);
    stats.b_avg_move_time_ms = avg_ns_per_move_ms(stats.b_total_time_ns, stats.b_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / f64::from(moves) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    board: &mut IsolationBoard,
    seed: u64,
    plies: u8,
) -> Result<Vec<Move>, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let plies = usize::from(plies.min(2));
    let mut moves = Vec::with_capacity(plies);

    for _ in 0..plies {
        let legal = board.active_legal_moves();
        let Some(&mv) = legal.choose(&mut rng) else {
            break;
        };
        board.apply_move(mv).map_err(|e| e.to_string())?;
        moves.push(mv);
    }
    Ok(moves)
}
