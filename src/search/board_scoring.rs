//! Pluggable position evaluation and the built-in heuristic library.
//!
//! Search stays agnostic of the formula by delegating leaf scoring to
//! `Evaluator`. Every formula reports `+inf` for a state `player` has already
//! won and `-inf` for one it has already lost; anything else is finite.

use std::fmt;
use std::str::FromStr;

use crate::errors::{SearchError, SearchOutcome};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::PlayerId;

pub trait Evaluator<G: GameState> {
    /// Desirability of `state` from the point of view of `player`.
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64>;
}

impl<G, F> Evaluator<G> for F
where
    G: GameState,
    F: Fn(&G, PlayerId) -> SearchOutcome<f64>,
{
    #[inline]
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        self(state, player)
    }
}

#[inline]
fn decided_score<G: GameState>(state: &G, player: PlayerId) -> Option<f64> {
    if state.is_loser(player) {
        Some(f64::NEG_INFINITY)
    } else if state.is_winner(player) {
        Some(f64::INFINITY)
    } else {
        None
    }
}

#[inline]
fn mobility<G: GameState>(state: &G, player: PlayerId) -> f64 {
    state.legal_moves(player).len() as f64
}

#[inline]
fn mobility_pair<G: GameState>(state: &G, player: PlayerId) -> (f64, f64) {
    (
        mobility(state, player),
        mobility(state, state.opponent_of(player)),
    )
}

/// Blank squares plus one, so the weight never vanishes.
#[inline]
fn blank_weight<G: GameState>(state: &G) -> f64 {
    state.blank_spaces().len() as f64 + 1.0
}

/// Euclidean distance between the two players.
fn player_distance<G: GameState>(state: &G, player: PlayerId) -> SearchOutcome<f64> {
    let opponent = state.opponent_of(player);
    let (Some(own), Some(opp)) = (state.player_location(player), state.player_location(opponent))
    else {
        return Err(SearchError::Evaluation(
            "player distance is undefined before both players are placed".to_owned(),
        ));
    };
    let d_row = f64::from(opp.row - own.row);
    let d_col = f64::from(opp.col - own.col);
    let dist = (d_row * d_row + d_col * d_col).sqrt();
    if dist == 0.0 {
        return Err(SearchError::Evaluation(format!(
            "players share square {own}"
        )));
    }
    Ok(dist)
}

/// Sum, over each of `player`'s moves, of `player`'s mobility after the
/// forecast.
fn deeper_mobility<G: GameState>(state: &G, player: PlayerId) -> SearchOutcome<f64> {
    let mut total = 0.0;
    for mv in state.legal_moves(player) {
        total += state.forecast(mv)?.legal_moves(player).len() as f64;
    }
    Ok(total)
}

/// Always zero for undecided states.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScore;

impl<G: GameState> Evaluator<G> for NullScore {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        Ok(decided_score(state, player).unwrap_or(0.0))
    }
}

/// Own mobility.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMoveScore;

impl<G: GameState> Evaluator<G> for OpenMoveScore {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        Ok(decided_score(state, player).unwrap_or_else(|| mobility(state, player)))
    }
}

/// Own mobility minus opponent mobility.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImprovedScore;

impl<G: GameState> Evaluator<G> for ImprovedScore {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        let (own, opp) = mobility_pair(state, player);
        Ok(own - opp)
    }
}

/// `(own - opp) / (blank + 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleWeighted;

impl<G: GameState> Evaluator<G> for SimpleWeighted {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        let (own, opp) = mobility_pair(state, player);
        Ok((own - opp) / blank_weight(state))
    }
}

/// `(own - opp) * (blank + 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleWeightedInv;

impl<G: GameState> Evaluator<G> for SimpleWeightedInv {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        let (own, opp) = mobility_pair(state, player);
        Ok((own - opp) * blank_weight(state))
    }
}

/// `own - 2 * opp`
#[derive(Debug, Clone, Copy, Default)]
pub struct Offensive;

impl<G: GameState> Evaluator<G> for Offensive {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        let (own, opp) = mobility_pair(state, player);
        Ok(own - 2.0 * opp)
    }
}

/// `(own - 2 * opp) / (blank + 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct OffensiveWeighted;

impl<G: GameState> Evaluator<G> for OffensiveWeighted {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        let (own, opp) = mobility_pair(state, player);
        Ok((own - 2.0 * opp) / blank_weight(state))
    }
}

/// `(own - 2 * opp) * (blank + 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct OffensiveWeightedInv;

impl<G: GameState> Evaluator<G> for OffensiveWeightedInv {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        let (own, opp) = mobility_pair(state, player);
        Ok((own - 2.0 * opp) * blank_weight(state))
    }
}

/// `1 / dist`: rewards staying close to the opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityMin;

impl<G: GameState> Evaluator<G> for ProximityMin {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        Ok(1.0 / player_distance(state, player)?)
    }
}

/// `1 / (dist * (blank + 1))`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityMinWeighted;

impl<G: GameState> Evaluator<G> for ProximityMinWeighted {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        Ok(1.0 / (player_distance(state, player)? * blank_weight(state)))
    }
}

/// `(blank + 1) / dist`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityMinWeightedInv;

impl<G: GameState> Evaluator<G> for ProximityMinWeightedInv {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        Ok(blank_weight(state) / player_distance(state, player)?)
    }
}

/// `dist`: rewards running away from the opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityMax;

impl<G: GameState> Evaluator<G> for ProximityMax {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        player_distance(state, player)
    }
}

/// `dist / (blank + 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityMaxWeighted;

impl<G: GameState> Evaluator<G> for ProximityMaxWeighted {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        Ok(player_distance(state, player)? / blank_weight(state))
    }
}

/// `dist * (blank + 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityMaxWeightedInv;

impl<G: GameState> Evaluator<G> for ProximityMaxWeightedInv {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        Ok(player_distance(state, player)? * blank_weight(state))
    }
}

/// Own mobility one ply deeper minus the opponent's.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleDeeper;

impl<G: GameState> Evaluator<G> for SimpleDeeper {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        let own = deeper_mobility(state, player)?;
        let opp = deeper_mobility(state, state.opponent_of(player))?;
        Ok(own - opp)
    }
}

/// Own mobility one ply deeper minus twice the opponent's.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffensiveDeeper;

impl<G: GameState> Evaluator<G> for OffensiveDeeper {
    fn score(&self, state: &G, player: PlayerId) -> SearchOutcome<f64> {
        if let Some(decided) = decided_score(state, player) {
            return Ok(decided);
        }
        let own = deeper_mobility(state, player)?;
        let opp = deeper_mobility(state, state.opponent_of(player))?;
        Ok(own - 2.0 * opp)
    }
}

/// Configuration-level name for each built-in formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeuristicKind {
    Null,
    OpenMove,
    Improved,
    SimpleWeighted,
    SimpleWeightedInv,
    Offensive,
    OffensiveWeighted,
    OffensiveWeightedInv,
    ProximityMin,
    ProximityMinWeighted,
    ProximityMinWeightedInv,
    ProximityMax,
    ProximityMaxWeighted,
    ProximityMaxWeightedInv,
    SimpleDeeper,
    #[default]
    OffensiveDeeper,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 16] = [
        HeuristicKind::Null,
        HeuristicKind::OpenMove,
        HeuristicKind::Improved,
        HeuristicKind::SimpleWeighted,
        HeuristicKind::SimpleWeightedInv,
        HeuristicKind::Offensive,
        HeuristicKind::OffensiveWeighted,
        HeuristicKind::OffensiveWeightedInv,
        HeuristicKind::ProximityMin,
        HeuristicKind::ProximityMinWeighted,
        HeuristicKind::ProximityMinWeightedInv,
        HeuristicKind::ProximityMax,
        HeuristicKind::ProximityMaxWeighted,
        HeuristicKind::ProximityMaxWeightedInv,
        HeuristicKind::SimpleDeeper,
        HeuristicKind::OffensiveDeeper,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            HeuristicKind::Null => "null",
            HeuristicKind::OpenMove => "open_move",
            HeuristicKind::Improved => "improved",
            HeuristicKind::SimpleWeighted => "simple_weighted",
            HeuristicKind::SimpleWeightedInv => "simple_weighted_inv",
            HeuristicKind::Offensive => "offensive",
            HeuristicKind::OffensiveWeighted => "offensive_weighted",
            HeuristicKind::OffensiveWeightedInv => "offensive_weighted_inv",
            HeuristicKind::ProximityMin => "proximity_min",
            HeuristicKind::ProximityMinWeighted => "proximity_min_weighted",
            HeuristicKind::ProximityMinWeightedInv => "proximity_min_weighted_inv",
            HeuristicKind::ProximityMax => "proximity_max",
            HeuristicKind::ProximityMaxWeighted => "proximity_max_weighted",
            HeuristicKind::ProximityMaxWeightedInv => "proximity_max_weighted_inv",
            HeuristicKind::SimpleDeeper => "simple_deeper",
            HeuristicKind::OffensiveDeeper => "offensive_deeper",
        }
    }

    pub fn evaluator<G: GameState + 'static>(self) -> Box<dyn Evaluator<G>> {
        match self {
            HeuristicKind::Null => Box::new(NullScore),
            HeuristicKind::OpenMove => Box::new(OpenMoveScore),
            HeuristicKind::Improved => Box::new(ImprovedScore),
            HeuristicKind::SimpleWeighted => Box::new(SimpleWeighted),
            HeuristicKind::SimpleWeightedInv => Box::new(SimpleWeightedInv),
            HeuristicKind::Offensive => Box::new(Offensive),
            HeuristicKind::OffensiveWeighted => Box::new(OffensiveWeighted),
            HeuristicKind::OffensiveWeightedInv => Box::new(OffensiveWeightedInv),
            HeuristicKind::ProximityMin => Box::new(ProximityMin),
            HeuristicKind::ProximityMinWeighted => Box::new(ProximityMinWeighted),
            HeuristicKind::ProximityMinWeightedInv => Box::new(ProximityMinWeightedInv),
            HeuristicKind::ProximityMax => Box::new(ProximityMax),
            HeuristicKind::ProximityMaxWeighted => Box::new(ProximityMaxWeighted),
            HeuristicKind::ProximityMaxWeightedInv => Box::new(ProximityMaxWeightedInv),
            HeuristicKind::SimpleDeeper => Box::new(SimpleDeeper),
            HeuristicKind::OffensiveDeeper => Box::new(OffensiveDeeper),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| format!("unknown heuristic '{s}'"))
    }
}
