//! Turn clocks and the time-remaining capability search polls.
//!
//! Callers hand search a zero-argument "milliseconds left" source. Any
//! `Fn() -> f64` closure qualifies; `TurnClock` is the wall-clock version used
//! by the match runner.

use std::time::{Duration, Instant};

pub trait TimeBudget {
    /// Milliseconds left in the current turn. Negative once the turn is over.
    fn time_left_ms(&self) -> f64;
}

impl<F> TimeBudget for F
where
    F: Fn() -> f64,
{
    #[inline]
    fn time_left_ms(&self) -> f64 {
        self()
    }
}

/// Wall-clock budget for a single turn, started on construction.
#[derive(Debug, Clone, Copy)]
pub struct TurnClock {
    started_at: Instant,
    budget: Duration,
}

impl TurnClock {
    pub fn start(budget: Duration) -> Self {
        Self {
            started_at: Instant::now(),
            budget,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::start(Duration::from_millis(ms))
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl TimeBudget for TurnClock {
    fn time_left_ms(&self) -> f64 {
        let budget_ms = self.budget.as_secs_f64() * 1000.0;
        budget_ms - self.started_at.elapsed().as_secs_f64() * 1000.0
    }
}

/// Budget that never runs out. Handy for fixed-depth analysis and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl TimeBudget for Unlimited {
    #[inline]
    fn time_left_ms(&self) -> f64 {
        f64::INFINITY
    }
}
