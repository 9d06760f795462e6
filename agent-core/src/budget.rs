//! Resource budgets for decision calls
//!
//! Each `select_move` call carries a `Budget`: up to three independent limits
//! (wall-clock time, search iterations, search depth), any of which may be
//! unset. The engine must respect whichever subset is set and return its best
//! move before exceeding them. Time limits are soft deadlines checked between
//! iterations, not hard preemption; exceeding one is never an error.

use std::time::{Duration, Instant};

/// Iteration cap applied when a budget sets no time and no iteration limit,
/// so an unbounded decision call still terminates in finite time.
pub const DEFAULT_ITERATION_CAP: u64 = 100_000;

/// Resource ceiling for one decision call.
///
/// `Default` is fully unbounded; engines substitute an internal default cap
/// in that case (see [`DEFAULT_ITERATION_CAP`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Budget {
    /// Soft wall-clock deadline for the call.
    pub max_time: Option<Duration>,

    /// Maximum number of search iterations (engine-defined unit of work,
    /// e.g., one MCTS simulation).
    pub max_iterations: Option<u64>,

    /// Maximum lookahead depth in plies.
    pub max_depth: Option<u32>,
}

impl Budget {
    /// A budget with no limits set.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Builder method: set the wall-clock limit.
    pub fn with_time(mut self, limit: Duration) -> Self {
        self.max_time = Some(limit);
        self
    }

    /// Builder method: set the wall-clock limit in milliseconds.
    pub fn with_time_ms(self, millis: u64) -> Self {
        self.with_time(Duration::from_millis(millis))
    }

    /// Builder method: set the iteration limit.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Builder method: set the depth limit in plies.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// True if no limit at all is set.
    pub fn is_unbounded(&self) -> bool {
        self.max_time.is_none() && self.max_iterations.is_none() && self.max_depth.is_none()
    }
}

/// Tracks consumption of a [`Budget`] over one decision call.
///
/// The engine starts a meter at the top of `select_move`, records one
/// iteration per unit of work, and polls `exhausted` between iterations.
/// Depth limits are checked separately via `depth_allowed` wherever the
/// engine descends.
#[derive(Debug)]
pub struct BudgetMeter {
    budget: Budget,
    iteration_cap: u64,
    started: Instant,
    iterations: u64,
}

impl BudgetMeter {
    /// Start metering against the given budget. The clock starts now.
    pub fn start(budget: Budget) -> Self {
        // With neither a time nor an iteration limit, fall back to the
        // default cap so the loop is always bounded.
        let iteration_cap = match (budget.max_iterations, budget.max_time) {
            (Some(n), _) => n,
            (None, Some(_)) => u64::MAX,
            (None, None) => DEFAULT_ITERATION_CAP,
        };

        Self {
            budget,
            iteration_cap,
            started: Instant::now(),
            iterations: 0,
        }
    }

    /// Record one completed unit of work.
    pub fn record_iteration(&mut self) {
        self.iterations += 1;
    }

    /// Iterations recorded so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Wall-clock time since the meter started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// True once the iteration cap or the soft time deadline is reached.
    /// Engines poll this between iterations and return their best move so
    /// far when it trips.
    pub fn exhausted(&self) -> bool {
        if self.iterations >= self.iteration_cap {
            return true;
        }
        if let Some(limit) = self.budget.max_time {
            if self.started.elapsed() >= limit {
                return true;
            }
        }
        false
    }

    /// Whether descending to `depth` plies is still within the depth limit.
    pub fn depth_allowed(&self, depth: u32) -> bool {
        self.budget.max_depth.map_or(true, |cap| depth < cap)
    }
}
