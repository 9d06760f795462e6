//! UCT search over an arena-allocated tree.
//!
//! Classic Monte Carlo tree search with UCB1 selection, single-node
//! expansion, uniform-random playouts, and per-seat backpropagation. The
//! whole tree lives in one `Vec` arena and is rebuilt per decision call; the
//! budget meter bounds the simulation loop and the lookahead depth.

use agent_core::budget::{Budget, BudgetMeter};
use agent_core::erased::DecisionError;
use agent_core::state::{MatchState, MoveToken};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::config::UctConfig;
use crate::node::{NodeId, UctNode};

/// Result of one completed search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// The selected move, always from the root position's legal set.
    pub best_move: MoveToken,
    /// Simulations completed before the budget tripped.
    pub iterations: u64,
}

/// One UCT search over a single root position.
///
/// The tree does not persist across calls; every search starts from a fresh
/// root. Tie-breaks in selection and in the final move choice are uniform
/// random, so equally-scored moves are played with equal probability.
pub struct UctSearch<'a> {
    config: &'a UctConfig,
    num_players: u32,
    arena: Vec<UctNode>,
}

const ROOT: NodeId = NodeId(0);

impl<'a> UctSearch<'a> {
    pub fn new(config: &'a UctConfig, num_players: u32) -> Self {
        Self {
            config,
            num_players,
            arena: Vec::new(),
        }
    }

    /// Run the search within `budget` and return the robust-child move.
    ///
    /// The root position must have at least one legal move. If the budget
    /// allows no simulations at all (for example an already-expired time
    /// limit), falls back to a uniform-random legal move.
    pub fn run<R: Rng>(
        &mut self,
        state: &dyn MatchState,
        budget: &Budget,
        rng: &mut R,
    ) -> Result<SearchOutcome, DecisionError> {
        let mut legal = state.legal_moves();
        if legal.is_empty() {
            return Err(DecisionError::NoLegalMoves);
        }
        // Trivial position, nothing to search.
        if legal.len() == 1 {
            return Ok(SearchOutcome {
                best_move: legal.pop().ok_or(DecisionError::NoLegalMoves)?,
                iterations: 0,
            });
        }

        self.arena.clear();
        self.arena.push(UctNode::new(
            NodeId::NONE,
            None,
            state.fork(),
            self.num_players,
            rng,
        ));

        let mut meter = BudgetMeter::start(*budget);
        while !meter.exhausted() {
            self.simulate(&meter, rng)?;
            meter.record_iteration();
        }
        let iterations = meter.iterations();
        trace!(
            iterations = iterations,
            elapsed_ms = meter.elapsed().as_millis() as u64,
            tree_size = self.arena.len(),
            "search finished"
        );

        let best_move = match self.robust_child_move(rng) {
            Some(mv) => mv,
            // No simulation completed; any legal move is as good as another.
            None => {
                let pick = rng.gen_range(0..legal.len());
                legal.swap_remove(pick)
            }
        };

        Ok(SearchOutcome {
            best_move,
            iterations,
        })
    }

    /// One simulation: select, expand, play out, backpropagate.
    fn simulate<R: Rng>(&mut self, meter: &BudgetMeter, rng: &mut R) -> Result<(), DecisionError> {
        let mut current = ROOT;
        let mut depth: u32 = 0;

        // Selection: descend through fully expanded nodes by UCB1.
        loop {
            let node = &self.arena[current.0 as usize];
            if node.is_terminal
                || !node.fully_expanded()
                || node.children.is_empty()
                || !meter.depth_allowed(depth)
            {
                break;
            }
            current = self.select_child(current, rng);
            depth += 1;
        }

        // Expansion: attach one child for a not-yet-tried move.
        if meter.depth_allowed(depth) {
            let node = &mut self.arena[current.0 as usize];
            if let Some(mv) = node.unexpanded.pop() {
                let mut child_state = node.state.fork();
                // The move came from this position's own legal list; a
                // rejection means the host's state is inconsistent.
                child_state
                    .apply(&mv)
                    .map_err(|_| DecisionError::Engine("host rejected a listed legal move".into()))?;

                let child_id = NodeId(self.arena.len() as u32);
                let child = UctNode::new(current, Some(mv), child_state, self.num_players, rng);
                self.arena.push(child);
                self.arena[current.0 as usize].children.push(child_id);
                current = child_id;
                depth += 1;
            }
        }

        // Playout: uniform-random moves on a scratch copy until the game
        // ends or the depth caps cut it off. A cutoff scores as all zeros.
        let scores = self.playout(current, depth, meter, rng)?;

        // Backpropagation: credit every seat along the path.
        let mut walk = current;
        while walk.is_some() {
            let node = &mut self.arena[walk.0 as usize];
            node.visit_count += 1;
            for (sum, score) in node.score_sums.iter_mut().zip(&scores) {
                *sum += score;
            }
            walk = node.parent;
        }

        Ok(())
    }

    /// UCB1 over the children of `parent`, scored for the seat to move at
    /// `parent`. Ties break uniformly at random.
    fn select_child<R: Rng>(&self, parent: NodeId, rng: &mut R) -> NodeId {
        let node = &self.arena[parent.0 as usize];
        let mover = node.state.current_seat();
        let log_parent_visits = f64::from(node.visit_count.max(1)).ln();

        let mut best = node.children[0];
        let mut best_value = f64::NEG_INFINITY;
        let mut num_best_found = 0u32;

        for &child_id in &node.children {
            let child = &self.arena[child_id.0 as usize];
            let value = if child.visit_count == 0 {
                f64::INFINITY
            } else {
                let exploit = child.mean_score(mover);
                let explore =
                    (self.config.exploration * log_parent_visits / f64::from(child.visit_count))
                        .sqrt();
                exploit + explore
            };

            if value > best_value {
                best = child_id;
                best_value = value;
                num_best_found = 1;
            } else if value == best_value {
                // Reservoir sampling keeps each tied child equally likely.
                num_best_found += 1;
                if rng.gen_range(0..num_best_found) == 0 {
                    best = child_id;
                }
            }
        }

        best
    }

    fn playout<R: Rng>(
        &self,
        from: NodeId,
        start_depth: u32,
        meter: &BudgetMeter,
        rng: &mut R,
    ) -> Result<Vec<f64>, DecisionError> {
        let node = &self.arena[from.0 as usize];
        if node.is_terminal {
            return Ok(node.state.returns());
        }

        let mut scratch = node.state.fork();
        let mut depth = start_depth;
        let mut plies: u32 = 0;

        while !scratch.is_terminal() {
            if !meter.depth_allowed(depth) || plies >= self.config.playout_depth_cap {
                // Cut off without a result; score the playout as a draw.
                return Ok(vec![0.0; self.num_players as usize]);
            }
            let legal = scratch.legal_moves();
            let mv = legal
                .choose(rng)
                .ok_or_else(|| DecisionError::Engine("non-terminal position with no moves".into()))?;
            scratch
                .apply(mv)
                .map_err(|_| DecisionError::Engine("host rejected a listed legal move".into()))?;
            depth += 1;
            plies += 1;
        }

        Ok(scratch.returns())
    }

    /// The move of the most-visited root child, ties broken at random.
    fn robust_child_move<R: Rng>(&self, rng: &mut R) -> Option<MoveToken> {
        let root = self.arena.first()?;
        let mut best: Option<NodeId> = None;
        let mut best_visits = 0u32;
        let mut num_best_found = 0u32;

        for &child_id in &root.children {
            let visits = self.arena[child_id.0 as usize].visit_count;
            if best.is_none() || visits > best_visits {
                best = Some(child_id);
                best_visits = visits;
                num_best_found = 1;
            } else if visits == best_visits {
                num_best_found += 1;
                if rng.gen_range(0..num_best_found) == 0 {
                    best = Some(child_id);
                }
            }
        }

        best.and_then(|id| self.arena[id.0 as usize].move_from_parent.clone())
    }
}
