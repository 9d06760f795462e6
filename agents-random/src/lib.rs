//! Uniform-random baseline engine
//!
//! Picks a uniformly random legal move every turn. Useful as an opponent for
//! engine testing and as the weakest sensible baseline in strength
//! comparisons. Supports every game: randomness needs nothing from the game's
//! mechanics.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use agent_core::budget::Budget;
use agent_core::descriptor::GameDescriptor;
use agent_core::erased::{DecisionError, SessionError};
use agent_core::state::{MatchState, MoveToken};
use agent_core::typed::{DecisionEngine, EngineId, MatchSession};
use agent_core::register_engine;

/// Name this engine registers under.
pub const ENGINE_NAME: &str = "Random";

/// Uniform-random move selection.
#[derive(Debug, Default)]
pub struct RandomEngine {
    /// Fixed RNG seed for reproducible matches; entropy-seeded when unset.
    pub seed: Option<u64>,
}

impl RandomEngine {
    /// Engine with a fixed seed, for reproducible matches.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

#[derive(Debug)]
pub struct RandomSession {
    rng: ChaCha20Rng,
}

impl DecisionEngine for RandomEngine {
    type Session = RandomSession;

    fn engine_id(&self) -> EngineId {
        EngineId {
            name: ENGINE_NAME.to_string(),
            build_id: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn supports_game(&self, _descriptor: &GameDescriptor) -> bool {
        true
    }

    fn begin_match(
        &mut self,
        descriptor: Arc<GameDescriptor>,
        seat: u32,
    ) -> Result<Self::Session, SessionError> {
        // Offset the seed by seat so two seeded handles in one match do not
        // mirror each other.
        let rng = match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed.wrapping_add(u64::from(seat))),
            None => ChaCha20Rng::from_entropy(),
        };
        debug!(game = %descriptor.name, seat = seat, "random engine session started");
        Ok(RandomSession { rng })
    }
}

impl MatchSession for RandomSession {
    fn select_move(
        &mut self,
        state: &dyn MatchState,
        _budget: &Budget,
    ) -> Result<MoveToken, DecisionError> {
        let mut legal = state.legal_moves();
        if legal.is_empty() {
            return Err(DecisionError::NoLegalMoves);
        }
        let pick = self.rng.gen_range(0..legal.len());
        Ok(legal.swap_remove(pick))
    }
}

/// Register the random engine with the global registry.
pub fn register_random() {
    register_engine!(RandomEngine, ENGINE_NAME);
}
