//! UCT engine implementation of the decision-engine traits.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use agent_core::budget::Budget;
use agent_core::descriptor::GameDescriptor;
use agent_core::erased::{DecisionError, SessionError};
use agent_core::state::{MatchState, MoveToken};
use agent_core::typed::{DecisionEngine, EngineId, MatchSession};
use agent_core::BootstrapError;

use crate::config::UctConfig;
use crate::search::UctSearch;

/// Name this engine registers under.
pub const ENGINE_NAME: &str = "UCT";

/// Monte Carlo tree search engine using UCB1 selection and random playouts.
///
/// Only plays deterministic, perfect-information, sequential-move games; the
/// search assumes the forked game tree it builds is the real game tree, which
/// chance events, hidden state, and simultaneous moves all break.
#[derive(Debug, Default)]
pub struct UctEngine {
    /// Search parameters shared by every session this engine starts.
    pub config: UctConfig,
}

impl UctEngine {
    pub fn new(config: UctConfig) -> Self {
        Self { config }
    }
}

#[derive(Debug)]
pub struct UctSession {
    descriptor: Arc<GameDescriptor>,
    config: UctConfig,
    rng: ChaCha20Rng,
}

impl DecisionEngine for UctEngine {
    type Session = UctSession;

    fn engine_id(&self) -> EngineId {
        EngineId {
            name: ENGINE_NAME.to_string(),
            build_id: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn supports_game(&self, descriptor: &GameDescriptor) -> bool {
        descriptor.is_classical()
    }

    fn static_init(&mut self) -> Result<(), BootstrapError> {
        // No shared tables or pools to build; the latch in the adapter still
        // guarantees this logs once per process.
        info!(engine = ENGINE_NAME, "engine ready");
        Ok(())
    }

    fn begin_match(
        &mut self,
        descriptor: Arc<GameDescriptor>,
        seat: u32,
    ) -> Result<Self::Session, SessionError> {
        // Offset the seed by seat so two seeded handles in one match do not
        // mirror each other.
        let rng = match self.config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed.wrapping_add(u64::from(seat))),
            None => ChaCha20Rng::from_entropy(),
        };
        debug!(game = %descriptor.name, seat = seat, "uct session started");
        Ok(UctSession {
            descriptor,
            config: self.config.clone(),
            rng,
        })
    }
}

impl MatchSession for UctSession {
    fn select_move(
        &mut self,
        state: &dyn MatchState,
        budget: &Budget,
    ) -> Result<MoveToken, DecisionError> {
        let mut search = UctSearch::new(&self.config, self.descriptor.num_players);
        let outcome = search.run(state, budget, &mut self.rng)?;
        debug!(
            game = %self.descriptor.name,
            iterations = outcome.iterations,
            "move selected"
        );
        Ok(outcome.best_move)
    }
}
