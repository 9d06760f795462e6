//! UCT (Monte Carlo tree search) decision engine
//!
//! Flat-UCT search in the style of the classic UCB1 formulation: selection by
//! UCB1 over per-seat mean scores, one expansion per simulation, uniform
//! random playouts, robust-child move choice. Plays any deterministic,
//! perfect-information, sequential-move game exposed through `MatchState`.

pub mod config;
pub mod engine;
pub mod node;
pub mod search;

pub use config::UctConfig;
pub use engine::{UctEngine, ENGINE_NAME};
pub use search::{SearchOutcome, UctSearch};

use agent_core::register_engine;

/// Register the UCT engine with the global registry.
pub fn register_uct() {
    register_engine!(UctEngine, ENGINE_NAME);
}
