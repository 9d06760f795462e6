//! Core traits and types for pluggable game-playing agents
//!
//! This crate provides the stable protocol layer between a turn-based game
//! host and independently developed move-selection engines:
//! - `DecisionEngine`: Typed trait for ergonomic engine development
//! - `ErasedEngine`: Runtime interface driven by the host's match loop
//! - `EngineAdapter`: Automatic conversion from typed to erased interface,
//!   enforcing the session lifecycle state machine
//! - `Registry`: Static registration system for engines
//! - `bootstrap`: One-shot process-wide initialization latch per engine
//!
//! The host owns all game data (`GameDescriptor`, `MatchState`); engines only
//! borrow it for the duration of a call and hand back opaque `MoveToken`
//! values the host's rules engine resolves.

pub mod adapter;
pub mod bootstrap;
pub mod budget;
pub mod descriptor;
pub mod erased;
pub mod registry;
pub mod state;
pub mod typed;

// Re-export main types for convenience
pub use adapter::EngineAdapter;
pub use bootstrap::{is_bootstrapped, run_static_init, BootstrapError};
pub use budget::{Budget, BudgetMeter};
pub use descriptor::GameDescriptor;
pub use erased::{DecisionError, ErasedEngine, SessionError};
pub use registry::{
    clear_registry, instantiate, is_registered, list_engines, register_engine, CapabilityProbe,
    EngineFactory, EngineListing,
};
pub use state::{IllegalMove, MatchState, MoveToken};
pub use typed::{DecisionEngine, EngineId, MatchSession};
