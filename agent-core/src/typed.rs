//! Typed engine traits providing an ergonomic interface for engine authors
//!
//! Engine authors implement `DecisionEngine` and `MatchSession` with their
//! own session type; the adapter layer converts any such pair into the
//! erased, dyn-safe interface the host drives, and enforces the lifecycle
//! state machine on top.

use std::sync::Arc;

use crate::bootstrap::BootstrapError;
use crate::budget::Budget;
use crate::descriptor::GameDescriptor;
use crate::erased::{DecisionError, SessionError};
use crate::state::{MatchState, MoveToken};

/// Engine identification information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineId {
    /// Stable engine name; keys the bootstrap latch and registry entries.
    pub name: String,
    /// Build/version identifier for diagnostics.
    pub build_id: String,
}

/// Main trait for decision-engine implementations.
///
/// An engine is the factory for its own match sessions. The host never calls
/// this trait directly; it drives the erased interface produced by
/// [`EngineAdapter`](crate::adapter::EngineAdapter), which handles lifecycle
/// bookkeeping, bootstrap latching, and move-legality verification.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use agent_core::budget::Budget;
/// use agent_core::descriptor::GameDescriptor;
/// use agent_core::erased::{DecisionError, SessionError};
/// use agent_core::state::{MatchState, MoveToken};
/// use agent_core::typed::{DecisionEngine, EngineId, MatchSession};
///
/// /// Always plays the first legal move.
/// #[derive(Debug, Default)]
/// struct FirstMoveEngine;
///
/// #[derive(Debug)]
/// struct FirstMoveSession;
///
/// impl DecisionEngine for FirstMoveEngine {
///     type Session = FirstMoveSession;
///
///     fn engine_id(&self) -> EngineId {
///         EngineId { name: "first-move".into(), build_id: "test".into() }
///     }
///
///     fn supports_game(&self, _descriptor: &GameDescriptor) -> bool {
///         true
///     }
///
///     fn begin_match(
///         &mut self,
///         _descriptor: Arc<GameDescriptor>,
///         _seat: u32,
///     ) -> Result<Self::Session, SessionError> {
///         Ok(FirstMoveSession)
///     }
/// }
///
/// impl MatchSession for FirstMoveSession {
///     fn select_move(
///         &mut self,
///         state: &dyn MatchState,
///         _budget: &Budget,
///     ) -> Result<MoveToken, DecisionError> {
///         state.legal_moves().into_iter().next().ok_or(DecisionError::NoLegalMoves)
///     }
/// }
/// ```
pub trait DecisionEngine: Send + std::fmt::Debug + 'static {
    /// Per-match session state produced by `begin_match`.
    type Session: MatchSession;

    /// Get engine identification information.
    fn engine_id(&self) -> EngineId;

    /// Capability probe: can this engine play the described game at all?
    ///
    /// Must be pure and fast (sub-millisecond): the host may call it once per
    /// engine per game-configuration change, potentially for many engines.
    /// Must not allocate long-lived resources.
    fn supports_game(&self, descriptor: &GameDescriptor) -> bool;

    /// Process-wide, game-independent initialization.
    ///
    /// Runs at most once per process, before the first session; the adapter
    /// guards it with the bootstrap latch so implementations need no latch of
    /// their own. A failure here makes the engine unusable for the rest of
    /// the process.
    fn static_init(&mut self) -> Result<(), BootstrapError> {
        Ok(())
    }

    /// Allocate per-match resources and bind to one player seat.
    ///
    /// The adapter has already validated the seat against the descriptor and
    /// re-checked `supports_game`; implementations may still return
    /// `SessionError::UnsupportedGame` for rule variants only discoverable at
    /// setup time, or `SessionError::ResourceExhausted` when allocation
    /// fails.
    fn begin_match(
        &mut self,
        descriptor: Arc<GameDescriptor>,
        seat: u32,
    ) -> Result<Self::Session, SessionError>;
}

/// Per-match session state owned by the engine.
///
/// The host drives one synchronous call at a time per session; a session is
/// never shared across matches or seats.
pub trait MatchSession: Send + std::fmt::Debug + 'static {
    /// Produce one legal move for the supplied position within the budget.
    ///
    /// The state reference is only valid for the duration of this call; any
    /// lookahead must work on forked scratch copies. Internal parallelism is
    /// allowed but must not outlive the call.
    fn select_move(
        &mut self,
        state: &dyn MatchState,
        budget: &Budget,
    ) -> Result<MoveToken, DecisionError>;

    /// Release per-match resources. Called exactly once, by `close_session`.
    fn end_match(&mut self) {}
}
