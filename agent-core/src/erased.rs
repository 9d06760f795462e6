//! Type-erased engine interface for the host boundary
//!
//! The host cannot know engine types at compile time, so it drives engines
//! through `Box<dyn ErasedEngine>` handles produced by the registry. The
//! erased interface is the full lifecycle surface: probe, bootstrap, session
//! setup, decision calls, and teardown. [`EngineAdapter`](crate::adapter::EngineAdapter)
//! is the canonical implementation, wrapping any typed
//! [`DecisionEngine`](crate::typed::DecisionEngine).

use std::sync::Arc;

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::budget::Budget;
use crate::descriptor::GameDescriptor;
use crate::state::{MatchState, MoveToken};
use crate::typed::EngineId;

/// Errors from session lifecycle calls (`init_session`, `close_session`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Process-wide bootstrap failed; the engine is unusable this process.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    /// The requested seat does not exist in the game.
    #[error("seat {seat} is out of range for a {num_players}-player game")]
    InvalidSeat { seat: u32, num_players: u32 },

    /// The engine cannot play the described game. A host error if it probed
    /// capabilities first; distinct from resource failures so the host can
    /// tell misconfiguration from bad luck.
    #[error("engine does not support this game: {reason}")]
    UnsupportedGame { reason: String },

    /// Per-match resource allocation failed.
    #[error("session resource allocation failed: {0}")]
    ResourceExhausted(String),

    /// `init_session` called on a handle that already has a live session.
    #[error("session is already initialized")]
    AlreadyInitialized,

    /// Lifecycle call before `init_session`.
    #[error("session has not been initialized")]
    NotInitialized,

    /// Lifecycle call after `close_session`.
    #[error("session was already closed")]
    UsedAfterClose,
}

/// Errors from a decision call (`select_move`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// Decision call before `init_session`.
    #[error("session has not been initialized")]
    NotInitialized,

    /// Decision call after `close_session`.
    #[error("session was already closed")]
    UsedAfterClose,

    /// The host offered a position with no legal moves. A host error: every
    /// decision call must come with at least one legal move.
    #[error("no legal moves available in the supplied position")]
    NoLegalMoves,

    /// The engine produced a move outside the legal set. An engine defect,
    /// caught at the boundary before the host applies it.
    #[error("engine returned a move that is not legal for the position")]
    IllegalMove,

    /// Engine-internal failure during the search.
    #[error("engine failure: {0}")]
    Engine(String),
}

/// Dyn-safe engine handle the host drives through its lifecycle.
///
/// One handle hosts at most one session at a time; the lifecycle is
/// idle, then ready after `init_session`, then closed after `close_session`,
/// with no reopening. Implementations enforce the ordering and reject
/// out-of-order calls rather than panicking.
pub trait ErasedEngine: Send + std::fmt::Debug + 'static {
    /// Engine identification information.
    fn engine_id(&self) -> EngineId;

    /// Capability probe. Pure, fast, no side effects; callable at any
    /// lifecycle stage, any number of times.
    fn supports_game(&self, descriptor: &GameDescriptor) -> bool;

    /// Run the engine's process-wide bootstrap if it has not run yet.
    /// Idempotent; a previous failure is returned again without retrying.
    fn bootstrap(&mut self) -> Result<(), BootstrapError>;

    /// Create the per-match session, binding this handle to one seat of the
    /// described game. Implies `bootstrap`.
    fn init_session(
        &mut self,
        descriptor: Arc<GameDescriptor>,
        seat: u32,
    ) -> Result<(), SessionError>;

    /// Produce one legal move for the position, within the budget.
    fn select_move(
        &mut self,
        state: &dyn MatchState,
        budget: &Budget,
    ) -> Result<MoveToken, DecisionError>;

    /// Tear down the session. The handle is unusable afterwards except for
    /// `engine_id` and `supports_game`.
    fn close_session(&mut self) -> Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal hand-rolled implementation, to pin down what the trait
    /// requires without going through the adapter.
    #[derive(Debug, Default)]
    struct MockErasedEngine {
        session_live: bool,
        closed: bool,
    }

    impl ErasedEngine for MockErasedEngine {
        fn engine_id(&self) -> EngineId {
            EngineId {
                name: "mock".to_string(),
                build_id: "test".to_string(),
            }
        }

        fn supports_game(&self, descriptor: &GameDescriptor) -> bool {
            descriptor.num_players == 2
        }

        fn bootstrap(&mut self) -> Result<(), BootstrapError> {
            Ok(())
        }

        fn init_session(
            &mut self,
            _descriptor: Arc<GameDescriptor>,
            _seat: u32,
        ) -> Result<(), SessionError> {
            if self.closed {
                return Err(SessionError::UsedAfterClose);
            }
            if self.session_live {
                return Err(SessionError::AlreadyInitialized);
            }
            self.session_live = true;
            Ok(())
        }

        fn select_move(
            &mut self,
            state: &dyn MatchState,
            _budget: &Budget,
        ) -> Result<MoveToken, DecisionError> {
            if self.closed {
                return Err(DecisionError::UsedAfterClose);
            }
            if !self.session_live {
                return Err(DecisionError::NotInitialized);
            }
            state
                .legal_moves()
                .into_iter()
                .next()
                .ok_or(DecisionError::NoLegalMoves)
        }

        fn close_session(&mut self) -> Result<(), SessionError> {
            if self.closed {
                return Err(SessionError::UsedAfterClose);
            }
            if !self.session_live {
                return Err(SessionError::NotInitialized);
            }
            self.session_live = false;
            self.closed = true;
            Ok(())
        }
    }

    #[test]
    fn test_trait_is_dyn_safe() {
        let boxed: Box<dyn ErasedEngine> = Box::new(MockErasedEngine::default());
        assert_eq!(boxed.engine_id().name, "mock");
        assert!(boxed.supports_game(&GameDescriptor::new("any", 2)));
        assert!(!boxed.supports_game(&GameDescriptor::new("any", 3)));
    }

    #[test]
    fn test_lifecycle_ordering() {
        let mut engine = MockErasedEngine::default();
        let descriptor = Arc::new(GameDescriptor::new("any", 2));

        assert!(engine.init_session(Arc::clone(&descriptor), 0).is_ok());
        assert_eq!(
            engine.init_session(Arc::clone(&descriptor), 0),
            Err(SessionError::AlreadyInitialized)
        );
        assert!(engine.close_session().is_ok());
        assert_eq!(
            engine.init_session(descriptor, 0),
            Err(SessionError::UsedAfterClose)
        );
        assert_eq!(engine.close_session(), Err(SessionError::UsedAfterClose));
    }

    #[test]
    fn test_error_display() {
        let err = SessionError::InvalidSeat {
            seat: 3,
            num_players: 2,
        };
        assert_eq!(
            err.to_string(),
            "seat 3 is out of range for a 2-player game"
        );

        let err = DecisionError::Engine("search thread panicked".to_string());
        assert_eq!(err.to_string(), "engine failure: search thread panicked");

        // Bootstrap errors pass through transparently.
        let err = SessionError::from(BootstrapError::InitFailed("no tables".to_string()));
        assert_eq!(err.to_string(), "engine initialization failed: no tables");
    }
}
