//! Adapter bridging typed engines to the erased host interface
//!
//! `EngineAdapter` wraps any typed [`DecisionEngine`] and implements
//! [`ErasedEngine`] on top of it. The adapter owns everything the lifecycle
//! contract requires so individual engines do not have to: the
//! idle/ready/closed state machine, the bootstrap latch, seat validation,
//! and verification that every returned move is in the legal set.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::bootstrap::{self, BootstrapError};
use crate::budget::Budget;
use crate::descriptor::GameDescriptor;
use crate::erased::{DecisionError, ErasedEngine, SessionError};
use crate::state::{MatchState, MoveToken};
use crate::typed::{DecisionEngine, EngineId, MatchSession};

/// Session lifecycle of one adapter handle. Transitions are one-way:
/// idle to ready on `init_session`, ready to closed on `close_session`.
#[derive(Debug)]
enum Lifecycle<S> {
    Idle,
    Ready(S),
    Closed,
}

/// Wraps a typed [`DecisionEngine`] as a dyn-safe [`ErasedEngine`].
///
/// Out-of-order lifecycle calls are reported as errors, never panics, so a
/// misbehaving host cannot corrupt engine state. A closed handle stays
/// closed; starting another match means instantiating a fresh handle from
/// the registry.
#[derive(Debug)]
pub struct EngineAdapter<E: DecisionEngine> {
    engine: E,
    lifecycle: Lifecycle<E::Session>,
}

impl<E: DecisionEngine> EngineAdapter<E> {
    /// Wrap a typed engine in a fresh (idle) adapter.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            lifecycle: Lifecycle::Idle,
        }
    }

    /// Access the wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the wrapped engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consume the adapter and return the wrapped engine.
    pub fn into_inner(self) -> E {
        self.engine
    }
}

impl<E: DecisionEngine> ErasedEngine for EngineAdapter<E> {
    fn engine_id(&self) -> EngineId {
        self.engine.engine_id()
    }

    fn supports_game(&self, descriptor: &GameDescriptor) -> bool {
        self.engine.supports_game(descriptor)
    }

    fn bootstrap(&mut self) -> Result<(), BootstrapError> {
        let id = self.engine.engine_id();
        let engine = &mut self.engine;
        bootstrap::run_static_init(&id.name, || engine.static_init())
    }

    fn init_session(
        &mut self,
        descriptor: Arc<GameDescriptor>,
        seat: u32,
    ) -> Result<(), SessionError> {
        match self.lifecycle {
            Lifecycle::Idle => {}
            Lifecycle::Ready(_) => return Err(SessionError::AlreadyInitialized),
            Lifecycle::Closed => return Err(SessionError::UsedAfterClose),
        }

        self.bootstrap()?;

        if seat >= descriptor.num_players {
            return Err(SessionError::InvalidSeat {
                seat,
                num_players: descriptor.num_players,
            });
        }

        if !self.engine.supports_game(&descriptor) {
            return Err(SessionError::UnsupportedGame {
                reason: format!("capability probe rejects '{}'", descriptor.name),
            });
        }

        debug!(
            engine = %self.engine.engine_id().name,
            game = %descriptor.name,
            seat = seat,
            "initializing match session"
        );
        let session = self.engine.begin_match(descriptor, seat)?;
        self.lifecycle = Lifecycle::Ready(session);
        Ok(())
    }

    fn select_move(
        &mut self,
        state: &dyn MatchState,
        budget: &Budget,
    ) -> Result<MoveToken, DecisionError> {
        let session = match &mut self.lifecycle {
            Lifecycle::Idle => return Err(DecisionError::NotInitialized),
            Lifecycle::Closed => return Err(DecisionError::UsedAfterClose),
            Lifecycle::Ready(session) => session,
        };

        let legal = state.legal_moves();
        if legal.is_empty() {
            return Err(DecisionError::NoLegalMoves);
        }

        let chosen = session.select_move(state, budget)?;

        // Boundary check: an engine must never hand back a move outside the
        // legal set, whatever its internal search did.
        if !legal.contains(&chosen) {
            warn!(
                engine = %self.engine.engine_id().name,
                "engine returned a move outside the legal set"
            );
            return Err(DecisionError::IllegalMove);
        }

        Ok(chosen)
    }

    fn close_session(&mut self) -> Result<(), SessionError> {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Closed) {
            Lifecycle::Ready(mut session) => {
                debug!(engine = %self.engine.engine_id().name, "closing match session");
                session.end_match();
                Ok(())
            }
            Lifecycle::Idle => {
                self.lifecycle = Lifecycle::Idle;
                Err(SessionError::NotInitialized)
            }
            Lifecycle::Closed => Err(SessionError::UsedAfterClose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::IllegalMove;

    // ========== fixture: a two-move game and a scriptable engine ==========

    /// Two legal moves (bytes 0 and 1); move 0 ends the game.
    #[derive(Debug, Clone)]
    struct TwoMoveState {
        done: bool,
    }

    impl TwoMoveState {
        fn new() -> Self {
            Self { done: false }
        }
    }

    impl MatchState for TwoMoveState {
        fn current_seat(&self) -> u32 {
            0
        }

        fn is_terminal(&self) -> bool {
            self.done
        }

        fn legal_moves(&self) -> Vec<MoveToken> {
            if self.done {
                vec![]
            } else {
                vec![MoveToken::new([0u8]), MoveToken::new([1u8])]
            }
        }

        fn returns(&self) -> Vec<f64> {
            vec![0.0, 0.0]
        }

        fn fork(&self) -> Box<dyn MatchState> {
            Box::new(self.clone())
        }

        fn apply(&mut self, mv: &MoveToken) -> Result<(), IllegalMove> {
            if self.done || !self.legal_moves().contains(mv) {
                return Err(IllegalMove);
            }
            if mv.payload() == [0u8] {
                self.done = true;
            }
            Ok(())
        }
    }

    /// Engine whose behavior is scripted through its fields.
    #[derive(Debug)]
    struct ScriptedEngine {
        name: String,
        supports: bool,
        fail_bootstrap: bool,
        /// Payload the session returns; `None` means "first legal move".
        forced_move: Option<Vec<u8>>,
    }

    impl ScriptedEngine {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                supports: true,
                fail_bootstrap: false,
                forced_move: None,
            }
        }
    }

    #[derive(Debug)]
    struct ScriptedSession {
        forced_move: Option<Vec<u8>>,
        ended: bool,
    }

    impl DecisionEngine for ScriptedEngine {
        type Session = ScriptedSession;

        fn engine_id(&self) -> EngineId {
            EngineId {
                name: self.name.clone(),
                build_id: "test".to_string(),
            }
        }

        fn supports_game(&self, _descriptor: &GameDescriptor) -> bool {
            self.supports
        }

        fn static_init(&mut self) -> Result<(), BootstrapError> {
            if self.fail_bootstrap {
                Err(BootstrapError::InitFailed("scripted failure".to_string()))
            } else {
                Ok(())
            }
        }

        fn begin_match(
            &mut self,
            _descriptor: Arc<GameDescriptor>,
            _seat: u32,
        ) -> Result<Self::Session, SessionError> {
            Ok(ScriptedSession {
                forced_move: self.forced_move.clone(),
                ended: false,
            })
        }
    }

    impl MatchSession for ScriptedSession {
        fn select_move(
            &mut self,
            state: &dyn MatchState,
            _budget: &Budget,
        ) -> Result<MoveToken, DecisionError> {
            match &self.forced_move {
                Some(payload) => Ok(MoveToken::new(payload.clone())),
                None => state
                    .legal_moves()
                    .into_iter()
                    .next()
                    .ok_or(DecisionError::NoLegalMoves),
            }
        }

        fn end_match(&mut self) {
            self.ended = true;
        }
    }

    fn descriptor() -> Arc<GameDescriptor> {
        Arc::new(GameDescriptor::new("two-move", 2))
    }

    // ========== lifecycle ==========

    #[test]
    fn test_full_lifecycle() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::new("adapter_lifecycle_engine"));

        assert!(adapter.init_session(descriptor(), 0).is_ok());
        let mv = adapter
            .select_move(&TwoMoveState::new(), &Budget::unlimited())
            .unwrap();
        assert_eq!(mv.payload(), [0u8]);
        assert!(adapter.close_session().is_ok());
    }

    #[test]
    fn test_select_before_init_fails() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::new("adapter_early_select_engine"));
        assert_eq!(
            adapter.select_move(&TwoMoveState::new(), &Budget::unlimited()),
            Err(DecisionError::NotInitialized)
        );
    }

    #[test]
    fn test_close_before_init_fails() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::new("adapter_early_close_engine"));
        assert_eq!(adapter.close_session(), Err(SessionError::NotInitialized));
        // Failing to close must not wedge the handle.
        assert!(adapter.init_session(descriptor(), 0).is_ok());
    }

    #[test]
    fn test_double_init_fails() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::new("adapter_double_init_engine"));
        assert!(adapter.init_session(descriptor(), 0).is_ok());
        assert_eq!(
            adapter.init_session(descriptor(), 1),
            Err(SessionError::AlreadyInitialized)
        );
        // The original session survived the rejected call.
        assert!(adapter
            .select_move(&TwoMoveState::new(), &Budget::unlimited())
            .is_ok());
    }

    #[test]
    fn test_use_after_close_fails() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::new("adapter_after_close_engine"));
        assert!(adapter.init_session(descriptor(), 0).is_ok());
        assert!(adapter.close_session().is_ok());

        assert_eq!(
            adapter.init_session(descriptor(), 0),
            Err(SessionError::UsedAfterClose)
        );
        assert_eq!(
            adapter.select_move(&TwoMoveState::new(), &Budget::unlimited()),
            Err(DecisionError::UsedAfterClose)
        );
        assert_eq!(adapter.close_session(), Err(SessionError::UsedAfterClose));
    }

    #[test]
    fn test_probe_works_at_any_stage() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::new("adapter_probe_engine"));
        let d = GameDescriptor::new("two-move", 2);

        assert!(adapter.supports_game(&d));
        adapter.init_session(descriptor(), 0).unwrap();
        assert!(adapter.supports_game(&d));
        adapter.close_session().unwrap();
        assert!(adapter.supports_game(&d));
    }

    // ========== init validation ==========

    #[test]
    fn test_invalid_seat_rejected() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::new("adapter_seat_engine"));
        assert_eq!(
            adapter.init_session(descriptor(), 2),
            Err(SessionError::InvalidSeat {
                seat: 2,
                num_players: 2
            })
        );
        // Rejection leaves the handle idle and usable.
        assert!(adapter.init_session(descriptor(), 1).is_ok());
    }

    #[test]
    fn test_unsupported_game_rejected() {
        let mut engine = ScriptedEngine::new("adapter_unsupported_engine");
        engine.supports = false;
        let mut adapter = EngineAdapter::new(engine);

        assert!(matches!(
            adapter.init_session(descriptor(), 0),
            Err(SessionError::UnsupportedGame { .. })
        ));
    }

    #[test]
    fn test_bootstrap_failure_blocks_init() {
        let mut engine = ScriptedEngine::new("adapter_bad_bootstrap_engine");
        engine.fail_bootstrap = true;
        let mut adapter = EngineAdapter::new(engine);

        assert!(matches!(
            adapter.init_session(descriptor(), 0),
            Err(SessionError::Bootstrap(BootstrapError::InitFailed(_)))
        ));
        // The failure is sticky for this engine name.
        assert!(matches!(
            adapter.init_session(descriptor(), 0),
            Err(SessionError::Bootstrap(BootstrapError::InitFailed(_)))
        ));
    }

    // ========== decision boundary ==========

    #[test]
    fn test_illegal_engine_move_caught() {
        let mut engine = ScriptedEngine::new("adapter_illegal_move_engine");
        engine.forced_move = Some(vec![9u8]);
        let mut adapter = EngineAdapter::new(engine);

        adapter.init_session(descriptor(), 0).unwrap();
        assert_eq!(
            adapter.select_move(&TwoMoveState::new(), &Budget::unlimited()),
            Err(DecisionError::IllegalMove)
        );
    }

    #[test]
    fn test_terminal_position_rejected() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::new("adapter_terminal_engine"));
        adapter.init_session(descriptor(), 0).unwrap();

        let mut state = TwoMoveState::new();
        state.apply(&MoveToken::new([0u8])).unwrap();
        assert!(state.is_terminal());

        assert_eq!(
            adapter.select_move(&state, &Budget::unlimited()),
            Err(DecisionError::NoLegalMoves)
        );
    }

    #[test]
    fn test_end_match_called_on_close() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::new("adapter_end_match_engine"));
        adapter.init_session(descriptor(), 0).unwrap();
        // close_session consumes the session after calling end_match; the
        // observable contract is that close succeeds exactly once.
        assert!(adapter.close_session().is_ok());
    }
}
