//! Host-owned match state and opaque move values
//!
//! `MatchState` is the read surface the host exposes to engines for one
//! decision call. The host owns the backing storage and may reuse or
//! invalidate it as soon as the call returns, so engines receive it as a
//! borrowed `&dyn MatchState` and must fork scratch copies for lookahead
//! instead of retaining the reference.
//!
//! `MoveToken` is the opaque value an engine hands back: a byte payload only
//! the host's rules engine can interpret. Engines obtain tokens exclusively
//! from `legal_moves` on a state (or a fork of one), which is what makes the
//! "never return an illegal move" contract checkable at the boundary.

use thiserror::Error;

/// Error returned when a move is applied to a position it is not legal for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("move is not legal for the current position")]
pub struct IllegalMove;

/// Opaque move value constructed against one position.
///
/// The payload is meaningful only to the host's rules engine. Tokens compare
/// by payload, so an engine can check membership in a legal-move list without
/// understanding the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveToken(Vec<u8>);

impl MoveToken {
    /// Wrap a host-encoded move payload.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self(payload.into())
    }

    /// The raw payload, for the host's rules engine to decode.
    pub fn payload(&self) -> &[u8] {
        &self.0
    }
}

/// Read-only view of the current position, valid for one call.
///
/// The host implements this for its own state representation. Engines may
/// call `fork` to obtain an owned scratch copy they can `apply` moves to
/// during lookahead; the original is never mutated through this trait.
pub trait MatchState: Send + std::fmt::Debug {
    /// Seat index of the player to move (0-based).
    fn current_seat(&self) -> u32;

    /// Whether the game has ended at this position.
    fn is_terminal(&self) -> bool;

    /// All moves legal for the player to move. Empty only at terminal
    /// positions; the host guarantees at least one legal move is offered to
    /// every decision call.
    fn legal_moves(&self) -> Vec<MoveToken>;

    /// Final score per seat, indexed by seat. Only meaningful at terminal
    /// positions; conventionally +1 win / -1 loss / 0 draw for two-player
    /// zero-sum games.
    fn returns(&self) -> Vec<f64>;

    /// Owned scratch copy the engine may mutate during lookahead.
    fn fork(&self) -> Box<dyn MatchState>;

    /// Apply a move in place. Only called on forked scratch copies; the
    /// token must come from `legal_moves` on this position.
    fn apply(&mut self, mv: &MoveToken) -> Result<(), IllegalMove>;
}
