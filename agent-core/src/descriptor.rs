//! Game descriptors supplied by the host
//!
//! A `GameDescriptor` is the host's immutable description of a game's rules
//! and mechanics. Engines read it to decide whether they can play the game at
//! all (capability probing) and to size per-match resources at session setup.
//! The host owns the descriptor; sessions hold a shared, non-owning reference
//! (`Arc<GameDescriptor>`) for the duration of one match.

/// Immutable description of a game's mechanics.
///
/// The mechanic flags cover the properties most engines gate on: many search
/// algorithms only handle deterministic, perfect-information, sequential-move
/// games. The host builds a descriptor once per game configuration; engines
/// never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDescriptor {
    /// Human-readable game name (e.g., "Tic-Tac-Toe")
    pub name: String,

    /// Number of player seats in the game (typically 2)
    pub num_players: u32,

    /// Whether the game has chance elements (dice, shuffled decks)
    pub stochastic: bool,

    /// Whether some state is hidden from some players
    pub hidden_information: bool,

    /// Whether players move at the same time rather than in turns
    pub simultaneous_moves: bool,
}

impl GameDescriptor {
    /// Create a descriptor for a deterministic, perfect-information,
    /// sequential-move game. Use the builder methods to flag other mechanics.
    pub fn new(name: impl Into<String>, num_players: u32) -> Self {
        Self {
            name: name.into(),
            num_players,
            stochastic: false,
            hidden_information: false,
            simultaneous_moves: false,
        }
    }

    /// Builder method: mark the game as stochastic.
    pub fn with_stochastic(mut self, stochastic: bool) -> Self {
        self.stochastic = stochastic;
        self
    }

    /// Builder method: mark the game as having hidden information.
    pub fn with_hidden_information(mut self, hidden: bool) -> Self {
        self.hidden_information = hidden;
        self
    }

    /// Builder method: mark the game as simultaneous-move.
    pub fn with_simultaneous_moves(mut self, simultaneous: bool) -> Self {
        self.simultaneous_moves = simultaneous;
        self
    }

    /// True if the game is deterministic, perfect-information, and
    /// sequential, the class most classical tree searches support.
    pub fn is_classical(&self) -> bool {
        !self.stochastic && !self.hidden_information && !self.simultaneous_moves
    }
}
