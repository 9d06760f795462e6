//! UCT search configuration parameters.

/// Configuration for UCT search.
#[derive(Debug, Clone)]
pub struct UctConfig {
    /// Exploration constant inside the UCB1 radical.
    /// Higher values encourage exploration, lower values favor exploitation.
    /// The textbook value is 2.0.
    pub exploration: f64,

    /// Cap on random playout length, in plies past the expanded node. Keeps
    /// playouts finite in games with long or cyclic move sequences; a cutoff
    /// scores as a draw.
    pub playout_depth_cap: u32,

    /// Fixed RNG seed for reproducible searches; entropy-seeded when unset.
    pub seed: Option<u64>,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            exploration: 2.0,
            playout_depth_cap: 1000,
            seed: None,
        }
    }
}

impl UctConfig {
    /// Create a deterministic config for testing.
    pub fn for_testing() -> Self {
        Self {
            exploration: 2.0,
            playout_depth_cap: 100,
            seed: Some(0x5eed),
        }
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the playout depth cap.
    pub fn with_playout_depth_cap(mut self, cap: u32) -> Self {
        self.playout_depth_cap = cap;
        self
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
