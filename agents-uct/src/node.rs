//! UCT tree node representation.
//!
//! Each node holds a forked game position reached by applying a move from the
//! parent's position, plus the visit statistics UCB1 selection runs on.
//! Scores are kept per seat so the tree handles any number of players; each
//! parent reads the column for its own mover when comparing children.

use agent_core::state::{MatchState, MoveToken};
use rand::seq::SliceRandom;
use rand::Rng;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the UCT tree.
#[derive(Debug)]
pub struct UctNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from the parent (None for root)
    pub move_from_parent: Option<MoveToken>,

    /// Forked game position at this node
    pub state: Box<dyn MatchState>,

    /// Legal moves not yet expanded into children, pre-shuffled so popping
    /// from the back expands in uniform random order
    pub unexpanded: Vec<MoveToken>,

    /// Children, in expansion order
    pub children: Vec<NodeId>,

    /// Number of times this node has been visited
    pub visit_count: u32,

    /// Sum of backpropagated returns, indexed by seat
    pub score_sums: Vec<f64>,

    /// Whether the position is terminal
    pub is_terminal: bool,
}

impl UctNode {
    /// Create a node for a forked position. Shuffles the legal moves once so
    /// expansion order is random without per-expansion sampling.
    pub fn new<R: Rng>(
        parent: NodeId,
        move_from_parent: Option<MoveToken>,
        state: Box<dyn MatchState>,
        num_players: u32,
        rng: &mut R,
    ) -> Self {
        let is_terminal = state.is_terminal();
        let mut unexpanded = state.legal_moves();
        unexpanded.shuffle(rng);

        Self {
            parent,
            move_from_parent,
            state,
            unexpanded,
            children: Vec::new(),
            visit_count: 0,
            score_sums: vec![0.0; num_players as usize],
            is_terminal,
        }
    }

    /// Mean score for one seat. Zero if never visited.
    #[inline]
    pub fn mean_score(&self, seat: u32) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.score_sums[seat as usize] / f64::from(self.visit_count)
        }
    }

    /// Whether every legal move has been expanded into a child.
    #[inline]
    pub fn fully_expanded(&self) -> bool {
        self.unexpanded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use agent_core::state::IllegalMove;

    #[derive(Debug, Clone)]
    struct ThreeMoveState;

    impl MatchState for ThreeMoveState {
        fn current_seat(&self) -> u32 {
            0
        }

        fn is_terminal(&self) -> bool {
            false
        }

        fn legal_moves(&self) -> Vec<MoveToken> {
            (0u8..3).map(|i| MoveToken::new([i])).collect()
        }

        fn returns(&self) -> Vec<f64> {
            vec![0.0, 0.0]
        }

        fn fork(&self) -> Box<dyn MatchState> {
            Box::new(self.clone())
        }

        fn apply(&mut self, _mv: &MoveToken) -> Result<(), IllegalMove> {
            Ok(())
        }
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_node() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let node = UctNode::new(NodeId::NONE, None, Box::new(ThreeMoveState), 2, &mut rng);

        assert!(node.parent.is_none());
        assert!(node.move_from_parent.is_none());
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.score_sums, vec![0.0, 0.0]);
        assert!(!node.is_terminal);
        assert!(!node.fully_expanded());
        assert_eq!(node.unexpanded.len(), 3);

        // Shuffling must not lose or duplicate moves.
        let mut payloads: Vec<u8> = node.unexpanded.iter().map(|m| m.payload()[0]).collect();
        payloads.sort_unstable();
        assert_eq!(payloads, vec![0, 1, 2]);
    }

    #[test]
    fn test_mean_score() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut node = UctNode::new(NodeId::NONE, None, Box::new(ThreeMoveState), 2, &mut rng);

        // Unvisited
        assert!(node.mean_score(0).abs() < 1e-9);

        node.visit_count = 4;
        node.score_sums[0] = 2.0;
        node.score_sums[1] = -2.0;
        assert!((node.mean_score(0) - 0.5).abs() < 1e-9);
        assert!((node.mean_score(1) + 0.5).abs() < 1e-9);
    }
}
