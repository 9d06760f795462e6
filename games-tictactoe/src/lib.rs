//! Tic-tac-toe rules implementation on the host side of the engine boundary
//!
//! This crate plays the host's role for testing and benchmarking: it owns the
//! game state, implements [`MatchState`] over it, and encodes moves as opaque
//! one-byte tokens (the cell index 0..9). Engines see only the trait surface.

use agent_core::descriptor::GameDescriptor;
use agent_core::state::{IllegalMove, MatchState, MoveToken};

/// Cell contents: 0 = empty, 1 = X, 2 = O. X always moves first.
const EMPTY: u8 = 0;

/// The eight winning lines as cell-index triples.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Descriptor for tic-tac-toe: two players, deterministic, perfect
/// information, sequential moves.
pub fn descriptor() -> GameDescriptor {
    GameDescriptor::new("Tic-Tac-Toe", 2)
}

/// Tic-tac-toe position.
///
/// Seat 0 plays X, seat 1 plays O. A move token is a single byte holding the
/// cell index (row-major, 0..9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    /// Board cells, row-major. 0 = empty, 1 = X, 2 = O.
    board: [u8; 9],
    /// Mark of the player to move (1 or 2).
    to_move: u8,
    /// 0 = game in progress or drawn, 1 = X won, 2 = O won.
    winner: u8,
}

impl TicTacToe {
    /// Empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: [EMPTY; 9],
            to_move: 1,
            winner: 0,
        }
    }

    /// Cell contents at `index` (0 = empty, 1 = X, 2 = O).
    pub fn cell(&self, index: usize) -> u8 {
        self.board[index]
    }

    /// Mark of the winning player, or 0 if nobody has won.
    pub fn winner(&self) -> u8 {
        self.winner
    }

    fn board_full(&self) -> bool {
        self.board.iter().all(|&c| c != EMPTY)
    }

    fn check_winner(&self) -> u8 {
        for line in &LINES {
            let mark = self.board[line[0]];
            if mark != EMPTY && self.board[line[1]] == mark && self.board[line[2]] == mark {
                return mark;
            }
        }
        0
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState for TicTacToe {
    fn current_seat(&self) -> u32 {
        u32::from(self.to_move) - 1
    }

    fn is_terminal(&self) -> bool {
        self.winner != 0 || self.board_full()
    }

    fn legal_moves(&self) -> Vec<MoveToken> {
        if self.is_terminal() {
            return vec![];
        }
        self.board
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == EMPTY)
            .map(|(index, _)| MoveToken::new([index as u8]))
            .collect()
    }

    fn returns(&self) -> Vec<f64> {
        match self.winner {
            1 => vec![1.0, -1.0],
            2 => vec![-1.0, 1.0],
            _ => vec![0.0, 0.0],
        }
    }

    fn fork(&self) -> Box<dyn MatchState> {
        Box::new(self.clone())
    }

    fn apply(&mut self, mv: &MoveToken) -> Result<(), IllegalMove> {
        if self.is_terminal() {
            return Err(IllegalMove);
        }
        let index = match mv.payload() {
            [index] if usize::from(*index) < 9 => usize::from(*index),
            _ => return Err(IllegalMove),
        };
        if self.board[index] != EMPTY {
            return Err(IllegalMove);
        }

        self.board[index] = self.to_move;
        self.winner = self.check_winner();
        self.to_move = 3 - self.to_move;
        Ok(())
    }
}
