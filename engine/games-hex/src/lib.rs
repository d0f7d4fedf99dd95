//! Hex connection game for the Playout search engine
//!
//! Hex is played on an N×N diamond of hexagonal cells. Players alternately
//! claim an empty cell. Player One wins by linking row 0 to row N-1, Player
//! Two by linking column 0 to column N-1. A full board always contains
//! exactly one winning chain, so the game never ends in a draw.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{GameOracle, Player};
//! use games_hex::{HexGame, HexMove};
//!
//! let game = HexGame::new(3);
//! let state = game.initial_state();
//! let next = game
//!     .next_state(&state, &HexMove::new(4, Player::One))
//!     .expect("center is empty");
//! assert_eq!(game.legal_actions(&next, Player::Two).len(), 8);
//! ```

use std::fmt;

use engine_core::game_utils::encode_cells;
use engine_core::{Cell, GameMetadata, GameOracle, OracleError, Player};

/// Hex board snapshot: one cell per position, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexBoard {
    size: usize,
    cells: Vec<Cell>,
}

impl HexBoard {
    /// Create an empty board of `size` × `size` cells
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Build a board from 0/1/2 cell codes in row-major order.
    ///
    /// Returns `None` if the code count is not a perfect square or a code is
    /// not a valid cell.
    pub fn from_codes(codes: &[u8]) -> Option<Self> {
        let size = (codes.len() as f64).sqrt().round() as usize;
        if size * size != codes.len() {
            return None;
        }
        let cells = codes
            .iter()
            .map(|&c| Cell::from_code(c))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at (`row`, `col`), if on the board
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }
}

impl fmt::Display for HexBoard {
    /// Render the diamond with each row shifted right by one column,
    /// so diagonal neighbours line up visually.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "{}", " ".repeat(row))?;
            for col in 0..self.size {
                let symbol = match self.cells[row * self.size + col] {
                    Cell::Empty => '.',
                    Cell::Owner(Player::One) => 'X',
                    Cell::Owner(Player::Two) => 'O',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Claim `cell` (row-major index) for `player`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexMove {
    pub cell: usize,
    pub player: Player,
}

impl HexMove {
    pub fn new(cell: usize, player: Player) -> Self {
        Self { cell, player }
    }

    /// (row, col) of this move on a board of `size`
    pub fn row_col(&self, size: usize) -> (usize, usize) {
        (self.cell / size, self.cell % size)
    }
}

/// Hex game rules for a fixed board size.
///
/// The neighbour table is built once so win detection is a plain graph
/// search over indices.
#[derive(Debug, Clone)]
pub struct HexGame {
    size: usize,
    neighbors: Vec<Vec<usize>>,
}

impl HexGame {
    /// Create the rules for a `size` × `size` board.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "Hex board needs at least one cell");
        Self {
            size,
            neighbors: Self::build_neighbors(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Empty board of this game's size
    pub fn initial_state(&self) -> HexBoard {
        HexBoard::new(self.size)
    }

    /// Neighbours of `cell` on the diamond grid
    pub fn neighbors(&self, cell: usize) -> &[usize] {
        &self.neighbors[cell]
    }

    /// Diamond adjacency: left/right, up/down, and the up-right/down-left diagonal.
    fn build_neighbors(size: usize) -> Vec<Vec<usize>> {
        const OFFSETS: [(isize, isize); 6] = [(0, -1), (0, 1), (-1, 0), (1, 0), (-1, 1), (1, -1)];

        let n = size as isize;
        (0..size * size)
            .map(|idx| {
                let (r, c) = ((idx / size) as isize, (idx % size) as isize);
                OFFSETS
                    .iter()
                    .map(|(dr, dc)| (r + dr, c + dc))
                    .filter(|&(nr, nc)| nr >= 0 && nr < n && nc >= 0 && nc < n)
                    .map(|(nr, nc)| (nr * n + nc) as usize)
                    .collect()
            })
            .collect()
    }

    /// Whether `player` has a chain joining their two sides.
    ///
    /// Player One starts from row 0 and must reach row N-1; Player Two
    /// starts from column 0 and must reach column N-1.
    pub fn has_connection(&self, board: &HexBoard, player: Player) -> bool {
        let size = self.size;
        let owned = |idx: usize| board.cells[idx].is_owned_by(player);
        let start = |i: usize| match player {
            Player::One => i,
            Player::Two => i * size,
        };
        let reached_goal = |idx: usize| match player {
            Player::One => idx / size == size - 1,
            Player::Two => idx % size == size - 1,
        };

        let mut visited = vec![false; size * size];
        let mut stack: Vec<usize> = (0..size).map(start).filter(|&idx| owned(idx)).collect();

        while let Some(idx) = stack.pop() {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            if reached_goal(idx) {
                return true;
            }
            stack.extend(
                self.neighbors[idx]
                    .iter()
                    .copied()
                    .filter(|&nb| !visited[nb] && owned(nb)),
            );
        }

        false
    }

    /// The player with a winning chain, if any
    pub fn connected_player(&self, board: &HexBoard) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&p| self.has_connection(board, p))
    }
}

impl GameOracle for HexGame {
    type State = HexBoard;
    type Action = HexMove;

    fn legal_actions(&self, state: &HexBoard, player: Player) -> Vec<HexMove> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        state
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| HexMove::new(idx, player))
            .collect()
    }

    fn next_state(&self, state: &HexBoard, action: &HexMove) -> Result<HexBoard, OracleError> {
        let total = self.size * self.size;
        if state.size != self.size {
            return Err(OracleError::IllegalAction(format!(
                "board of size {} given to a game of size {}",
                state.size, self.size
            )));
        }
        if action.cell >= total {
            return Err(OracleError::OutOfBounds {
                index: action.cell,
                size: total,
            });
        }
        if self.is_terminal(state) {
            return Err(OracleError::GameOver);
        }
        if let Cell::Owner(owner) = state.cells[action.cell] {
            let (row, col) = action.row_col(self.size);
            return Err(OracleError::IllegalAction(format!(
                "cell ({row}, {col}) already owned by {owner}"
            )));
        }

        let mut next = state.clone();
        next.cells[action.cell] = Cell::Owner(action.player);
        Ok(next)
    }

    fn is_terminal(&self, state: &HexBoard) -> bool {
        self.connected_player(state).is_some()
    }

    fn num_actions(&self) -> usize {
        self.size * self.size
    }

    fn action_index(&self, action: &HexMove) -> usize {
        action.cell
    }

    fn winner(&self, state: &HexBoard, last_mover: Player) -> Option<Player> {
        self.connected_player(state).or(Some(last_mover))
    }

    fn encode_state(&self, state: &HexBoard) -> Vec<f32> {
        encode_cells(&state.cells)
    }

    fn metadata(&self) -> GameMetadata {
        let cells = self.size * self.size;
        GameMetadata::new("hex", format!("Hex {}x{}", self.size, self.size))
            .with_board(self.size, self.size)
            .with_actions(cells)
            .with_state_size(cells)
            .with_players(vec!["Player 1".to_string(), "Player 2".to_string()])
            .with_description(
                "Player 1 joins the top and bottom rows; Player 2 joins the left and right columns.",
            )
    }
}

#[cfg(test)]
mod tests;
