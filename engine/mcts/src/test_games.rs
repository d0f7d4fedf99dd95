//! Small oracles shared by the unit tests.

use engine_core::{Cell, GameMetadata, GameOracle, OracleError, Player};

/// A single row of cells. Players alternately claim an empty cell; the game
/// ends when the row is full and whoever owns more cells wins.
#[derive(Debug, Clone)]
pub struct LineGame {
    pub cells: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Claim {
    pub cell: usize,
    pub player: Player,
}

impl LineGame {
    pub fn new(cells: usize) -> Self {
        Self { cells }
    }

    pub fn empty(&self) -> Vec<Cell> {
        vec![Cell::Empty; self.cells]
    }
}

impl GameOracle for LineGame {
    type State = Vec<Cell>;
    type Action = Claim;

    fn legal_actions(&self, state: &Vec<Cell>, player: Player) -> Vec<Claim> {
        state
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(cell, _)| Claim { cell, player })
            .collect()
    }

    fn next_state(&self, state: &Vec<Cell>, action: &Claim) -> Result<Vec<Cell>, OracleError> {
        match state.get(action.cell) {
            None => Err(OracleError::OutOfBounds {
                index: action.cell,
                size: state.len(),
            }),
            Some(c) if !c.is_empty() => Err(OracleError::IllegalAction(format!(
                "cell {} is taken",
                action.cell
            ))),
            Some(_) => {
                let mut next = state.clone();
                next[action.cell] = Cell::Owner(action.player);
                Ok(next)
            }
        }
    }

    fn is_terminal(&self, state: &Vec<Cell>) -> bool {
        state.iter().all(|c| !c.is_empty())
    }

    fn num_actions(&self) -> usize {
        self.cells
    }

    fn action_index(&self, action: &Claim) -> usize {
        action.cell
    }

    fn winner(&self, state: &Vec<Cell>, _last_mover: Player) -> Option<Player> {
        let ones = state.iter().filter(|c| c.is_owned_by(Player::One)).count();
        let twos = state.iter().filter(|c| c.is_owned_by(Player::Two)).count();
        match ones.cmp(&twos) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    fn encode_state(&self, state: &Vec<Cell>) -> Vec<f32> {
        engine_core::game_utils::encode_cells(state)
    }

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("line", "Line")
            .with_board(self.cells, 1)
            .with_actions(self.cells)
            .with_state_size(self.cells)
    }
}

/// An oracle that breaks its contract in a configurable way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Broken {
    /// Non-terminal state with no legal actions.
    NoMoves,
    /// `next_state` rejects the actions `legal_actions` offered.
    RejectsOwnMoves,
    /// Two actions share one distribution slot.
    DuplicateIndex,
    /// Never terminates.
    Endless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tick(pub usize, pub Player);

impl GameOracle for Broken {
    type State = u32;
    type Action = Tick;

    fn legal_actions(&self, _state: &u32, player: Player) -> Vec<Tick> {
        match self {
            Broken::NoMoves => Vec::new(),
            _ => vec![Tick(0, player), Tick(1, player)],
        }
    }

    fn next_state(&self, state: &u32, _action: &Tick) -> Result<u32, OracleError> {
        match self {
            Broken::RejectsOwnMoves => Err(OracleError::IllegalAction("nope".to_string())),
            _ => Ok(state + 1),
        }
    }

    fn is_terminal(&self, _state: &u32) -> bool {
        false
    }

    fn num_actions(&self) -> usize {
        2
    }

    fn action_index(&self, action: &Tick) -> usize {
        match self {
            Broken::DuplicateIndex => 0,
            _ => action.0,
        }
    }

    fn encode_state(&self, state: &u32) -> Vec<f32> {
        vec![*state as f32]
    }

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("broken", "Broken").with_actions(2)
    }
}
