//! Nim counting game for the Playout search engine
//!
//! A single heap of N stones. Players alternately take between 1 and K
//! stones (never more than remain). Whoever takes the last stone wins.
//!
//! Positions where the heap is a multiple of K+1 are lost for the player
//! to move, which makes Nim a handy sanity check for the search.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{GameOracle, Player};
//! use games_nim::{NimGame, Take};
//!
//! let game = NimGame::new(10, 3);
//! let state = game.initial_state();
//! let next = game.next_state(&state, &Take::new(3, Player::One)).unwrap();
//! assert_eq!(next.remaining(), 7);
//! ```

use engine_core::{GameMetadata, GameOracle, OracleError, Player};

/// Stones left on the heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NimState {
    remaining: u32,
}

impl NimState {
    pub fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// Remove `count` stones on behalf of `player`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Take {
    pub count: u32,
    pub player: Player,
}

impl Take {
    pub fn new(count: u32, player: Player) -> Self {
        Self { count, player }
    }
}

/// Nim rules: starting heap size and the most stones one move may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NimGame {
    heap: u32,
    max_take: u32,
}

impl NimGame {
    /// # Panics
    ///
    /// Panics if `max_take` is zero.
    pub fn new(heap: u32, max_take: u32) -> Self {
        assert!(max_take > 0, "players must be allowed to take at least one stone");
        Self { heap, max_take }
    }

    pub fn heap(&self) -> u32 {
        self.heap
    }

    pub fn max_take(&self) -> u32 {
        self.max_take
    }

    /// Full heap
    pub fn initial_state(&self) -> NimState {
        NimState::new(self.heap)
    }

    /// Whether the player to move at `state` loses against perfect play
    pub fn is_losing_position(&self, state: &NimState) -> bool {
        state.remaining % (self.max_take + 1) == 0
    }
}

impl GameOracle for NimGame {
    type State = NimState;
    type Action = Take;

    fn legal_actions(&self, state: &NimState, player: Player) -> Vec<Take> {
        let most = self.max_take.min(state.remaining);
        (1..=most).map(|count| Take::new(count, player)).collect()
    }

    fn next_state(&self, state: &NimState, action: &Take) -> Result<NimState, OracleError> {
        if state.remaining == 0 {
            return Err(OracleError::GameOver);
        }
        if action.count == 0 || action.count > self.max_take {
            return Err(OracleError::IllegalAction(format!(
                "take {} (allowed 1..={})",
                action.count, self.max_take
            )));
        }
        if action.count > state.remaining {
            return Err(OracleError::IllegalAction(format!(
                "take {} from a heap of {}",
                action.count, state.remaining
            )));
        }
        Ok(NimState::new(state.remaining - action.count))
    }

    fn is_terminal(&self, state: &NimState) -> bool {
        state.remaining == 0
    }

    fn num_actions(&self) -> usize {
        self.max_take as usize
    }

    fn action_index(&self, action: &Take) -> usize {
        action.count.saturating_sub(1) as usize
    }

    fn encode_state(&self, state: &NimState) -> Vec<f32> {
        vec![state.remaining as f32]
    }

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("nim", format!("Nim {}/{}", self.heap, self.max_take))
            .with_board(1, 1)
            .with_actions(self.max_take as usize)
            .with_state_size(1)
            .with_description("Take 1 to K stones; whoever takes the last stone wins.")
    }
}

#[cfg(test)]
mod tests;
