//! Game oracle trait consumed by the search engine
//!
//! An oracle knows the rules of one game and nothing else. It must be pure:
//! every method is a function of its arguments, and any scratch board it
//! uses internally is its own business. States are snapshots that can be
//! cloned, compared and hashed.

use crate::metadata::GameMetadata;
use crate::player::Player;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Errors an oracle reports when asked to apply a move it cannot apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Position {index} is outside a board of {size} positions")]
    OutOfBounds { index: usize, size: usize },

    #[error("Game is already over")]
    GameOver,
}

/// Rules of a two-player, perfect-information board game.
///
/// # Example
///
/// ```rust
/// # use engine_core::{GameMetadata, GameOracle, OracleError, Player};
/// #[derive(Debug)]
/// struct Countdown;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// struct Step(Player);
///
/// impl GameOracle for Countdown {
///     type State = u8;
///     type Action = Step;
///
///     fn legal_actions(&self, state: &u8, player: Player) -> Vec<Step> {
///         if *state == 0 { Vec::new() } else { vec![Step(player)] }
///     }
///
///     fn next_state(&self, state: &u8, _action: &Step) -> Result<u8, OracleError> {
///         state.checked_sub(1).ok_or(OracleError::GameOver)
///     }
///
///     fn is_terminal(&self, state: &u8) -> bool {
///         *state == 0
///     }
///
///     fn num_actions(&self) -> usize {
///         1
///     }
///
///     fn action_index(&self, _action: &Step) -> usize {
///         0
///     }
///
///     fn encode_state(&self, state: &u8) -> Vec<f32> {
///         vec![*state as f32]
///     }
///
///     fn metadata(&self) -> GameMetadata {
///         GameMetadata::new("countdown", "Countdown").with_actions(1)
///     }
/// }
///
/// let game = Countdown;
/// assert_eq!(game.next_state(&3, &Step(Player::One)), Ok(2));
/// assert!(game.is_terminal(&0));
/// ```
pub trait GameOracle: Send + Sync + Debug {
    /// Immutable snapshot of the board.
    type State: Clone + Eq + Hash + Debug + Send + Sync;

    /// A move: where it is played and by whom.
    type Action: Clone + Eq + Hash + Debug + Send + Sync;

    /// All legal actions for `player` in `state`.
    ///
    /// Must be non-empty for every non-terminal state. Order is significant:
    /// children are created in this order and ties are broken by it.
    fn legal_actions(&self, state: &Self::State, player: Player) -> Vec<Self::Action>;

    /// The state reached by applying `action` to `state`.
    fn next_state(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Result<Self::State, OracleError>;

    /// Whether the game has ended in `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Size of the action space (one slot per board position).
    fn num_actions(&self) -> usize;

    /// Slot of `action` in `0..num_actions()`.
    fn action_index(&self, action: &Self::Action) -> usize;

    /// Winner of a terminal state, given the player who made the final move.
    ///
    /// Defaults to the last mover, which holds for connection games and
    /// normal-play Nim. Return `None` for a draw.
    fn winner(&self, _state: &Self::State, last_mover: Player) -> Option<Player> {
        Some(last_mover)
    }

    /// Numeric encoding of the board cells (no player prefix).
    fn encode_state(&self, state: &Self::State) -> Vec<f32>;

    /// Display and sizing information.
    fn metadata(&self) -> GameMetadata;
}
