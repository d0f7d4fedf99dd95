//! Shared utilities for two-player game implementations
//!
//! Reward conventions and feature encoding used by the search and by the
//! experience buffer. Keeping them here ensures every game and every
//! consumer agree on the same numbers.

use crate::player::{Cell, Player};

/// Calculate the rollout reward from Player One's perspective.
///
/// # Arguments
/// * `winner` - Winner of the finished game, `None` for a draw
/// * `win_reward` - Reward when Player One wins
/// * `loss_reward` - Reward when Player Two wins
///
/// # Returns
/// `win_reward`, `loss_reward`, or their midpoint for a draw.
///
/// # Example
/// ```
/// use engine_core::game_utils::terminal_reward;
/// use engine_core::Player;
///
/// assert_eq!(terminal_reward(Some(Player::One), 1.0, -1.0), 1.0);
/// assert_eq!(terminal_reward(Some(Player::Two), 1.0, -1.0), -1.0);
/// assert_eq!(terminal_reward(None, 1.0, 0.0), 0.5);
/// ```
#[inline]
pub fn terminal_reward(winner: Option<Player>, win_reward: f64, loss_reward: f64) -> f64 {
    match winner {
        Some(Player::One) => win_reward,
        Some(Player::Two) => loss_reward,
        None => 0.5 * (win_reward + loss_reward),
    }
}

/// Encode cells as 0/1/2 floats.
pub fn encode_cells(cells: &[Cell]) -> Vec<f32> {
    cells.iter().map(|c| c.to_code() as f32).collect()
}

/// Prefix an encoded board with the id of the player to move.
///
/// This is the input layout the external policy is trained on.
///
/// # Example
/// ```
/// use engine_core::game_utils::with_player_prefix;
/// use engine_core::Player;
///
/// let encoded = with_player_prefix(Player::Two, &[0.0, 1.0, 2.0]);
/// assert_eq!(encoded, vec![2.0, 0.0, 1.0, 2.0]);
/// ```
pub fn with_player_prefix(player: Player, cells: &[f32]) -> Vec<f32> {
    let mut out = Vec::with_capacity(cells.len() + 1);
    out.push(player.id() as f32);
    out.extend_from_slice(cells);
    out
}
