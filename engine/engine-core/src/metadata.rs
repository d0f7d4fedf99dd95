//! Game metadata for orchestration and logging
//!
//! Describes the board and action space of a game so the self-play driver
//! and experience buffer can size their vectors without knowing the rules.

use serde::{Deserialize, Serialize};

/// Metadata about a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Environment identifier (e.g., "hex", "nim")
    pub env_id: String,

    /// Human-readable display name (e.g., "Hex 4x4")
    pub display_name: String,

    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Number of action slots in a visit distribution
    pub num_actions: usize,

    /// Length of the encoded board (without the player prefix)
    pub state_size: usize,

    /// Display names for each player
    pub player_names: Vec<String>,

    /// Brief description of the game rules
    pub description: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(env_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            display_name: display_name.into(),
            board_width: 0,
            board_height: 0,
            num_actions: 0,
            state_size: 0,
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            description: String::new(),
        }
    }

    /// Builder method for board dimensions
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Builder method for action count
    pub fn with_actions(mut self, num_actions: usize) -> Self {
        self.num_actions = num_actions;
        self
    }

    /// Builder method for encoded state length
    pub fn with_state_size(mut self, state_size: usize) -> Self {
        self.state_size = state_size;
        self
    }

    /// Builder method for player names
    pub fn with_players(mut self, names: Vec<String>) -> Self {
        self.player_names = names;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the total number of board cells
    pub fn board_size(&self) -> usize {
        self.board_width * self.board_height
    }

    /// Length of an experience-case input vector (player id + encoded board).
    pub fn case_input_size(&self) -> usize {
        self.state_size + 1
    }
}
