//! Monte Carlo Tree Search (MCTS) with UCT selection and random rollouts.
//!
//! This crate provides a game-agnostic MCTS engine that works with any
//! game implementing the `engine-core` [`GameOracle`](engine_core::GameOracle)
//! trait, using any [`DefaultPolicy`](engine_core::DefaultPolicy) for rollouts.
//!
//! # Overview
//!
//! Each simulation consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT. Player One maximizes
//!    `value + bonus`, Player Two minimizes `value - bonus`
//! 2. **Expansion**: When reaching a non-terminal leaf, add one child per
//!    legal action and descend into the first unvisited one
//! 3. **Evaluation**: Play the game out with the default policy
//! 4. **Backpropagation**: Update visit counts and running means along the
//!    path from the evaluated node to the root
//!
//! Values are always from Player One's perspective and are never negated.
//!
//! # Usage
//!
//! ```rust,ignore
//! use engine_core::{Player, RandomPolicy};
//! use games_nim::NimGame;
//! use mcts::{MctsConfig, MctsEngine};
//!
//! let game = NimGame::new(10, 3);
//! let mut engine = MctsEngine::with_config(
//!     game.initial_state(),
//!     Player::One,
//!     game,
//!     RandomPolicy,
//!     MctsConfig::for_testing(),
//!     42,
//! )?;
//!
//! while !engine.is_terminal() {
//!     engine.run_simulations(200)?;
//!     let dist = engine.root_distribution()?;
//!     let action = engine.select_move(&dist, engine.root_player())?;
//!     engine.advance_root(&action)?;
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                         MctsEngine                          |
//! +-------------------------------------------------------------+
//! |  +-------------+  +-------------+  +---------------------+  |
//! |  |  MctsTree   |  | GameOracle  |  |   DefaultPolicy     |  |
//! |  |  (arena)    |  |  (rules)    |  |  (rollout moves)    |  |
//! |  +------+------+  +------+------+  +----------+----------+  |
//! |         |                |                    |             |
//! |         v                v                    v             |
//! |  +-------------------------------------------------------+  |
//! |  |       select -> expand -> rollout -> backpropagate     |  |
//! |  +-------------------------------------------------------+  |
//! +-------------------------------------------------------------+
//! ```

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

#[cfg(test)]
mod test_games;

// Re-export main types
pub use config::MctsConfig;
pub use node::{exploration_bonus, MctsNode, NodeId};
pub use rollout::{evaluate_leaf, rollout, RolloutOutcome};
pub use search::{select_move_index, MctsEngine, SearchError, SearchStats};
pub use tree::{MctsTree, TreeStats};
