//! Core traits and types for the Playout search engine
//!
//! This crate provides the contracts the search consumes from the outside world:
//! - `Player` / `Cell`: the symbolic two-player board vocabulary
//! - `GameOracle`: pure rules of a game (legal moves, transitions, terminal detection)
//! - `DefaultPolicy`: move chooser used during rollouts
//! - `GameMetadata`: board dimensions and action-space size for orchestration

pub mod game_utils;
pub mod metadata;
pub mod oracle;
pub mod player;
pub mod policy;

// Re-export main types for convenience
pub use metadata::GameMetadata;
pub use oracle::{GameOracle, OracleError};
pub use player::{Cell, Player};
pub use policy::{DefaultPolicy, RandomPolicy};
