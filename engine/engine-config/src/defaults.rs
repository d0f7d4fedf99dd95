//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time, so the binary and the
//! documented defaults can never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    hex: HexDefaults,
    nim: NimDefaults,
    mcts: MctsDefaults,
    self_play: SelfPlayDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    game: String,
    log_level: String,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct HexDefaults {
    board_size: usize,
}

#[derive(Debug, Deserialize)]
struct NimDefaults {
    heap: u32,
    max_take: u32,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    num_simulations: u32,
    exploration_constant: f64,
    win_reward: f64,
    loss_reward: f64,
    rollouts_per_leaf: usize,
    max_rollout_steps: u32,
}

#[derive(Debug, Deserialize)]
struct SelfPlayDefaults {
    episodes: u32,
    starting_player: u8,
    buffer_capacity: usize,
    batch_size: usize,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn game() -> &'static str {
    &DEFAULTS.common.game
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}

// Games
pub fn hex_board_size() -> usize {
    DEFAULTS.hex.board_size
}
pub fn nim_heap() -> u32 {
    DEFAULTS.nim.heap
}
pub fn nim_max_take() -> u32 {
    DEFAULTS.nim.max_take
}

// MCTS
pub fn num_simulations() -> u32 {
    DEFAULTS.mcts.num_simulations
}
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn win_reward() -> f64 {
    DEFAULTS.mcts.win_reward
}
pub fn loss_reward() -> f64 {
    DEFAULTS.mcts.loss_reward
}
pub fn rollouts_per_leaf() -> usize {
    DEFAULTS.mcts.rollouts_per_leaf
}
pub fn max_rollout_steps() -> u32 {
    DEFAULTS.mcts.max_rollout_steps
}

// Self-play
pub fn episodes() -> u32 {
    DEFAULTS.self_play.episodes
}
pub fn starting_player() -> u8 {
    DEFAULTS.self_play.starting_player
}
pub fn buffer_capacity() -> usize {
    DEFAULTS.self_play.buffer_capacity
}
pub fn batch_size() -> usize {
    DEFAULTS.self_play.batch_size
}
pub fn log_interval() -> u32 {
    DEFAULTS.self_play.log_interval
}
