//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_game() -> String {
    defaults::game().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_board_size() -> usize {
    defaults::hex_board_size()
}
fn d_heap() -> u32 {
    defaults::nim_heap()
}
fn d_max_take() -> u32 {
    defaults::nim_max_take()
}
fn d_num_sims() -> u32 {
    defaults::num_simulations()
}
fn d_exploration() -> f64 {
    defaults::exploration_constant()
}
fn d_win_reward() -> f64 {
    defaults::win_reward()
}
fn d_loss_reward() -> f64 {
    defaults::loss_reward()
}
fn d_rollouts_per_leaf() -> usize {
    defaults::rollouts_per_leaf()
}
fn d_max_rollout_steps() -> u32 {
    defaults::max_rollout_steps()
}
fn d_episodes() -> u32 {
    defaults::episodes()
}
fn d_starting_player() -> u8 {
    defaults::starting_player()
}
fn d_buffer_capacity() -> usize {
    defaults::buffer_capacity()
}
fn d_batch_size() -> usize {
    defaults::batch_size()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub hex: HexConfig,
    #[serde(default)]
    pub nim: NimConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub self_play: SelfPlayConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    /// Game to play: "hex" or "nim"
    #[serde(default = "d_game")]
    pub game: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Base RNG seed; episode `i` uses `seed + i`
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            game: defaults::game().into(),
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Hex board settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HexConfig {
    #[serde(default = "d_board_size")]
    pub board_size: usize,
}

impl Default for HexConfig {
    fn default() -> Self {
        Self {
            board_size: defaults::hex_board_size(),
        }
    }
}

/// Nim heap settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NimConfig {
    #[serde(default = "d_heap")]
    pub heap: u32,
    #[serde(default = "d_max_take")]
    pub max_take: u32,
}

impl Default for NimConfig {
    fn default() -> Self {
        Self {
            heap: defaults::nim_heap(),
            max_take: defaults::nim_max_take(),
        }
    }
}

/// MCTS search settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_sims")]
    pub num_simulations: u32,
    #[serde(default = "d_exploration")]
    pub exploration_constant: f64,
    #[serde(default = "d_win_reward")]
    pub win_reward: f64,
    #[serde(default = "d_loss_reward")]
    pub loss_reward: f64,
    #[serde(default = "d_rollouts_per_leaf")]
    pub rollouts_per_leaf: usize,
    #[serde(default = "d_max_rollout_steps")]
    pub max_rollout_steps: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::num_simulations(),
            exploration_constant: defaults::exploration_constant(),
            win_reward: defaults::win_reward(),
            loss_reward: defaults::loss_reward(),
            rollouts_per_leaf: defaults::rollouts_per_leaf(),
            max_rollout_steps: defaults::max_rollout_steps(),
        }
    }
}

/// Self-play driver settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SelfPlayConfig {
    #[serde(default = "d_episodes")]
    pub episodes: u32,
    /// 0 = random each episode, 1 or 2 = that player always starts
    #[serde(default = "d_starting_player")]
    pub starting_player: u8,
    #[serde(default = "d_buffer_capacity")]
    pub buffer_capacity: usize,
    #[serde(default = "d_batch_size")]
    pub batch_size: usize,
    /// Log a progress line every N episodes
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            episodes: defaults::episodes(),
            starting_player: defaults::starting_player(),
            buffer_capacity: defaults::buffer_capacity(),
            batch_size: defaults::batch_size(),
            log_interval: defaults::log_interval(),
        }
    }
}
