//! Configuration for the self-play actor
//!
//! Defaults come from config.toml (with `PLAYOUT_*` environment overrides)
//! via the engine-config crate. CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use engine_core::Player;
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

/// Games the actor knows how to build.
pub const SUPPORTED_GAMES: &[&str] = &["hex", "nim"];

fn default_game() -> String {
    CENTRAL_CONFIG.common.game.clone()
}

fn default_board_size() -> usize {
    CENTRAL_CONFIG.hex.board_size
}

fn default_nim_heap() -> u32 {
    CENTRAL_CONFIG.nim.heap
}

fn default_nim_max_take() -> u32 {
    CENTRAL_CONFIG.nim.max_take
}

fn default_episodes() -> u32 {
    CENTRAL_CONFIG.self_play.episodes
}

fn default_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.num_simulations
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_win_reward() -> f64 {
    CENTRAL_CONFIG.mcts.win_reward
}

fn default_loss_reward() -> f64 {
    CENTRAL_CONFIG.mcts.loss_reward
}

fn default_rollouts_per_leaf() -> usize {
    CENTRAL_CONFIG.mcts.rollouts_per_leaf
}

fn default_max_rollout_steps() -> u32 {
    CENTRAL_CONFIG.mcts.max_rollout_steps
}

fn default_starting_player() -> u8 {
    CENTRAL_CONFIG.self_play.starting_player
}

fn default_buffer_capacity() -> usize {
    CENTRAL_CONFIG.self_play.buffer_capacity
}

fn default_batch_size() -> usize {
    CENTRAL_CONFIG.self_play.batch_size
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.self_play.log_interval
}

#[derive(Parser, Debug, Clone)]
#[command(name = "actor")]
#[command(about = "Playout actor - MCTS self-play runner")]
#[command(
    long_about = "Plays episodes of a two-player board game against itself using Monte Carlo
Tree Search, recording (state, visit distribution) cases into a bounded experience buffer.

Configuration is loaded from config.toml with PLAYOUT_<SECTION>_<KEY> environment
variable overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Game to play (hex, nim)
    #[arg(long, default_value_t = default_game())]
    pub game: String,

    /// Hex board side length
    #[arg(long, default_value_t = default_board_size())]
    pub board_size: usize,

    /// Initial Nim heap size
    #[arg(long, default_value_t = default_nim_heap())]
    pub nim_heap: u32,

    /// Maximum stones taken per Nim move
    #[arg(long, default_value_t = default_nim_max_take())]
    pub nim_max_take: u32,

    /// Number of self-play episodes to run
    #[arg(long, default_value_t = default_episodes())]
    pub episodes: u32,

    /// MCTS simulations per move
    #[arg(long, default_value_t = default_simulations())]
    pub simulations: u32,

    /// Exploration constant C in the UCT bonus
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Rollout reward when Player One wins
    #[arg(long, default_value_t = default_win_reward())]
    pub win_reward: f64,

    /// Rollout reward when Player Two wins (-1 symmetric, 0 win-rate)
    #[arg(long, default_value_t = default_loss_reward(), allow_negative_numbers = true)]
    pub loss_reward: f64,

    /// Independent rollouts averaged per evaluated leaf
    #[arg(long, default_value_t = default_rollouts_per_leaf())]
    pub rollouts_per_leaf: usize,

    /// Moves after which a rollout is abandoned
    #[arg(long, default_value_t = default_max_rollout_steps())]
    pub max_rollout_steps: u32,

    /// Starting player (0 = random each episode, 1 or 2 = fixed)
    #[arg(long, default_value_t = default_starting_player())]
    pub starting_player: u8,

    /// Experience buffer capacity (oldest cases are dropped)
    #[arg(long, default_value_t = default_buffer_capacity())]
    pub buffer_capacity: usize,

    /// Minibatch size sampled after each episode
    #[arg(long, default_value_t = default_batch_size())]
    pub batch_size: usize,

    /// Weight minibatch sampling towards recently recorded cases
    #[arg(long)]
    pub recency_weighted: bool,

    /// Base RNG seed; episode i searches with seed + i
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N episodes (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_GAMES.contains(&self.game.as_str()) {
            return Err(anyhow!(
                "unknown game '{}', expected one of {}",
                self.game,
                SUPPORTED_GAMES.join(", ")
            ));
        }

        if self.game == "hex" && self.board_size == 0 {
            return Err(anyhow!("board_size must be greater than 0"));
        }

        if self.game == "nim" && self.nim_max_take == 0 {
            return Err(anyhow!("nim_max_take must be greater than 0"));
        }

        if self.simulations == 0 {
            return Err(anyhow!("simulations must be greater than 0"));
        }

        if self.starting_player > 2 {
            return Err(anyhow!(
                "starting_player must be 0 (random), 1 or 2, got {}",
                self.starting_player
            ));
        }

        if self.buffer_capacity == 0 {
            return Err(anyhow!("buffer_capacity must be greater than 0"));
        }

        if self.batch_size == 0 {
            return Err(anyhow!("batch_size must be greater than 0"));
        }

        self.mcts_config()
            .validate()
            .map_err(|e| anyhow!("invalid search settings: {e}"))?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Search settings for every decision point.
    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig {
            num_simulations: self.simulations,
            exploration_constant: self.exploration,
            win_reward: self.win_reward,
            loss_reward: self.loss_reward,
            rollouts_per_leaf: self.rollouts_per_leaf,
            max_rollout_steps: self.max_rollout_steps,
        }
    }

    /// Fixed starting player, or `None` to pick one at random per episode.
    pub fn starting_player(&self) -> Option<Player> {
        Player::from_id(self.starting_player)
    }
}
