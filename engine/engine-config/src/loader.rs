//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "PLAYOUT_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the PLAYOUT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_ENV, path.display());
            return load_from_path(&path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_ENV,
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files fall back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, usize, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: PLAYOUT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.game, "PLAYOUT_COMMON_GAME");
    env_override!(config, common.log_level, "PLAYOUT_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "PLAYOUT_COMMON_SEED", parse);

    // Games
    env_override!(config, hex.board_size, "PLAYOUT_HEX_BOARD_SIZE", parse);
    env_override!(config, nim.heap, "PLAYOUT_NIM_HEAP", parse);
    env_override!(config, nim.max_take, "PLAYOUT_NIM_MAX_TAKE", parse);

    // MCTS
    env_override!(
        config,
        mcts.num_simulations,
        "PLAYOUT_MCTS_NUM_SIMULATIONS",
        parse
    );
    env_override!(
        config,
        mcts.exploration_constant,
        "PLAYOUT_MCTS_EXPLORATION_CONSTANT",
        parse
    );
    env_override!(config, mcts.win_reward, "PLAYOUT_MCTS_WIN_REWARD", parse);
    env_override!(config, mcts.loss_reward, "PLAYOUT_MCTS_LOSS_REWARD", parse);
    env_override!(
        config,
        mcts.rollouts_per_leaf,
        "PLAYOUT_MCTS_ROLLOUTS_PER_LEAF",
        parse
    );
    env_override!(
        config,
        mcts.max_rollout_steps,
        "PLAYOUT_MCTS_MAX_ROLLOUT_STEPS",
        parse
    );

    // Self-play
    env_override!(
        config,
        self_play.episodes,
        "PLAYOUT_SELF_PLAY_EPISODES",
        parse
    );
    env_override!(
        config,
        self_play.starting_player,
        "PLAYOUT_SELF_PLAY_STARTING_PLAYER",
        parse
    );
    env_override!(
        config,
        self_play.buffer_capacity,
        "PLAYOUT_SELF_PLAY_BUFFER_CAPACITY",
        parse
    );
    env_override!(
        config,
        self_play.batch_size,
        "PLAYOUT_SELF_PLAY_BATCH_SIZE",
        parse
    );
    env_override!(
        config,
        self_play.log_interval,
        "PLAYOUT_SELF_PLAY_LOG_INTERVAL",
        parse
    );

    config
}
