//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.game, "hex");
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.seed, 0);
    assert_eq!(config.hex.board_size, 4);
    assert_eq!(config.nim.heap, 12);
    assert_eq!(config.nim.max_take, 3);
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.mcts.num_simulations, 800);
    assert!((config.mcts.exploration_constant - 1.0).abs() < f64::EPSILON);
    assert!((config.mcts.win_reward - 1.0).abs() < f64::EPSILON);
    assert!((config.mcts.loss_reward + 1.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.rollouts_per_leaf, 1);
    assert_eq!(config.mcts.max_rollout_steps, 10_000);
}

#[test]
fn test_self_play_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.self_play.episodes, 200);
    assert_eq!(config.self_play.starting_player, 1);
    assert_eq!(config.self_play.buffer_capacity, 500);
    assert_eq!(config.self_play.batch_size, 64);
    assert_eq!(config.self_play.log_interval, 10);
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
game = "nim"
seed = 99

[nim]
heap = 21
max_take = 4

[self_play]
episodes = 5
starting_player = 0
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.game, "nim");
    assert_eq!(config.common.seed, 99);
    assert_eq!(config.nim.heap, 21);
    assert_eq!(config.nim.max_take, 4);
    assert_eq!(config.self_play.episodes, 5);
    assert_eq!(config.self_play.starting_player, 0);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[mcts]
loss_reward = 0.0
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert!(config.mcts.loss_reward.abs() < f64::EPSILON);
    assert_eq!(config.mcts.num_simulations, 800); // Default
    assert_eq!(config.common.game, "hex"); // Default
    assert_eq!(config.self_play.buffer_capacity, 500); // Default
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[hex]\nboard_size = 7\n\n[mcts]\nrollouts_per_leaf = 8").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.hex.board_size, 7);
    assert_eq!(config.mcts.rollouts_per_leaf, 8);
}

#[test]
fn test_load_from_path_falls_back_on_bad_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "this is [not toml").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.hex.board_size, 4);
}

#[test]
fn test_load_from_missing_path_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("missing.toml"));
    assert_eq!(config.mcts.num_simulations, 800);
}

#[test]
fn test_playout_env_overrides() {
    std::env::set_var("PLAYOUT_NIM_MAX_TAKE", "5");
    std::env::set_var("PLAYOUT_MCTS_EXPLORATION_CONSTANT", "1.5");
    std::env::set_var("PLAYOUT_SELF_PLAY_BATCH_SIZE", "not-a-number");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.nim.max_take, 5);
    assert!((config.mcts.exploration_constant - 1.5).abs() < f64::EPSILON);
    // Unparseable values are ignored
    assert_eq!(config.self_play.batch_size, 64);

    std::env::remove_var("PLAYOUT_NIM_MAX_TAKE");
    std::env::remove_var("PLAYOUT_MCTS_EXPLORATION_CONSTANT");
    std::env::remove_var("PLAYOUT_SELF_PLAY_BATCH_SIZE");
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.game, cloned.common.game);
    assert_eq!(config.self_play.episodes, cloned.self_play.episodes);
}
