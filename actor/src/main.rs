//! Actor - self-play runner for the Playout MCTS engine
//!
//! Plays a configured number of episodes of Hex or Nim against itself:
//! 1. Runs MCTS at every decision point using random rollouts
//! 2. Records (state, visit distribution) cases in a bounded experience buffer
//! 3. Samples a minibatch after each episode for training

use anyhow::Result;
use clap::Parser;
use engine_core::{DefaultPolicy, GameOracle, RandomPolicy};
use games_hex::HexGame;
use games_nim::NimGame;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

mod actor;
mod config;
mod replay;

use crate::actor::{LoggingTrainer, SelfPlay};
use crate::config::Config;
use crate::replay::ExperienceBuffer;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

/// Drive all episodes for one game, showing progress when stderr is a TTY.
fn run_self_play<G, P>(mut self_play: SelfPlay<G, P>, config: &Config) -> Result<()>
where
    G: GameOracle + Clone,
    P: DefaultPolicy<G> + Clone,
{
    let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        let pb = ProgressBar::new(config.episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} episodes ({eta})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    self_play.clear_buffer()?;
    let mut trainer = LoggingTrainer::default();
    for episode in 0..config.episodes {
        self_play.run_episode(episode, &mut trainer)?;

        if let Some(ref pb) = progress {
            pb.inc(1);
        }

        let completed = episode + 1;
        if config.log_interval > 0 && completed % config.log_interval == 0 {
            let stats = self_play.stats();
            let log = || {
                info!(
                    episodes = completed,
                    player_one_wins = stats.player_one_wins,
                    player_two_wins = stats.player_two_wins,
                    draws = stats.draws,
                    avg_moves = format!("{:.1}", stats.avg_moves()),
                    "Self-play progress"
                )
            };
            // Suspend progress bar while logging to avoid visual glitches
            match progress {
                Some(ref pb) => pb.suspend(log),
                None => log(),
            }
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    let stats = self_play.stats();
    let (buffered, capacity) = self_play
        .buffer()
        .lock()
        .map(|b| (b.len(), b.capacity()))
        .unwrap_or_default();
    info!(
        episodes = stats.episodes,
        player_one_wins = stats.player_one_wins,
        player_two_wins = stats.player_two_wins,
        draws = stats.draws,
        cases_recorded = stats.cases_recorded,
        buffered,
        capacity,
        minibatches = trainer.batches,
        "Self-play finished"
    );
    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let buffer = ExperienceBuffer::shared(config.buffer_capacity);
    let mcts_config = config.mcts_config();

    match config.game.as_str() {
        "hex" => {
            let game = HexGame::new(config.board_size);
            let initial = game.initial_state();
            info!(
                size = config.board_size,
                actions = game.num_actions(),
                "Playing Hex"
            );
            let self_play = SelfPlay::new(
                game,
                RandomPolicy,
                initial,
                mcts_config,
                buffer,
                config.seed,
            )
            .with_starting_player(config.starting_player())
            .with_batch_size(config.batch_size)
            .with_recency_weighting(config.recency_weighted);
            run_self_play(self_play, config)
        }
        "nim" => {
            let game = NimGame::new(config.nim_heap, config.nim_max_take);
            info!(
                heap = config.nim_heap,
                max_take = config.nim_max_take,
                "Playing Nim"
            );
            let self_play = SelfPlay::new(
                game,
                RandomPolicy,
                game.initial_state(),
                mcts_config,
                buffer,
                config.seed,
            )
            .with_starting_player(config.starting_player())
            .with_batch_size(config.batch_size)
            .with_recency_weighting(config.recency_weighted);
            run_self_play(self_play, config)
        }
        other => Err(anyhow::anyhow!("unknown game '{other}'")),
    }
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    info!(
        game = %config.game,
        episodes = config.episodes,
        simulations = config.simulations,
        exploration = config.exploration,
        rollouts_per_leaf = config.rollouts_per_leaf,
        seed = config.seed,
        "Starting self-play"
    );

    match run(&config) {
        Ok(()) => {
            info!("Actor completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Actor failed: {}", e);
            Err(e)
        }
    }
}
