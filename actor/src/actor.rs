//! Self-play driver built on the MCTS engine
//!
//! Each episode starts a fresh search tree at the game's initial position
//! and repeats `search -> root_distribution -> record -> select_move ->
//! advance_root` until the game ends. After every episode a minibatch is
//! drawn from the experience buffer and handed to a [`Trainer`].

use anyhow::{anyhow, Result};
use engine_core::{DefaultPolicy, GameOracle, Player};
use mcts::{MctsConfig, MctsEngine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::replay::{ExperienceCase, SharedExperienceBuffer};

/// Consumer of the minibatches sampled after each episode.
pub trait Trainer {
    fn train(&mut self, batch: &[ExperienceCase]) -> Result<()>;
}

/// Trainer that only logs what it would have trained on.
#[derive(Debug, Default)]
#[allow(dead_code)] // `cases` is read in tests
pub struct LoggingTrainer {
    pub batches: u32,
    pub cases: usize,
}

impl Trainer for LoggingTrainer {
    fn train(&mut self, batch: &[ExperienceCase]) -> Result<()> {
        self.batches += 1;
        self.cases += batch.len();
        debug!(batch_size = batch.len(), batches = self.batches, "Minibatch ready");
        Ok(())
    }
}

/// Outcome of one self-play episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeSummary {
    pub moves: u32,
    pub starting_player: Player,
    /// `None` for a draw
    pub winner: Option<Player>,
}

/// Running totals across episodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfPlayStats {
    pub episodes: u32,
    pub player_one_wins: u32,
    pub player_two_wins: u32,
    pub draws: u32,
    pub total_moves: u64,
    pub cases_recorded: u64,
}

impl SelfPlayStats {
    fn add(&mut self, summary: &EpisodeSummary) {
        self.episodes += 1;
        self.total_moves += summary.moves as u64;
        self.cases_recorded += summary.moves as u64;
        match summary.winner {
            Some(Player::One) => self.player_one_wins += 1,
            Some(Player::Two) => self.player_two_wins += 1,
            None => self.draws += 1,
        }
    }

    pub fn avg_moves(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.episodes as f64
        }
    }
}

/// Plays episodes of `G` against itself and records the search output.
pub struct SelfPlay<G: GameOracle, P: DefaultPolicy<G>> {
    game: G,
    policy: P,
    initial_state: G::State,
    mcts_config: MctsConfig,
    /// `None` picks a starting player at random each episode
    starting_player: Option<Player>,
    buffer: SharedExperienceBuffer,
    batch_size: usize,
    /// Favor recent cases when sampling minibatches
    recency_weighted: bool,
    seed: u64,
    rng: ChaCha20Rng,
    stats: SelfPlayStats,
}

impl<G, P> SelfPlay<G, P>
where
    G: GameOracle + Clone,
    P: DefaultPolicy<G> + Clone,
{
    pub fn new(
        game: G,
        policy: P,
        initial_state: G::State,
        mcts_config: MctsConfig,
        buffer: SharedExperienceBuffer,
        seed: u64,
    ) -> Self {
        Self {
            game,
            policy,
            initial_state,
            mcts_config,
            starting_player: Some(Player::One),
            buffer,
            batch_size: 64,
            recency_weighted: false,
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            stats: SelfPlayStats::default(),
        }
    }

    /// Builder pattern: fix the starting player, or `None` for random.
    pub fn with_starting_player(mut self, player: Option<Player>) -> Self {
        self.starting_player = player;
        self
    }

    /// Builder pattern: set the minibatch size sampled after each episode.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builder pattern: weight minibatch sampling towards recent cases.
    pub fn with_recency_weighting(mut self, enabled: bool) -> Self {
        self.recency_weighted = enabled;
        self
    }

    pub fn stats(&self) -> &SelfPlayStats {
        &self.stats
    }

    pub fn buffer(&self) -> &SharedExperienceBuffer {
        &self.buffer
    }

    /// Drop every recorded case, as at the start of a training run.
    pub fn clear_buffer(&self) -> Result<()> {
        self.buffer
            .lock()
            .map_err(|_| anyhow!("experience buffer lock poisoned"))?
            .clear();
        Ok(())
    }

    fn pick_starting_player(&mut self) -> Player {
        match self.starting_player {
            Some(player) => player,
            None if self.rng.gen_bool(0.5) => Player::One,
            None => Player::Two,
        }
    }

    /// Play one episode to completion, recording a case per decision point.
    pub fn play_episode(&mut self, episode: u32) -> Result<EpisodeSummary> {
        let starting_player = self.pick_starting_player();
        let mut engine = MctsEngine::with_config(
            self.initial_state.clone(),
            starting_player,
            self.game.clone(),
            self.policy.clone(),
            self.mcts_config.clone(),
            self.seed.wrapping_add(episode as u64),
        )?;

        let mut moves = 0u32;
        while !engine.is_terminal() {
            engine.search()?;
            let distribution = engine.root_distribution()?;

            self.buffer
                .lock()
                .map_err(|_| anyhow!("experience buffer lock poisoned"))?
                .record(ExperienceCase::new(
                    engine.root_features(),
                    distribution.clone(),
                ));

            let player = engine.root_player();
            let action = engine.select_move(&distribution, player)?;
            debug!(episode, move_number = moves, %player, ?action, "Move selected");

            engine.advance_root(&action)?;
            moves += 1;
        }

        let summary = EpisodeSummary {
            moves,
            starting_player,
            winner: engine.root_winner(),
        };
        self.stats.add(&summary);

        let search = engine.stats();
        debug!(
            episode,
            simulations = search.simulations,
            expansions = search.expansions,
            terminal_hits = search.terminal_hits,
            avg_rollout_steps = format!("{:.1}", search.avg_rollout_steps()),
            elapsed_ms = search.elapsed_us / 1000,
            "Episode search stats"
        );

        Ok(summary)
    }

    /// Sample a minibatch from the buffer and hand it to `trainer`.
    pub fn train_on_minibatch<T: Trainer>(&mut self, trainer: &mut T) -> Result<usize> {
        let buffer = self
            .buffer
            .lock()
            .map_err(|_| anyhow!("experience buffer lock poisoned"))?;
        let batch = if self.recency_weighted {
            buffer.sample_weighted(self.batch_size, &mut self.rng)
        } else {
            buffer.sample(self.batch_size, &mut self.rng)
        };
        drop(buffer);

        if batch.is_empty() {
            return Ok(0);
        }
        trainer.train(&batch)?;
        Ok(batch.len())
    }

    /// Play an episode, then train on a fresh minibatch.
    pub fn run_episode<T: Trainer>(
        &mut self,
        episode: u32,
        trainer: &mut T,
    ) -> Result<EpisodeSummary> {
        let summary = self.play_episode(episode)?;
        let sampled = self.train_on_minibatch(trainer)?;

        info!(
            episode,
            moves = summary.moves,
            starter = %summary.starting_player,
            winner = summary
                .winner
                .map_or_else(|| "draw".to_string(), |p| p.to_string()),
            sampled,
            "Episode complete"
        );
        Ok(summary)
    }
}
