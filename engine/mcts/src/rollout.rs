//! Rollout evaluation.
//!
//! A rollout plays the game out from a leaf with the default policy and
//! scores the finished game from Player One's perspective. Rollouts never
//! touch the tree, so several can run on independent threads and be
//! averaged into a single reward.

use engine_core::game_utils::terminal_reward;
use engine_core::{DefaultPolicy, GameOracle, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use crate::config::MctsConfig;
use crate::search::SearchError;

/// Outcome of a single simulated game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutOutcome {
    /// Winner of the finished game (`None` for a draw).
    pub winner: Option<Player>,
    /// Moves played before the game ended.
    pub steps: u32,
    /// Reward from Player One's perspective.
    pub reward: f64,
}

/// Play one game to the end from `state` with `player` to move.
pub fn rollout<G, P>(
    game: &G,
    policy: &P,
    state: &G::State,
    player: Player,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<RolloutOutcome, SearchError>
where
    G: GameOracle,
    P: DefaultPolicy<G>,
{
    let mut state = state.clone();
    let mut mover = player;
    let mut steps = 0u32;

    while !game.is_terminal(&state) {
        if steps >= config.max_rollout_steps {
            return Err(SearchError::RolloutLimit(config.max_rollout_steps));
        }
        let action = policy
            .choose_action(game, &state, mover, rng)
            .ok_or_else(|| SearchError::NoPolicyAction(format!("{state:?}")))?;
        state = game
            .next_state(&state, &action)
            .map_err(|e| SearchError::OracleInconsistency(format!("rollout move {action:?}: {e}")))?;
        mover = mover.opponent();
        steps += 1;
    }

    // `mover` is whoever would move next; the previous player ended the game.
    let winner = game.winner(&state, mover.opponent());
    Ok(RolloutOutcome {
        winner,
        steps,
        reward: terminal_reward(winner, config.win_reward, config.loss_reward),
    })
}

/// Run `config.rollouts_per_leaf` rollouts and average their rewards.
///
/// A single rollout uses `rng` directly. Multiple rollouts each get a
/// `ChaCha20Rng` seeded from `rng` and run on the rayon pool, so results are
/// reproducible for a fixed seed regardless of thread scheduling.
/// Returns the mean reward and the total number of moves played.
pub fn evaluate_leaf<G, P>(
    game: &G,
    policy: &P,
    state: &G::State,
    player: Player,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<(f64, u64), SearchError>
where
    G: GameOracle,
    P: DefaultPolicy<G>,
{
    if config.rollouts_per_leaf <= 1 {
        let outcome = rollout(game, policy, state, player, config, rng)?;
        return Ok((outcome.reward, outcome.steps as u64));
    }

    let seeds: Vec<u64> = (0..config.rollouts_per_leaf).map(|_| rng.gen()).collect();
    let outcomes = seeds
        .par_iter()
        .map(|&seed| {
            let mut local = ChaCha20Rng::seed_from_u64(seed);
            rollout(game, policy, state, player, config, &mut local)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total: f64 = outcomes.iter().map(|o| o.reward).sum();
    let steps: u64 = outcomes.iter().map(|o| o.steps as u64).sum();
    Ok((total / outcomes.len() as f64, steps))
}
