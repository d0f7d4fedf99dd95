//! Default policies used to play out rollouts

use crate::oracle::GameOracle;
use crate::player::Player;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Chooses a move for `player` during a rollout.
///
/// Implementations may be stochastic; the caller supplies the RNG so that
/// a fixed seed reproduces the same game. Returning `None` for a
/// non-terminal state is a contract violation surfaced by the search.
pub trait DefaultPolicy<G: GameOracle>: Send + Sync {
    fn choose_action(
        &self,
        game: &G,
        state: &G::State,
        player: Player,
        rng: &mut ChaCha20Rng,
    ) -> Option<G::Action>;
}

/// Uniformly random choice among the legal actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl<G: GameOracle> DefaultPolicy<G> for RandomPolicy {
    fn choose_action(
        &self,
        game: &G,
        state: &G::State,
        player: Player,
        rng: &mut ChaCha20Rng,
    ) -> Option<G::Action> {
        let mut actions = game.legal_actions(state, player);
        if actions.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..actions.len());
        Some(actions.swap_remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameMetadata, OracleError};
    use rand::SeedableRng;

    /// Pick any empty slot of a fixed-size row.
    #[derive(Debug)]
    struct Row;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Mark(usize, Player);

    impl GameOracle for Row {
        type State = [bool; 5];
        type Action = Mark;

        fn legal_actions(&self, state: &[bool; 5], player: Player) -> Vec<Mark> {
            (0..5).filter(|&i| !state[i]).map(|i| Mark(i, player)).collect()
        }

        fn next_state(&self, state: &[bool; 5], action: &Mark) -> Result<[bool; 5], OracleError> {
            let mut next = *state;
            next[action.0] = true;
            Ok(next)
        }

        fn is_terminal(&self, state: &[bool; 5]) -> bool {
            state.iter().all(|&c| c)
        }

        fn num_actions(&self) -> usize {
            5
        }

        fn action_index(&self, action: &Mark) -> usize {
            action.0
        }

        fn encode_state(&self, state: &[bool; 5]) -> Vec<f32> {
            state.iter().map(|&c| if c { 1.0 } else { 0.0 }).collect()
        }

        fn metadata(&self) -> GameMetadata {
            GameMetadata::new("row", "Row").with_board(5, 1).with_actions(5)
        }
    }

    #[test]
    fn test_random_policy_picks_legal_action() {
        let policy = RandomPolicy::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let state = [true, false, true, false, true];

        for _ in 0..50 {
            let action = policy
                .choose_action(&Row, &state, Player::Two, &mut rng)
                .unwrap();
            assert!(action.0 == 1 || action.0 == 3);
            assert_eq!(action.1, Player::Two);
        }
    }

    #[test]
    fn test_random_policy_none_when_no_moves() {
        let policy = RandomPolicy::new();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!(policy
            .choose_action(&Row, &[true; 5], Player::One, &mut rng)
            .is_none());
    }

    #[test]
    fn test_random_policy_determinism_with_same_seed() {
        let policy = RandomPolicy::new();
        let state = [false; 5];
        let mut rng1 = ChaCha20Rng::seed_from_u64(12345);
        let mut rng2 = ChaCha20Rng::seed_from_u64(12345);

        for _ in 0..20 {
            let a1 = policy.choose_action(&Row, &state, Player::One, &mut rng1);
            let a2 = policy.choose_action(&Row, &state, Player::One, &mut rng2);
            assert_eq!(a1, a2, "same seed should produce same actions");
        }
    }
}
