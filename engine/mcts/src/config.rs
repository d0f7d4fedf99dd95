//! MCTS configuration parameters.

use crate::search::SearchError;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run per decision point.
    pub num_simulations: u32,

    /// Exploration constant `C` in the UCT bonus.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration_constant: f64,

    /// Rollout reward when Player One wins.
    pub win_reward: f64,

    /// Rollout reward when Player Two wins. Use -1.0 for a symmetric
    /// convention or 0.0 for a win-rate convention. Draws score the midpoint.
    pub loss_reward: f64,

    /// Independent rollouts per evaluated leaf, averaged into one reward.
    /// Values above 1 run the rollouts on the rayon thread pool.
    pub rollouts_per_leaf: usize,

    /// Upper bound on moves in a single rollout before it is abandoned.
    pub max_rollout_steps: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 800,
            exploration_constant: 1.0,
            win_reward: 1.0,
            loss_reward: -1.0,
            rollouts_per_leaf: 1,
            max_rollout_steps: 10_000,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 50,
            max_rollout_steps: 1_000,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the reward for a Player Two win.
    pub fn with_loss_reward(mut self, reward: f64) -> Self {
        self.loss_reward = reward;
        self
    }

    /// Builder pattern: set the number of rollouts per leaf.
    pub fn with_rollouts_per_leaf(mut self, n: usize) -> Self {
        self.rollouts_per_leaf = n;
        self
    }

    /// Builder pattern: set the rollout step limit.
    pub fn with_max_rollout_steps(mut self, n: u32) -> Self {
        self.max_rollout_steps = n;
        self
    }

    /// Reward for a drawn rollout.
    pub fn draw_reward(&self) -> f64 {
        (self.win_reward + self.loss_reward) / 2.0
    }

    /// Reject settings the search cannot run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration_constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if !self.win_reward.is_finite() || !self.loss_reward.is_finite() {
            return Err(SearchError::InvalidConfig(
                "rewards must be finite".to_string(),
            ));
        }
        if self.win_reward <= self.loss_reward {
            return Err(SearchError::InvalidConfig(format!(
                "win_reward ({}) must exceed loss_reward ({})",
                self.win_reward, self.loss_reward
            )));
        }
        if self.rollouts_per_leaf == 0 {
            return Err(SearchError::InvalidConfig(
                "rollouts_per_leaf must be at least 1".to_string(),
            ));
        }
        if self.max_rollout_steps == 0 {
            return Err(SearchError::InvalidConfig(
                "max_rollout_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 800);
        assert!((config.exploration_constant - 1.0).abs() < 1e-9);
        assert!((config.loss_reward + 1.0).abs() < 1e-9);
        assert_eq!(config.rollouts_per_leaf, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(100)
            .with_exploration(1.4)
            .with_rollouts_per_leaf(4);

        assert_eq!(config.num_simulations, 100);
        assert!((config.exploration_constant - 1.4).abs() < 1e-9);
        assert_eq!(config.rollouts_per_leaf, 4);
    }

    #[test]
    fn test_draw_reward_midpoint() {
        assert!(MctsConfig::default().draw_reward().abs() < 1e-9);
        let zero_one = MctsConfig::default().with_loss_reward(0.0);
        assert!((zero_one.draw_reward() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(MctsConfig::default().with_exploration(-0.1).validate().is_err());
        assert!(MctsConfig::default()
            .with_exploration(f64::NAN)
            .validate()
            .is_err());
        assert!(MctsConfig::default().with_loss_reward(1.0).validate().is_err());
        assert!(MctsConfig::default()
            .with_rollouts_per_leaf(0)
            .validate()
            .is_err());
        assert!(MctsConfig::default()
            .with_max_rollout_steps(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_exploration_is_valid() {
        assert!(MctsConfig::for_testing().with_exploration(0.0).validate().is_ok());
    }
}
