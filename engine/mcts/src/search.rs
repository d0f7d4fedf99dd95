//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse tree using UCT to find a leaf
//! 2. Expansion: Add one child per legal action to the leaf
//! 3. Evaluation: Roll the game out with the default policy
//! 4. Backpropagation: Update statistics along the path
//!
//! [`MctsEngine`] owns the tree for one game and is driven one decision
//! point at a time: run simulations, read the root distribution, pick a
//! move and advance the root.

use std::time::Instant;

use engine_core::game_utils::with_player_prefix;
use engine_core::{DefaultPolicy, GameOracle, Player};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::MctsConfig;
use crate::node::{MctsNode, NodeId};
use crate::rollout::evaluate_leaf;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("Invalid expansion: {0}")]
    InvalidExpansion(String),

    #[error("Non-terminal state has no legal actions: {0}")]
    EmptyChildSet(String),

    #[error("Visit counts sum to zero; nothing to normalize")]
    DegenerateNormalization,

    #[error("Oracle inconsistency: {0}")]
    OracleInconsistency(String),

    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Default policy returned no action for a non-terminal state: {0}")]
    NoPolicyAction(String),

    #[error("Rollout exceeded {0} moves without reaching a terminal state")]
    RolloutLimit(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Counters accumulated across simulations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Simulations completed
    pub simulations: u64,
    /// Nodes expanded
    pub expansions: u64,
    /// Simulations whose evaluated node was already terminal
    pub terminal_hits: u64,
    /// Moves played across all rollouts
    pub rollout_steps: u64,
    /// Wall time spent in `run_simulations`
    pub elapsed_us: u64,
}

impl SearchStats {
    /// Average rollout length in moves.
    pub fn avg_rollout_steps(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.rollout_steps as f64 / self.simulations as f64
        }
    }
}

/// Pick the slot to play from a visit distribution.
///
/// The maximizer takes the highest entry. The minimizer takes the lowest
/// *nonzero* entry, so zero-padded illegal slots are never chosen. Ties go
/// to the lowest index. Returns `None` if every entry is zero.
pub fn select_move_index(distribution: &[f32], player: Player) -> Option<usize> {
    let maximize = player.is_maximizer();
    let mut best: Option<(usize, f32)> = None;

    for (i, &p) in distribution.iter().enumerate() {
        if p <= 0.0 || p.is_nan() {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, b)) if maximize => p > b,
            Some((_, b)) => p < b,
        };
        if better {
            best = Some((i, p));
        }
    }

    best.map(|(i, _)| i)
}

/// Monte Carlo Tree Search engine for one game.
#[derive(Debug)]
pub struct MctsEngine<G: GameOracle, P: DefaultPolicy<G>> {
    game: G,
    policy: P,
    config: MctsConfig,
    tree: MctsTree<G::State, G::Action>,
    rng: ChaCha20Rng,
    stats: SearchStats,
}

impl<G, P> MctsEngine<G, P>
where
    G: GameOracle,
    P: DefaultPolicy<G>,
{
    /// Create an engine rooted at `initial_state` with `initial_player` to
    /// move, default settings and the given exploration constant.
    pub fn new(
        initial_state: G::State,
        initial_player: Player,
        exploration_constant: f64,
        game: G,
        policy: P,
    ) -> Result<Self, SearchError> {
        let config = MctsConfig::default().with_exploration(exploration_constant);
        Self::with_config(initial_state, initial_player, game, policy, config, 0)
    }

    /// Create an engine with full configuration and an explicit RNG seed.
    pub fn with_config(
        initial_state: G::State,
        initial_player: Player,
        game: G,
        policy: P,
        config: MctsConfig,
        seed: u64,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        let is_terminal = game.is_terminal(&initial_state);
        let tree = MctsTree::new(MctsNode::new_root(initial_state, initial_player, is_terminal));

        Ok(Self {
            game,
            policy,
            config,
            tree,
            rng: ChaCha20Rng::seed_from_u64(seed),
            stats: SearchStats::default(),
        })
    }

    /// Run `n` simulations against the current root.
    pub fn run_simulations(&mut self, n: u32) -> Result<(), SearchError> {
        let start = Instant::now();
        for _ in 0..n {
            self.simulate()?;
        }
        self.stats.elapsed_us += start.elapsed().as_micros() as u64;

        let tree_stats = self.tree.stats();
        debug!(
            simulations = n,
            root_visits = tree_stats.root_visits,
            nodes = tree_stats.total_nodes,
            max_depth = tree_stats.max_depth,
            "MCTS search complete"
        );
        Ok(())
    }

    /// Run the configured number of simulations.
    pub fn search(&mut self) -> Result<(), SearchError> {
        self.run_simulations(self.config.num_simulations)
    }

    /// Run a single simulation (select -> expand -> evaluate -> backpropagate).
    fn simulate(&mut self) -> Result<(), SearchError> {
        let c = self.config.exploration_constant;

        // Selection: traverse to a leaf
        let (mut leaf_id, mut depth) = self.tree.select_leaf(c);

        // Expansion: evaluate the first unvisited child rather than the leaf
        let leaf = self.tree.get(leaf_id);
        if !leaf.is_terminal() && !leaf.is_expanded() {
            self.expand(leaf_id)?;
            if let Some(child_id) = self.tree.select_child(leaf_id, c) {
                leaf_id = child_id;
                depth += 1;
            }
        }

        // Evaluation
        let leaf = self.tree.get(leaf_id);
        if leaf.is_terminal() {
            self.stats.terminal_hits += 1;
        }
        let (reward, steps) = evaluate_leaf(
            &self.game,
            &self.policy,
            leaf.state(),
            leaf.player(),
            &self.config,
            &mut self.rng,
        )?;

        // Backpropagation
        self.tree.backpropagate(leaf_id, reward);
        self.stats.simulations += 1;
        self.stats.rollout_steps += steps;

        trace!(
            leaf = leaf_id.0,
            depth = depth,
            reward = reward,
            rollout_steps = steps,
            "MCTS simulation complete"
        );

        Ok(())
    }

    /// Expand a leaf by attaching one child per legal action.
    ///
    /// Returns the number of children created. Expanding a terminal or
    /// already-expanded node is rejected with [`SearchError::InvalidExpansion`].
    pub fn expand(&mut self, node_id: NodeId) -> Result<usize, SearchError> {
        let node = self.tree.get(node_id);

        if node.is_expanded() {
            warn!(node = node_id.0, "Refusing to re-expand an expanded node");
            return Err(SearchError::InvalidExpansion(format!(
                "node {} already has {} children",
                node_id.0,
                node.children().len()
            )));
        }
        if node.is_terminal() {
            warn!(node = node_id.0, "Refusing to expand a terminal node");
            return Err(SearchError::InvalidExpansion(format!(
                "node {} is terminal",
                node_id.0
            )));
        }

        let mover = node.player();
        let actions = self.game.legal_actions(node.state(), mover);
        if actions.is_empty() {
            return Err(SearchError::EmptyChildSet(format!("{:?}", node.state())));
        }

        // Build every child before attaching any so a failure leaves the node untouched.
        let num_actions = self.game.num_actions();
        let mut seen = vec![false; num_actions];
        let mut children = Vec::with_capacity(actions.len());
        for action in actions {
            let index = self.game.action_index(&action);
            match seen.get_mut(index) {
                None => {
                    return Err(SearchError::OracleInconsistency(format!(
                        "action {action:?} maps to slot {index} of {num_actions}"
                    )))
                }
                Some(true) => {
                    return Err(SearchError::OracleInconsistency(format!(
                        "action {action:?} shares slot {index} with a sibling"
                    )))
                }
                Some(slot) => *slot = true,
            }

            let child_state = self.game.next_state(node.state(), &action).map_err(|e| {
                SearchError::OracleInconsistency(format!("legal action {action:?} rejected: {e}"))
            })?;
            let is_terminal = self.game.is_terminal(&child_state);
            children.push(MctsNode::new_child(
                action,
                child_state,
                mover.opponent(),
                is_terminal,
            ));
        }

        let count = children.len();
        for child in children {
            self.tree.attach_child(node_id, child);
        }
        self.stats.expansions += 1;

        trace!(node = node_id.0, children = count, "Expanded node");
        Ok(count)
    }

    /// Normalized visit counts of the root's children, one slot per action.
    ///
    /// Slots without a child stay at exactly zero.
    pub fn root_distribution(&self) -> Result<Vec<f32>, SearchError> {
        let num_actions = self.game.num_actions();
        let mut counts = vec![0u32; num_actions];

        for (child_id, visits) in self.tree.root_child_visits() {
            let action = self
                .tree
                .get(child_id)
                .action()
                .ok_or_else(|| SearchError::OracleInconsistency("child without action".into()))?;
            let index = self.game.action_index(action);
            let slot = counts.get_mut(index).ok_or_else(|| {
                SearchError::OracleInconsistency(format!(
                    "action {action:?} maps to slot {index} of {num_actions}"
                ))
            })?;
            *slot += visits;
        }

        let total: u64 = counts.iter().map(|&c| c as u64).sum();
        if total == 0 {
            return Err(SearchError::DegenerateNormalization);
        }

        let total = total as f32;
        Ok(counts.into_iter().map(|c| c as f32 / total).collect())
    }

    /// Choose the root child to play for `player` from `distribution`.
    pub fn select_move(
        &self,
        distribution: &[f32],
        player: Player,
    ) -> Result<G::Action, SearchError> {
        let num_actions = self.game.num_actions();
        if distribution.len() != num_actions {
            return Err(SearchError::IllegalAction(format!(
                "distribution has {} slots, game has {}",
                distribution.len(),
                num_actions
            )));
        }

        let index =
            select_move_index(distribution, player).ok_or(SearchError::DegenerateNormalization)?;

        let root = self.tree.get(self.tree.root());
        root.children()
            .iter()
            .filter_map(|&id| self.tree.get(id).action())
            .find(|action| self.game.action_index(action) == index)
            .cloned()
            .ok_or_else(|| {
                SearchError::IllegalAction(format!("no root child occupies slot {index}"))
            })
    }

    /// Play `action` from the root and make the resulting node the new root.
    ///
    /// If the root already has a child for `action` its subtree is kept and
    /// everything else is dropped. Otherwise a fresh root is built from the
    /// oracle's transition.
    pub fn advance_root(&mut self, action: &G::Action) -> Result<(), SearchError> {
        let root_id = self.tree.root();
        let existing = self
            .tree
            .get(root_id)
            .children()
            .iter()
            .copied()
            .find(|&id| self.tree.get(id).action() == Some(action));

        if let Some(child_id) = existing {
            let before = self.tree.len();
            self.tree.reroot(child_id);
            debug!(
                kept = self.tree.len(),
                dropped = before - self.tree.len(),
                "Advanced root into existing subtree"
            );
            return Ok(());
        }

        let root = self.tree.get(root_id);
        if root.is_terminal() {
            return Err(SearchError::IllegalAction(format!(
                "{action:?} played from a terminal state"
            )));
        }
        let legal = self.game.legal_actions(root.state(), root.player());
        if !legal.contains(action) {
            return Err(SearchError::IllegalAction(format!("{action:?}")));
        }
        let next = self
            .game
            .next_state(root.state(), action)
            .map_err(|e| SearchError::IllegalAction(format!("{action:?}: {e}")))?;
        let is_terminal = self.game.is_terminal(&next);
        let next_player = root.player().opponent();

        self.tree = MctsTree::new(MctsNode::new_root(next, next_player, is_terminal));
        debug!("Advanced root to a fresh node");
        Ok(())
    }

    /// Whether the game at the root is over.
    pub fn is_terminal(&self) -> bool {
        self.root().is_terminal()
    }

    /// The current root node.
    pub fn root(&self) -> &MctsNode<G::State, G::Action> {
        self.tree.get(self.tree.root())
    }

    /// The game state at the root.
    pub fn root_state(&self) -> &G::State {
        self.root().state()
    }

    /// Player to move at the root.
    pub fn root_player(&self) -> Player {
        self.root().player()
    }

    /// Root state encoded for the experience buffer: mover id, then cells.
    pub fn root_features(&self) -> Vec<f32> {
        let root = self.root();
        with_player_prefix(root.player(), &self.game.encode_state(root.state()))
    }

    /// Winner of a terminal root, given who made the final move.
    pub fn root_winner(&self) -> Option<Player> {
        let root = self.root();
        self.game.winner(root.state(), root.player().opponent())
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::State, G::Action> {
        &self.tree
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
