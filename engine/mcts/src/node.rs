//! MCTS tree node representation.
//!
//! Each node represents a game state reached by taking an action from the parent.
//! Nodes store the visit count and running mean value used by UCT selection.
//! Values are always expressed from Player One's (the maximizer's) perspective.

use engine_core::Player;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S, A> {
    /// Parent node index (NONE for root). Non-owning back-reference.
    pub(crate) parent: NodeId,

    /// Action that produced this node from its parent (None for root)
    pub(crate) action: Option<A>,

    /// Game state snapshot at this node
    pub(crate) state: S,

    /// Player who chooses the next action from this node
    pub(crate) player: Player,

    /// Whether the oracle reported this state as finished
    pub(crate) is_terminal: bool,

    /// Number of times this node has been visited
    pub(crate) visit_count: u32,

    /// Running mean of the rewards backpropagated through this node.
    pub(crate) value: f64,

    /// Children in generation order. Empty until node is expanded.
    pub(crate) children: Vec<NodeId>,
}

impl<S, A> MctsNode<S, A> {
    /// Create a new root node for `player` to move in `state`.
    pub fn new_root(state: S, player: Player, is_terminal: bool) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            player,
            is_terminal,
            visit_count: 0,
            value: 0.0,
            children: Vec::new(),
        }
    }

    /// Create a detached child node. It gains a parent only through
    /// [`crate::MctsTree::attach_child`].
    pub fn new_child(action: A, state: S, player: Player, is_terminal: bool) -> Self {
        Self {
            parent: NodeId::NONE,
            action: Some(action),
            state,
            player,
            is_terminal,
            visit_count: 0,
            value: 0.0,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[inline]
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.is_some().then_some(self.parent)
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn visit_count(&self) -> u32 {
        self.visit_count
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    #[inline]
    pub fn increment_visit(&mut self) {
        self.visit_count += 1;
    }

    #[inline]
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Fold `reward` into the running mean.
    ///
    /// The visit count must already include the visit being recorded.
    #[inline]
    pub fn record_reward(&mut self, reward: f64) {
        debug_assert!(self.visit_count > 0, "reward recorded before visit");
        let n = self.visit_count.max(1) as f64;
        self.value += (reward - self.value) / n;
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this is a leaf node (not expanded or terminal).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_terminal || !self.is_expanded()
    }

    /// Value plus (maximizer) or minus (minimizer) the exploration bonus,
    /// as seen by `mover` choosing among its children.
    #[inline]
    pub fn adjusted_value(&self, parent_visits: u32, c: f64, mover: Player) -> f64 {
        let bonus = exploration_bonus(parent_visits, self.visit_count, c);
        if mover.is_maximizer() {
            self.value + bonus
        } else {
            self.value - bonus
        }
    }
}

/// UCT exploration bonus `c * sqrt(ln(N_parent) / (1 + N_child))`.
///
/// An unvisited child, or a parent that has never been visited, gets an
/// infinite bonus so that it is always explored first.
#[inline]
pub fn exploration_bonus(parent_visits: u32, child_visits: u32, c: f64) -> f64 {
    if parent_visits == 0 || child_visits == 0 {
        return f64::INFINITY;
    }
    c * ((parent_visits as f64).ln() / (1.0 + child_visits as f64)).sqrt()
}
