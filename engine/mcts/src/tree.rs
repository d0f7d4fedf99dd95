//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Children are owned top-down through
//! their parent's child list; the parent link is a plain index.

use std::collections::VecDeque;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct MctsTree<S, A> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S, A>>,

    /// Root node index (always 0 after construction or re-rooting)
    root: NodeId,
}

impl<S, A> MctsTree<S, A> {
    /// Create a new tree holding only `root`.
    pub fn new(root: MctsNode<S, A>) -> Self {
        debug_assert!(root.parent.is_none(), "root must not have a parent");
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S, A> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S, A> {
        &mut self.nodes[id.index()]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach a detached node under `parent` and return its new ID.
    ///
    /// This is the only way a parent/child edge is formed. Because `child` is
    /// taken by value and [`MctsNode::new_child`] always produces a detached
    /// node, a child can never be attached twice.
    pub fn attach_child(&mut self, parent: NodeId, mut child: MctsNode<S, A>) -> NodeId {
        debug_assert!(child.parent.is_none(), "child already has a parent");
        debug_assert!(child.children.is_empty(), "attached child must be fresh");

        let child_id = NodeId(self.nodes.len() as u32);
        child.parent = parent;
        self.nodes.push(child);
        self.get_mut(parent).children.push(child_id);
        child_id
    }

    /// Select the child of `node_id` with the best UCT-adjusted value.
    ///
    /// The maximizer takes the highest adjusted value, the minimizer the
    /// lowest. Ties go to the first child in generation order.
    pub fn select_child(&self, node_id: NodeId, c: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let mover = node.player;
        let parent_visits = node.visit_count;
        let maximize = mover.is_maximizer();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self.get(child_id).adjusted_value(parent_visits, c, mover);
            let better = match best {
                None => true,
                Some((_, best_score)) if maximize => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if better {
                best = Some((child_id, score));
            }
        }

        best.map(|(id, _)| id)
    }

    /// Walk from the root to a leaf: a terminal node or one without children.
    /// Returns the leaf and its depth.
    pub fn select_leaf(&self, c: f64) -> (NodeId, u32) {
        let mut current = self.root;
        let mut depth = 0;

        loop {
            let node = self.get(current);
            if node.is_leaf() {
                break;
            }
            match self.select_child(current, c) {
                Some(child_id) => {
                    current = child_id;
                    depth += 1;
                }
                None => break,
            }
        }

        (current, depth)
    }

    /// Backpropagate `reward` from a leaf to the root.
    ///
    /// The leaf's visit count is incremented first. Each step up then
    /// increments the parent and folds the reward into the child's running
    /// mean. The root's value is never updated, only its visit count.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        self.get_mut(leaf_id).increment_visit();

        let mut current_id = leaf_id;
        loop {
            let parent_id = self.get(current_id).parent;
            if parent_id.is_none() {
                break;
            }
            self.get_mut(parent_id).increment_visit();
            self.get_mut(current_id).record_reward(reward);
            current_id = parent_id;
        }
    }

    /// Visit counts of the root's children, in generation order.
    pub fn root_child_visits(&self) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.get(self.root)
            .children
            .iter()
            .map(move |&id| (id, self.get(id).visit_count))
    }

    /// Make `new_root` the root, dropping every node outside its subtree.
    ///
    /// Surviving nodes are compacted into a fresh arena in breadth-first
    /// order, so the new root lands at index 0 and memory stays bounded by
    /// the subtree that is kept.
    pub fn reroot(&mut self, new_root: NodeId) {
        // Pass 1: collect the subtree in BFS order and assign new ids.
        let mut order = Vec::new();
        let mut remap = vec![NodeId::NONE; self.nodes.len()];
        let mut queue = VecDeque::from([new_root]);
        while let Some(old_id) = queue.pop_front() {
            remap[old_id.index()] = NodeId(order.len() as u32);
            order.push(old_id);
            queue.extend(self.get(old_id).children.iter().copied());
        }

        // Pass 2: move the surviving nodes, rewriting their links.
        let mut old: Vec<Option<MctsNode<S, A>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for old_id in order {
            let Some(mut node) = old[old_id.index()].take() else {
                continue;
            };
            if old_id == new_root {
                node.parent = NodeId::NONE;
                node.action = None;
            } else {
                node.parent = remap[node.parent.index()];
            }
            for child in node.children.iter_mut() {
                *child = remap[child.index()];
            }
            nodes.push(node);
        }

        self.nodes = nodes;
        self.root = NodeId(0);
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self.get(id).children.iter().map(|&c| (c, depth + 1)));
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}
