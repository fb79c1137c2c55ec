//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! Each node is owned by the arena and reachable from exactly one parent, so
//! the tree has no cycles and no back-references.

use crate::node::{NodeId, SearchNode};
use crate::ucb::ucb1;

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree {
    /// Arena storing all nodes
    nodes: Vec<SearchNode>,

    /// Root node index (always 0)
    root: NodeId,
}

impl SearchTree {
    /// Create a tree holding only an unvisited root.
    pub fn new() -> Self {
        Self {
            nodes: vec![SearchNode::new()],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Create an unvisited child of `parent_id` for `column`.
    pub fn add_child(&mut self, parent_id: NodeId, column: usize) -> NodeId {
        debug_assert!(
            self.get(parent_id).child(column).is_none(),
            "column {column} already expanded"
        );
        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new());
        self.get_mut(parent_id).children.push((column, child_id));
        child_id
    }

    /// Add one visit and `reward` to every node on `path`.
    ///
    /// The reward is in the search's fixed frame, so every node receives the
    /// same value regardless of whose turn it is there.
    pub fn backpropagate(&mut self, path: &[NodeId], reward: f64) {
        for &id in path {
            let node = self.get_mut(id);
            node.visits += 1;
            node.total_reward += reward;
        }
    }

    /// UCB1 score of every child of `node_id`, in creation order.
    pub fn ucb_scores(
        &self,
        node_id: NodeId,
        exploration_constant: f64,
        maximizing: bool,
    ) -> Vec<(usize, NodeId, f64)> {
        let node = self.get(node_id);
        node.children
            .iter()
            .map(|&(column, id)| {
                let child = self.get(id);
                let score = ucb1(
                    child.total_reward,
                    child.visits,
                    node.visits,
                    exploration_constant,
                    maximizing,
                );
                (column, id, score)
            })
            .collect()
    }

    /// Select the child with the best UCB1 score for the player to move.
    ///
    /// Highest score when maximizing, lowest when minimizing. Ties go to the
    /// child created first. `inspect` sees every `(column, score)` pair in
    /// creation order before the choice is made.
    pub fn select_child<F>(
        &self,
        node_id: NodeId,
        exploration_constant: f64,
        maximizing: bool,
        mut inspect: F,
    ) -> Option<(usize, NodeId)>
    where
        F: FnMut(usize, f64),
    {
        let scored = self.ucb_scores(node_id, exploration_constant, maximizing);
        for &(column, _, score) in &scored {
            inspect(column, score);
        }
        best_scored(&scored, maximizing)
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self.get(id).children.iter().map(|&(_, c)| (c, depth + 1)));
        }
        max_depth
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

/// First entry with the extreme score: max when maximizing, min otherwise.
fn best_scored(
    scored: &[(usize, NodeId, f64)],
    maximizing: bool,
) -> Option<(usize, NodeId)> {
    let mut best: Option<(usize, NodeId, f64)> = None;
    for &(column, id, score) in scored {
        let better = match best {
            None => true,
            Some((_, _, best_score)) if maximizing => score > best_score,
            Some((_, _, best_score)) => score < best_score,
        };
        if better {
            best = Some((column, id, score));
        }
    }
    best.map(|(column, id, _)| (column, id))
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: Option<f64>,
    pub max_depth: u32,
}
