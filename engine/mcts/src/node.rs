//! MCTS tree node representation.
//!
//! Each node represents the position reached by playing a column from its
//! parent. Nodes hold no board copy and no parent link: the search replays
//! moves on one shared board and tracks the current path itself.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone, Default)]
pub struct SearchNode {
    /// Number of simulations that passed through this node
    pub visits: u32,

    /// Sum of rewards backpropagated through this node, in the search's
    /// fixed reward frame.
    pub total_reward: f64,

    /// Children as (column, NodeId) pairs in creation order.
    pub children: Vec<(usize, NodeId)>,
}

impl SearchNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Average reward, or `None` if never visited.
    #[inline]
    pub fn mean_value(&self) -> Option<f64> {
        (self.visits > 0).then(|| self.total_reward / f64::from(self.visits))
    }

    /// Child reached by playing `column`, if it exists.
    pub fn child(&self, column: usize) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, id)| *id)
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }
}
