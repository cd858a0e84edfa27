//! MCTS tree node representation.
//!
//! Each node owns the game state reached by taking an action from the parent.
//! Nodes store the visit statistics used by UCB selection.

use engine_core::GameState;

/// Visit count given to a node at creation, so the UCB term stays finite
/// before the first evaluation.
pub const INITIAL_VISITS: f64 = 1e-5;

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
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S: GameState> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent. None for the root.
    pub action: Option<S::Action>,

    /// Game state at this node
    pub state: S,

    /// Number of evaluations that passed through this node
    pub visit_count: f64,

    /// Sum of rewards backpropagated through this node
    pub reward: f64,

    /// Children in expansion order. Empty until the node is expanded.
    pub children: Vec<NodeId>,
}

impl<S: GameState> MctsNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            visit_count: INITIAL_VISITS,
            reward: 0.0,
            children: Vec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: S::Action, state: S) -> Self {
        Self {
            parent,
            action: Some(action),
            state,
            visit_count: INITIAL_VISITS,
            reward: 0.0,
            children: Vec::new(),
        }
    }

    /// Mean reward per visit.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        self.reward / self.visit_count
    }

    /// UCB1 score: `mean + c * sqrt(ln(N_parent) / N)`.
    ///
    /// Only meaningful for a child whose parent has been visited at least
    /// once; the tree guards that by never scoring the root.
    #[inline]
    pub fn ucb_score(&self, parent_visits: f64, c: f64) -> f64 {
        self.mean_reward() + c * (parent_visits.ln() / self.visit_count).sqrt()
    }

    /// Store the statistics of the first evaluation, replacing the creation values.
    pub fn record_evaluation(&mut self, reward: f64) {
        self.reward = reward;
        self.visit_count = 1.0;
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }
}
