//! MCTS tree structure with arena allocation.
//!
//! Nodes live in a contiguous Vec and reference each other by NodeId, so
//! child-to-parent links never form ownership cycles. The whole arena is
//! dropped at once when the engine moves to a new root.

use engine_core::GameState;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: GameState> MctsTree<S> {
    /// Create a new tree holding only the root state.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
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
    pub fn get(&self, id: NodeId) -> &MctsNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
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
    pub fn arena(&self) -> &[MctsNode<S>] {
        &self.nodes
    }

    /// Attach a new child under `parent_id` and return its ID.
    pub fn add_child(&mut self, parent_id: NodeId, action: S::Action, state: S) -> NodeId {
        let child_id = self.allocate(MctsNode::new_child(parent_id, action, state));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// UCB score of a node, None for the root.
    pub fn score(&self, id: NodeId, c: f64) -> Option<f64> {
        let node = self.get(id);
        if node.is_root() {
            return None;
        }
        let parent_visits = self.get(node.parent).visit_count;
        Some(node.ucb_score(parent_visits, c))
    }

    /// Child with the highest UCB score. Exact ties are broken uniformly at
    /// random. Returns None for a node without children.
    pub fn best_child(&self, id: NodeId, c: f64, rng: &mut ChaCha20Rng) -> Option<NodeId> {
        let node = self.get(id);
        if node.children.is_empty() {
            return None;
        }

        let parent_visits = node.visit_count;
        let scores: Vec<f64> = node
            .children
            .iter()
            .map(|&child| self.get(child).ucb_score(parent_visits, c))
            .collect();

        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<NodeId> = node
            .children
            .iter()
            .zip(scores.iter())
            .filter(|(_, &s)| s == best)
            .map(|(&child, _)| child)
            .collect();

        match tied.len() {
            // Every score was NaN
            0 => node.children.first().copied(),
            1 => Some(tied[0]),
            n => Some(tied[rng.gen_range(0..n)]),
        }
    }

    /// Nodes visited by repeatedly following `best_child` from `id`,
    /// excluding `id` itself. Empty when `id` has no children.
    pub fn best_line(&self, id: NodeId, c: f64, rng: &mut ChaCha20Rng) -> Vec<NodeId> {
        let mut line = Vec::new();
        let mut current = id;
        while let Some(child) = self.best_child(current, c, rng) {
            line.push(child);
            current = child;
        }
        line
    }

    /// Selection: the path from the root down to a frontier node, root included.
    pub fn select(&self, c: f64, rng: &mut ChaCha20Rng) -> Vec<NodeId> {
        let mut path = vec![self.root];
        path.extend(self.best_line(self.root, c, rng));
        path
    }

    /// Action of the last node on the best line from `id`, or the node's own
    /// action when it has no children. None when that node is the root.
    pub fn best_action(&self, id: NodeId, c: f64, rng: &mut ChaCha20Rng) -> Option<S::Action> {
        let last = self.best_line(id, c, rng).last().copied().unwrap_or(id);
        self.get(last).action.clone()
    }

    /// Action of the root's best child. None if the root was never expanded.
    pub fn best_root_action(&self, c: f64, rng: &mut ChaCha20Rng) -> Option<S::Action> {
        let child = self.best_child(self.root, c, rng)?;
        self.get(child).action.clone()
    }

    /// Add a freshly evaluated child's reward to every node on `path`
    /// (root first, the child's parent last) and count one visit each.
    ///
    /// With `discount = Some(d)`, the node `k` levels above the child
    /// receives `reward * d^k`.
    pub fn backpropagate(&mut self, path: &[NodeId], reward: f64, discount: Option<f64>) {
        let len = path.len();
        for (i, &id) in path.iter().enumerate() {
            let depth = (len - i) as i32;
            let scale = discount.map_or(1.0, |d| d.powi(depth));

            let node = self.get_mut(id);
            node.reward += reward * scale;
            node.visit_count += 1.0;
        }
    }

    /// Count another visit to a frontier that cannot be expanded (terminal,
    /// or without legal actions), re-using its mean reward as the
    /// evaluation. The frontier is the last node of `path`; its ancestors
    /// are updated as by [`backpropagate`](Self::backpropagate).
    ///
    /// Returns the reward that was propagated.
    pub fn revisit_leaf(&mut self, path: &[NodeId], discount: Option<f64>) -> f64 {
        let Some((&leaf, ancestors)) = path.split_last() else {
            return 0.0;
        };

        let node = self.get_mut(leaf);
        let value = node.mean_reward();
        node.reward += value;
        node.visit_count += 1.0;

        self.backpropagate(ancestors, value, discount);
        value
    }

    /// Per-node `(visit_count, reward)` in allocation order.
    pub fn snapshot(&self) -> Vec<(f64, f64)> {
        self.nodes
            .iter()
            .map(|n| (n.visit_count, n.reward))
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_children: root.children.len(),
            root_visits: root.visit_count,
            root_mean_reward: root.mean_reward(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_children: usize,
    pub root_visits: f64,
    pub root_mean_reward: f64,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::INITIAL_VISITS;
    use crate::test_games::{Choice, Duel, Race, Step};
    use rand::SeedableRng;

    const C: f64 = std::f64::consts::SQRT_2;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    #[test]
    fn test_new_tree() {
        let tree = MctsTree::new(Duel::start());

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));
        assert!(tree.get(tree.root()).is_root());
        assert_eq!(tree.score(tree.root(), C), None);
    }

    #[test]
    fn test_add_child() {
        let mut tree = MctsTree::new(Duel::start());
        let child_id = tree.add_child(tree.root(), Choice::A, Duel::start());

        assert_eq!(tree.len(), 2);
        assert_eq!(child_id, NodeId(1));
        assert_eq!(tree.get(tree.root()).children, vec![NodeId(1)]);

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert_eq!(child.action, Some(Choice::A));
    }

    #[test]
    fn test_best_child_of_leaf_is_none() {
        let tree = MctsTree::new(Duel::start());
        assert_eq!(tree.best_child(tree.root(), C, &mut rng()), None);
    }

    #[test]
    fn test_best_action_of_childless_node() {
        let mut tree = MctsTree::new(Duel::start());
        let mut r = rng();
        assert_eq!(tree.best_action(tree.root(), C, &mut r), None);

        let child = tree.add_child(tree.root(), Choice::B, Duel::start());
        assert_eq!(tree.best_action(child, C, &mut r), Some(Choice::B));
    }

    #[test]
    fn test_best_child_prefers_higher_score() {
        let mut tree = MctsTree::new(Duel::start());
        let a = tree.add_child(tree.root(), Choice::A, Duel::start());
        let b = tree.add_child(tree.root(), Choice::B, Duel::start());
        tree.get_mut(a).record_evaluation(1.0);
        tree.get_mut(b).record_evaluation(-1.0);
        tree.backpropagate(&[tree.root()], 1.0, None);
        tree.backpropagate(&[tree.root()], -1.0, None);

        assert_eq!(tree.best_child(tree.root(), C, &mut rng()), Some(a));
        assert!(tree.score(a, C).unwrap() > tree.score(b, C).unwrap());
    }

    #[test]
    fn test_ties_broken_uniformly() {
        let mut tree = MctsTree::new(Duel::start());
        let a = tree.add_child(tree.root(), Choice::A, Duel::start());
        let b = tree.add_child(tree.root(), Choice::B, Duel::start());
        for id in [a, b] {
            tree.get_mut(id).record_evaluation(0.5);
            tree.backpropagate(&[tree.root()], 0.5, None);
        }

        let mut r = rng();
        let mut picked_a = 0;
        for _ in 0..1000 {
            if tree.best_child(tree.root(), C, &mut r) == Some(a) {
                picked_a += 1;
            }
        }
        assert!(
            (400..=600).contains(&picked_a),
            "tie-break should be uniform, picked A {picked_a} times"
        );
    }

    #[test]
    fn test_backpropagate_undiscounted() {
        let mut tree = MctsTree::new(Duel::start());
        let child = tree.add_child(tree.root(), Choice::A, Duel::start());
        let grandchild = tree.add_child(child, Choice::B, Duel::start());
        let path = [tree.root(), child, grandchild];

        tree.backpropagate(&path, 2.0, None);

        for id in path {
            let node = tree.get(id);
            assert!((node.visit_count - (1.0 + INITIAL_VISITS)).abs() < 1e-12);
            assert!((node.reward - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_backpropagate_discounted_by_depth() {
        let mut tree = MctsTree::new(Duel::start());
        let child = tree.add_child(tree.root(), Choice::A, Duel::start());
        let grandchild = tree.add_child(child, Choice::B, Duel::start());
        let path = [tree.root(), child, grandchild];

        tree.backpropagate(&path, 8.0, Some(0.5));

        // The evaluated node hangs below `grandchild`: one level up gets d, root gets d^3
        assert!((tree.get(grandchild).reward - 4.0).abs() < 1e-12);
        assert!((tree.get(child).reward - 2.0).abs() < 1e-12);
        assert!((tree.get(tree.root()).reward - 1.0).abs() < 1e-12);
        assert!((tree.get(tree.root()).visit_count - (1.0 + INITIAL_VISITS)).abs() < 1e-12);
    }

    #[test]
    fn test_revisit_leaf_repeats_mean_reward() {
        let mut tree = MctsTree::new(Duel::start());
        let a = tree.add_child(tree.root(), Choice::A, Duel::start());
        tree.get_mut(a).record_evaluation(3.0);
        tree.backpropagate(&[tree.root()], 3.0, None);

        let value = tree.revisit_leaf(&[tree.root(), a], Some(0.5));
        assert_eq!(value, 3.0);

        let leaf = tree.get(a);
        assert_eq!(leaf.visit_count, 2.0);
        assert_eq!(leaf.mean_reward(), 3.0);

        // Root sits one level above the leaf
        let root = tree.get(tree.root());
        assert!((root.reward - 4.5).abs() < 1e-12);
        assert!((root.visit_count - (2.0 + INITIAL_VISITS)).abs() < 1e-12);
    }

    #[test]
    fn test_revisit_unexpanded_root() {
        let mut tree = MctsTree::new(Duel::start());
        tree.revisit_leaf(&[tree.root()], None);

        let root = tree.get(tree.root());
        assert_eq!(root.reward, 0.0);
        assert!((root.visit_count - (1.0 + INITIAL_VISITS)).abs() < 1e-12);
    }

    #[test]
    fn test_select_descends_to_frontier() {
        let mut tree = MctsTree::new(Race::new(2, 4, &[1]));
        let state = Race::new(2, 3, &[1]);
        let child = tree.add_child(tree.root(), Step(1), state.clone());
        tree.get_mut(child).record_evaluation(0.0);
        tree.backpropagate(&[tree.root()], 0.0, None);
        let grandchild = tree.add_child(child, Step(1), state);
        tree.get_mut(grandchild).record_evaluation(0.0);
        tree.backpropagate(&[tree.root(), child], 0.0, None);

        let path = tree.select(C, &mut rng());
        assert_eq!(path, vec![tree.root(), child, grandchild]);
        assert_eq!(tree.best_action(tree.root(), C, &mut rng()), Some(Step(1)));
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = MctsTree::new(Duel::start());
        tree.add_child(tree.root(), Choice::A, Duel::start());

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 2);
        assert_eq!(stats.root_children, 1);
        assert_eq!(stats.max_depth, 1);
    }
}
