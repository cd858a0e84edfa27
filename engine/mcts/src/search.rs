//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Descend by UCB score to a frontier node
//! 2. Expansion: Add one child per legal action of the frontier
//! 3. Evaluation: Score each new child with the evaluator
//! 4. Backpropagation: Add each child's reward along the selected path

use std::time::{Duration, Instant};

use engine_core::{GameState, PlayerId};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace, warn};

use crate::config::{ActionSelection, MctsConfig};
use crate::evaluator::{Evaluator, RolloutEvaluator};
use crate::tree::MctsTree;

/// Counters for the most recent `train` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Iterations run
    pub iterations: u32,
    /// Frontier nodes that produced at least one child
    pub expansions: u32,
    /// Children created and evaluated
    pub evaluations: u32,
    /// Iterations that ended on a leaf that cannot be expanded
    pub revisits: u32,
    /// Individual playouts simulated
    pub rollouts: u64,
    /// Wall-clock time spent training
    pub elapsed: Duration,
}

/// MCTS engine owning one search tree.
pub struct Mcts<S: GameState, E: Evaluator<S> = RolloutEvaluator> {
    config: MctsConfig,
    evaluator: E,
    tree: Option<MctsTree<S>>,
    root_player: PlayerId,
    rng: ChaCha20Rng,
    stats: SearchStats,
}

impl<S: GameState> Mcts<S, RolloutEvaluator> {
    /// Create an engine with the rollout evaluator and a seeded draw source.
    pub fn new(config: MctsConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Create an engine with the rollout evaluator and an existing draw source.
    pub fn with_rng(config: MctsConfig, rng: ChaCha20Rng) -> Self {
        let evaluator = RolloutEvaluator::from_config(&config);
        Self::with_evaluator(config, evaluator, rng)
    }
}

impl<S: GameState, E: Evaluator<S>> Mcts<S, E> {
    /// Create an engine with a custom evaluator.
    pub fn with_evaluator(config: MctsConfig, evaluator: E, rng: ChaCha20Rng) -> Self {
        Self {
            config,
            evaluator,
            tree: None,
            root_player: 0,
            rng,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Replace the tree with a fresh root holding `state`. The player to
    /// move in `state` becomes the player rewards are measured for.
    pub fn set_root(&mut self, state: S) {
        self.root_player = state.current_player();
        self.tree = Some(MctsTree::new(state));
        self.stats = SearchStats::default();
    }

    /// Current tree, if a root has been set.
    pub fn tree(&self) -> Option<&MctsTree<S>> {
        self.tree.as_ref()
    }

    /// Counters for the most recent training run.
    pub fn search_stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Run `n_iter` iterations from the current root.
    pub fn train(&mut self) {
        let n_iter = self.config.n_iter;
        self.run(|done| done >= n_iter);
    }

    /// Run iterations until `n_iter` is reached or `deadline` passes,
    /// whichever comes first. Returns the number of iterations run.
    ///
    /// The deadline is only checked between iterations.
    pub fn train_until(&mut self, deadline: Instant) -> u32 {
        let n_iter = self.config.n_iter;
        self.run(|done| done >= n_iter || Instant::now() >= deadline)
    }

    /// Set the root, train, and report the chosen action.
    ///
    /// Returns None (the root's sentinel) when nothing was expanded, e.g.
    /// `n_iter == 0` or a terminal root.
    pub fn play(&mut self, state: S) -> Option<S::Action> {
        self.set_root(state);
        self.train();
        self.best_action()
    }

    /// Best action found so far, per the configured action selection.
    pub fn best_action(&mut self) -> Option<S::Action> {
        let c = self.config.exploration;
        let tree = self.tree.as_ref()?;
        match self.config.action_selection {
            ActionSelection::Leaf => tree.best_action(tree.root(), c, &mut self.rng),
            ActionSelection::Root => tree.best_root_action(c, &mut self.rng),
        }
    }

    fn run(&mut self, mut should_stop: impl FnMut(u32) -> bool) -> u32 {
        if self.tree.is_none() {
            warn!("train called before set_root, nothing to search");
            return 0;
        }

        let start = Instant::now();
        let mut done = 0;
        while !should_stop(done) {
            self.single_iteration();
            done += 1;
        }
        self.stats.iterations += done;
        self.stats.elapsed += start.elapsed();

        if let Some(tree) = &self.tree {
            let tree_stats = tree.stats();
            debug!(
                iterations = self.stats.iterations,
                expansions = self.stats.expansions,
                evaluations = self.stats.evaluations,
                revisits = self.stats.revisits,
                rollouts = self.stats.rollouts,
                nodes = tree_stats.total_nodes,
                max_depth = tree_stats.max_depth,
                elapsed_ms = self.stats.elapsed.as_millis() as u64,
                "MCTS training complete"
            );
        }
        done
    }

    /// One select -> expand -> evaluate -> backpropagate pass.
    fn single_iteration(&mut self) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        let rng = &mut self.rng;

        // Selection
        let path = tree.select(self.config.exploration, rng);
        let frontier = *path.last().unwrap_or(&tree.root());

        // Expansion of every legal action, each child evaluated on creation
        let state = &tree.get(frontier).state;
        let actions = if state.is_terminal() {
            Vec::new()
        } else {
            state.legal_actions()
        };
        let children: Vec<(S::Action, S)> = actions
            .into_iter()
            .map(|action| {
                let next = state.apply(&action, rng);
                (action, next)
            })
            .collect();

        // Terminal and stuck frontiers stay leaves; visiting one again
        // repeats its mean reward so exploration moves on to siblings
        if children.is_empty() {
            let reward = tree.revisit_leaf(&path, self.config.discount);
            self.stats.revisits += 1;
            trace!(frontier = frontier.0, reward, "revisited leaf");
            return;
        }
        self.stats.expansions += 1;

        for (action, next) in children {
            let child = tree.add_child(frontier, action, next);
            let reward = self.evaluator.evaluate(tree, child, self.root_player, rng);
            tree.get_mut(child).record_evaluation(reward);
            tree.backpropagate(&path, reward, self.config.discount);

            self.stats.evaluations += 1;
            self.stats.rollouts += u64::from(self.config.num_rollouts);

            trace!(
                frontier = frontier.0,
                child = child.0,
                depth = path.len(),
                reward = reward,
                "evaluated child"
            );
        }
    }
}
