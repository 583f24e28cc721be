//! Implements [Monte Carlo Tree Search] (MCTS) with random playouts.
//!
//! Each iteration of the search goes through four phases:
//!
//! 1. Selection: start from the root and descend into the child with the
//!    highest UCB1 score until a node without children is reached.
//! 2. Expansion: unless the game is over at that node, add a child for every
//!    column that is not full and pick one of them at random.
//! 3. Simulation: play random legal moves from the picked child until the game
//!    ends.
//! 4. Backpropagation: update the statistics of every node on the path from
//!    the picked child to the root with the result.
//!
//! Every iteration works on its own copy of the position, so the caller's
//! [`GameState`] is never modified. The tree is built from scratch for every
//! decision.
//!
//! [Monte Carlo Tree Search]: https://en.wikipedia.org/wiki/Monte_Carlo_tree_search

use std::num::NonZeroU32;

use anyhow::ensure;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::core::InvalidMove;
use crate::game::state::GameState;

mod policy;
mod tree;

pub use policy::{ucb1, DEFAULT_EXPLORATION};
pub use tree::{Node, NodeIndex, Tree};

/// Parameters of the search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Number of search iterations to perform.
    iterations: NonZeroU32,
    /// Exploration constant of [`ucb1`].
    exploration: f64,
}

impl Config {
    /// Iteration budget used when nothing else is requested.
    pub const DEFAULT_ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
        Some(iterations) => iterations,
        None => panic!("iteration budget must be positive"),
    };

    /// Creates a config with given budget and [`DEFAULT_EXPLORATION`].
    #[must_use]
    pub const fn new(iterations: NonZeroU32) -> Self {
        Self {
            iterations,
            exploration: DEFAULT_EXPLORATION,
        }
    }

    /// Replaces the exploration constant. Higher values make the search wider,
    /// lower values make it greedier.
    ///
    /// # Errors
    ///
    /// Returns an error if `exploration` is negative or not a finite number:
    /// [`ucb1`] scores would not be comparable.
    pub fn with_exploration(mut self, exploration: f64) -> anyhow::Result<Self> {
        ensure!(
            exploration.is_finite() && exploration >= 0.0,
            "exploration constant must be a non-negative number, got {exploration}"
        );
        self.exploration = exploration;
        Ok(self)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations.get()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn exploration(&self) -> f64 {
        self.exploration
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITERATIONS)
    }
}

/// Runs the search from `root` and returns the resulting tree.
///
/// `root` is only read: every iteration plays on its own clone.
#[must_use]
pub fn search(root: &GameState, config: &Config, rng: &mut impl Rng) -> Tree {
    let mut tree = Tree::new(root.side_to_move());
    for _ in 0..config.iterations() {
        let mut state = root.clone();
        let leaf = select(&tree, &mut state, config.exploration());
        let node = match expand(&mut tree, leaf, &state, rng) {
            Some((child, column)) => {
                if !state.make_move(column) {
                    simulate(&mut state, rng);
                }
                child
            },
            None => leaf,
        };
        // Tags hold the side to move after the node's column was played, so
        // a win is credited through the loser's tag: it lands on the nodes
        // whose columns were chosen by the winner.
        let credited = state.winner().map(|winner| !winner);
        tree.backpropagate(node, credited);
    }
    tree
}

/// Searches the position and returns the column of the most visited root
/// child. Ties go to the lower column.
///
/// # Errors
///
/// Returns [`InvalidMove::GameOver`] if the game in `state` is already over:
/// there is no move to decide.
pub fn decide_move(
    state: &GameState,
    config: &Config,
    rng: &mut impl Rng,
) -> Result<usize, InvalidMove> {
    if state.is_over() {
        return Err(InvalidMove::GameOver);
    }
    let tree = search(state, config, rng);
    for node in tree.root().children().iter().map(|&child| &tree[child]) {
        if let Some(column) = node.column() {
            debug!(
                "column {column}: visits {} wins {}",
                node.visits(),
                node.wins()
            );
        }
    }
    let column = tree
        .most_visited_child(Tree::ROOT)
        .and_then(|child| tree[child].column())
        .ok_or(InvalidMove::GameOver)?;
    info!(
        "{} plays column {column} after {} iterations ({} nodes)",
        state.side_to_move(),
        config.iterations(),
        tree.len()
    );
    Ok(column)
}

/// Descends from the root by UCB1 while replaying the chosen columns on
/// `state`. Returns the first node without children.
fn select(tree: &Tree, state: &mut GameState, exploration: f64) -> NodeIndex {
    let mut node = Tree::ROOT;
    while let Some(child) = tree.select_child(node, exploration) {
        // Nodes with children are never terminal: the game goes on after
        // this move.
        if let Some(column) = tree[child].column() {
            let _ = state.make_move(column);
        }
        node = child;
    }
    node
}

/// Adds children for all legal moves of `leaf` and returns a random one along
/// with its column. Returns `None` if the game is over at `leaf`.
fn expand(
    tree: &mut Tree,
    leaf: NodeIndex,
    state: &GameState,
    rng: &mut impl Rng,
) -> Option<(NodeIndex, usize)> {
    if state.is_over() {
        return None;
    }
    let mover = !tree[leaf].mover();
    for column in state.legal_moves() {
        tree.add_child(leaf, column, mover);
    }
    let child = *tree[leaf].children().choose(rng)?;
    tree[child].column().map(|column| (child, column))
}

/// Plays uniformly random legal moves until the game ends.
fn simulate(state: &mut GameState, rng: &mut impl Rng) {
    let mut moves = state.legal_moves();
    while let Some(&column) = moves.choose(rng) {
        if state.make_move(column) {
            break;
        }
        if state.is_full(column) {
            moves.retain(|candidate| *candidate != column);
        }
    }
}
