use std::ops::Index;

use arrayvec::ArrayVec;

use crate::game::core::{Player, COLUMNS};
use crate::mcts::policy::ucb1;

/// Position of a [`Node`] in the [`Tree`] arena.
pub type NodeIndex = usize;

/// A decision point in the search tree.
///
/// The parent owns its children through the arena: a node only stores the
/// indices of its children and a non-owning index of its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Column played to reach this node. `None` for the root.
    column: Option<usize>,
    /// Player tag compared against the credited player in
    /// [`Node::record_visit`]. The root carries the side to move at the time
    /// the tree was built and every child carries the opposite of its
    /// parent's tag.
    mover: Player,
    /// Total number of search iterations that went through this node.
    visits: u32,
    /// Number of iterations that credited [`Node::mover`].
    wins: u32,
    parent: Option<NodeIndex>,
    children: ArrayVec<NodeIndex, COLUMNS>,
}

impl Node {
    const fn new(column: Option<usize>, mover: Player, parent: Option<NodeIndex>) -> Self {
        Self {
            column,
            mover,
            visits: 0,
            wins: 0,
            parent,
            children: ArrayVec::new_const(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        self.column
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn mover(&self) -> Player {
        self.mover
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn visits(&self) -> u32 {
        self.visits
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn wins(&self) -> u32 {
        self.wins
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Indices of the children in the order they were expanded (ascending
    /// columns).
    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    #[must_use]
    const fn visited(&self) -> bool {
        self.visits > 0
    }

    /// Counts one more iteration through this node and a win if `credited`
    /// matches the node's tag. Draws credit nobody.
    pub fn record_visit(&mut self, credited: Option<Player>) {
        self.visits += 1;
        if credited == Some(self.mover) {
            self.wins += 1;
        }
    }
}

/// Search tree stored in an arena. It lives for a single search and is
/// dropped afterwards: nothing is reused between decisions.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// The root is always the first node of the arena.
    pub const ROOT: NodeIndex = 0;

    /// Creates a tree with a single unexpanded root.
    #[must_use]
    pub fn new(side_to_move: Player) -> Self {
        Self {
            nodes: vec![Node::new(None, side_to_move, None)],
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    /// # Panics
    ///
    /// Panics if there is no node with given index.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// Total number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The tree always has the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[allow(missing_docs)]
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Attaches a new child playing `column` to `parent`.
    pub(crate) fn add_child(&mut self, parent: NodeIndex, column: usize, mover: Player) {
        let index = self.nodes.len();
        self.nodes.push(Node::new(Some(column), mover, Some(parent)));
        self.nodes[parent].children.push(index);
    }

    /// UCB1 score of the node, see [`ucb1`]. The root has no parent and is
    /// scored against its own visits.
    #[must_use]
    pub fn score(&self, index: NodeIndex, exploration: f64) -> f64 {
        let node = &self.nodes[index];
        let parent_visits = node
            .parent
            .map_or(node.visits, |parent| self.nodes[parent].visits);
        ucb1(node.wins, node.visits, parent_visits, exploration)
    }

    /// Returns the child with the highest UCB1 score. Ties go to the child
    /// expanded first.
    #[must_use]
    pub fn select_child(&self, index: NodeIndex, exploration: f64) -> Option<NodeIndex> {
        let mut best: Option<(NodeIndex, f64)> = None;
        for &child in &self.nodes[index].children {
            // Unvisited children win any comparison and there is no need to
            // score the rest.
            if !self.nodes[child].visited() {
                return Some(child);
            }
            let score = self.score(child, exploration);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Returns the child with the most visits. Ties go to the child expanded
    /// first.
    #[must_use]
    pub fn most_visited_child(&self, index: NodeIndex) -> Option<NodeIndex> {
        // max_by_key returns the last maximum.
        self.nodes[index]
            .children
            .iter()
            .rev()
            .max_by_key(|&&child| self.nodes[child].visits)
            .copied()
    }

    /// Records the result of an iteration on every node from `index` up to
    /// the root inclusive.
    pub(crate) fn backpropagate(&mut self, index: NodeIndex, credited: Option<Player>) {
        let mut current = Some(index);
        while let Some(index) = current {
            let node = &mut self.nodes[index];
            node.record_visit(credited);
            current = node.parent;
        }
    }
}

impl Index<NodeIndex> for Tree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        self.node(index)
    }
}
