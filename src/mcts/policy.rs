//! [UCB1] selection policy: trades off the observed win rate of a node against
//! how rarely it was visited relative to its parent.
//!
//! [UCB1]: https://www.chessprogramming.org/UCT

/// Exploration constant $C$ in $\frac{w}{n} + \sqrt{C \cdot \frac{\ln N}{n}}$.
pub const DEFAULT_EXPLORATION: f64 = 2.0;

/// Computes the UCB1 score of a node with `wins` out of `visits` whose parent
/// has been visited `parent_visits` times.
///
/// Unvisited nodes score `+inf` and are always tried before any visited
/// sibling.
///
/// ```
/// use vier::mcts::ucb1;
///
/// assert_eq!(ucb1(0, 0, 10, 2.0), f64::INFINITY);
/// assert!(ucb1(5, 10, 20, 2.0) > ucb1(5, 10, 20, 0.0));
/// ```
#[must_use]
pub fn ucb1(wins: u32, visits: u32, parent_visits: u32, exploration: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let visits = f64::from(visits);
    let exploitation = f64::from(wins) / visits;
    let exploration = (exploration * f64::from(parent_visits).ln() / visits).sqrt();
    exploitation + exploration
}
