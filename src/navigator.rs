//! Guided search through a splay tree. A [`Navigator`] inspects one node at a time and decides
//! where the walk goes next, while the tree owns the traversal itself. This separates the
//! search logic (rank selection, predicate search) from the index bookkeeping of the tree.

use crate::statistic::{Statistic, SubtreeSize};

/// The decision of a [`Navigator`] after inspecting a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Continue with the left child.
    Left,
    /// Continue with the right child.
    Right,
    /// The current node is the result of the search.
    Target,
    /// The search has failed.
    Lost,
    /// Continue with the parent. Not allowed in descending searches.
    Up,
}

/// Read-only view of the node a navigator is currently looking at.
#[derive(Debug)]
pub struct NodeView<'a, K, S> {
    key: &'a K,
    stat: &'a S,
    left: Option<&'a S>,
    right: Option<&'a S>,
    from_left: bool,
}

impl<'a, K, S> NodeView<'a, K, S> {
    pub(crate) fn new(
        key: &'a K,
        stat: &'a S,
        left: Option<&'a S>,
        right: Option<&'a S>,
        from_left: bool,
    ) -> Self {
        Self {
            key,
            stat,
            left,
            right,
            from_left,
        }
    }

    /// The key of the current node.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.key
    }

    /// The statistic of the subtree below the current node.
    #[must_use]
    pub fn statistic(&self) -> &'a S {
        self.stat
    }

    /// The statistic of the left subtree, if there is one.
    #[must_use]
    pub fn left(&self) -> Option<&'a S> {
        self.left
    }

    /// The statistic of the right subtree, if there is one.
    #[must_use]
    pub fn right(&self) -> Option<&'a S> {
        self.right
    }

    /// Returns true, if the walk just moved up and arrived from the left child.
    #[must_use]
    pub fn from_left_child(&self) -> bool {
        self.from_left
    }

    /// The statistic of the current node alone, ignoring its subtrees.
    #[must_use]
    pub fn own_statistic(&self) -> S
    where
        S: Statistic<K>,
    {
        let mut stat = self.stat.clone();
        stat.init(self.key);
        stat
    }
}

/// Decides the path of a search, one node at a time.
pub trait Navigator<K, S> {
    /// Reset the navigator before a new search begins.
    fn init(&mut self);

    /// Inspect the current node and decide where to go.
    fn next(&mut self, node: &NodeView<'_, K, S>) -> Direction;
}

/// Selects the element of a given rank (1-based, multiplicities counted) in a tree maintaining
/// [`SubtreeSize`].
#[derive(Clone, Copy, Debug)]
pub struct RankNavigator {
    rank: usize,
    remaining: usize,
}

impl RankNavigator {
    /// Create a navigator selecting the element with rank `rank`. The smallest element has rank 1.
    #[must_use]
    pub fn new(rank: usize) -> Self {
        Self {
            rank,
            remaining: rank,
        }
    }
}

impl<K> Navigator<K, SubtreeSize> for RankNavigator {
    fn init(&mut self) {
        self.remaining = self.rank;
    }

    fn next(&mut self, node: &NodeView<'_, K, SubtreeSize>) -> Direction {
        let left_size = node.left().map_or(0, SubtreeSize::size);
        let count = node.statistic().count();
        if self.remaining <= left_size {
            Direction::Left
        } else if self.remaining <= left_size + count {
            Direction::Target
        } else {
            self.remaining -= left_size + count;
            Direction::Right
        }
    }
}

/// Finds the nearest node before the start of a two-way search for which a predicate holds.
///
/// The predicate is called with the aggregate of a candidate range and the accumulated aggregate
/// of everything between that range and the start node (including the start node). It must be
/// monotone: if it holds for a range, it must hold for every range extending it to the left.
/// The search then returns the last node `x` before the start such that the predicate holds for
/// `x` and the accumulated aggregate of the nodes after `x`.
pub struct PredicateNavigator<S, F> {
    condition: F,
    accumulated: S,
    ascending: bool,
    started: bool,
}

impl<S: Default, F> PredicateNavigator<S, F> {
    /// Create a navigator for the given predicate.
    pub fn new(condition: F) -> Self {
        Self {
            condition,
            accumulated: S::default(),
            ascending: true,
            started: false,
        }
    }
}

impl<K, S, F> Navigator<K, S> for PredicateNavigator<S, F>
where
    S: Statistic<K>,
    F: FnMut(&S, &S) -> bool,
{
    fn init(&mut self) {
        self.accumulated = S::default();
        self.ascending = true;
        self.started = false;
    }

    fn next(&mut self, node: &NodeView<'_, K, S>) -> Direction {
        if self.ascending {
            // nodes reached from their left child lie after the start
            if node.from_left_child() {
                return Direction::Up;
            }

            if !self.started {
                self.accumulated = node.own_statistic();
                self.started = true;
            } else {
                let candidate = node.own_statistic();
                if (self.condition)(&candidate, &self.accumulated) {
                    return Direction::Target;
                }
                self.accumulated.update_left(&candidate);
            }

            if let Some(left) = node.left() {
                if (self.condition)(left, &self.accumulated) {
                    self.ascending = false;
                    return Direction::Left;
                }
                self.accumulated.update_left(left);
            }
            Direction::Up
        } else {
            if let Some(right) = node.right() {
                if (self.condition)(right, &self.accumulated) {
                    return Direction::Right;
                }
                self.accumulated.update_left(right);
            }

            let candidate = node.own_statistic();
            if (self.condition)(&candidate, &self.accumulated) {
                Direction::Target
            } else {
                self.accumulated.update_left(&candidate);
                Direction::Left
            }
        }
    }
}
