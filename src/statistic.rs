//! Aggregate statistics maintained by every splay-tree node. A statistic summarizes the subtree
//! below a node and is recomputed bottom-up after every structural change. The implementations
//! in this module cover the common cases; any other summary can be plugged into the trees by
//! implementing [`Statistic`].

use num_traits::{Bounded, Zero};
use std::ops::Add;

/// The aggregate-statistic protocol. A node's statistic is rebuilt by calling [`init`] with the
/// node's own key, followed by [`update_left`] with the left child's statistic (if present) and
/// [`update_right`] with the right child's statistic (if present), in exactly that order.
///
/// The multiplicity recorded by [`add`] and [`remove`] belongs to the node and must survive
/// [`init`]; it is used by the ordered tree to implement multiset semantics.
///
/// Statistics used in an evertable [`LinkCutTree`] must produce the same result regardless of
/// whether a child is folded in from the left or from the right, because reversing a path swaps
/// the children without recomputing anything.
///
/// [`init`]: Statistic::init
/// [`update_left`]: Statistic::update_left
/// [`update_right`]: Statistic::update_right
/// [`add`]: Statistic::add
/// [`remove`]: Statistic::remove
/// [`LinkCutTree`]: crate::trees::link_cut::LinkCutTree
pub trait Statistic<K: ?Sized>: Clone + Default {
    /// Seed the statistic from the node's own key, discarding previously folded children.
    fn init(&mut self, key: &K);

    /// Fold in the statistic of the left child. The left child precedes the node in order.
    fn update_left(&mut self, left: &Self);

    /// Fold in the statistic of the right child. The right child follows the node in order.
    fn update_right(&mut self, right: &Self);

    /// Increase the multiplicity of the node.
    fn add(&mut self);

    /// Decrease the multiplicity of the node.
    fn remove(&mut self);

    /// Returns true, if the node has a positive multiplicity.
    fn exists(&self) -> bool;
}

/// Implements the multiplicity part of [`Statistic`] on top of a `count: usize` field.
macro_rules! impl_multiplicity {
    () => {
        fn add(&mut self) {
            self.count += 1;
        }

        fn remove(&mut self) {
            debug_assert!(self.count > 0, "removing from a node without multiplicity");
            self.count -= 1;
        }

        fn exists(&self) -> bool {
            self.count > 0
        }
    };
}

pub(crate) use impl_multiplicity;

/// The basic statistic. It tracks nothing but the multiplicity of the node itself and is the
/// right choice when no aggregate queries are needed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Count {
    count: usize,
}

impl Count {
    /// Multiplicity of the node this statistic belongs to.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<K: ?Sized> Statistic<K> for Count {
    fn init(&mut self, _key: &K) {}

    fn update_left(&mut self, _left: &Self) {}

    fn update_right(&mut self, _right: &Self) {}

    impl_multiplicity!();
}

/// Counts the elements in a subtree, respecting multiplicities.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SubtreeSize {
    count: usize,
    size: usize,
}

impl SubtreeSize {
    /// Multiplicity of the node this statistic belongs to.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of elements in the subtree (or range, or path) this statistic summarizes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<K: ?Sized> Statistic<K> for SubtreeSize {
    fn init(&mut self, _key: &K) {
        self.size = self.count;
    }

    fn update_left(&mut self, left: &Self) {
        self.size += left.size;
    }

    fn update_right(&mut self, right: &Self) {
        self.size += right.size;
    }

    impl_multiplicity!();
}

/// Minimum and maximum key of a subtree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MinMax<T> {
    count: usize,
    min: T,
    max: T,
}

impl<T: Copy> MinMax<T> {
    /// The smallest key in the summarized range.
    #[must_use]
    pub fn min(&self) -> T {
        self.min
    }

    /// The largest key in the summarized range.
    #[must_use]
    pub fn max(&self) -> T {
        self.max
    }
}

impl<T: Bounded> Default for MinMax<T> {
    fn default() -> Self {
        Self {
            count: 0,
            min: T::max_value(),
            max: T::min_value(),
        }
    }
}

impl<T: Bounded + Ord + Copy> MinMax<T> {
    fn merge(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

impl<T: Bounded + Ord + Copy> Statistic<T> for MinMax<T> {
    fn init(&mut self, key: &T) {
        self.min = *key;
        self.max = *key;
    }

    fn update_left(&mut self, left: &Self) {
        self.merge(left);
    }

    fn update_right(&mut self, right: &Self) {
        self.merge(right);
    }

    impl_multiplicity!();
}

/// Sum of the keys of a subtree. Multiplicities are not taken into account, every node
/// contributes its key once.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sum<T> {
    count: usize,
    sum: T,
}

impl<T: Copy> Sum<T> {
    /// The sum of all keys in the summarized range.
    #[must_use]
    pub fn sum(&self) -> T {
        self.sum
    }
}

impl<T: Zero> Default for Sum<T> {
    fn default() -> Self {
        Self {
            count: 0,
            sum: T::zero(),
        }
    }
}

impl<T: Zero + Add<Output = T> + Copy> Statistic<T> for Sum<T> {
    fn init(&mut self, key: &T) {
        self.sum = *key;
    }

    fn update_left(&mut self, left: &Self) {
        self.sum = self.sum + left.sum;
    }

    fn update_right(&mut self, right: &Self) {
        self.sum = self.sum + right.sum;
    }

    impl_multiplicity!();
}
