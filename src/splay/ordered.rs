//! An ordered multiset on top of the splay core. Keys are compared with [`Ord`]; inserting a key
//! that is already present increases its multiplicity instead of adding a node.

use crate::navigator::Navigator;
use crate::splay::SplayArena;
use crate::statistic::{Statistic, SubtreeSize};
use std::cmp::Ordering;

/// A self-adjusting binary search tree with multiset semantics and a user-defined aggregate
/// statistic `S` maintained in every node.
///
/// All queries take `&mut self`, since every access splays the accessed node to the root.
///
/// # Example
/// ```rust
/// use splay_forest::navigator::RankNavigator;
/// use splay_forest::SplayTree;
///
/// let mut tree: SplayTree<u32> = SplayTree::new();
/// for key in [5, 1, 4, 1, 3] {
///     tree.insert(key);
/// }
///
/// // the second 1 is counted by its multiplicity
/// assert_eq!(tree.statistic_comp(&3).size(), 3);
/// assert_eq!(tree.find(&mut RankNavigator::new(4)), Some(&4));
/// ```
#[derive(Clone, Debug)]
pub struct SplayTree<T, S = SubtreeSize> {
    arena: SplayArena<T, S>,
    root: Option<usize>,
}

impl<T: Ord, S: Statistic<T>> SplayTree<T, S> {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: SplayArena::new(),
            root: None,
        }
    }

    /// Create an empty tree with room for `capacity` distinct keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SplayArena::with_capacity(capacity),
            root: None,
        }
    }

    /// Number of distinct keys in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true, if the tree holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    // last node on the search path of `key`: the node holding it, or the leaf where it would go
    fn locate(&self, key: &T) -> Option<usize> {
        let mut cur = self.root?;
        loop {
            let next = match key.cmp(self.arena.key(cur)) {
                Ordering::Less => self.arena.left(cur),
                Ordering::Greater => self.arena.right(cur),
                Ordering::Equal => return Some(cur),
            };
            match next {
                Some(n) => cur = n,
                None => return Some(cur),
            }
        }
    }

    fn splay_to_root(&mut self, x: usize) {
        self.arena.splay(x);
        self.root = Some(x);
    }

    /// Insert `key`. If it is already present, its multiplicity is increased.
    pub fn insert(&mut self, key: T) {
        let Some(cur) = self.locate(&key) else {
            self.root = Some(self.arena.create(key));
            return;
        };

        match key.cmp(self.arena.key(cur)) {
            Ordering::Less => {
                let node = self.arena.create(key);
                self.arena.link_left(cur, Some(node));
                self.splay_to_root(node);
            }
            Ordering::Greater => {
                let node = self.arena.create(key);
                self.arena.link_right(cur, Some(node));
                self.splay_to_root(node);
            }
            Ordering::Equal => {
                self.splay_to_root(cur);
                self.arena.stat_mut(cur).add();
                self.arena.update(cur);
            }
        }
    }

    /// Remove one copy of `key`. Returns false, if the key was not present.
    pub fn erase(&mut self, key: &T) -> bool {
        let Some(cur) = self.locate(key) else {
            return false;
        };
        self.splay_to_root(cur);
        if self.arena.key(cur) != key {
            return false;
        }

        self.arena.stat_mut(cur).remove();
        if self.arena.stat(cur).exists() {
            self.arena.update(cur);
            return true;
        }

        let left = self.arena.cut_left(cur);
        let right = self.arena.cut_right(cur);
        self.root = match (left, right) {
            (Some(l), Some(r)) => Some(self.arena.concat(l, r)),
            (l, r) => l.or(r),
        };
        self.arena.release(cur);
        true
    }

    /// Returns true, if `key` is present with positive multiplicity.
    pub fn contains(&mut self, key: &T) -> bool {
        let Some(cur) = self.locate(key) else {
            return false;
        };
        self.splay_to_root(cur);
        self.arena.key(cur) == key
    }

    /// The statistic of the node holding `key` by itself, or `None` if the key is not present.
    pub fn statistic(&mut self, key: &T) -> Option<S> {
        let cur = self.locate(key)?;
        self.splay_to_root(cur);
        (self.arena.key(cur) == key).then(|| self.arena.own_stat(cur))
    }

    /// The smallest key that is strictly greater than `key`.
    pub fn successor(&mut self, key: &T) -> Option<&T> {
        let cur = self.locate(key)?;
        self.splay_to_root(cur);
        if self.arena.key(cur) > key {
            return Some(self.arena.key(cur));
        }
        let next = self.arena.succ(cur)?;
        self.root = Some(next);
        Some(self.arena.key(next))
    }

    /// The largest key that is strictly smaller than `key`.
    pub fn predecessor(&mut self, key: &T) -> Option<&T> {
        let cur = self.locate(key)?;
        self.splay_to_root(cur);
        if self.arena.key(cur) < key {
            return Some(self.arena.key(cur));
        }
        let prev = self.arena.pred(cur)?;
        self.root = Some(prev);
        Some(self.arena.key(prev))
    }

    /// The aggregate statistic of every element that is smaller than or equal to `key`.
    pub fn statistic_comp(&mut self, key: &T) -> S {
        let Some(cur) = self.locate(key) else {
            return S::default();
        };
        self.splay_to_root(cur);

        let left = self.arena.left(cur).map(|l| self.arena.stat(l).clone());
        if self.arena.key(cur) <= key {
            let mut stat = self.arena.own_stat(cur);
            if let Some(left) = left {
                stat.update_left(&left);
            }
            stat
        } else {
            left.unwrap_or_default()
        }
    }

    /// The aggregate statistic of the whole tree.
    #[must_use]
    pub fn total_statistic(&self) -> S {
        self.root
            .map(|r| self.arena.stat(r).clone())
            .unwrap_or_default()
    }

    /// Descend from the root as directed by `navigator` and return the key it settles on.
    ///
    /// # Panics
    /// Panics if the navigator asks to move up.
    pub fn find<N: Navigator<T, S>>(&mut self, navigator: &mut N) -> Option<&T> {
        let root = self.root?;
        let found = self.arena.descend(root, navigator)?;
        self.root = Some(found);
        Some(self.arena.key(found))
    }

    /// Start a two-way search at the node holding `start` and return the key the navigator
    /// settles on. Returns `None` if `start` is not present or the navigator gets lost.
    pub fn search_before<N: Navigator<T, S>>(
        &mut self,
        start: &T,
        navigator: &mut N,
    ) -> Option<&T> {
        let root = self.root?;
        let from = self.locate(start)?;
        if self.arena.key(from) != start {
            self.splay_to_root(from);
            return None;
        }

        match self.arena.search(from, root, navigator) {
            Some(found) => {
                self.root = Some(found);
                Some(self.arena.key(found))
            }
            None => {
                self.splay_to_root(from);
                None
            }
        }
    }

    /// Iterate over the distinct keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.root
            .map(|r| self.arena.subtree_in_order(r))
            .unwrap_or_default()
            .into_iter()
            .map(move |i| self.arena.key(i))
    }
}

impl<T: Ord, S: Statistic<T>> Default for SplayTree<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, S: Statistic<T>> Extend<T> for SplayTree<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T: Ord, S: Statistic<T>> FromIterator<T> for SplayTree<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
