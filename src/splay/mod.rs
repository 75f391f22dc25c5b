//! The splay tree core shared by all trees in this crate. Nodes live in an arena and refer to
//! each other by index, so splicing and rotating never moves a node in memory and handles stay
//! valid until the node is released.
//!
//! All operations are amortized O(log n) over a sequence of calls: every access splays the
//! accessed node (move-to-root with zig, zig-zig and zig-zag steps).
//!
//! A node counts as the root of its splay tree if it has no parent, or if its parent does not
//! list it as a child. The second case is how the link-cut tree stores path-parent pointers: the
//! parent field of an auxiliary tree's root points into another auxiliary tree without being a
//! real tree edge.
//!
//! The ordered container built on top of this core is found in [`ordered`].

use crate::navigator::{Direction, Navigator, NodeView};
use crate::statistic::Statistic;
use slab::Slab;

pub mod ordered;

/// A single node of a splay tree.
#[derive(Clone, Debug)]
pub(crate) struct SplayNode<K, S> {
    key: K,
    stat: S,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,

    /// Lazy flag: the subtree below this node is to be read in reverse order. Only the evertable
    /// link-cut tree ever sets it.
    reversed: bool,
}

/// Arena holding the nodes of any number of splay trees.
#[derive(Clone, Debug)]
pub(crate) struct SplayArena<K, S> {
    nodes: Slab<SplayNode<K, S>>,
}

impl<K, S: Statistic<K>> SplayArena<K, S> {
    pub(crate) fn new() -> Self {
        Self { nodes: Slab::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
        }
    }

    /// Number of live nodes in the arena.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true, if `x` names a live node.
    pub(crate) fn contains(&self, x: usize) -> bool {
        self.nodes.contains(x)
    }

    /// Allocate a new isolated node with multiplicity one and compute its statistic.
    pub(crate) fn create(&mut self, key: K) -> usize {
        let mut stat = S::default();
        stat.add();
        stat.init(&key);
        self.nodes.insert(SplayNode {
            key,
            stat,
            parent: None,
            left: None,
            right: None,
            reversed: false,
        })
    }

    /// Free a node and return its key. The node must not be linked to any other node.
    pub(crate) fn release(&mut self, x: usize) -> K {
        debug_assert!(
            self.nodes[x].parent.is_none()
                && self.nodes[x].left.is_none()
                && self.nodes[x].right.is_none(),
            "released node is still linked"
        );
        self.nodes.remove(x).key
    }

    pub(crate) fn key(&self, x: usize) -> &K {
        &self.nodes[x].key
    }

    /// Mutable access to a key. If the statistic depends on the modified part of the key, the
    /// caller has to splay the node and call [`update`](Self::update) afterwards.
    pub(crate) fn key_mut(&mut self, x: usize) -> &mut K {
        &mut self.nodes[x].key
    }

    pub(crate) fn stat(&self, x: usize) -> &S {
        &self.nodes[x].stat
    }

    pub(crate) fn stat_mut(&mut self, x: usize) -> &mut S {
        &mut self.nodes[x].stat
    }

    /// The statistic of `x` alone, without its subtrees.
    pub(crate) fn own_stat(&self, x: usize) -> S {
        let node = &self.nodes[x];
        let mut stat = node.stat.clone();
        stat.init(&node.key);
        stat
    }

    pub(crate) fn parent(&self, x: usize) -> Option<usize> {
        self.nodes[x].parent
    }

    pub(crate) fn left(&self, x: usize) -> Option<usize> {
        self.nodes[x].left
    }

    pub(crate) fn right(&self, x: usize) -> Option<usize> {
        self.nodes[x].right
    }

    pub(crate) fn set_parent(&mut self, x: usize, parent: Option<usize>) {
        self.nodes[x].parent = parent;
    }

    /// Make `child` the left child of `x`. Does not recompute statistics.
    pub(crate) fn link_left(&mut self, x: usize, child: Option<usize>) {
        self.nodes[x].left = child;
        if let Some(c) = child {
            self.nodes[c].parent = Some(x);
        }
    }

    /// Make `child` the right child of `x`. Does not recompute statistics.
    pub(crate) fn link_right(&mut self, x: usize, child: Option<usize>) {
        self.nodes[x].right = child;
        if let Some(c) = child {
            self.nodes[c].parent = Some(x);
        }
    }

    /// Clear the right child pointer of `x` but keep the child's parent pointer, turning it into
    /// a path-parent pointer.
    pub(crate) fn take_right(&mut self, x: usize) -> Option<usize> {
        let child = self.nodes[x].right.take();
        self.update(x);
        child
    }

    /// Detach the left subtree of `x` into a separate tree and return its root.
    pub(crate) fn cut_left(&mut self, x: usize) -> Option<usize> {
        let child = self.nodes[x].left.take();
        if let Some(c) = child {
            debug_assert_eq!(self.nodes[c].parent, Some(x));
            self.nodes[c].parent = None;
            self.update(x);
        }
        child
    }

    /// Detach the right subtree of `x` into a separate tree and return its root.
    pub(crate) fn cut_right(&mut self, x: usize) -> Option<usize> {
        let child = self.nodes[x].right.take();
        if let Some(c) = child {
            debug_assert_eq!(self.nodes[c].parent, Some(x));
            self.nodes[c].parent = None;
            self.update(x);
        }
        child
    }

    /// Returns true, if `x` is the root of its splay tree. A node whose parent does not list it
    /// as a child is a root as well (its parent pointer is a path-parent).
    pub(crate) fn is_root(&self, x: usize) -> bool {
        match self.nodes[x].parent {
            None => true,
            Some(p) => self.nodes[p].left != Some(x) && self.nodes[p].right != Some(x),
        }
    }

    /// Recompute the statistic of `x` from its key and the statistics of its children.
    pub(crate) fn update(&mut self, x: usize) {
        let mut stat = std::mem::take(&mut self.nodes[x].stat);
        let node = &self.nodes[x];
        stat.init(&node.key);
        if let Some(l) = node.left {
            stat.update_left(&self.nodes[l].stat);
        }
        if let Some(r) = node.right {
            stat.update_right(&self.nodes[r].stat);
        }
        self.nodes[x].stat = stat;
    }

    /// Rotate `x` one level up. The statistics of the former parent, of `x` and of the new
    /// parent of `x` are refreshed in that order.
    pub(crate) fn rotate(&mut self, x: usize) {
        if self.is_root(x) {
            return;
        }
        let Some(y) = self.nodes[x].parent else {
            return;
        };
        let y_is_root = self.is_root(y);
        let z = self.nodes[y].parent;

        // a root's parent pointer is a path-parent and is handed over to x unchanged
        self.nodes[x].parent = z;
        if let (Some(z), false) = (z, y_is_root) {
            if self.nodes[z].left == Some(y) {
                self.nodes[z].left = Some(x);
            } else {
                self.nodes[z].right = Some(x);
            }
        }
        self.nodes[y].parent = Some(x);

        if self.nodes[y].left == Some(x) {
            let inner = self.nodes[x].right;
            self.nodes[y].left = inner;
            if let Some(b) = inner {
                self.nodes[b].parent = Some(y);
            }
            self.nodes[x].right = Some(y);
        } else {
            let inner = self.nodes[x].left;
            self.nodes[y].right = inner;
            if let Some(b) = inner {
                self.nodes[b].parent = Some(y);
            }
            self.nodes[x].left = Some(y);
        }

        self.update(y);
        self.update(x);
        if !self.is_root(x) {
            if let Some(p) = self.nodes[x].parent {
                self.update(p);
            }
        }
    }

    /// Rotate `x` up until it is the root of its splay tree.
    pub(crate) fn splay(&mut self, x: usize) {
        while !self.is_root(x) {
            let Some(y) = self.nodes[x].parent else {
                break;
            };
            if self.is_root(y) {
                // zig
                self.rotate(x);
                continue;
            }
            let Some(z) = self.nodes[y].parent else {
                break;
            };
            if (self.nodes[z].left == Some(y)) == (self.nodes[y].left == Some(x)) {
                // zig-zig
                self.rotate(y);
                self.rotate(x);
            } else {
                // zig-zag
                self.rotate(x);
                self.rotate(x);
            }
        }
    }

    /// Apply a pending reversal of `x`: swap its children and hand the flag down to them.
    pub(crate) fn push_reverse(&mut self, x: usize) {
        if !self.nodes[x].reversed {
            return;
        }
        let node = &mut self.nodes[x];
        std::mem::swap(&mut node.left, &mut node.right);
        node.reversed = false;
        let (left, right) = (node.left, node.right);
        for child in [left, right].into_iter().flatten() {
            self.nodes[child].reversed ^= true;
        }
    }

    pub(crate) fn toggle_reversed(&mut self, x: usize) {
        self.nodes[x].reversed ^= true;
    }

    /// The in-order predecessor of `x` in its splay tree, splayed to the root.
    pub(crate) fn pred(&mut self, x: usize) -> Option<usize> {
        self.splay(x);
        let mut cur = self.nodes[x].left?;
        while let Some(r) = self.nodes[cur].right {
            cur = r;
        }
        self.splay(cur);
        Some(cur)
    }

    /// The in-order successor of `x` in its splay tree, splayed to the root.
    pub(crate) fn succ(&mut self, x: usize) -> Option<usize> {
        self.splay(x);
        let mut cur = self.nodes[x].right?;
        while let Some(l) = self.nodes[cur].left {
            cur = l;
        }
        self.splay(cur);
        Some(cur)
    }

    /// The first node in order of the splay tree containing `x`, splayed to the root.
    pub(crate) fn first(&mut self, x: usize) -> usize {
        self.splay(x);
        let mut cur = x;
        while let Some(l) = self.nodes[cur].left {
            cur = l;
        }
        self.splay(cur);
        cur
    }

    /// The last node in order of the splay tree containing `x`, splayed to the root.
    pub(crate) fn last(&mut self, x: usize) -> usize {
        self.splay(x);
        let mut cur = x;
        while let Some(r) = self.nodes[cur].right {
            cur = r;
        }
        self.splay(cur);
        cur
    }

    /// Returns true, if `x` comes before `y` in order. Both nodes must be in the same splay tree.
    /// No key comparison is involved, the order is read off the tree shape.
    pub(crate) fn in_order(&mut self, x: usize, y: usize) -> bool {
        if x == y {
            return false;
        }
        self.splay(x);
        let mut cur = y;
        loop {
            match self.nodes[cur].parent {
                Some(p) if p == x => break,
                Some(p) => cur = p,
                None => {
                    debug_assert!(false, "in_order queried for nodes of different trees");
                    return false;
                }
            }
        }
        let after = self.nodes[x].right == Some(cur);
        self.splay(y);
        after
    }

    /// Append the splay tree containing `b` to the end of the splay tree containing `a` and
    /// return the root of the combined tree. The trees must be distinct.
    pub(crate) fn concat(&mut self, a: usize, b: usize) -> usize {
        let tail = self.last(a);
        self.splay(b);
        debug_assert!(self.nodes[b].parent.is_none(), "concatenated tree has a parent");
        self.link_right(tail, Some(b));
        self.update(tail);
        tail
    }

    /// Fold the statistics of all nodes between `from` and `to` (both inclusive). `from` must not
    /// come after `to` in order.
    pub(crate) fn range_statistic(&mut self, from: usize, to: usize) -> S {
        self.splay(to);
        let mut stat = self.own_stat(from);
        if from == to {
            return stat;
        }
        if let Some(r) = self.nodes[from].right {
            stat.update_right(&self.nodes[r].stat);
        }

        // from is in the left subtree of to; every ancestor entered from its left side lies
        // between from and to, as does its right subtree, unless the ancestor is to itself
        let mut cur = from;
        while cur != to {
            let Some(parent) = self.nodes[cur].parent else {
                debug_assert!(false, "range_statistic bounds are not ordered");
                break;
            };
            if self.nodes[parent].left == Some(cur) {
                let own = self.own_stat(parent);
                stat.update_right(&own);
                if parent != to {
                    if let Some(r) = self.nodes[parent].right {
                        stat.update_right(&self.nodes[r].stat);
                    }
                }
            }
            cur = parent;
        }

        self.splay(from);
        stat
    }

    fn view(&self, x: usize, previous: Option<usize>) -> NodeView<'_, K, S> {
        let node = &self.nodes[x];
        NodeView::new(
            &node.key,
            &node.stat,
            node.left.map(|l| &self.nodes[l].stat),
            node.right.map(|r| &self.nodes[r].stat),
            previous.is_some() && node.left == previous,
        )
    }

    /// Walk down from `root` as directed by `navigator`. The target node is splayed.
    ///
    /// # Panics
    /// Panics if the navigator asks to move up, since ascents would break the amortized bound.
    pub(crate) fn descend<N: Navigator<K, S>>(
        &mut self,
        root: usize,
        navigator: &mut N,
    ) -> Option<usize> {
        navigator.init();
        let mut cur = Some(root);
        while let Some(c) = cur {
            let next = navigator.next(&self.view(c, None));
            match next {
                Direction::Left => cur = self.nodes[c].left,
                Direction::Right => cur = self.nodes[c].right,
                Direction::Target => {
                    self.splay(c);
                    return Some(c);
                }
                Direction::Lost => return None,
                Direction::Up => panic!("a descending search cannot move up"),
            }
        }
        None
    }

    /// Walk from `from` in both directions as directed by `navigator`, never leaving the splay
    /// tree of `top`, which is splayed first. The target node is splayed. The caller is
    /// responsible for splaying `from` when the search fails.
    pub(crate) fn search<N: Navigator<K, S>>(
        &mut self,
        from: usize,
        top: usize,
        navigator: &mut N,
    ) -> Option<usize> {
        self.splay(top);
        navigator.init();
        let mut previous = None;
        let mut cur = Some(from);
        while let Some(c) = cur {
            let next = navigator.next(&self.view(c, previous));
            previous = Some(c);
            match next {
                Direction::Left => cur = self.nodes[c].left,
                Direction::Right => cur = self.nodes[c].right,
                Direction::Up if self.is_root(c) => cur = None,
                Direction::Up => cur = self.nodes[c].parent,
                Direction::Target => {
                    self.splay(c);
                    return Some(c);
                }
                Direction::Lost => return None,
            }
        }
        None
    }

    /// Indices of the splay tree containing `x`, in order.
    pub(crate) fn collect_in_order(&self, x: usize) -> Vec<usize> {
        let mut root = x;
        while !self.is_root(root) {
            match self.nodes[root].parent {
                Some(p) => root = p,
                None => break,
            }
        }
        self.subtree_in_order(root)
    }

    /// Indices of the subtree below `root`, in order.
    pub(crate) fn subtree_in_order(&self, root: usize) -> Vec<usize> {
        let mut result = Vec::new();
        let mut stack = Vec::new();
        let mut cur = Some(root);
        while cur.is_some() || !stack.is_empty() {
            while let Some(c) = cur {
                stack.push(c);
                cur = self.nodes[c].left;
            }
            if let Some(c) = stack.pop() {
                result.push(c);
                cur = self.nodes[c].right;
            }
        }
        result
    }
}
