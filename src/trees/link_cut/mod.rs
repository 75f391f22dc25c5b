//! A link-cut tree maintains a forest of rooted trees under edge insertions and deletions, and
//! answers queries about root paths in amortized O(log n) time.
//!
//! Every tree is decomposed into vertex-disjoint preferred paths. Each path is stored in a splay
//! tree ordered by depth (the left side is closer to the root of the represented tree), and the
//! splay tree of a path points to the parent of the path's topmost vertex with a path-parent
//! pointer. [`access`] rearranges the decomposition so that the path from the root to a vertex
//! becomes preferred, after which the root-path statistic is available at the vertex.
//!
//! [`access`]: LinkCutTree::access

use crate::error::{reject, ForestError};
use crate::splay::SplayArena;
use crate::statistic::{Count, Statistic};
use crate::trees::{DynamicForest, Edge, NodeId};
use log::trace;

/// A forest of rooted trees with path aggregates.
///
/// The vertex values are the keys of the splay trees, so the statistic `S` summarizes the values
/// on a path. With `EVERTABLE = true`, the tree supports [`evert`] (re-rooting), which reverses
/// paths lazily. Reversal swaps the children of splay nodes without recomputing statistics, so
/// `S` must not depend on the order in which `update_left` and `update_right` combine values.
///
/// # Example
/// ```rust
/// use splay_forest::statistic::Sum;
/// use splay_forest::{DynamicForest, LinkCutTree};
///
/// let mut forest = LinkCutTree::<u64, Sum<u64>>::new();
/// let root = forest.add(1);
/// let inner = forest.add(10);
/// let leaf = forest.add(100);
/// forest.link(inner, root).unwrap();
/// forest.link(leaf, inner).unwrap();
///
/// assert_eq!(forest.path(leaf).sum(), 111);
/// assert_eq!(forest.find_root(leaf), root);
/// ```
///
/// [`evert`]: LinkCutTree::evert
#[derive(Clone, Debug)]
pub struct LinkCutTree<T, S = Count, const EVERTABLE: bool = false> {
    arena: SplayArena<T, S>,

    // number of incident edges per vertex, indexed by arena slot
    degrees: Vec<usize>,
}

impl<T, S: Statistic<T>, const EVERTABLE: bool> LinkCutTree<T, S, EVERTABLE> {
    /// Create an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: SplayArena::new(),
            degrees: Vec::new(),
        }
    }

    /// Create an empty forest with room for `capacity` vertices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SplayArena::with_capacity(capacity),
            degrees: Vec::with_capacity(capacity),
        }
    }

    /// Splay `x` within its auxiliary tree, applying pending reversals on the way down first.
    fn splay(&mut self, x: usize) {
        if EVERTABLE {
            let mut path = vec![x];
            let mut cur = x;
            while !self.arena.is_root(cur) {
                match self.arena.parent(cur) {
                    Some(p) => {
                        path.push(p);
                        cur = p;
                    }
                    None => break,
                }
            }
            for &node in path.iter().rev() {
                self.arena.push_reverse(node);
            }
        }
        self.arena.splay(x);
    }

    fn push(&mut self, x: usize) {
        if EVERTABLE {
            self.arena.push_reverse(x);
        }
    }

    /// Make the path from the root of `v`'s tree to `v` preferred, with `v` as its deepest
    /// vertex. Afterwards `v` is the root of its auxiliary tree, which contains exactly that path.
    ///
    /// Returns the last vertex at which the path to `v` joined a previously preferred path (or `v`
    /// itself, if no path changed). Accessing `u` and then `v` returns their lowest common
    /// ancestor, if both are in the same tree.
    pub fn access(&mut self, v: NodeId) -> NodeId {
        let x = v.0;
        self.splay(x);
        self.arena.take_right(x);

        let mut last = x;
        while let Some(w) = self.arena.parent(x) {
            last = w;
            self.splay(w);
            self.arena.link_right(w, Some(x));
            self.arena.update(w);
            self.splay(x);
        }
        NodeId(last)
    }

    /// The aggregate statistic of the values on the path from the root of `v`'s tree to `v`.
    pub fn path(&mut self, v: NodeId) -> S {
        self.access(v);
        self.arena.stat(v.0).clone()
    }

    /// The value stored in vertex `v`.
    #[must_use]
    pub fn value(&self, v: NodeId) -> &T {
        self.arena.key(v.0)
    }

    /// Replace the value of vertex `v` and return the previous value. Path statistics are updated.
    pub fn set_value(&mut self, v: NodeId, value: T) -> T {
        self.access(v);
        let old = std::mem::replace(self.arena.key_mut(v.0), value);
        self.arena.update(v.0);
        old
    }

    /// Detach `v` from its parent and return the former parent.
    ///
    /// # Errors
    /// Returns [`ForestError::IsRoot`] if `v` is the root of its tree.
    pub fn cut_parent(&mut self, v: NodeId) -> Result<NodeId, ForestError> {
        match self.parent(v) {
            Some(parent) => {
                self.detach(v);
                self.degrees[v.0] -= 1;
                self.degrees[parent.0] -= 1;
                trace!("cut {v} from its parent {parent}");
                Ok(parent)
            }
            None => reject(ForestError::IsRoot(v)),
        }
    }

    // split off everything above v; v must not be a root
    fn detach(&mut self, v: NodeId) {
        let x = v.0;
        self.access(v);
        if let Some(above) = self.arena.left(x) {
            // after the access, x has no path-parent that the upper part could inherit
            self.arena.link_left(x, None);
            self.arena.set_parent(above, self.arena.parent(x));
            self.arena.update(x);
        }
    }
}

impl<T, S: Statistic<T>> LinkCutTree<T, S, true> {
    /// Make `v` the root of its tree by reversing the path from the current root to `v`.
    pub fn evert(&mut self, v: NodeId) {
        self.access(v);
        self.arena.toggle_reversed(v.0);
        trace!("everted {v}");
    }
}

impl<T, S: Statistic<T>, const EVERTABLE: bool> Default for LinkCutTree<T, S, EVERTABLE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: Statistic<T>, const EVERTABLE: bool> DynamicForest for LinkCutTree<T, S, EVERTABLE> {
    type Value = T;

    fn add(&mut self, value: T) -> NodeId {
        let x = self.arena.create(value);
        if self.degrees.len() <= x {
            self.degrees.resize(x + 1, 0);
        }
        self.degrees[x] = 0;
        NodeId(x)
    }

    fn remove(&mut self, node: NodeId) -> Result<T, ForestError> {
        if self.degrees[node.0] > 0 {
            return reject(ForestError::StillConnected(node));
        }
        trace!("removed {node}");
        Ok(self.arena.release(node.0))
    }

    fn link(&mut self, child: NodeId, parent: NodeId) -> Result<Edge, ForestError> {
        if child == parent {
            return reject(ForestError::AlreadyConnected(child, parent));
        }
        if self.find_root(child) != child {
            return reject(ForestError::NotRoot(child));
        }
        if self.find_root(parent) == child {
            return reject(ForestError::AlreadyConnected(child, parent));
        }

        self.access(child);
        self.access(parent);

        // child is alone in its auxiliary tree now; the whole root path of parent goes above it
        let (c, p) = (child.0, parent.0);
        debug_assert!(self.arena.left(c).is_none() && self.arena.right(c).is_none());
        self.arena.set_parent(c, self.arena.parent(p));
        self.arena.link_left(c, Some(p));
        self.arena.update(c);

        self.degrees[c] += 1;
        self.degrees[p] += 1;
        trace!("linked {child} below {parent}");
        Ok(Edge::new(child, parent))
    }

    fn cut(&mut self, edge: Edge) -> Result<(), ForestError> {
        let (u, v) = (edge.child(), edge.parent());
        let lower = if u != v && self.parent(u) == Some(v) {
            u
        } else if u != v && self.parent(v) == Some(u) {
            v
        } else {
            return reject(ForestError::NotLinked(u, v));
        };

        self.detach(lower);
        self.degrees[u.0] -= 1;
        self.degrees[v.0] -= 1;
        trace!("cut edge between {u} and {v}");
        Ok(())
    }

    fn find_root(&mut self, node: NodeId) -> NodeId {
        self.access(node);
        let mut cur = node.0;
        self.push(cur);
        while let Some(l) = self.arena.left(cur) {
            cur = l;
            self.push(cur);
        }
        self.splay(cur);
        NodeId(cur)
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        self.access(node);
        let mut cur = self.arena.left(node.0)?;
        self.push(cur);
        while let Some(r) = self.arena.right(cur) {
            cur = r;
            self.push(cur);
        }
        let parent = NodeId(cur);
        self.access(parent);
        Some(parent)
    }

    fn is_root(&mut self, node: NodeId) -> bool {
        self.access(node);
        self.arena.left(node.0).is_none()
    }

    fn find_lca(&mut self, u: NodeId, v: NodeId) -> Option<NodeId> {
        if self.find_root(u) != self.find_root(v) {
            return None;
        }
        self.access(u);
        Some(self.access(v))
    }

    fn size(&self) -> usize {
        self.arena.len()
    }
}
