//! An Euler-tour tree maintains a forest of rooted trees under edge insertions and deletions by
//! storing the Euler tour of every tree in a splay tree.
//!
//! The tour of a tree visits a vertex when it is entered and again after returning from each of
//! its children, so a vertex with `k` children occurs `k + 1` times. Every occurrence is a splay
//! node whose key is an [`Occurrence`]; the occurrences of one vertex are chained in a circular
//! list in tour order, and one of them is the vertex's representative. The representative of a
//! root is always the first element of its tour, and in the non-evertable variant the
//! representative of every vertex is its first occurrence.
//!
//! Linking and cutting splice tour segments in amortized O(log n) time. Since the subtree of a
//! vertex is a contiguous range of the tour, subtree aggregates are range queries. Path
//! aggregates are not supported; use a [link-cut tree] for those.
//!
//! [link-cut tree]: crate::trees::link_cut::LinkCutTree

use crate::error::{reject, ForestError};
use crate::splay::SplayArena;
use crate::statistic::{Count, Statistic};
use crate::trees::{DynamicForest, Edge, NodeId};
use log::trace;
use slab::Slab;
use std::collections::HashSet;

pub use lca::LcaStatistic;

mod lca;

#[cfg(test)]
thread_local! {
    /// Number of occurrences visited by the first-occurrence search on this thread.
    static SEARCH_STEPS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// One visit of a vertex in an Euler tour. This is the key type of the splay trees holding the
/// tours, so statistics for an [`EulerTourTree`] are implemented for `Occurrence`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Occurrence {
    node: NodeId,
    prev: usize,
    next: usize,
    representative: bool,
}

impl Occurrence {
    /// The vertex this occurrence belongs to.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns true, if this occurrence represents its vertex. Every vertex has exactly one
    /// representative occurrence.
    #[must_use]
    pub fn is_representative(&self) -> bool {
        self.representative
    }
}

#[derive(Clone, Debug)]
struct Vertex<T> {
    value: T,
    repr: usize,
}

/// A forest of rooted trees stored as Euler tours.
///
/// With `EVERTABLE = true` (the default), trees can be re-rooted with [`evert`], and cut edges
/// are recognized regardless of their current orientation. The non-evertable variant keeps the
/// first occurrence of every vertex as its representative, which makes [`parent`] cheaper and
/// enables [`cut_parent`] and the logarithmic [`find_lca_by_range_min`].
///
/// # Cost
/// Link, evert, [`find_root`] and cutting an edge handle returned by [`link`] take amortized
/// O(log n) time. In the evertable variant, [`parent`], [`subtree_statistic`], the naive
/// [`find_lca`] and cutting a handle made with [`Edge::new`] have to search for the first
/// occurrence of a vertex, which costs O(k log n) for a vertex occurring `k` times.
///
/// # Example
/// ```rust
/// use splay_forest::{DynamicForest, EulerTourTree};
///
/// let mut forest = EulerTourTree::<&str>::new();
/// let root = forest.add("root");
/// let left = forest.add("left");
/// let right = forest.add("right");
/// forest.link(left, root).unwrap();
/// forest.link(right, root).unwrap();
///
/// assert_eq!(forest.find_lca(left, right), Some(root));
///
/// forest.evert(left);
/// assert_eq!(forest.find_root(right), left);
/// assert_eq!(forest.parent(root), Some(left));
/// ```
///
/// [`evert`]: EulerTourTree::evert
/// [`find_root`]: DynamicForest::find_root
/// [`link`]: DynamicForest::link
/// [`find_lca`]: DynamicForest::find_lca
/// [`subtree_statistic`]: EulerTourTree::subtree_statistic
/// [`parent`]: DynamicForest::parent
/// [`cut_parent`]: EulerTourTree::cut_parent
/// [`find_lca_by_range_min`]: EulerTourTree::find_lca_by_range_min
#[derive(Clone, Debug)]
pub struct EulerTourTree<T, S = Count, const EVERTABLE: bool = true> {
    vertices: Slab<Vertex<T>>,
    arena: SplayArena<Occurrence, S>,
}

impl<T, S: Statistic<Occurrence>, const EVERTABLE: bool> EulerTourTree<T, S, EVERTABLE> {
    /// Create an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertices: Slab::new(),
            arena: SplayArena::new(),
        }
    }

    /// Create an empty forest with room for `capacity` vertices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Slab::with_capacity(capacity),
            arena: SplayArena::with_capacity(2 * capacity),
        }
    }

    /// The value stored in vertex `u`.
    #[must_use]
    pub fn value(&self, u: NodeId) -> &T {
        &self.vertices[u.0].value
    }

    /// Mutable access to the value of vertex `u`. Values do not take part in statistics.
    pub fn value_mut(&mut self, u: NodeId) -> &mut T {
        &mut self.vertices[u.0].value
    }

    /// The aggregate statistic of the tour segment of the subtree below `u` (inclusive).
    ///
    /// In the evertable variant this searches the occurrences of `u` for the first one, which
    /// takes O(k log n) amortized time for a vertex occurring `k` times.
    pub fn subtree_statistic(&mut self, u: NodeId) -> S {
        let first = self.first_occurrence(u);
        let last = self.arena.key(first).prev;
        self.arena.range_statistic(first, last)
    }

    /// The vertices of the tree containing `u`, in Euler-tour order. A vertex appears once more
    /// than it has children.
    #[must_use]
    pub fn tour(&self, u: NodeId) -> Vec<NodeId> {
        self.arena
            .collect_in_order(self.repr(u))
            .into_iter()
            .map(|occ| self.arena.key(occ).node)
            .collect()
    }

    fn repr(&self, u: NodeId) -> usize {
        self.vertices[u.0].repr
    }

    // new occurrence of the same vertex, directly after `occ` in the occurrence list
    fn insert_after(&mut self, occ: usize) -> usize {
        let Occurrence { node, next, .. } = *self.arena.key(occ);
        let new = self.arena.create(Occurrence {
            node,
            prev: occ,
            next,
            representative: false,
        });
        self.arena.key_mut(next).prev = new;
        self.arena.key_mut(occ).next = new;
        new
    }

    // unlink a detached occurrence from its list and free it; the representative moves on
    fn drop_occurrence(&mut self, occ: usize) {
        let Occurrence {
            node,
            prev,
            next,
            representative,
        } = *self.arena.key(occ);
        debug_assert_ne!(next, occ, "dropping the last occurrence of {node}");

        self.arena.key_mut(prev).next = next;
        self.arena.key_mut(next).prev = prev;
        self.arena.release(occ);
        if representative {
            self.vertices[node.0].repr = next;
            self.mark_representative(next, true);
        }
    }

    fn mark_representative(&mut self, occ: usize, representative: bool) {
        self.arena.splay(occ);
        self.arena.key_mut(occ).representative = representative;
        self.arena.update(occ);
    }

    fn set_representative(&mut self, u: NodeId, occ: usize) {
        let old = self.repr(u);
        if old != occ {
            self.mark_representative(old, false);
            self.mark_representative(occ, true);
            self.vertices[u.0].repr = occ;
        }
    }

    /// The occurrence of `u` that comes first in the tour.
    fn first_occurrence(&mut self, u: NodeId) -> usize {
        let mut cur = self.repr(u);
        if EVERTABLE {
            loop {
                #[cfg(test)]
                SEARCH_STEPS.with(|steps| steps.set(steps.get() + 1));
                let prev = self.arena.key(cur).prev;
                if prev == cur || !self.arena.in_order(prev, cur) {
                    break;
                }
                cur = prev;
            }
        }
        cur
    }

    /// Find the occurrence of the parent directly before the child's segment and the first
    /// occurrence of the child, given an occurrence `occ` of one endpoint that is directly
    /// followed by an occurrence of the other. Returns `None` if `occ` is no such occurrence.
    fn locate_by_boundary(&mut self, occ: usize, u: NodeId, v: NodeId) -> Option<(usize, usize)> {
        if !self.arena.contains(occ) {
            return None;
        }
        let here = self.arena.key(occ).node;
        let other = if here == u {
            v
        } else if here == v {
            u
        } else {
            return None;
        };
        let after = self.arena.succ(occ)?;
        if self.arena.key(after).node != other {
            return None;
        }

        let next = self.arena.key(occ).next;
        if next != occ && self.arena.in_order(occ, next) {
            // `occ` enters the subtree of `other`
            Some((occ, after))
        } else {
            // `occ` closes the subtree of `here`, which starts at the next occurrence in the list
            let begin = self.arena.pred(next)?;
            debug_assert_eq!(self.arena.key(begin).node, other);
            Some((begin, next))
        }
    }

    /// Like [`locate_by_boundary`](Self::locate_by_boundary), but from the endpoints alone.
    fn locate_by_endpoints(&mut self, u: NodeId, v: NodeId) -> Option<(usize, usize)> {
        // the parent is entered before the child, whatever the orientation of the handle
        let first_u = self.first_occurrence(u);
        let first_v = self.first_occurrence(v);
        let (parent, first) = if self.arena.in_order(first_v, first_u) {
            (v, first_u)
        } else {
            (u, first_v)
        };
        let begin = self.arena.pred(first)?;
        (self.arena.key(begin).node == parent).then_some((begin, first))
    }

    /// Rotate the tour of `u`'s tree such that it starts at the representative of `u`.
    fn reroot(&mut self, u: NodeId) {
        let head = self.repr(u);
        self.arena.splay(head);
        let Some(before) = self.arena.cut_left(head) else {
            return;
        };

        // the old root's closing occurrence becomes redundant
        let last = self.arena.last(head);
        debug_assert_ne!(last, head, "the tour of a tree must end with its root");
        let rest = self.arena.cut_left(last);
        self.drop_occurrence(last);

        let tour = match rest {
            Some(rest) => self.arena.concat(rest, before),
            None => before,
        };
        let closing = self.insert_after(self.arena.key(head).prev);
        self.arena.concat(tour, closing);
    }

    // both splices return the occurrence of `parent` directly before the child's tour
    fn splice_evertable(&mut self, child: NodeId, parent: NodeId) -> usize {
        let root = self.find_root(parent);
        self.reroot(parent);

        let last = self.arena.key(self.repr(parent)).prev;
        self.arena.concat(last, self.repr(child));
        let closing = self.insert_after(last);
        self.arena.concat(last, closing);

        self.reroot(root);
        last
    }

    fn splice_after_first(&mut self, child: NodeId, parent: NodeId) -> usize {
        let first = self.repr(parent);
        self.arena.splay(first);
        let rest = self.arena.cut_right(first);

        let closing = self.insert_after(first);
        self.arena.concat(first, self.repr(child));
        self.arena.concat(first, closing);
        if let Some(rest) = rest {
            self.arena.concat(first, rest);
        }
        first
    }
}

impl<T, S: Statistic<Occurrence>> EulerTourTree<T, S, true> {
    /// Make `u` the root of its tree.
    pub fn evert(&mut self, u: NodeId) {
        self.reroot(u);
        trace!("everted {u}");
    }
}

impl<T, S: Statistic<Occurrence>> EulerTourTree<T, S, false> {
    /// Detach `u` from its parent and return the former parent.
    ///
    /// # Errors
    /// Returns [`ForestError::IsRoot`] if `u` is the root of its tree.
    pub fn cut_parent(&mut self, u: NodeId) -> Result<NodeId, ForestError> {
        match self.parent(u) {
            Some(parent) => {
                self.cut(Edge::new(u, parent))?;
                Ok(parent)
            }
            None => reject(ForestError::IsRoot(u)),
        }
    }
}

impl<T> EulerTourTree<T, LcaStatistic, false> {
    /// The lowest common ancestor of `u` and `v`, found with a single range query over the tour
    /// between their first occurrences. Returns `None` if they are in different trees.
    pub fn find_lca_by_range_min(&mut self, u: NodeId, v: NodeId) -> Option<NodeId> {
        if u == v {
            return Some(u);
        }
        if self.find_root(u) != self.find_root(v) {
            return None;
        }

        let (mut from, mut to) = (self.repr(u), self.repr(v));
        if !self.arena.in_order(from, to) {
            std::mem::swap(&mut from, &mut to);
        }
        self.arena.range_statistic(from, to).holder()
    }
}

impl<T, S: Statistic<Occurrence>, const EVERTABLE: bool> Default
    for EulerTourTree<T, S, EVERTABLE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: Statistic<Occurrence>, const EVERTABLE: bool> DynamicForest
    for EulerTourTree<T, S, EVERTABLE>
{
    type Value = T;

    fn add(&mut self, value: T) -> NodeId {
        let node = NodeId(self.vertices.vacant_key());
        let occ = self.arena.create(Occurrence {
            node,
            prev: 0,
            next: 0,
            representative: true,
        });
        let key = self.arena.key_mut(occ);
        key.prev = occ;
        key.next = occ;

        let id = self.vertices.insert(Vertex { value, repr: occ });
        debug_assert_eq!(id, node.0);
        node
    }

    fn remove(&mut self, node: NodeId) -> Result<T, ForestError> {
        // an isolated vertex is the only occurrence of its tour
        let occ = self.repr(node);
        self.arena.splay(occ);
        if self.arena.left(occ).is_some() || self.arena.right(occ).is_some() {
            return reject(ForestError::StillConnected(node));
        }
        self.arena.release(occ);
        trace!("removed {node}");
        Ok(self.vertices.remove(node.0).value)
    }

    fn link(&mut self, child: NodeId, parent: NodeId) -> Result<Edge, ForestError> {
        if child == parent {
            return reject(ForestError::AlreadyConnected(child, parent));
        }
        if !self.is_root(child) {
            return reject(ForestError::NotRoot(child));
        }
        if self.find_root(parent) == child {
            return reject(ForestError::AlreadyConnected(child, parent));
        }

        let boundary = if EVERTABLE {
            self.splice_evertable(child, parent)
        } else {
            self.splice_after_first(child, parent)
        };
        trace!("linked {child} below {parent}");
        Ok(Edge::with_boundary(child, parent, boundary))
    }

    fn cut(&mut self, edge: Edge) -> Result<(), ForestError> {
        let (u, v) = (edge.child(), edge.parent());
        if u == v || self.find_root(u) != self.find_root(v) {
            return reject(ForestError::NotLinked(u, v));
        }

        // the recorded boundary may be stale, e.g. after the edge was cut and linked again
        let located = edge
            .boundary()
            .and_then(|occ| self.locate_by_boundary(occ, u, v));
        let Some((begin, first)) = located.or_else(|| self.locate_by_endpoints(u, v)) else {
            return reject(ForestError::NotLinked(u, v));
        };
        let parent = self.arena.key(begin).node;
        let child = self.arena.key(first).node;
        let end = self.arena.key(begin).next;

        // [prefix, begin, segment, end, rest] becomes [prefix, end, rest] and [segment]
        self.arena.splay(begin);
        let prefix = self.arena.cut_left(begin);
        self.arena.cut_right(begin);
        self.arena.splay(end);
        self.arena.cut_left(end);
        self.arena.link_left(end, prefix);
        self.arena.update(end);
        self.drop_occurrence(begin);

        if EVERTABLE {
            self.set_representative(child, first);
        }
        trace!("cut edge between {child} and {parent}");
        Ok(())
    }

    fn find_root(&mut self, node: NodeId) -> NodeId {
        let head = self.arena.first(self.repr(node));
        let root = self.arena.key(head).node;
        debug_assert_eq!(self.repr(root), head, "tour of {root} does not start at it");
        root
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        let first = self.first_occurrence(node);
        self.arena.pred(first).map(|p| self.arena.key(p).node)
    }

    fn is_root(&mut self, node: NodeId) -> bool {
        self.arena.pred(self.repr(node)).is_none()
    }

    fn find_lca(&mut self, u: NodeId, v: NodeId) -> Option<NodeId> {
        if self.find_root(u) != self.find_root(v) {
            return None;
        }

        let mut ancestors = HashSet::new();
        let mut cur = Some(u);
        while let Some(x) = cur {
            ancestors.insert(x);
            cur = self.parent(x);
        }

        let mut cur = Some(v);
        while let Some(x) = cur {
            if ancestors.contains(&x) {
                return Some(x);
            }
            cur = self.parent(x);
        }
        None
    }

    fn size(&self) -> usize {
        self.vertices.len()
    }
}

#[cfg(test)]
mod tests;
