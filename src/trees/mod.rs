//! Dynamic forests. Two representations are provided:
//!  - the [link-cut tree][link_cut::LinkCutTree], which decomposes every tree into paths and keeps
//!    each path in a splay tree, answering path queries.
//!  - the [Euler-tour tree][euler::EulerTourTree], which keeps the Euler tour of every tree in a
//!    splay tree, answering subtree queries.
//!
//! Both implement the [`DynamicForest`] trait with the basic operations of a forest whose edges
//! can be inserted and deleted at any time.

use crate::error::ForestError;
use std::fmt;
use std::hash::{Hash, Hasher};

pub mod euler;
pub mod link_cut;

/// Handle of a vertex in a dynamic forest. Handles are handed out by [`DynamicForest::add`] and
/// stay valid until the vertex is removed. A handle of a removed vertex may be reused for a vertex
/// added later.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// A contiguous index of the vertex, allowing associated data to be stored in a vector.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An edge between a child vertex and its parent, as returned by [`DynamicForest::link`].
///
/// In forests that support re-rooting, the orientation recorded at link time may be outdated;
/// cutting the edge works regardless of its current orientation.
///
/// Handles returned by [`link`](DynamicForest::link) also remember where the edge sits in the
/// forest's internal layout, which lets an [Euler-tour tree](euler::EulerTourTree) cut them
/// without searching. Handles built with [`Edge::new`] name the same edge, but an evertable
/// Euler-tour tree has to search for it. Two handles compare equal if they name the same
/// endpoints in the same roles.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    child: NodeId,
    parent: NodeId,
    boundary: Option<usize>,
}

impl Edge {
    /// Create an edge handle from its two endpoints.
    #[must_use]
    pub fn new(child: NodeId, parent: NodeId) -> Self {
        Self {
            child,
            parent,
            boundary: None,
        }
    }

    /// An edge handle that also records the index of a tour occurrence next to the edge.
    pub(crate) fn with_boundary(child: NodeId, parent: NodeId, boundary: usize) -> Self {
        Self {
            child,
            parent,
            boundary: Some(boundary),
        }
    }

    /// The vertex that was attached below `parent`.
    #[must_use]
    pub fn child(&self) -> NodeId {
        self.child
    }

    /// The vertex the child was attached to.
    #[must_use]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub(crate) fn boundary(&self) -> Option<usize> {
        self.boundary
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.child == other.child && self.parent == other.parent
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.child.hash(state);
        self.parent.hash(state);
    }
}

/// A forest of rooted trees that can be changed by inserting and deleting edges.
///
/// Queries take `&mut self`, because the splay-based implementations restructure themselves on
/// every access.
pub trait DynamicForest {
    /// The value stored in every vertex.
    type Value;

    /// Add an isolated vertex holding `value` and return its handle.
    fn add(&mut self, value: Self::Value) -> NodeId;

    /// Remove an isolated vertex and return its value.
    ///
    /// # Errors
    /// Returns [`ForestError::StillConnected`] if the vertex has incident edges.
    fn remove(&mut self, node: NodeId) -> Result<Self::Value, ForestError>;

    /// Attach the root `child` below `parent`.
    ///
    /// # Errors
    /// Returns [`ForestError::NotRoot`] if `child` is not the root of its tree, and
    /// [`ForestError::AlreadyConnected`] if both vertices are in the same tree.
    fn link(&mut self, child: NodeId, parent: NodeId) -> Result<Edge, ForestError>;

    /// Delete an edge, splitting its tree in two.
    ///
    /// # Errors
    /// Returns [`ForestError::NotLinked`] if the edge is not part of the forest.
    fn cut(&mut self, edge: Edge) -> Result<(), ForestError>;

    /// The root of the tree containing `node`.
    fn find_root(&mut self, node: NodeId) -> NodeId;

    /// The parent of `node`, if it is not a root.
    fn parent(&mut self, node: NodeId) -> Option<NodeId>;

    /// Returns true, if `node` is the root of its tree.
    fn is_root(&mut self, node: NodeId) -> bool {
        self.parent(node).is_none()
    }

    /// The lowest common ancestor of `u` and `v`, or `None` if they are in different trees.
    fn find_lca(&mut self, u: NodeId, v: NodeId) -> Option<NodeId>;

    /// Returns true, if `u` and `v` are in the same tree.
    fn connected(&mut self, u: NodeId, v: NodeId) -> bool {
        self.find_root(u) == self.find_root(v)
    }

    /// Returns the number of vertices in the forest.
    fn size(&self) -> usize;

    /// Returns true, if the forest has no vertices.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
