//! Errors reported by the forest structures when a caller violates a precondition that it could
//! have checked beforehand. A failed operation never modifies the forest.

use crate::trees::NodeId;
use thiserror::Error;

/// Error type of the fallible operations of [`LinkCutTree`] and [`EulerTourTree`].
///
/// [`LinkCutTree`]: crate::LinkCutTree
/// [`EulerTourTree`]: crate::EulerTourTree
#[derive(Debug, Clone, Copy, Error, Eq, PartialEq)]
pub enum ForestError {
    /// Only the root of a tree can be attached below another vertex.
    #[error("vertex {0} is not the root of its tree")]
    NotRoot(NodeId),

    /// Linking the two vertices would close a cycle.
    #[error("vertices {0} and {1} are already in the same tree")]
    AlreadyConnected(NodeId, NodeId),

    /// The edge passed to a cut does not exist in the forest (anymore).
    #[error("there is no edge between {0} and {1}")]
    NotLinked(NodeId, NodeId),

    /// The vertex has no parent that it could be cut from.
    #[error("vertex {0} is a root and has no parent")]
    IsRoot(NodeId),

    /// Only isolated vertices can be removed from the forest.
    #[error("vertex {0} still has incident edges")]
    StillConnected(NodeId),
}

/// Log a rejected operation and return the error.
pub(crate) fn reject<T>(error: ForestError) -> Result<T, ForestError> {
    log::debug!("rejected forest operation: {error}");
    Err(error)
}
