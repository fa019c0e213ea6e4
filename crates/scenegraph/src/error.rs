//! Error types for scene graph mutations.

use thiserror::Error;

use crate::node::NodeId;

/// Errors returned by fallible [`SceneGraph`](crate::SceneGraph) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The handle does not refer to a live node.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// Reparenting would make a node its own ancestor.
    #[error("cannot parent node {child} under {parent}: would create a cycle")]
    Cycle {
        /// Node being moved.
        child: NodeId,
        /// Requested new parent.
        parent: NodeId,
    },
}
