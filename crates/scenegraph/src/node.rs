//! Node handles and node storage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Handle to a node in a [`SceneGraph`](crate::SceneGraph).
///
/// `NodeId` is a newtype wrapper around `u64`. Handles are assigned
/// monotonically and never reused within a graph, so a stale handle to a
/// despawned node can never alias a newer node.
///
/// # Example
///
/// ```
/// use scenegraph::NodeId;
///
/// let a = NodeId::new(1);
/// let b = NodeId::new(2);
///
/// assert!(a < b);
/// assert_eq!(a.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new `NodeId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this handle.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<NodeId> for u64 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A single object in the scene.
///
/// Hierarchy links are maintained by [`SceneGraph`](crate::SceneGraph); the
/// node only exposes them read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    name: String,
    local: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, local: Transform, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name,
            local,
            parent,
            children: Vec::new(),
        }
    }

    /// Returns this node's handle.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the transform relative to the parent (or world, for roots).
    #[must_use]
    pub const fn local(&self) -> &Transform {
        &self.local
    }

    /// Returns the parent handle, or `None` for root nodes.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child handles in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn set_local(&mut self, local: Transform) {
        self.local = local;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: NodeId) {
        self.children.retain(|c| *c != child);
    }
}
