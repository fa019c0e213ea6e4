//! The scene graph container.
//!
//! [`SceneGraph`] stores every [`Node`] in a `BTreeMap` keyed by [`NodeId`],
//! which gives deterministic iteration order. Hierarchy links are kept on
//! both ends (parent handle on the child, child list on the parent) and are
//! only ever mutated here, so the two ends cannot drift apart.
//!
//! # World transforms
//!
//! World transforms are not cached. [`SceneGraph::world_transform`] walks
//! from the node up to its root and composes local transforms on the way.
//! Assemblies are shallow (body, socket, part) so the walk is short.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use scenegraph::{SceneGraph, Transform};
//!
//! let mut scene = SceneGraph::new();
//! let body = scene.spawn("body", Transform::IDENTITY);
//! let part = scene.spawn("part", Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)));
//!
//! // Reparent while keeping the world pose.
//! scene.set_parent(part, Some(body), true).unwrap();
//! assert_eq!(scene.parent(part), Some(body));
//! assert_eq!(scene.world_transform(part).unwrap().translation, Vec3::new(0.0, 5.0, 0.0));
//!
//! // Despawning the body removes the part too.
//! assert_eq!(scene.despawn(body), 2);
//! assert!(scene.is_empty());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::SceneError;
use crate::node::{Node, NodeId};
use crate::transform::Transform;

/// Arena of scene nodes addressed by [`NodeId`] handles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    /// Monotonically increasing handle counter.
    next_id: u64,
    /// Node storage with deterministic iteration order.
    nodes: BTreeMap<NodeId, Node>,
}

impl SceneGraph {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            nodes: BTreeMap::new(),
        }
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Spawns a root node at the given world transform.
    pub fn spawn(&mut self, name: impl Into<String>, world: Transform) -> NodeId {
        let id = self.allocate_id();
        self.nodes.insert(id, Node::new(id, name.into(), world, None));
        trace!(node = %id, "spawned root node");
        id
    }

    /// Spawns a node under `parent` with a transform relative to it.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNode`] if `parent` is not live.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Transform,
    ) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::UnknownNode(parent));
        }

        let id = self.allocate_id();
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.push_child(id);
        }
        self.nodes
            .insert(id, Node::new(id, name.into(), local, Some(parent)));
        trace!(node = %id, parent = %parent, "spawned child node");
        Ok(id)
    }

    /// Removes a node and its entire subtree.
    ///
    /// Returns the number of nodes removed; unknown handles remove nothing.
    pub fn despawn(&mut self, id: NodeId) -> usize {
        let Some(node) = self.nodes.get(&id) else {
            return 0;
        };

        if let Some(parent) = node.parent() {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.remove_child(id);
            }
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend_from_slice(node.children());
                removed += 1;
            }
        }

        trace!(node = %id, removed, "despawned subtree");
        removed
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Moves `child` under `parent` (or to the root when `parent` is `None`).
    ///
    /// With `keep_world` the node's world pose is preserved and its local
    /// transform is recomputed against the new parent. Without it the local
    /// transform is kept as-is, so the node jumps to the new parent's frame.
    ///
    /// # Errors
    ///
    /// - [`SceneError::UnknownNode`] if either handle is not live.
    /// - [`SceneError::Cycle`] if `parent` is `child` or one of its descendants.
    pub fn set_parent(
        &mut self,
        child: NodeId,
        parent: Option<NodeId>,
        keep_world: bool,
    ) -> Result<(), SceneError> {
        let world = self
            .world_transform(child)
            .ok_or(SceneError::UnknownNode(child))?;

        let local = match parent {
            Some(parent) => {
                let parent_world = self
                    .world_transform(parent)
                    .ok_or(SceneError::UnknownNode(parent))?;
                if self.is_ancestor_or_self(child, parent) {
                    return Err(SceneError::Cycle { child, parent });
                }
                if keep_world {
                    parent_world.inverse().mul_transform(&world)
                } else {
                    self.local(child).unwrap_or(world)
                }
            }
            None if keep_world => world,
            None => self.local(child).unwrap_or(world),
        };

        let old_parent = self.parent(child);
        if let Some(old) = old_parent {
            if let Some(old_node) = self.nodes.get_mut(&old) {
                old_node.remove_child(child);
            }
        }
        if let Some(new) = parent {
            if let Some(new_node) = self.nodes.get_mut(&new) {
                new_node.push_child(child);
            }
        }
        let node = self
            .nodes
            .get_mut(&child)
            .ok_or(SceneError::UnknownNode(child))?;
        node.set_parent(parent);
        node.set_local(local);

        trace!(node = %child, parent = ?parent, keep_world, "reparented node");
        Ok(())
    }

    /// Returns true if `ancestor` is `node` or lies on `node`'s parent chain.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Replaces a node's local transform.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNode`] if `id` is not live.
    pub fn set_local(&mut self, id: NodeId, local: Transform) -> Result<(), SceneError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(SceneError::UnknownNode(id))?;
        node.set_local(local);
        Ok(())
    }

    /// Returns a node's local transform.
    #[must_use]
    pub fn local(&self, id: NodeId) -> Option<Transform> {
        self.nodes.get(&id).map(|node| *node.local())
    }

    /// Computes a node's world transform by composing up to its root.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        let mut node = self.nodes.get(&id)?;
        let mut world = *node.local();
        while let Some(parent) = node.parent() {
            node = self.nodes.get(&parent)?;
            world = node.local().mul_transform(&world);
        }
        Some(world)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns a node by handle.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns true if the handle refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the parent of a node, or `None` for roots and unknown handles.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(Node::parent)
    }

    /// Returns the children of a node; empty for unknown handles.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(&id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    /// Returns node handles in deterministic (sorted) order.
    pub fn node_ids_sorted(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
