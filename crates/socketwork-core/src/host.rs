//! Seams to the hosting scene.
//!
//! The coordinator never creates, destroys or moves objects itself. It asks
//! a host for three things:
//!
//! - [`Instantiator`]: create a live instance from a prototype, destroy one.
//! - [`Parenting`]: read world poses, reparent, and overwrite local poses.
//!
//! [`SceneGraph`] implements both, so a plain scene is a complete [`Host`].
//! Tests wrap it to count calls or inject failures.

use scenegraph::{NodeId, SceneError, SceneGraph, Transform};

use crate::part::PartPrototype;

/// Creates and destroys part instances.
pub trait Instantiator {
    /// Creates a live instance of `prototype` at the given world pose.
    fn instantiate(&mut self, prototype: &PartPrototype, world: Transform) -> NodeId;

    /// Destroys a live instance and everything under it.
    ///
    /// Returns false if the instance was already gone.
    fn destroy(&mut self, instance: NodeId) -> bool;
}

/// Reads and rewrites the transform hierarchy.
pub trait Parenting {
    /// World pose of a node, or `None` if it is not live.
    fn world_transform(&self, node: NodeId) -> Option<Transform>;

    /// Moves `child` under `parent`, keeping its world pose.
    ///
    /// # Errors
    ///
    /// Any [`SceneError`] the hierarchy rejects the move with.
    fn reparent(&mut self, child: NodeId, parent: NodeId) -> Result<(), SceneError>;

    /// Overwrites a node's pose relative to its parent.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownNode`] if `node` is not live.
    fn set_local(&mut self, node: NodeId, local: Transform) -> Result<(), SceneError>;
}

/// Everything the coordinator needs from a scene.
pub trait Host: Instantiator + Parenting {}

impl<T: Instantiator + Parenting + ?Sized> Host for T {}

impl Instantiator for SceneGraph {
    fn instantiate(&mut self, prototype: &PartPrototype, world: Transform) -> NodeId {
        self.spawn(prototype.name(), world.mul_transform(prototype.local()))
    }

    fn destroy(&mut self, instance: NodeId) -> bool {
        self.despawn(instance) > 0
    }
}

impl Parenting for SceneGraph {
    fn world_transform(&self, node: NodeId) -> Option<Transform> {
        SceneGraph::world_transform(self, node)
    }

    fn reparent(&mut self, child: NodeId, parent: NodeId) -> Result<(), SceneError> {
        self.set_parent(child, Some(parent), true)
    }

    fn set_local(&mut self, node: NodeId, local: Transform) -> Result<(), SceneError> {
        SceneGraph::set_local(self, node, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{MountSide, PartCategory, PartDescriptor};
    use glam::Vec3;

    #[test]
    fn scene_instantiate_applies_authored_offset() {
        let mut scene = SceneGraph::new();
        let proto = PartPrototype::new("fin", PartDescriptor::new(PartCategory::Fin, MountSide::Back))
            .with_local(Transform::from_translation(Vec3::Y));

        let id = scene.instantiate(&proto, Transform::from_translation(Vec3::X));

        assert_eq!(scene.get(id).unwrap().name(), "fin");
        assert_eq!(
            Parenting::world_transform(&scene, id).unwrap().translation,
            Vec3::new(1.0, 1.0, 0.0)
        );
    }

    #[test]
    fn scene_destroy_reports_liveness() {
        let mut scene = SceneGraph::new();
        let id = scene.instantiate(&PartPrototype::without_descriptor("x"), Transform::IDENTITY);
        assert!(scene.destroy(id));
        assert!(!scene.destroy(id));
    }

    #[test]
    fn scene_reparent_keeps_world_pose() {
        let mut scene = SceneGraph::new();
        let frame = scene.spawn("frame", Transform::from_translation(Vec3::new(4.0, 0.0, 0.0)));
        let part = scene.spawn("part", Transform::from_translation(Vec3::new(4.0, 0.0, 0.0)));

        scene.reparent(part, frame).unwrap();

        assert_eq!(scene.parent(part), Some(frame));
        assert_eq!(scene.local(part).unwrap().translation, Vec3::ZERO);
    }
}
