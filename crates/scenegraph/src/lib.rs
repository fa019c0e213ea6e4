//! # Scenegraph
//!
//! Handle-based scene graph for assemblies of mounted parts.
//!
//! Every object in a scene is a [`Node`] addressed by a [`NodeId`] handle.
//! Nodes carry a local [`Transform`] relative to their parent, so moving a
//! parent moves its whole subtree. This is the substrate that part
//! instantiation and socket parenting run on top of.
//!
//! ## Quick Start
//!
//! ```
//! use glam::Vec3;
//! use scenegraph::{SceneGraph, Transform};
//!
//! let mut scene = SceneGraph::new();
//! let body = scene.spawn("body", Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)));
//! let mount = scene
//!     .spawn_child(body, "mount", Transform::from_translation(Vec3::X))
//!     .unwrap();
//!
//! let world = scene.world_transform(mount).unwrap();
//! assert_eq!(world.translation, Vec3::new(11.0, 0.0, 0.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod graph;
pub mod node;
pub mod transform;

// Re-exports for convenience
pub use error::SceneError;
pub use graph::SceneGraph;
pub use node::{Node, NodeId};
pub use transform::Transform;
