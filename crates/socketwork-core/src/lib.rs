//! # Socketwork Core
//!
//! Socket registry and part attachment for modular assemblies.
//!
//! An assembly (a creature body, a vehicle hull) exposes a fixed set of
//! sockets, each with a side affinity. Parts carry a descriptor naming the
//! side they mount on. The coordinator matches a part to the first free,
//! compatible socket, instantiates it in the host scene, and pins it to the
//! socket frame.
//!
//! ## Architecture
//!
//! - **Part descriptors** ([`part`]): immutable category + required side
//! - **Socket registry** ([`socket`]): ordered mount points and occupancy
//! - **Attachment coordinator** ([`coordinator`]): attach/detach protocol
//! - **Host seams** ([`host`]): instantiation and parenting, implemented by
//!   [`scenegraph::SceneGraph`]
//! - **Shared assembly** ([`shared`]): single-lock wrapper for multi-threaded callers
//!
//! All operations are synchronous and finish within the caller's frame.
//!
//! ## Usage
//!
//! ```
//! use scenegraph::{SceneGraph, Transform};
//! use socketwork_core::config::{AssemblyConfig, PartCatalog};
//! use socketwork_core::{AttachError, AttachmentCoordinator, SocketRegistry};
//!
//! let config = AssemblyConfig::from_json(r#"{ "sockets": [
//!     { "name": "left_flank", "side": "Left" },
//!     { "name": "dorsal", "side": "Any" }
//! ] }"#).unwrap();
//! let catalog = PartCatalog::from_json(r#"{ "parts": [
//!     { "name": "claw", "descriptor": { "category": "Claw", "required_side": "Left" } }
//! ] }"#).unwrap();
//!
//! let mut scene = SceneGraph::new();
//! let body = scene.spawn("body", Transform::IDENTITY);
//! let registry = SocketRegistry::from_config(&mut scene, body, &config).unwrap();
//! let mut coordinator = AttachmentCoordinator::new(registry);
//!
//! let claw = catalog.get("claw").unwrap();
//! assert_eq!(coordinator.attach(&mut scene, claw).unwrap().socket, 0);
//! assert_eq!(coordinator.attach(&mut scene, claw).unwrap().socket, 1);
//! assert!(matches!(
//!     coordinator.attach(&mut scene, claw),
//!     Err(AttachError::NoCompatibleSocket { .. })
//! ));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export scenegraph for host types
pub use scenegraph;

pub mod config;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod part;
pub mod shared;
pub mod socket;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use config::{AssemblyConfig, PartCatalog, SocketSpec};
pub use coordinator::{Attachment, AttachmentCoordinator, DetachSelector};
pub use error::{AttachError, ConfigError};
pub use host::{Host, Instantiator, Parenting};
pub use part::{MountSide, PartCategory, PartDescriptor, PartPrototype};
pub use shared::SharedAssembly;
pub use socket::{Socket, SocketRegistry};
