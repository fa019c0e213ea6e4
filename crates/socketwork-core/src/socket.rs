//! Socket registry: the fixed mount points of an assembly.
//!
//! Sockets are created once, when the assembly is set up, and keep their
//! authoring order for the life of the registry. That order is the only
//! tie-breaker between equally valid sockets (first-fit).
//!
//! Each socket owns a frame node in the scene graph; an attached part is
//! parented under that frame. The registry records the occupant handle but
//! never owns the instance: the host scene does. Only the
//! [`AttachmentCoordinator`](crate::AttachmentCoordinator) sets or clears
//! occupants.

use scenegraph::{NodeId, SceneError, SceneGraph, Transform};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AssemblyConfig;
use crate::part::MountSide;

/// A single mount point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socket {
    /// Rebuilt from position on deserialization.
    #[serde(default)]
    index: usize,
    name: String,
    side: MountSide,
    frame: NodeId,
    occupant: Option<NodeId>,
}

impl Socket {
    /// Position in authoring order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Authored socket name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Side affinity.
    #[must_use]
    pub const fn side(&self) -> MountSide {
        self.side
    }

    /// Scene node carrying the socket's pose.
    #[must_use]
    pub const fn frame(&self) -> NodeId {
        self.frame
    }

    /// Instance currently mounted here, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<NodeId> {
        self.occupant
    }

    /// Returns true if a part is mounted here.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Returns true if this socket is empty and accepts `side`.
    #[must_use]
    pub fn accepts(&self, side: MountSide) -> bool {
        self.occupant.is_none() && self.side.matches(side)
    }
}

/// Ordered collection of sockets for one assembly.
///
/// # Example
///
/// ```
/// use scenegraph::{SceneGraph, Transform};
/// use socketwork_core::config::AssemblyConfig;
/// use socketwork_core::part::MountSide;
/// use socketwork_core::socket::SocketRegistry;
///
/// let config = AssemblyConfig::from_json(r#"{
///     "sockets": [
///         { "name": "left_hip", "side": "Left" },
///         { "name": "spine", "side": "Any" }
///     ]
/// }"#).unwrap();
///
/// let mut scene = SceneGraph::new();
/// let body = scene.spawn("body", Transform::IDENTITY);
/// let registry = SocketRegistry::from_config(&mut scene, body, &config).unwrap();
///
/// assert_eq!(registry.find_free_matching(MountSide::Left).unwrap().name(), "left_hip");
/// assert_eq!(registry.find_free_matching(MountSide::Back).unwrap().name(), "spine");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SocketRegistryRepr")]
pub struct SocketRegistry {
    sockets: Vec<Socket>,
}

/// Serialized form; indices are renumbered from `Vec` position on load.
#[derive(Deserialize)]
struct SocketRegistryRepr {
    sockets: Vec<Socket>,
}

impl From<SocketRegistryRepr> for SocketRegistry {
    fn from(repr: SocketRegistryRepr) -> Self {
        let mut sockets = repr.sockets;
        for (index, socket) in sockets.iter_mut().enumerate() {
            socket.index = index;
        }
        Self { sockets }
    }
}

impl SocketRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sockets: Vec::new(),
        }
    }

    /// Builds a registry from authored configuration.
    ///
    /// One frame node per socket is spawned under `owner`, in config order,
    /// at the socket's authored local pose.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNode`] if `owner` is not in the scene.
    /// The scene is left untouched in that case.
    pub fn from_config(
        scene: &mut SceneGraph,
        owner: NodeId,
        config: &AssemblyConfig,
    ) -> Result<Self, SceneError> {
        if !scene.contains(owner) {
            return Err(SceneError::UnknownNode(owner));
        }

        let mut registry = Self::new();
        for spec in config.sockets() {
            let frame = scene.spawn_child(
                owner,
                spec.name.clone(),
                Transform::from_translation_rotation(spec.translation, spec.rotation),
            )?;
            registry.register(spec.name.clone(), spec.side, frame);
        }

        debug!(owner = %owner, sockets = registry.len(), "built socket registry");
        Ok(registry)
    }

    /// Appends a socket whose frame already exists in the host scene.
    ///
    /// Returns the new socket's index.
    pub fn register(&mut self, name: impl Into<String>, side: MountSide, frame: NodeId) -> usize {
        let index = self.sockets.len();
        self.sockets.push(Socket {
            index,
            name: name.into(),
            side,
            frame,
            occupant: None,
        });
        index
    }

    /// First socket, in authoring order, that is free and side-compatible.
    ///
    /// Never returns an occupied socket. Side-effect free.
    #[must_use]
    pub fn find_free_matching(&self, required_side: MountSide) -> Option<&Socket> {
        self.sockets.iter().find(|socket| socket.accepts(required_side))
    }

    /// All sockets whose side equals `side` exactly (no wildcard expansion).
    pub fn sockets_matching(&self, side: MountSide) -> impl Iterator<Item = &Socket> + '_ {
        self.sockets.iter().filter(move |socket| socket.side == side)
    }

    /// Returns the socket at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Socket> {
        self.sockets.get(index)
    }

    /// Returns the first socket with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Socket> {
        self.sockets.iter().find(|socket| socket.name == name)
    }

    /// Iterates sockets in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &Socket> + '_ {
        self.sockets.iter()
    }

    /// Number of sockets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sockets.len()
    }

    /// Returns true if there are no sockets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sockets.is_empty()
    }

    /// Number of sockets holding a part.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.sockets.iter().filter(|socket| socket.is_occupied()).count()
    }

    /// Snapshot of every socket's occupant, in authoring order.
    #[must_use]
    pub fn occupancy(&self) -> Vec<Option<NodeId>> {
        self.sockets.iter().map(Socket::occupant).collect()
    }

    /// Returns false (and changes nothing) if `index` is out of range or taken.
    pub(crate) fn set_occupant(&mut self, index: usize, instance: NodeId) -> bool {
        match self.sockets.get_mut(index) {
            Some(socket) if socket.occupant.is_none() => {
                socket.occupant = Some(instance);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn take_occupant(&mut self, index: usize) -> Option<NodeId> {
        self.sockets.get_mut(index).and_then(|socket| socket.occupant.take())
    }
}
