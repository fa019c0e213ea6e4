//! Attachment coordinator: the attach/detach protocol.
//!
//! The coordinator owns a [`SocketRegistry`] and drives a [`Host`] to
//! instantiate, pin and destroy parts. It enforces the socket invariants:
//!
//! - A socket holds at most one occupant. Index-based attach to an occupied
//!   socket replaces the occupant; it never stacks.
//! - An attached part sits exactly on its socket's frame (zero local offset,
//!   identity local rotation) until detached.
//! - Detach clears the occupant reference before the instance is destroyed.
//! - A failing call leaves the registry and the host as they were.
//!
//! # Example
//!
//! ```
//! use scenegraph::{SceneGraph, Transform};
//! use socketwork_core::config::{AssemblyConfig, SocketSpec};
//! use socketwork_core::part::{MountSide, PartCategory, PartDescriptor, PartPrototype};
//! use socketwork_core::{AttachmentCoordinator, DetachSelector, SocketRegistry};
//!
//! let mut scene = SceneGraph::new();
//! let body = scene.spawn("body", Transform::IDENTITY);
//! let config = AssemblyConfig::new(vec![
//!     SocketSpec::new("left_hip", MountSide::Left),
//!     SocketSpec::new("right_hip", MountSide::Right),
//! ]).unwrap();
//! let registry = SocketRegistry::from_config(&mut scene, body, &config).unwrap();
//! let mut coordinator = AttachmentCoordinator::new(registry);
//!
//! let claw = PartPrototype::new("claw", PartDescriptor::new(PartCategory::Claw, MountSide::Right));
//! let attachment = coordinator.attach(&mut scene, &claw).unwrap();
//! assert_eq!(attachment.socket, 1);
//!
//! let removed = coordinator.detach(&mut scene, DetachSelector::Side(MountSide::Right)).unwrap();
//! assert_eq!(removed, 1);
//! assert!(!scene.contains(attachment.instance));
//! ```

use scenegraph::{NodeId, SceneError, Transform};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AttachError;
use crate::host::Host;
use crate::part::{MountSide, PartPrototype};
use crate::socket::{Socket, SocketRegistry};

/// Result of a successful attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    /// Index of the socket that now holds the part.
    pub socket: usize,
    /// Handle of the new instance.
    pub instance: NodeId,
}

/// Which sockets a detach applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetachSelector {
    /// A single socket by index.
    Index(usize),
    /// Every socket whose side equals this one exactly (no wildcard expansion).
    Side(MountSide),
}

impl From<usize> for DetachSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<MountSide> for DetachSelector {
    fn from(side: MountSide) -> Self {
        Self::Side(side)
    }
}

/// Matches parts to sockets and manages their lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentCoordinator {
    registry: SocketRegistry,
}

impl AttachmentCoordinator {
    /// Wraps a registry. Existing occupants are kept as-is.
    #[must_use]
    pub fn new(registry: SocketRegistry) -> Self {
        Self { registry }
    }

    /// Read access to the registry.
    #[must_use]
    pub fn registry(&self) -> &SocketRegistry {
        &self.registry
    }

    /// Consumes the coordinator, returning its registry.
    #[must_use]
    pub fn into_registry(self) -> SocketRegistry {
        self.registry
    }

    /// Occupant of the socket at `index`, if any.
    #[must_use]
    pub fn occupant(&self, index: usize) -> Option<NodeId> {
        self.registry.get(index).and_then(Socket::occupant)
    }

    // ========================================================================
    // Attach
    // ========================================================================

    /// Mounts a new instance of `prototype` on the first free compatible socket.
    ///
    /// # Errors
    ///
    /// - [`AttachError::MissingDescriptor`] if the prototype has no descriptor.
    /// - [`AttachError::NoCompatibleSocket`] if every compatible socket is
    ///   taken. Occupied sockets are never evicted.
    /// - [`AttachError::Scene`] if the host rejects a step; the fresh instance
    ///   is destroyed before returning.
    pub fn attach<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        prototype: &PartPrototype,
    ) -> Result<Attachment, AttachError> {
        let Some(descriptor) = prototype.descriptor() else {
            warn!(prototype = prototype.name(), "attach aborted: prototype has no descriptor");
            return Err(AttachError::MissingDescriptor {
                prototype: prototype.name().to_owned(),
            });
        };

        let side = descriptor.required_side();
        let Some(socket) = self.registry.find_free_matching(side) else {
            debug!(prototype = prototype.name(), %side, "no free compatible socket");
            return Err(AttachError::NoCompatibleSocket { side });
        };

        let index = socket.index();
        let frame = socket.frame();
        let frame_world = host
            .world_transform(frame)
            .ok_or(SceneError::UnknownNode(frame))?;
        let instance = Self::spawn_pinned(host, prototype, index, frame, frame_world)?;
        self.claim(host, index, instance)?;
        debug!(prototype = prototype.name(), socket = index, instance = %instance, "attached part");

        Ok(Attachment {
            socket: index,
            instance,
        })
    }

    /// Mounts a new instance of `prototype` on the socket at `index`.
    ///
    /// Any current occupant is replaced, but only once the new instance is
    /// pinned; if mounting fails the previous occupant stays. A prototype
    /// without a descriptor may be placed explicitly; one with a descriptor
    /// must be side-compatible with the socket.
    ///
    /// # Errors
    ///
    /// - [`AttachError::InvalidSocketIndex`] if `index` is out of range.
    /// - [`AttachError::IncompatibleSide`] if the descriptor's side does not
    ///   match the socket.
    /// - [`AttachError::Scene`] if the host rejects a step. The fresh
    ///   instance is destroyed and the previous occupant is left in place.
    pub fn attach_at<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        prototype: &PartPrototype,
        index: usize,
    ) -> Result<Attachment, AttachError> {
        let socket = self.socket_checked(index)?;

        if let Some(descriptor) = prototype.descriptor() {
            let required = descriptor.required_side();
            if !required.matches(socket.side()) {
                debug!(prototype = prototype.name(), index, socket = %socket.side(), %required, "side mismatch");
                return Err(AttachError::IncompatibleSide {
                    index,
                    socket: socket.side(),
                    required,
                });
            }
        }

        let frame = socket.frame();
        let frame_world = host
            .world_transform(frame)
            .ok_or(SceneError::UnknownNode(frame))?;

        let instance = Self::spawn_pinned(host, prototype, index, frame, frame_world)?;
        if self.clear_socket(host, index) {
            debug!(socket = index, "replaced previous occupant");
        }
        self.claim(host, index, instance)?;
        debug!(prototype = prototype.name(), socket = index, instance = %instance, "attached part");

        Ok(Attachment {
            socket: index,
            instance,
        })
    }

    /// Instantiates at the frame, parents under it and pins to zero offset.
    ///
    /// The registry is not touched; on failure the instance is destroyed.
    fn spawn_pinned<H: Host + ?Sized>(
        host: &mut H,
        prototype: &PartPrototype,
        index: usize,
        frame: NodeId,
        frame_world: Transform,
    ) -> Result<NodeId, AttachError> {
        let instance = host.instantiate(prototype, frame_world);

        let pinned = host
            .reparent(instance, frame)
            .and_then(|()| host.set_local(instance, Transform::IDENTITY));
        if let Err(err) = pinned {
            host.destroy(instance);
            warn!(prototype = prototype.name(), socket = index, error = %err, "mount failed, instance rolled back");
            return Err(err.into());
        }
        Ok(instance)
    }

    /// Records a pinned instance as the occupant of an empty socket.
    ///
    /// If the registry refuses, the instance is destroyed so nothing leaks.
    fn claim<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
        instance: NodeId,
    ) -> Result<(), AttachError> {
        if self.registry.set_occupant(index, instance) {
            return Ok(());
        }
        host.destroy(instance);
        let len = self.registry.len();
        warn!(socket = index, instance = %instance, "socket refused occupant, instance rolled back");
        Err(AttachError::InvalidSocketIndex { index, len })
    }

    // ========================================================================
    // Detach
    // ========================================================================

    /// Clears and destroys the occupants selected by `selector`.
    ///
    /// Returns the number of occupants cleared. An occupant whose instance
    /// was already destroyed outside the coordinator still counts, since its
    /// socket is freed. Empty sockets are skipped,
    /// and a side with no occupied sockets is a successful no-op.
    ///
    /// # Errors
    ///
    /// [`AttachError::InvalidSocketIndex`] for an out-of-range index.
    pub fn detach<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        selector: impl Into<DetachSelector>,
    ) -> Result<usize, AttachError> {
        match selector.into() {
            DetachSelector::Index(index) => {
                self.socket_checked(index)?;
                Ok(usize::from(self.clear_socket(host, index)))
            }
            DetachSelector::Side(side) => {
                let targets: Vec<usize> = self
                    .registry
                    .sockets_matching(side)
                    .filter(|socket| socket.is_occupied())
                    .map(Socket::index)
                    .collect();
                let mut removed = 0;
                for index in targets {
                    if self.clear_socket(host, index) {
                        removed += 1;
                    }
                }
                debug!(%side, removed, "detached by side");
                Ok(removed)
            }
        }
    }

    /// Clears every socket. Returns how many occupants were cleared.
    pub fn detach_all<H: Host + ?Sized>(&mut self, host: &mut H) -> usize {
        let mut removed = 0;
        for index in 0..self.registry.len() {
            if self.clear_socket(host, index) {
                removed += 1;
            }
        }
        removed
    }

    /// Clears the occupant reference, then destroys the instance.
    fn clear_socket<H: Host + ?Sized>(&mut self, host: &mut H, index: usize) -> bool {
        let Some(instance) = self.registry.take_occupant(index) else {
            return false;
        };
        if !host.destroy(instance) {
            warn!(socket = index, instance = %instance, "occupant was already destroyed");
        }
        debug!(socket = index, instance = %instance, "detached part");
        true
    }

    fn socket_checked(&self, index: usize) -> Result<&Socket, AttachError> {
        self.registry.get(index).ok_or_else(|| {
            let len = self.registry.len();
            warn!(index, len, "socket index out of range");
            AttachError::InvalidSocketIndex { index, len }
        })
    }
}
