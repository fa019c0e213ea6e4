//! Thread-safe assembly: coordinator and host behind one lock.
//!
//! Attach is a check-then-act sequence (find a free socket, then claim it).
//! [`SharedAssembly`] takes a single mutex around the whole sequence, so two
//! threads can never claim the same socket.

use std::sync::{Mutex, MutexGuard, PoisonError};

use scenegraph::NodeId;

use crate::coordinator::{Attachment, AttachmentCoordinator, DetachSelector};
use crate::error::AttachError;
use crate::host::Host;
use crate::part::PartPrototype;

#[derive(Debug)]
struct Assembly<H> {
    coordinator: AttachmentCoordinator,
    host: H,
}

/// An [`AttachmentCoordinator`] and its host, safe to share across threads.
///
/// # Example
///
/// ```
/// use scenegraph::{SceneGraph, Transform};
/// use socketwork_core::config::{AssemblyConfig, SocketSpec};
/// use socketwork_core::part::{MountSide, PartCategory, PartDescriptor, PartPrototype};
/// use socketwork_core::{AttachmentCoordinator, SharedAssembly, SocketRegistry};
///
/// let mut scene = SceneGraph::new();
/// let body = scene.spawn("body", Transform::IDENTITY);
/// let config = AssemblyConfig::new(vec![SocketSpec::new("back", MountSide::Back)]).unwrap();
/// let registry = SocketRegistry::from_config(&mut scene, body, &config).unwrap();
/// let shared = SharedAssembly::new(AttachmentCoordinator::new(registry), scene);
///
/// let fin = PartPrototype::new("fin", PartDescriptor::new(PartCategory::Fin, MountSide::Back));
/// std::thread::scope(|s| {
///     s.spawn(|| shared.attach(&fin));
///     s.spawn(|| shared.attach(&fin));
/// });
///
/// // Exactly one of the two threads won the only socket.
/// assert_eq!(shared.occupancy().iter().flatten().count(), 1);
/// ```
#[derive(Debug)]
pub struct SharedAssembly<H> {
    inner: Mutex<Assembly<H>>,
}

impl<H: Host> SharedAssembly<H> {
    /// Wraps a coordinator and the host it drives.
    #[must_use]
    pub fn new(coordinator: AttachmentCoordinator, host: H) -> Self {
        Self {
            inner: Mutex::new(Assembly { coordinator, host }),
        }
    }

    /// A panic mid-operation cannot leave a half-claimed socket (every
    /// mutation is a single registry write), so a poisoned lock is reused.
    fn lock(&self) -> MutexGuard<'_, Assembly<H>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`AttachmentCoordinator::attach`].
    ///
    /// # Errors
    ///
    /// Same as [`AttachmentCoordinator::attach`].
    pub fn attach(&self, prototype: &PartPrototype) -> Result<Attachment, AttachError> {
        let mut guard = self.lock();
        let Assembly { coordinator, host } = &mut *guard;
        coordinator.attach(host, prototype)
    }

    /// See [`AttachmentCoordinator::attach_at`].
    ///
    /// # Errors
    ///
    /// Same as [`AttachmentCoordinator::attach_at`].
    pub fn attach_at(
        &self,
        prototype: &PartPrototype,
        index: usize,
    ) -> Result<Attachment, AttachError> {
        let mut guard = self.lock();
        let Assembly { coordinator, host } = &mut *guard;
        coordinator.attach_at(host, prototype, index)
    }

    /// See [`AttachmentCoordinator::detach`].
    ///
    /// # Errors
    ///
    /// Same as [`AttachmentCoordinator::detach`].
    pub fn detach(&self, selector: impl Into<DetachSelector>) -> Result<usize, AttachError> {
        let mut guard = self.lock();
        let Assembly { coordinator, host } = &mut *guard;
        coordinator.detach(host, selector)
    }

    /// Snapshot of socket occupancy, in authoring order.
    #[must_use]
    pub fn occupancy(&self) -> Vec<Option<NodeId>> {
        self.lock().coordinator.registry().occupancy()
    }

    /// Runs `f` with read access to the host while holding the lock.
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.lock().host)
    }

    /// Unwraps the coordinator and host.
    #[must_use]
    pub fn into_inner(self) -> (AttachmentCoordinator, H) {
        let Assembly { coordinator, host } =
            self.inner.into_inner().unwrap_or_else(PoisonError::into_inner);
        (coordinator, host)
    }
}
