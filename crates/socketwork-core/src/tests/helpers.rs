//! Test helpers: assembly builders, a recording host, pin assertions.

use glam::{Quat, Vec3};
use scenegraph::{NodeId, SceneError, SceneGraph, Transform};

use crate::config::{AssemblyConfig, SocketSpec};
use crate::coordinator::AttachmentCoordinator;
use crate::host::{Instantiator, Parenting};
use crate::part::{MountSide, PartCategory, PartDescriptor, PartPrototype};
use crate::socket::SocketRegistry;

const EPS: f32 = 1e-4;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A claw prototype that mounts on `side`.
pub fn claw(side: MountSide) -> PartPrototype {
    PartPrototype::new(
        format!("claw_{side}"),
        PartDescriptor::new(PartCategory::Claw, side),
    )
}

/// A prototype with an authored offset that mounting must discard.
pub fn offset_fin(side: MountSide) -> PartPrototype {
    PartPrototype::new("fin", PartDescriptor::new(PartCategory::Fin, side)).with_local(
        Transform::from_translation_rotation(Vec3::new(3.0, -2.0, 7.0), Quat::from_rotation_x(1.1)),
    )
}

/// Builds a body with one socket per side, each at a distinct pose.
///
/// The body itself sits away from the origin and is rotated, so pinning
/// errors show up in world space.
pub fn build_assembly(sides: &[MountSide]) -> (SceneGraph, NodeId, AttachmentCoordinator) {
    let mut scene = SceneGraph::new();
    let body = scene.spawn(
        "body",
        Transform::from_translation_rotation(Vec3::new(10.0, 0.0, -4.0), Quat::from_rotation_y(0.4)),
    );

    let specs = sides
        .iter()
        .enumerate()
        .map(|(i, side)| {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f32;
            let mut spec = SocketSpec::new(format!("socket_{i}"), *side)
                .at(Vec3::new(offset, 0.5, -offset));
            spec.rotation = Quat::from_rotation_z(0.2 * offset);
            spec
        })
        .collect();
    let config = AssemblyConfig::new(specs).unwrap();
    let registry = SocketRegistry::from_config(&mut scene, body, &config).unwrap();

    (scene, body, AttachmentCoordinator::new(registry))
}

/// Same as [`build_assembly`] but wrapped in a [`RecordingHost`].
pub fn build_recording_assembly(sides: &[MountSide]) -> (RecordingHost, AttachmentCoordinator) {
    let (scene, _body, coordinator) = build_assembly(sides);
    (RecordingHost::new(scene), coordinator)
}

/// Host that counts collaborator calls and can be told to fail parenting.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub scene: SceneGraph,
    pub instantiated: usize,
    pub destroyed: usize,
    pub fail_reparent: bool,
}

impl RecordingHost {
    pub fn new(scene: SceneGraph) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }
}

impl Instantiator for RecordingHost {
    fn instantiate(&mut self, prototype: &PartPrototype, world: Transform) -> NodeId {
        self.instantiated += 1;
        self.scene.instantiate(prototype, world)
    }

    fn destroy(&mut self, instance: NodeId) -> bool {
        self.destroyed += 1;
        self.scene.destroy(instance)
    }
}

impl Parenting for RecordingHost {
    fn world_transform(&self, node: NodeId) -> Option<Transform> {
        self.scene.world_transform(node)
    }

    fn reparent(&mut self, child: NodeId, parent: NodeId) -> Result<(), SceneError> {
        if self.fail_reparent {
            return Err(SceneError::UnknownNode(parent));
        }
        self.scene.reparent(child, parent)
    }

    fn set_local(&mut self, node: NodeId, local: Transform) -> Result<(), SceneError> {
        self.scene.set_local(node, local)
    }
}

/// Asserts every occupant is live, parented to its frame, and sits exactly on it.
pub fn assert_pinned(scene: &SceneGraph, coordinator: &AttachmentCoordinator) {
    for socket in coordinator.registry().iter() {
        let Some(occupant) = socket.occupant() else {
            continue;
        };
        assert!(scene.contains(occupant), "socket {} occupant is dead", socket.index());
        assert_eq!(scene.parent(occupant), Some(socket.frame()));
        assert!(
            scene.local(occupant).unwrap().approx_eq(&Transform::IDENTITY, EPS),
            "socket {} occupant has non-zero local offset",
            socket.index()
        );
        let frame_world = scene.world_transform(socket.frame()).unwrap();
        let part_world = scene.world_transform(occupant).unwrap();
        assert!(part_world.approx_eq(&frame_world, EPS));
    }
}

/// Number of live part instances (nodes that are neither the body nor a socket frame).
pub fn live_parts(scene: &SceneGraph, coordinator: &AttachmentCoordinator) -> usize {
    let frames = coordinator.registry().len();
    scene.len() - frames - 1
}
