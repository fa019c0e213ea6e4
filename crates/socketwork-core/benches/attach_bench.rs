use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use scenegraph::{SceneGraph, Transform};
use socketwork_core::config::{AssemblyConfig, SocketSpec};
use socketwork_core::part::{MountSide, PartCategory, PartDescriptor, PartPrototype};
use socketwork_core::{AttachmentCoordinator, DetachSelector, SocketRegistry};

fn build(sockets: usize) -> (SceneGraph, AttachmentCoordinator) {
    let sides = [MountSide::Left, MountSide::Right, MountSide::Front, MountSide::Back];
    let specs = (0..sockets)
        .map(|i| SocketSpec::new(format!("s{i}"), sides[i % sides.len()]).at(Vec3::new(i as f32, 0.0, 0.0)))
        .collect();
    let config = AssemblyConfig::new(specs).expect("valid config");

    let mut scene = SceneGraph::new();
    let body = scene.spawn("body", Transform::IDENTITY);
    let registry = SocketRegistry::from_config(&mut scene, body, &config).expect("live owner");
    (scene, AttachmentCoordinator::new(registry))
}

fn bench_attach_detach_cycle(c: &mut Criterion) {
    // Small assembly, typical of a creature body
    let (mut scene, mut coordinator) = build(8);
    let part = PartPrototype::new("claw", PartDescriptor::new(PartCategory::Claw, MountSide::Back));

    c.bench_function("attach_detach_cycle", |b| {
        b.iter(|| {
            let attachment = coordinator.attach(&mut scene, black_box(&part)).expect("free socket");
            coordinator
                .detach(&mut scene, DetachSelector::Index(attachment.socket))
                .expect("valid index");
        })
    });
}

fn bench_first_fit_scan_large(c: &mut Criterion) {
    // Fill all but the last socket (a Back socket) so the scan walks the whole registry
    let (mut scene, mut coordinator) = build(256);
    let filler = PartPrototype::new("filler", PartDescriptor::new(PartCategory::Spike, MountSide::Any));
    for _ in 0..255 {
        coordinator.attach(&mut scene, &filler).expect("free socket");
    }

    c.bench_function("first_fit_scan_large", |b| {
        b.iter(|| black_box(coordinator.registry().find_free_matching(black_box(MountSide::Back))))
    });
}

criterion_group!(benches, bench_attach_detach_cycle, bench_first_fit_scan_large);
criterion_main!(benches);
