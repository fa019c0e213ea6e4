//! Determinism verification tests.
//!
//! Two assemblies built the same way and fed the same seeded operation
//! stream must end with identical occupancy and identical instance handles.
//! Replays and networked sync depend on this.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scenegraph::{NodeId, SceneGraph};

use crate::coordinator::AttachmentCoordinator;
use crate::part::MountSide;

use super::helpers::{build_assembly, claw};

const SIDES: [MountSide; 6] = [
    MountSide::Left,
    MountSide::Right,
    MountSide::Front,
    MountSide::Back,
    MountSide::Any,
    MountSide::Left,
];

/// Applies `steps` random operations drawn from `seed`, returning a log of outcomes.
fn replay(
    scene: &mut SceneGraph,
    coordinator: &mut AttachmentCoordinator,
    seed: u64,
    steps: usize,
) -> Vec<Result<Option<NodeId>, String>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut log = Vec::with_capacity(steps);

    for _ in 0..steps {
        let side = MountSide::ALL[rng.gen_range(0..MountSide::ALL.len())];
        let outcome = match rng.gen_range(0..4) {
            0 | 1 => coordinator
                .attach(scene, &claw(side))
                .map(|a| Some(a.instance))
                .map_err(|e| e.to_string()),
            2 => coordinator
                .attach_at(scene, &claw(side), rng.gen_range(0..SIDES.len() + 1))
                .map(|a| Some(a.instance))
                .map_err(|e| e.to_string()),
            _ => coordinator
                .detach(scene, side)
                .map(|_| None)
                .map_err(|e| e.to_string()),
        };
        log.push(outcome);
    }
    log
}

#[test]
fn same_seed_same_outcome() {
    let (mut scene1, _, mut coordinator1) = build_assembly(&SIDES);
    let (mut scene2, _, mut coordinator2) = build_assembly(&SIDES);

    let log1 = replay(&mut scene1, &mut coordinator1, 42, 500);
    let log2 = replay(&mut scene2, &mut coordinator2, 42, 500);

    assert_eq!(log1, log2);
    assert_eq!(coordinator1.registry(), coordinator2.registry());
    assert_eq!(
        scene1.node_ids_sorted().collect::<Vec<_>>(),
        scene2.node_ids_sorted().collect::<Vec<_>>()
    );
}

#[test]
fn different_seeds_diverge() {
    let (mut scene1, _, mut coordinator1) = build_assembly(&SIDES);
    let (mut scene2, _, mut coordinator2) = build_assembly(&SIDES);

    let log1 = replay(&mut scene1, &mut coordinator1, 1, 200);
    let log2 = replay(&mut scene2, &mut coordinator2, 2, 200);

    assert_ne!(log1, log2);
}

#[test]
fn registry_serialization_roundtrip_preserves_state() {
    let (mut scene, _, mut coordinator) = build_assembly(&SIDES);
    replay(&mut scene, &mut coordinator, 7, 100);

    let json = serde_json::to_string(&coordinator).unwrap();
    let restored: AttachmentCoordinator = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, coordinator);
    assert_eq!(restored.registry().occupancy(), coordinator.registry().occupancy());
}
