// Determinism and finiteness tests
// Replays must be bit-identical, and no committed record may ever go
// non-finite, including under pathological starts.

use glam::Vec3;
use swarm::constants::N_BODIES;
use swarm::{step_body, Body, ObstacleField, StepParams, SwarmSimulation};

fn run(seed: u64, frames: u32) -> SwarmSimulation {
    let mut sim = SwarmSimulation::with_seed(seed);
    for _ in 0..frames {
        let time = sim.frame() as f32 / 60.0;
        sim.update(time);
    }
    sim
}

#[test]
fn test_replay_is_bit_identical() {
    let a = run(42, 300);
    let b = run(42, 300);

    for (index, (ra, rb)) in a.store().records().iter().zip(b.store().records()).enumerate() {
        assert_eq!(
            ra.to_array(),
            rb.to_array(),
            "record {} diverged between identical runs",
            index
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    let a = run(1, 60);
    let b = run(2, 60);
    let same = a
        .store()
        .records()
        .iter()
        .zip(b.store().records())
        .all(|(ra, rb)| ra == rb);
    assert!(!same, "different seeds produced identical state");
}

#[test]
fn test_long_run_stays_finite() {
    let mut sim = SwarmSimulation::new();
    for frame in 0..1500u32 {
        sim.update(frame as f32 / 60.0);
        if frame % 100 == 0 {
            assert_finite(&sim, frame);
        }
    }
    assert_finite(&sim, 1500);
}

fn assert_finite(sim: &SwarmSimulation, frame: u32) {
    for (index, record) in sim.store().records().iter().enumerate() {
        assert!(
            record.is_finite(),
            "frame {}: record {} is non-finite: {:?}",
            frame,
            index,
            record
        );
    }
}

/// Pathological case: the whole population starts at one point. The clamped
/// denominators must keep every step finite.
#[test]
fn test_coincident_population_stays_finite() {
    let params = StepParams::default();
    let field = ObstacleField::new(8.0, 3.0);
    let mut snapshot: Vec<Body> =
        (0..N_BODIES).map(|_| Body::at(Vec3::new(0.3, 2.0, 0.3), 0.95)).collect();

    for step in 0..100 {
        snapshot = (0..snapshot.len())
            .map(|id| step_body(id, &snapshot, Vec3::ZERO, &field, &params))
            .collect();
        for (id, body) in snapshot.iter().enumerate() {
            assert!(
                body.is_finite(),
                "step {}: body {} went non-finite: {:?}",
                step,
                id,
                body
            );
        }
    }
}

/// Motionless stacked contact: zero velocities everywhere exercise the
/// tangential-speed clamp.
#[test]
fn test_motionless_contact_stays_finite() {
    let params = StepParams::default();
    let field = ObstacleField::new(8.0, 3.0);
    let snapshot = vec![
        Body::at(Vec3::new(0.0, 0.45, 0.0), 0.9),
        Body::at(Vec3::new(0.0, 1.2, 0.0), 0.9),
    ];
    for id in 0..snapshot.len() {
        let next = step_body(id, &snapshot, Vec3::ZERO, &field, &params);
        assert!(next.is_finite(), "body {} non-finite from rest: {:?}", id, next);
    }
}
