//! Deterministic initial placement of the swarm.
//!
//! Bodies start on a square lattice above the ground plane, with a seeded
//! pseudo-random launch direction and a small per-body radius variation.
//! Everything is a pure function of (seed, body id, time), so replaying a
//! run reproduces the exact same spawn.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::body::Body;
use crate::constants::{N_BODIES, SPAWN_HEIGHT, SPAWN_SPEED};

/// Create body `id`'s initial state.
///
/// Positions form a `ceil(sqrt(N_BODIES))`-wide lattice centered on the
/// origin in x/z at [`SPAWN_HEIGHT`]; velocity is a unit direction scaled to
/// [`SPAWN_SPEED`]; angular velocity starts at zero; radius is
/// `1 - 0.1 * u` with `u` in `[0, 1)`.
pub fn spawn_body(id: usize, time: f32, seed: u64) -> Body {
    let edge = (N_BODIES as f32).sqrt().ceil() as usize;
    let half = 0.5 * (edge as f32 - 1.0);
    let position = Vec3::new(
        (id % edge) as f32 - half,
        SPAWN_HEIGHT,
        (id / edge) as f32 - half,
    );

    let mut rng = ChaCha8Rng::seed_from_u64(body_seed(seed, id, time));
    let velocity = SPAWN_SPEED * random_unit_vector(&mut rng);
    let radius = 1.0 - 0.1 * rng.gen::<f32>();

    Body::new(position, radius, velocity)
}

/// Mix the global seed, body id and time value into one stream seed.
fn body_seed(seed: u64, id: usize, time: f32) -> u64 {
    seed ^ (id as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ ((time.to_bits() as u64) << 32)
}

/// Uniform direction by rejection sampling the unit ball.
fn random_unit_vector(rng: &mut ChaCha8Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-4 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_placement() {
        for id in 0..N_BODIES {
            let body = spawn_body(id, 0.0, 0);
            assert_eq!(body.position.y, SPAWN_HEIGHT);
            assert!(body.position.x >= -2.5 && body.position.x <= 2.5);
            assert!(body.position.z >= -2.5 && body.position.z <= 2.5);
        }
        // Corners of the 6x6 lattice.
        assert_eq!(spawn_body(0, 0.0, 0).position, Vec3::new(-2.5, 3.0, -2.5));
        assert_eq!(spawn_body(35, 0.0, 0).position, Vec3::new(2.5, 3.0, 2.5));
    }

    #[test]
    fn test_no_two_bodies_share_a_cell() {
        let positions: Vec<Vec3> = (0..N_BODIES).map(|id| spawn_body(id, 0.0, 0).position).collect();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                assert!((positions[i] - positions[j]).length() >= 1.0);
            }
        }
    }

    #[test]
    fn test_spawn_speed_and_spin() {
        for id in 0..N_BODIES {
            let body = spawn_body(id, 12.5, 7);
            assert!((body.velocity.length() - SPAWN_SPEED).abs() < 1e-4);
            assert_eq!(body.angular_velocity, Vec3::ZERO);
        }
    }

    #[test]
    fn test_radius_band() {
        for id in 0..N_BODIES {
            let radius = spawn_body(id, 3.0, 99).radius;
            assert!(radius > 0.9 && radius <= 1.0, "radius out of band: {}", radius);
        }
    }

    #[test]
    fn test_deterministic_per_seed_and_time() {
        for id in 0..N_BODIES {
            assert_eq!(spawn_body(id, 4.5, 11), spawn_body(id, 4.5, 11));
        }
        // Different time or seed must move the velocity stream.
        let a = spawn_body(3, 1.0, 11);
        let b = spawn_body(3, 2.0, 11);
        let c = spawn_body(3, 1.0, 12);
        assert_ne!(a.velocity, b.velocity);
        assert_ne!(a.velocity, c.velocity);
    }
}
