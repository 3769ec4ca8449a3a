//! Per-frame summaries of the body population.
//!
//! Read-only views used by tests and the headless examples; nothing here
//! feeds back into the simulation.

use glam::Vec3;

use crate::body::Body;

/// Aggregate statistics over one frame's bodies (unit mass per body).
#[derive(Clone, Copy, Debug)]
pub struct FrameSummary {
    /// Sum of linear velocities.
    pub momentum: Vec3,
    /// 0.5 * sum of squared speeds.
    pub kinetic_energy: f32,
    pub max_speed: f32,
    pub max_spin: f32,
    pub centroid: Vec3,
    /// False if any component of any body is NaN or infinite.
    pub all_finite: bool,
}

pub fn summarize(bodies: &[Body]) -> FrameSummary {
    let mut momentum = Vec3::ZERO;
    let mut kinetic_energy = 0.0;
    let mut max_speed = 0.0f32;
    let mut max_spin = 0.0f32;
    let mut centroid = Vec3::ZERO;
    let mut all_finite = true;

    for body in bodies {
        momentum += body.velocity;
        kinetic_energy += 0.5 * body.velocity.length_squared();
        max_speed = max_speed.max(body.velocity.length());
        max_spin = max_spin.max(body.angular_velocity.length());
        centroid += body.position;
        all_finite &= body.is_finite();
    }
    if !bodies.is_empty() {
        centroid /= bodies.len() as f32;
    }

    FrameSummary {
        momentum,
        kinetic_energy,
        max_speed,
        max_spin,
        centroid,
        all_finite,
    }
}
