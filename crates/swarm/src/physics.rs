//! Contact, friction and integration for one body step.
//!
//! Every contact (body-body, ground, obstacle) runs the same spring-damper
//! model: a stiff radial repulsion proportional to relative overlap, damped
//! by the normal approach rate, plus capped Coulomb friction on the
//! tangential surface velocity. Friction feeds equal-and-opposite terms into
//! linear and angular acceleration, so contacts spin bodies up as they slide.
//!
//! A step reads only the previous frame's snapshot; the order bodies are
//! stepped in cannot affect results.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::constants::{DT, GROUND_RADIUS, MIN_SEPARATION, MIN_TANGENT_SPEED};
use crate::obstacle::ObstacleField;

/// Force coefficients for the step.
///
/// Defaults are the empirically tuned values of the original swarm; they are
/// not derived from material properties. Tests switch individual terms off
/// by zeroing fields.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepParams {
    /// Radial spring stiffness for overlapping contacts.
    pub contact_stiffness: f32,
    /// Damping of the repulsion by the normal approach rate.
    pub normal_damping: f32,
    /// Coulomb friction coefficient between bodies.
    pub body_friction: f32,
    /// Coulomb friction coefficient against ground and obstacles (stickier).
    pub wall_friction: f32,
    /// Hard cap on the tangential friction force, either contact type.
    pub friction_cap: f32,
    /// Long-range cohesion between all pairs, and pull toward the leader.
    pub attraction: f32,
    /// Linear velocity damping per unit time.
    pub linear_damping: f32,
    /// Gravity magnitude, applied along -y.
    pub gravity: f32,
    /// Fixed integration timestep.
    pub dt: f32,
    /// Moment-of-inertia factor: angular acceleration divides by
    /// `spin_inertia * radius`.
    pub spin_inertia: f32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            contact_stiffness: 1000.0,
            normal_damping: 2.0,
            body_friction: 0.05,
            wall_friction: 10.0,
            friction_cap: 0.5,
            attraction: 0.05,
            linear_damping: 0.01,
            gravity: 5.0,
            dt: DT,
            spin_inertia: 0.1,
        }
    }
}

/// Accumulated accelerations from one contact.
///
/// `offset` points from the contact partner toward the body, `separation` is
/// its length, `contact_radius` the overlap threshold that was already
/// crossed. `relative_velocity` is body velocity minus partner velocity;
/// `surface_spin` is the radius-weighted combined angular velocity whose
/// cross product with `offset` gives the extra surface slip.
fn contact(
    params: &StepParams,
    offset: Vec3,
    separation: f32,
    contact_radius: f32,
    mut relative_velocity: Vec3,
    surface_spin: Vec3,
    friction: f32,
) -> (Vec3, Vec3) {
    let separation = separation.max(MIN_SEPARATION);
    let approach_rate = offset.dot(relative_velocity) / (separation * separation);
    let repulsion = (params.contact_stiffness * (contact_radius / separation - 1.0)
        - params.normal_damping * approach_rate)
        .max(0.0);
    let mut linear = repulsion * offset;

    // Tangential slip: strip the normal component, add surface motion from
    // the combined spin.
    relative_velocity -= approach_rate * offset + surface_spin.cross(offset);
    let traction = params
        .friction_cap
        .min(friction * repulsion * separation / relative_velocity.length().max(MIN_TANGENT_SPEED));
    linear -= traction * relative_velocity;
    let angular = (traction / separation) * offset.cross(relative_velocity);

    (linear, angular)
}

/// Advance body `id` one step from a read-only previous-frame snapshot.
///
/// `leader` is the already-advanced leader position for this frame.
pub fn step_body(
    id: usize,
    snapshot: &[Body],
    leader: Vec3,
    field: &ObstacleField,
    params: &StepParams,
) -> Body {
    let body = snapshot[id];
    let mut accel = Vec3::ZERO;
    let mut spin_accel = Vec3::ZERO;

    // Pairwise pass: stiff repulsion + friction when overlapping, weak
    // cohesion toward every other body regardless of distance.
    for (n, other) in snapshot.iter().enumerate() {
        let offset = body.position - other.position;
        let separation = offset.length();
        let contact_radius = 0.5 * (body.radius + other.radius);
        if n != id && separation < contact_radius {
            let relative_velocity = body.velocity - other.velocity;
            let surface_spin = (body.radius * body.angular_velocity
                + other.radius * other.angular_velocity)
                / (body.radius + other.radius).max(MIN_SEPARATION);
            let (linear, angular) = contact(
                params,
                offset,
                separation,
                contact_radius,
                relative_velocity,
                surface_spin,
                params.body_friction,
            );
            accel += linear;
            spin_accel += angular;
        }
        accel += params.attraction * (other.position - body.position);
    }

    // Ground plane at y = 0, with the stickier wall friction.
    let contact_radius = 0.5 * (body.radius + GROUND_RADIUS);
    let offset = Vec3::new(0.0, body.position.y, 0.0);
    let separation = body.position.y.abs();
    if separation < contact_radius {
        let (linear, angular) = contact(
            params,
            offset,
            separation,
            contact_radius,
            body.velocity,
            body.angular_velocity,
            params.wall_friction,
        );
        accel += linear;
        spin_accel += angular;
    }

    // Nearest obstacle pillar, via the periodic wrap.
    let contact_radius = 0.5 * (body.radius + field.radius);
    let offset = field.contact_offset(body.position);
    let separation = offset.length();
    if separation < contact_radius {
        let (linear, angular) = contact(
            params,
            offset,
            separation,
            contact_radius,
            body.velocity,
            body.angular_velocity,
            params.wall_friction,
        );
        accel += linear;
        spin_accel += angular;
    }

    // Leader pull, gravity, drag.
    accel += params.attraction * (leader - body.position);
    accel.y -= params.gravity;
    accel -= params.linear_damping * body.velocity;

    // Semi-implicit Euler.
    let mut next = body;
    next.velocity += params.dt * accel;
    next.position += params.dt * next.velocity;
    next.angular_velocity +=
        params.dt * spin_accel / (params.spin_inertia * body.radius).max(MIN_SEPARATION);
    next
}
