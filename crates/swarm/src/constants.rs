//! Tuned constants for the swarm simulation.
//!
//! All modules use these instead of defining their own copies. The contact
//! and force coefficients live in [`crate::physics::StepParams`] so tests can
//! switch individual forces off; everything here is structural.

use glam::Vec3;

/// Number of simulated bodies.
pub const N_BODIES: usize = 36;

/// Row width of the 2D grid the state buffer is mapped onto for persistence.
pub const ROW_WIDTH: usize = 128;

/// Frames 0..INIT_FRAMES re-establish starting state instead of stepping.
pub const INIT_FRAMES: u32 = 6;

/// Fixed physics timestep (seconds per frame).
pub const DT: f32 = 0.02;

/// Height above the ground plane bodies spawn at.
pub const SPAWN_HEIGHT: f32 = 3.0;

/// Initial speed given to every body.
pub const SPAWN_SPEED: f32 = 2.0;

/// Leader displacement per step is LEADER_STEP * LEADER_DIR.
pub const LEADER_STEP: f32 = 0.05;
pub const LEADER_DIR: Vec3 = Vec3::new(0.9, 0.0, 1.0);

/// Obstacle lattice defaults written on every init frame.
pub const DEFAULT_OBSTACLE_SPACING: f32 = 8.0;
pub const DEFAULT_OBSTACLE_RADIUS: f32 = 3.0;

/// Effective contact radius of the ground plane.
pub const GROUND_RADIUS: f32 = 1.0;

/// Hard lower bound for separation denominators. Coincident bodies divide by
/// this instead of zero.
pub const MIN_SEPARATION: f32 = 1e-3;

/// Hard lower bound for the tangential-speed denominator in the friction
/// term.
pub const MIN_TANGENT_SPEED: f32 = 1e-3;
