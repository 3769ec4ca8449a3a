//! Analytic periodic obstacle lattice.
//!
//! The field is an infinite square lattice of pillars, pitch `spacing`,
//! radius `radius`. No pillar is ever stored; a body's offset from the
//! nearest pillar axis comes from wrapping its x/z into the fundamental
//! cell.

use glam::Vec3;

use crate::constants::MIN_SEPARATION;

#[derive(Clone, Copy, Debug)]
pub struct ObstacleField {
    pub spacing: f32,
    pub radius: f32,
}

impl ObstacleField {
    pub fn new(spacing: f32, radius: f32) -> Self {
        Self { spacing, radius }
    }

    /// Offset from the nearest lattice point to `position`.
    ///
    /// x and z wrap into `[-spacing/2, spacing/2)`; y passes through, so the
    /// contact test sees the full 3-D offset from the pillar cap seated at
    /// the lattice point.
    pub fn contact_offset(&self, position: Vec3) -> Vec3 {
        let spacing = self.spacing.max(MIN_SEPARATION);
        let wrap = |p: f32| p - spacing * ((p + 0.5 * spacing) / spacing).floor();
        Vec3::new(wrap(position.x), position.y, wrap(position.z))
    }
}
