//! Rigid spherical body state.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::serde_utils;

/// One rigid sphere in the swarm.
///
/// Radius is fixed after initialization; position, velocity and angular
/// velocity evolve every step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(
        serialize_with = "serde_utils::serialize_vec3",
        deserialize_with = "serde_utils::deserialize_vec3"
    )]
    pub position: Vec3,
    pub radius: f32,
    #[serde(
        serialize_with = "serde_utils::serialize_vec3",
        deserialize_with = "serde_utils::deserialize_vec3"
    )]
    pub velocity: Vec3,
    #[serde(
        serialize_with = "serde_utils::serialize_vec3",
        deserialize_with = "serde_utils::deserialize_vec3"
    )]
    pub angular_velocity: Vec3,
}

impl Body {
    pub fn new(position: Vec3, radius: f32, velocity: Vec3) -> Self {
        Self {
            position,
            radius,
            velocity,
            angular_velocity: Vec3::ZERO,
        }
    }

    /// A stationary body, useful for constructing test scenarios.
    pub fn at(position: Vec3, radius: f32) -> Self {
        Self::new(position, radius, Vec3::ZERO)
    }

    /// The body's three state-buffer records: (position, radius), velocity,
    /// angular velocity.
    pub fn records(&self) -> [Vec4; 3] {
        [
            self.position.extend(self.radius),
            self.velocity.extend(0.0),
            self.angular_velocity.extend(0.0),
        ]
    }

    /// Rebuild a body from its three state-buffer records.
    pub fn from_records(records: [Vec4; 3]) -> Self {
        Self {
            position: records[0].truncate(),
            radius: records[0].w,
            velocity: records[1].truncate(),
            angular_velocity: records[2].truncate(),
        }
    }

    /// True when every component of the body state is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.radius.is_finite()
            && self.velocity.is_finite()
            && self.angular_velocity.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip() {
        let body = Body {
            position: Vec3::new(1.0, 2.0, 3.0),
            radius: 0.95,
            velocity: Vec3::new(-0.5, 0.25, 2.0),
            angular_velocity: Vec3::new(0.1, -0.2, 0.3),
        };
        let rebuilt = Body::from_records(body.records());
        assert_eq!(body, rebuilt);
    }

    #[test]
    fn test_records_pack_radius_with_position() {
        let body = Body::at(Vec3::new(4.0, 3.0, -1.0), 0.9);
        let records = body.records();
        assert_eq!(records[0], Vec4::new(4.0, 3.0, -1.0, 0.9));
        assert_eq!(records[1].w, 0.0);
        assert_eq!(records[2].w, 0.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let body = Body::new(Vec3::new(0.5, 3.0, -2.5), 0.92, Vec3::new(1.0, 0.0, -1.0));
        let json = serde_json::to_string(&body).unwrap();
        let back: Body = serde_json::from_str(&json).unwrap();
        assert_eq!(body, back);
    }

    #[test]
    fn test_is_finite_rejects_nan() {
        let mut body = Body::at(Vec3::ZERO, 1.0);
        assert!(body.is_finite());
        body.velocity.y = f32::NAN;
        assert!(!body.is_finite());
    }
}
