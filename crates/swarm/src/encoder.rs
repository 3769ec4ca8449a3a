//! Per-address output selection.
//!
//! A frame computes one [`FrameOutput`]; each output address commits exactly
//! one record from it. Addresses outside the defined table select nothing,
//! which the store turns into a no-op write.

use glam::{Vec3, Vec4};

use crate::body::Body;
use crate::state::{addr, GlobalState};

/// Everything frame `t` computed, ready to be scattered into the store.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub global: GlobalState,
    pub leader: Vec3,
    /// Mean body position of the *previous* frame; diagnostic only.
    pub centroid: Vec3,
    pub bodies: Vec<Body>,
}

/// The record address `index` commits, or `None` when the address is outside
/// the defined range.
pub fn record_at(output: &FrameOutput, index: usize) -> Option<Vec4> {
    match index {
        addr::GLOBAL => Some(output.global.encode()),
        addr::LEADER => Some(output.leader.extend(0.0)),
        addr::CENTROID => Some(output.centroid.extend(0.0)),
        _ if index < addr::RECORD_COUNT => {
            let slot = index - addr::BODY_BASE;
            Some(output.bodies[slot / 3].records()[slot % 3])
        }
        _ => None,
    }
}
