//! Double-buffered state store and its addressing scheme.
//!
//! The whole simulation persists as a flat sequence of 4-component records,
//! addressed by integer index:
//!
//! | index        | content                                        |
//! |--------------|------------------------------------------------|
//! | 0            | (step count, obstacle spacing, obstacle radius) |
//! | 1            | leader position                                 |
//! | 2            | centroid of all bodies (previous frame)         |
//! | 3 + 3*id     | body `id` position + radius                     |
//! | 3 + 3*id + 1 | body `id` velocity                              |
//! | 3 + 3*id + 2 | body `id` angular velocity                      |
//!
//! Reads always see the previous committed frame; writes go to a pending
//! buffer that becomes visible only at [`StateStore::commit_frame`]. Indices
//! outside the table are no-ops on write and zero on read.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::constants::{
    DEFAULT_OBSTACLE_RADIUS, DEFAULT_OBSTACLE_SPACING, N_BODIES, ROW_WIDTH,
};

/// Record addresses within the state buffer.
pub mod addr {
    use crate::constants::N_BODIES;

    /// Step counter and obstacle parameters.
    pub const GLOBAL: usize = 0;
    /// Leader position.
    pub const LEADER: usize = 1;
    /// Mean body position, recomputed each frame from the prior one.
    pub const CENTROID: usize = 2;
    /// First body record.
    pub const BODY_BASE: usize = 3;
    /// Total number of defined records.
    pub const RECORD_COUNT: usize = BODY_BASE + 3 * N_BODIES;

    /// Address of body `id`'s (position, radius) record.
    pub const fn body_position(id: usize) -> usize {
        BODY_BASE + 3 * id
    }

    /// Address of body `id`'s velocity record.
    pub const fn body_velocity(id: usize) -> usize {
        BODY_BASE + 3 * id + 1
    }

    /// Address of body `id`'s angular-velocity record.
    pub const fn body_spin(id: usize) -> usize {
        BODY_BASE + 3 * id + 2
    }
}

/// Process-wide simulation state: step counter and obstacle parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalState {
    /// Monotonically non-decreasing step counter, reset on init frames.
    pub step: u32,
    /// Pitch of the obstacle lattice.
    pub obstacle_spacing: f32,
    /// Radius of each obstacle pillar.
    pub obstacle_radius: f32,
}

impl GlobalState {
    /// The state written on every init frame.
    pub fn initial() -> Self {
        Self {
            step: 0,
            obstacle_spacing: DEFAULT_OBSTACLE_SPACING,
            obstacle_radius: DEFAULT_OBSTACLE_RADIUS,
        }
    }

    pub fn encode(&self) -> Vec4 {
        Vec4::new(
            self.step as f32,
            self.obstacle_spacing,
            self.obstacle_radius,
            0.0,
        )
    }

    pub fn decode(record: Vec4) -> Self {
        Self {
            step: record.x.max(0.0) as u32,
            obstacle_spacing: record.y,
            obstacle_radius: record.z,
        }
    }
}

/// Map a record index onto the 2D persistence grid (row width 128).
///
/// Kept as a compatibility shim for grid-shaped consumers; the store itself
/// is flat.
pub const fn grid_cell(index: usize) -> (usize, usize) {
    (index / ROW_WIDTH, index % ROW_WIDTH)
}

/// Inverse of [`grid_cell`].
pub const fn grid_index(row: usize, col: usize) -> usize {
    row * ROW_WIDTH + col
}

/// Double-buffered record store.
///
/// `load` reads the last committed frame; `propose` stages a single record
/// for the next frame. `commit_frame` publishes every staged record at once,
/// so a load never observes a same-frame propose. Slots nobody proposed carry
/// their previous value forward.
pub struct StateStore {
    front: Vec<Vec4>,
    back: Vec<Vec4>,
}

impl StateStore {
    /// A zeroed store (the "before the first frame" state).
    pub fn new() -> Self {
        Self {
            front: vec![Vec4::ZERO; addr::RECORD_COUNT],
            back: vec![Vec4::ZERO; addr::RECORD_COUNT],
        }
    }

    /// Number of defined records.
    pub fn len(&self) -> usize {
        self.front.len()
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    /// Read a record from the previous committed frame. Out-of-range reads
    /// return zero.
    pub fn load(&self, index: usize) -> Vec4 {
        self.front.get(index).copied().unwrap_or(Vec4::ZERO)
    }

    /// Stage one record for the pending frame. Out-of-range writes are
    /// no-ops.
    pub fn propose(&mut self, index: usize, record: Vec4) {
        if let Some(slot) = self.back.get_mut(index) {
            *slot = record;
        }
    }

    /// Publish all staged records as the new committed frame.
    pub fn commit_frame(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        // Unstaged slots must carry forward, not expose two-frame-old data.
        self.back.copy_from_slice(&self.front);
    }

    /// The committed records, in address order.
    pub fn records(&self) -> &[Vec4] {
        &self.front
    }

    /// Raw byte view of the committed records, for external consumers that
    /// read the buffer as packed floats.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.front)
    }

    pub fn global(&self) -> GlobalState {
        GlobalState::decode(self.load(addr::GLOBAL))
    }

    pub fn leader(&self) -> Vec3 {
        self.load(addr::LEADER).truncate()
    }

    pub fn centroid(&self) -> Vec3 {
        self.load(addr::CENTROID).truncate()
    }

    /// Decode body `id` from its three committed records.
    pub fn body(&self, id: usize) -> Body {
        Body::from_records([
            self.load(addr::body_position(id)),
            self.load(addr::body_velocity(id)),
            self.load(addr::body_spin(id)),
        ])
    }

    /// Decode the whole committed body population.
    pub fn bodies(&self) -> Vec<Body> {
        (0..N_BODIES).map(|id| self.body(id)).collect()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
