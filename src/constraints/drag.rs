use serde::{Deserialize, Serialize};

use crate::math::frame::Frame;
use crate::math::vec2::Vec2;
use crate::objects::{Bob, SimulationState};

/// A bob held by the pointer. While one exists it replaces the dynamics
/// entirely: the held joint points at the pointer and nothing moves on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragTarget {
    pub bob: Bob,
    /// Pointer position in display space.
    pub pointer: Vec2,
}

impl DragTarget {
    pub fn new(bob: Bob, pointer: Vec2) -> Self {
        Self { bob, pointer }
    }

    /// Rotates the held bob's rod to point at the pointer and stops both
    /// joints.
    ///
    /// The pointer distance is never clamped to the rod length: only the angle
    /// is stored, so the bob stays on its rod regardless of how far away the
    /// pointer is.
    pub fn apply(&self, state: &mut SimulationState, frame: &Frame) {
        let pivot = frame.pivot_of(state, self.bob);
        let angle = (self.pointer - pivot).angle_from_vertical();

        match self.bob {
            Bob::Upper => state.a1 = angle,
            Bob::Lower => state.a2 = angle,
        }
        state.stop();
    }
}
