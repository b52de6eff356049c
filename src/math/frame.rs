use super::vec2::Vec2;
use crate::objects::{Bob, SimulationState};

/// Maps joint angles into display space: where the pivot sits on screen and
/// how many display units one unit of rod length covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: Vec2,
    pub scale: f64,
}

impl Frame {
    pub fn new(origin: Vec2, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Display position of the upper bob.
    pub fn upper_bob(&self, state: &SimulationState) -> Vec2 {
        self.origin + Vec2::hanging(state.a1, state.l1 * self.scale)
    }

    /// Display position of the lower bob.
    pub fn lower_bob(&self, state: &SimulationState) -> Vec2 {
        self.upper_bob(state) + Vec2::hanging(state.a2, state.l2 * self.scale)
    }

    pub fn bob_position(&self, state: &SimulationState, bob: Bob) -> Vec2 {
        match bob {
            Bob::Upper => self.upper_bob(state),
            Bob::Lower => self.lower_bob(state),
        }
    }

    /// Point the given bob's rod hangs from.
    pub fn pivot_of(&self, state: &SimulationState, bob: Bob) -> Vec2 {
        match bob {
            Bob::Upper => self.origin,
            Bob::Lower => self.upper_bob(state),
        }
    }

    /// Display length of a rod.
    pub fn rod_length(&self, state: &SimulationState, bob: Bob) -> f64 {
        state.length(bob) * self.scale
    }
}
