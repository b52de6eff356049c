use crate::objects::Bob;

/// Overlap between one bob and the obstacle, found before any response is
/// applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BobContact {
    pub bob: Bob,
    /// Direction from the obstacle center to the bob center, in radians
    /// (`atan2(dy, dx)` in display space).
    pub angle: f64,
    /// How far the two circles interpenetrate, in display units.
    pub overlap: f64,
}

/// Which bobs received a collision response during one `resolve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    pub upper: bool,
    pub lower: bool,
}

impl CollisionReport {
    pub fn occurred(&self) -> bool {
        self.upper || self.lower
    }

    pub(crate) fn mark(&mut self, bob: Bob) {
        match bob {
            Bob::Upper => self.upper = true,
            Bob::Lower => self.lower = true,
        }
    }
}
