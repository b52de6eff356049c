use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point or offset in display space. `y` grows downward, matching the
/// screen coordinates the host draws into.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Creates a new Vec2.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset of a rod of `length` hanging at `angle` from the downward vertical.
    pub fn hanging(angle: f64, length: f64) -> Self {
        Self::new(length * angle.sin(), length * angle.cos())
    }

    /// Angle of this offset measured from the downward vertical.
    /// Inverse of [`Vec2::hanging`] for any non-zero length.
    pub fn angle_from_vertical(self) -> f64 {
        self.x.atan2(self.y)
    }

    /// Calculates the dot product of two vectors.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length, for comparisons that can skip the square root.
    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Calculates the distance between two points.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}
