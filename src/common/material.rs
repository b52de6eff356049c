//! Obstacle materials and how strongly they bounce a bob back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the user-controlled obstacle is made of. `Off` removes the obstacle
/// from the simulation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleMaterial {
    #[default]
    Off,
    Concrete,
    Rubber,
}

impl ObstacleMaterial {
    /// Restitution used when no specific material applies.
    pub const DEFAULT_RESTITUTION: f64 = 0.3;

    /// Fraction of angular velocity a bob keeps (sign-reversed) after hitting
    /// this material.
    pub fn restitution(self) -> f64 {
        match self {
            ObstacleMaterial::Concrete => 0.1,
            ObstacleMaterial::Rubber => 0.8,
            ObstacleMaterial::Off => Self::DEFAULT_RESTITUTION,
        }
    }

    /// Whether an obstacle of this material takes part in collisions.
    pub fn is_solid(self) -> bool {
        self != ObstacleMaterial::Off
    }
}

impl fmt::Display for ObstacleMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObstacleMaterial::Off => "Off",
            ObstacleMaterial::Concrete => "Concrete",
            ObstacleMaterial::Rubber => "Rubber",
        };
        f.write_str(name)
    }
}
