use std::time::Duration;

use crate::common::ObstacleMaterial;
use crate::math::vec2::Vec2;

/// The user-controlled block that can knock the pendulum around.
///
/// Its footprint is a square of side `size`, but collisions treat it as a
/// circle of radius `size / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Vec2,
    pub size: f64,
    pub material: ObstacleMaterial,
    /// Simulation time of the last collision response, if any.
    pub last_collision: Option<Duration>,
}

impl Obstacle {
    pub const DEFAULT_SIZE: f64 = 40.0;

    pub fn new(size: f64) -> Self {
        Self {
            position: Vec2::ZERO,
            size,
            material: ObstacleMaterial::Off,
            last_collision: None,
        }
    }

    /// An obstacle is active whenever its material is anything but `Off`.
    pub fn is_active(&self) -> bool {
        self.material.is_solid()
    }

    /// Radius of the circle standing in for the square footprint.
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    /// Whether a collision response is allowed at `now`, given the time of the
    /// previous one.
    pub fn ready(&self, now: Duration, debounce: Duration) -> bool {
        match self.last_collision {
            Some(last) => now.saturating_sub(last) >= debounce,
            None => true,
        }
    }
}

impl Default for Obstacle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(100);

    #[test]
    fn test_default_obstacle_is_inactive() {
        let obstacle = Obstacle::default();
        assert!(!obstacle.is_active());
        assert_eq!(obstacle.radius(), 20.0);
        assert_eq!(obstacle.last_collision, None);
    }

    #[test]
    fn test_active_follows_material() {
        let mut obstacle = Obstacle::default();
        obstacle.material = ObstacleMaterial::Concrete;
        assert!(obstacle.is_active());
        obstacle.material = ObstacleMaterial::Off;
        assert!(!obstacle.is_active());
    }

    #[test]
    fn test_ready_respects_debounce_window() {
        let mut obstacle = Obstacle::default();
        assert!(obstacle.ready(Duration::ZERO, DEBOUNCE));

        obstacle.last_collision = Some(Duration::from_millis(1000));
        assert!(!obstacle.ready(Duration::from_millis(1050), DEBOUNCE));
        assert!(!obstacle.ready(Duration::from_millis(1099), DEBOUNCE));
        assert!(obstacle.ready(Duration::from_millis(1100), DEBOUNCE));
    }

    #[test]
    fn test_ready_when_clock_is_behind_last_collision() {
        let obstacle = Obstacle {
            last_collision: Some(Duration::from_millis(500)),
            ..Obstacle::default()
        };
        assert!(!obstacle.ready(Duration::from_millis(100), DEBOUNCE));
    }
}
