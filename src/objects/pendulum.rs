use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

/// One of the two pendulum endpoint masses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bob {
    /// Hangs from the fixed pivot.
    Upper,
    /// Hangs from the upper bob; its path is the trail the host draws.
    Lower,
}

impl Bob {
    pub const BOTH: [Bob; 2] = [Bob::Upper, Bob::Lower];
}

/// The complete physical state of the double pendulum.
///
/// Angles are measured from the downward vertical and are never wrapped,
/// so a pendulum that loops over the top keeps accumulating angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    // Parameters
    pub g: f64,
    pub l1: f64,
    pub l2: f64,
    pub m1: f64,
    pub m2: f64,
    pub damping: f64,
    pub damping_enabled: bool,

    // Dynamic state
    pub a1: f64,
    pub a2: f64,
    pub a1_v: f64,
    pub a2_v: f64,
}

impl SimulationState {
    /// Angle both rods take on reset: horizontal, pointing toward +x.
    pub const RESET_ANGLE: f64 = FRAC_PI_2;

    /// Puts both rods back to horizontal and stops all motion.
    /// Parameters are left untouched.
    pub fn reset_pose(&mut self) {
        self.a1 = Self::RESET_ANGLE;
        self.a2 = Self::RESET_ANGLE;
        self.stop();
    }

    /// Zeroes both angular velocities.
    pub fn stop(&mut self) {
        self.a1_v = 0.0;
        self.a2_v = 0.0;
    }

    pub fn length(&self, bob: Bob) -> f64 {
        match bob {
            Bob::Upper => self.l1,
            Bob::Lower => self.l2,
        }
    }

    pub fn mass(&self, bob: Bob) -> f64 {
        match bob {
            Bob::Upper => self.m1,
            Bob::Lower => self.m2,
        }
    }

    pub fn angular_velocity(&self, bob: Bob) -> f64 {
        match bob {
            Bob::Upper => self.a1_v,
            Bob::Lower => self.a2_v,
        }
    }

    /// Mutable access to a joint's `(angle, angular_velocity)` pair.
    pub fn joint_mut(&mut self, bob: Bob) -> (&mut f64, &mut f64) {
        match bob {
            Bob::Upper => (&mut self.a1, &mut self.a1_v),
            Bob::Lower => (&mut self.a2, &mut self.a2_v),
        }
    }

    /// Whether the linear damping term participates in integration.
    pub fn damping_active(&self) -> bool {
        self.damping_enabled && self.damping > 0.0
    }

    /// False once NaN or infinity has crept into the dynamic state,
    /// typically after degenerate parameters were written directly.
    pub fn is_finite(&self) -> bool {
        [self.a1, self.a2, self.a1_v, self.a2_v]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            g: 9.8,
            l1: 1.0,
            l2: 1.0,
            m1: 1.0,
            m2: 1.0,
            damping: 0.0,
            damping_enabled: false,
            a1: Self::RESET_ANGLE,
            a2: Self::RESET_ANGLE,
            a1_v: 0.0,
            a2_v: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SimulationState::default();
        assert_eq!(state.g, 9.8);
        assert_eq!((state.l1, state.l2, state.m1, state.m2), (1.0, 1.0, 1.0, 1.0));
        assert_eq!(state.a1, FRAC_PI_2);
        assert_eq!(state.a2, FRAC_PI_2);
        assert_eq!((state.a1_v, state.a2_v), (0.0, 0.0));
        assert!(!state.damping_active());
    }

    #[test]
    fn test_reset_pose_keeps_parameters() {
        let mut state = SimulationState {
            g: 3.7,
            l1: 1.5,
            m2: 2.0,
            a1: 12.0,
            a2: -4.0,
            a1_v: 8.0,
            a2_v: -3.0,
            ..SimulationState::default()
        };
        state.reset_pose();
        assert_eq!((state.a1, state.a2), (FRAC_PI_2, FRAC_PI_2));
        assert_eq!((state.a1_v, state.a2_v), (0.0, 0.0));
        assert_eq!((state.g, state.l1, state.m2), (3.7, 1.5, 2.0));
    }

    #[test]
    fn test_joint_accessors() {
        let mut state = SimulationState {
            a1: 0.1,
            a2: 0.2,
            a1_v: 1.0,
            a2_v: 2.0,
            ..SimulationState::default()
        };
        assert_eq!(state.angular_velocity(Bob::Upper), 1.0);

        let (angle, velocity) = state.joint_mut(Bob::Lower);
        *angle += 1.0;
        *velocity = -5.0;
        assert_eq!(state.a2, 1.2);
        assert_eq!(state.a2_v, -5.0);
        assert_eq!(state.a1_v, 1.0);
    }

    #[test]
    fn test_damping_active_requires_both_flag_and_coefficient() {
        let mut state = SimulationState::default();
        state.damping = 0.5;
        assert!(!state.damping_active());
        state.damping_enabled = true;
        assert!(state.damping_active());
        state.damping = 0.0;
        assert!(!state.damping_active());
    }

    #[test]
    fn test_is_finite() {
        let mut state = SimulationState::default();
        assert!(state.is_finite());
        state.a2_v = f64::NAN;
        assert!(!state.is_finite());
    }
}
