//! Mechanical energy bookkeeping. Read-only: nothing here feeds back into the
//! simulation, the values are only for display and property checks.

use crate::objects::SimulationState;

/// Potential energy, zero when both bobs hang straight down.
pub fn potential_energy(state: &SimulationState) -> f64 {
    let SimulationState { g, l1, l2, m1, m2, a1, a2, .. } = *state;

    let y1 = -l1 * a1.cos();
    let y2 = y1 - l2 * a2.cos();

    m1 * g * (l1 + y1) + m2 * g * (l1 + l2 + y2)
}

pub fn kinetic_energy(state: &SimulationState) -> f64 {
    let SimulationState {
        l1,
        l2,
        m1,
        m2,
        a1,
        a2,
        a1_v,
        a2_v,
        ..
    } = *state;

    let v1x = l1 * a1_v * a1.cos();
    let v1y = l1 * a1_v * a1.sin();
    let v2x = v1x + l2 * a2_v * a2.cos();
    let v2y = v1y + l2 * a2_v * a2.sin();

    0.5 * m1 * (v1x * v1x + v1y * v1y) + 0.5 * m2 * (v2x * v2x + v2y * v2y)
}

/// Total mechanical energy (kinetic plus potential).
pub fn total_energy(state: &SimulationState) -> f64 {
    kinetic_energy(state) + potential_energy(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_energy_zero_at_rest_hanging_down() {
        let state = SimulationState {
            a1: 0.0,
            a2: 0.0,
            ..SimulationState::default()
        };
        assert_abs_diff_eq!(total_energy(&state), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_potential_energy_at_horizontal_rest() {
        // Both bobs level with the pivot: m1*g*l1 + m2*g*(l1+l2)
        let state = SimulationState::default();
        assert_abs_diff_eq!(potential_energy(&state), 9.8 + 2.0 * 9.8, epsilon = EPSILON);
        assert_abs_diff_eq!(kinetic_energy(&state), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_kinetic_energy_rigid_rotation() {
        // Rods aligned and spinning together: bob speeds are w*l1 and w*(l1+l2)
        let state = SimulationState {
            a1: 0.3,
            a2: 0.3,
            a1_v: 2.0,
            a2_v: 2.0,
            m1: 1.5,
            m2: 0.5,
            ..SimulationState::default()
        };
        let expected = 0.5 * 1.5 * 4.0 + 0.5 * 0.5 * 16.0;
        assert_abs_diff_eq!(kinetic_energy(&state), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_energy_does_not_mutate_state() {
        let state = SimulationState {
            a1_v: 1.0,
            ..SimulationState::default()
        };
        let before = state;
        let _ = total_energy(&state);
        assert_eq!(state, before);
    }
}
