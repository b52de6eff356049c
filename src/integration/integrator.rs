use crate::objects::SimulationState;

/// Angular accelerations of both joints for the current state, including the
/// linear damping term when damping is active.
///
/// Degenerate parameters (zero lengths or masses) are not trapped; they show
/// up as NaN or infinity in the result.
pub fn accelerations(state: &SimulationState) -> (f64, f64) {
    let SimulationState {
        g,
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

    let delta = a1 - a2;
    // Shared by both denominators
    let mass_term = 2.0 * m1 + m2 - m2 * (2.0 * a1 - 2.0 * a2).cos();

    let num1 = -g * (2.0 * m1 + m2) * a1.sin();
    let num2 = -m2 * g * (a1 - 2.0 * a2).sin();
    let num3 = -2.0 * delta.sin() * m2 * (a2_v * a2_v * l2 + a1_v * a1_v * l1 * delta.cos());
    let den1 = l1 * mass_term;
    let mut a1_acc = (num1 + num2 + num3) / den1;

    let num4 = 2.0
        * delta.sin()
        * (a1_v * a1_v * l1 * (m1 + m2) + g * (m1 + m2) * a1.cos() + a2_v * a2_v * l2 * m2 * delta.cos());
    let den2 = l2 * mass_term;
    let mut a2_acc = num4 / den2;

    if state.damping_active() {
        a1_acc -= state.damping * a1_v;
        a2_acc -= state.damping * a2_v;
    }

    (a1_acc, a2_acc)
}

/// Advances the pendulum by one fixed step `dt` using semi-implicit Euler:
/// velocities are updated from the accelerations first, then angles from the
/// new velocities. No sub-stepping is performed.
pub fn step(state: &mut SimulationState, dt: f64) {
    let (a1_acc, a2_acc) = accelerations(state);

    state.a1_v += a1_acc * dt;
    state.a2_v += a2_acc * dt;

    state.a1 += state.a1_v * dt;
    state.a2 += state.a2_v * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;
    const EPSILON: f64 = 1e-9;
    const DT: f64 = 0.016;

    #[test]
    fn test_accelerations_from_horizontal_rest() {
        let state = SimulationState::default();
        let (a1_acc, a2_acc) = accelerations(&state);
        assert_abs_diff_eq!(a1_acc, -9.8, epsilon = EPSILON);
        assert_abs_diff_eq!(a2_acc, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_first_step_from_horizontal_rest() {
        let mut state = SimulationState::default();
        step(&mut state, DT);

        assert_abs_diff_eq!(state.a1_v, -0.1568, epsilon = EPSILON);
        assert_abs_diff_eq!(state.a2_v, 0.0, epsilon = EPSILON);
        // Position uses the already-updated velocity
        assert_abs_diff_eq!(state.a1, FRAC_PI_2 - 0.1568 * DT, epsilon = EPSILON);
        assert_abs_diff_eq!(state.a1, 1.5683, epsilon = 1e-4);
        assert_abs_diff_eq!(state.a2, FRAC_PI_2, epsilon = EPSILON);
    }

    #[test]
    fn test_equilibrium_is_stationary() {
        let mut state = SimulationState {
            a1: 0.0,
            a2: 0.0,
            ..SimulationState::default()
        };
        for _ in 0..100 {
            step(&mut state, DT);
        }
        assert_eq!((state.a1, state.a2, state.a1_v, state.a2_v), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_step_is_deterministic() {
        let initial = SimulationState {
            a1: 2.1,
            a2: -0.7,
            a1_v: 1.3,
            a2_v: -4.2,
            m2: 1.7,
            ..SimulationState::default()
        };
        let mut first = initial;
        let mut second = initial;
        for _ in 0..500 {
            step(&mut first, DT);
            step(&mut second, DT);
        }
        assert_eq!(first.a1.to_bits(), second.a1.to_bits());
        assert_eq!(first.a2.to_bits(), second.a2.to_bits());
        assert_eq!(first.a1_v.to_bits(), second.a1_v.to_bits());
        assert_eq!(first.a2_v.to_bits(), second.a2_v.to_bits());
    }

    #[test]
    fn test_damping_subtracts_linear_term() {
        let undamped = SimulationState {
            a1: 0.4,
            a2: 0.1,
            a1_v: 2.0,
            a2_v: -1.0,
            damping: 0.5,
            ..SimulationState::default()
        };
        let damped = SimulationState {
            damping_enabled: true,
            ..undamped
        };
        let (u1, u2) = accelerations(&undamped);
        let (d1, d2) = accelerations(&damped);
        assert_abs_diff_eq!(d1, u1 - 0.5 * 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(d2, u2 - 0.5 * -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_damping_enabled_with_zero_coefficient_is_ignored() {
        let base = SimulationState {
            a1_v: 3.0,
            a2_v: 1.0,
            ..SimulationState::default()
        };
        let flagged = SimulationState {
            damping_enabled: true,
            ..base
        };
        assert_eq!(accelerations(&base), accelerations(&flagged));
    }

    #[test]
    fn test_zero_length_propagates_non_finite() {
        let mut state = SimulationState {
            l1: 0.0,
            ..SimulationState::default()
        };
        step(&mut state, DT);
        assert!(!state.is_finite());
    }

    #[test]
    fn test_angles_are_not_wrapped() {
        // Spinning fast over the top keeps accumulating angle
        let mut state = SimulationState {
            a1: 0.0,
            a2: 0.0,
            a1_v: 40.0,
            a2_v: 40.0,
            ..SimulationState::default()
        };
        for _ in 0..50 {
            step(&mut state, DT);
        }
        assert!(state.a1 > std::f64::consts::TAU);
    }
}
