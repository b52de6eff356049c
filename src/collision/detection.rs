use std::time::Duration;

use tracing::debug;

use super::manifold::{BobContact, CollisionReport};
use super::obstacle::Obstacle;
use crate::math::frame::Frame;
use crate::math::vec2::Vec2;
use crate::objects::{Bob, SimulationState};

/// Tunables for the bob/obstacle response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSettings {
    /// A bob's collision radius is its mass times this, in display units.
    pub bob_radius_per_mass: f64,
    /// Fraction of the overlap pushed back into the joint angle.
    pub correction_factor: f64,
    /// Minimum simulated time between two responses from the same obstacle.
    pub debounce: Duration,
}

impl CollisionSettings {
    pub fn bob_radius(&self, state: &SimulationState, bob: Bob) -> f64 {
        state.mass(bob) * self.bob_radius_per_mass
    }
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            bob_radius_per_mass: 15.0,
            correction_factor: 0.5,
            debounce: Duration::from_millis(100),
        }
    }
}

/// Checks a bob circle against the obstacle circle.
/// Returns the contact if they overlap, None otherwise.
pub fn check_bob(bob: Bob, center: Vec2, radius: f64, obstacle: &Obstacle) -> Option<BobContact> {
    let offset = center - obstacle.position;
    let distance = offset.magnitude();
    let min_distance = radius + obstacle.radius();

    if distance < min_distance {
        Some(BobContact {
            bob,
            // atan2(0, 0) is 0, so a bob sitting exactly on the obstacle is
            // pushed toward +x.
            angle: offset.y.atan2(offset.x),
            overlap: min_distance - distance,
        })
    } else {
        None
    }
}

/// Pushes the bob out along x and reflects its angular velocity, damped by the
/// obstacle material's restitution.
fn respond(state: &mut SimulationState, contact: &BobContact, obstacle: &Obstacle, frame: &Frame, settings: &CollisionSettings) {
    // Only the x-component of the separation is turned into an angular
    // correction; the y-component is dropped.
    let move_x = contact.overlap * contact.angle.cos() * settings.correction_factor;
    let rod_length = frame.rod_length(state, contact.bob);
    let restitution = obstacle.material.restitution();

    let (angle, velocity) = state.joint_mut(contact.bob);
    *angle += move_x / rod_length;
    *velocity = -*velocity * restitution;
}

/// Tests both bobs against the obstacle and applies the collision response to
/// every bob that overlaps it.
///
/// Nothing happens while the obstacle is inactive or still inside the
/// debounce window of its previous response. The window is checked once per
/// call, so both bobs may respond in the same call; any response stamps
/// `obstacle.last_collision` with `now`.
pub fn resolve(
    state: &mut SimulationState,
    obstacle: &mut Obstacle,
    frame: &Frame,
    settings: &CollisionSettings,
    now: Duration,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    if !obstacle.is_active() || !obstacle.ready(now, settings.debounce) {
        return report;
    }

    // Positions are taken before any correction so both bobs see the same pose.
    let contacts: Vec<BobContact> = Bob::BOTH
        .iter()
        .filter_map(|&bob| {
            let center = frame.bob_position(state, bob);
            let radius = settings.bob_radius(state, bob);
            check_bob(bob, center, radius, obstacle)
        })
        .collect();

    for contact in &contacts {
        let before = state.angular_velocity(contact.bob);
        respond(state, contact, obstacle, frame, settings);
        obstacle.last_collision = Some(now);
        report.mark(contact.bob);

        debug!(
            bob = ?contact.bob,
            material = %obstacle.material,
            overlap = contact.overlap,
            velocity_before = before,
            velocity_after = state.angular_velocity(contact.bob),
            "collision response"
        );
    }

    report
}
