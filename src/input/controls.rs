use tracing::debug;

use crate::collision::CollisionSettings;
use crate::math::vec2::Vec2;
use crate::objects::Bob;
use crate::world::{InputCommand, Snapshot};

/// Turns raw pointer events into engine commands.
///
/// Decisions are made against the latest snapshot, so the controls hold no
/// state of their own and can never disagree with the engine about whether a
/// drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    bob_radius_per_mass: f64,
}

impl Controls {
    pub fn new(settings: &CollisionSettings) -> Self {
        Self {
            bob_radius_per_mass: settings.bob_radius_per_mass,
        }
    }

    /// The bob under `pointer`, if any. The upper bob wins when both overlap.
    pub fn pick_bob(&self, pointer: Vec2, snapshot: &Snapshot) -> Option<Bob> {
        Bob::BOTH.into_iter().find(|&bob| {
            let center = match bob {
                Bob::Upper => snapshot.upper,
                Bob::Lower => snapshot.lower,
            };
            let radius = snapshot.state.mass(bob) * self.bob_radius_per_mass;
            pointer.distance(center) <= radius
        })
    }

    /// A press only grabs a bob while the obstacle is switched off.
    pub fn pointer_down(&self, pointer: Vec2, snapshot: &Snapshot) -> Vec<InputCommand> {
        if snapshot.obstacle.is_active() {
            return Vec::new();
        }
        match self.pick_bob(pointer, snapshot) {
            Some(bob) => {
                debug!(?bob, x = pointer.x, y = pointer.y, "bob grabbed");
                vec![InputCommand::UpdatePointer(pointer), InputCommand::BeginDrag(bob)]
            }
            None => Vec::new(),
        }
    }

    /// The obstacle follows the pointer while active; a held bob follows it
    /// while dragging.
    pub fn pointer_moved(&self, pointer: Vec2, snapshot: &Snapshot) -> Vec<InputCommand> {
        let mut commands = Vec::new();
        if snapshot.obstacle.is_active() {
            commands.push(InputCommand::MoveObstacle(pointer));
        }
        if snapshot.mode.is_dragging() {
            commands.push(InputCommand::UpdatePointer(pointer));
        }
        commands
    }

    /// Releasing the button drops a held bob.
    pub fn pointer_up(&self, snapshot: &Snapshot) -> Vec<InputCommand> {
        if snapshot.mode.is_dragging() {
            vec![InputCommand::EndDrag]
        } else {
            Vec::new()
        }
    }

    /// The pointer leaving the window drops a held bob, same as a release.
    pub fn pointer_left(&self, snapshot: &Snapshot) -> Vec<InputCommand> {
        if snapshot.mode.is_dragging() {
            debug!("pointer left the window mid-drag");
        }
        self.pointer_up(snapshot)
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(&CollisionSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionReport;
    use crate::common::ObstacleMaterial;
    use crate::world::{Engine, Mode};

    const DT: f64 = 0.016;

    fn idle_snapshot(engine: &Engine) -> Snapshot {
        engine.snapshot(CollisionReport::default())
    }

    #[test]
    fn test_press_on_upper_bob_starts_drag() {
        let mut engine = Engine::default();
        let controls = Controls::default();
        let snapshot = idle_snapshot(&engine);
        let press = snapshot.upper + Vec2::new(5.0, -5.0);

        let commands = controls.pointer_down(press, &snapshot);
        assert_eq!(
            commands,
            vec![InputCommand::UpdatePointer(press), InputCommand::BeginDrag(Bob::Upper)]
        );

        let snapshot = engine.tick(DT, &commands);
        assert!(matches!(snapshot.mode, Mode::Dragging(target) if target.bob == Bob::Upper));
    }

    #[test]
    fn test_press_on_lower_bob() {
        let engine = Engine::default();
        let snapshot = idle_snapshot(&engine);
        assert_eq!(Controls::default().pick_bob(snapshot.lower, &snapshot), Some(Bob::Lower));
    }

    #[test]
    fn test_press_radius_scales_with_mass() {
        let mut engine = Engine::default();
        engine.state_mut().m1 = 2.0;
        let snapshot = idle_snapshot(&engine);
        let controls = Controls::default();
        // 25 units away: outside a 15-unit bob, inside a 30-unit one
        let press = snapshot.upper + Vec2::new(0.0, 25.0);
        assert_eq!(controls.pick_bob(press, &snapshot), Some(Bob::Upper));

        engine.state_mut().m1 = 1.0;
        let snapshot = idle_snapshot(&engine);
        assert_eq!(controls.pick_bob(press, &snapshot), None);
    }

    #[test]
    fn test_press_ignored_while_obstacle_active() {
        let mut engine = Engine::default();
        engine.apply(InputCommand::SetMaterial(ObstacleMaterial::Rubber)).unwrap();
        let snapshot = idle_snapshot(&engine);
        assert!(Controls::default().pointer_down(snapshot.upper, &snapshot).is_empty());
    }

    #[test]
    fn test_press_on_empty_space() {
        let engine = Engine::default();
        let snapshot = idle_snapshot(&engine);
        assert!(Controls::default()
            .pointer_down(Vec2::new(-500.0, -500.0), &snapshot)
            .is_empty());
    }

    #[test]
    fn test_move_routes_to_obstacle_and_drag() {
        let mut engine = Engine::default();
        let controls = Controls::default();
        let target = Vec2::new(10.0, 20.0);

        assert!(controls.pointer_moved(target, &idle_snapshot(&engine)).is_empty());

        engine.apply(InputCommand::SetMaterial(ObstacleMaterial::Concrete)).unwrap();
        assert_eq!(
            controls.pointer_moved(target, &idle_snapshot(&engine)),
            vec![InputCommand::MoveObstacle(target)]
        );

        engine.apply(InputCommand::SetMaterial(ObstacleMaterial::Off)).unwrap();
        engine.apply(InputCommand::BeginDrag(Bob::Lower)).unwrap();
        assert_eq!(
            controls.pointer_moved(target, &idle_snapshot(&engine)),
            vec![InputCommand::UpdatePointer(target)]
        );
    }

    #[test]
    fn test_release_ends_drag_only_when_dragging() {
        let mut engine = Engine::default();
        let controls = Controls::default();
        assert!(controls.pointer_up(&idle_snapshot(&engine)).is_empty());

        engine.apply(InputCommand::BeginDrag(Bob::Upper)).unwrap();
        let commands = controls.pointer_up(&idle_snapshot(&engine));
        assert_eq!(commands, vec![InputCommand::EndDrag]);
        let snapshot = engine.tick(DT, &commands);
        assert_eq!(snapshot.mode, Mode::FreeDynamics);
    }

    #[test]
    fn test_leaving_window_ends_drag() {
        let mut engine = Engine::default();
        let controls = Controls::default();
        assert!(controls.pointer_left(&idle_snapshot(&engine)).is_empty());

        engine.apply(InputCommand::BeginDrag(Bob::Lower)).unwrap();
        let commands = controls.pointer_left(&idle_snapshot(&engine));
        assert_eq!(commands, vec![InputCommand::EndDrag]);
        assert_eq!(engine.tick(DT, &commands).mode, Mode::FreeDynamics);
    }
}
