use ggez::{
    conf, event,
    graphics::{self, Color, DrawMode, DrawParam, Mesh, MeshBuilder, Rect, Text},
    input::keyboard::{KeyCode, KeyInput},
    input::mouse::MouseButton,
    mint, Context, ContextBuilder, GameResult,
};
use tracing::{debug, info, warn};

use double_pendulum::{
    Bob, CollisionReport, Controls, Engine, InputCommand, Mode, ObstacleMaterial, Parameter, PendulumConfig, Snapshot,
    Trail, Vec2,
};

const BACKGROUND: Color = Color::new(0x12 as f32 / 255.0, 0x0f as f32 / 255.0, 0x19 as f32 / 255.0, 1.0);
const ROD_COLOR: Color = Color::new(0xbb as f32 / 255.0, 0xb8 as f32 / 255.0, 0xbb as f32 / 255.0, 1.0);
const HELD_COLOR: Color = Color::new(1.0, 0xeb as f32 / 255.0, 0x3b as f32 / 255.0, 1.0);
const UPPER_BASE: [u8; 3] = [0xe5, 0xca, 0xb7];
const LOWER_BASE: [u8; 3] = [0x9b, 0xb0, 0xcd];
const TRAIL_ALPHA: f32 = 0.6;
const UI_MARGIN: f32 = 12.0;

const GRAVITY_STEP: f64 = 0.5;
const LENGTH_STEP: f64 = 0.1;
const MASS_STEP: f64 = 0.5;
const DAMPING_STEP: f64 = 0.01;
const OBSTACLE_SIZE_STEP: f64 = 5.0;

const GRAVITY_RANGE: (f64, f64) = (0.0, 30.0);
const LENGTH_RANGE: (f64, f64) = (0.1, 3.0);
const MASS_RANGE: (f64, f64) = (0.5, 3.0);
const OBSTACLE_SIZE_RANGE: (f64, f64) = (10.0, 120.0);

fn to_point(v: Vec2) -> mint::Point2<f32> {
    mint::Point2 {
        x: v.x as f32,
        y: v.y as f32,
    }
}

/// Pivot placement for a window of the given size.
fn origin_for(width: f32, height: f32) -> Vec2 {
    Vec2::new(width as f64 / 1.75, height as f64 / 3.0)
}

/// Heavier bobs are drawn brighter.
fn bob_color(mass: f64, base: [u8; 3]) -> Color {
    let factor = 0.5 + (mass - 0.5) / 1.5;
    let channel = |c: u8| ((c as f64 * factor).round().clamp(0.0, 255.0)) as u8;
    Color::from_rgb(channel(base[0]), channel(base[1]), channel(base[2]))
}

fn nudged(value: f64, delta: f64, range: (f64, f64)) -> f64 {
    (value + delta).clamp(range.0, range.1)
}

/// Grows or shrinks the obstacle square by `delta`, kept inside its range.
fn resize_obstacle(current: f64, delta: f64) -> InputCommand {
    InputCommand::SetObstacleSize(nudged(current, delta, OBSTACLE_SIZE_RANGE))
}

fn obstacle_color(material: ObstacleMaterial) -> Color {
    match material {
        ObstacleMaterial::Concrete => Color::from_rgb(0x8c, 0x8c, 0x8c),
        ObstacleMaterial::Rubber => Color::from_rgb(0xff, 0x6b, 0x6b),
        ObstacleMaterial::Off => Color::from_rgb(0xdc, 0xb8, 0xb0),
    }
}

struct MainState {
    engine: Engine,
    controls: Controls,
    trail: Trail,
    pending: Vec<InputCommand>,
    last: Snapshot,
    timestep: f64,
    bob_radius_per_mass: f64,
    screen_width: f32,
    screen_height: f32,
}

impl MainState {
    fn new(ctx: &mut Context, config: PendulumConfig) -> GameResult<MainState> {
        let (screen_width, screen_height) = ctx.gfx.drawable_size();
        let engine = Engine::new(&config, origin_for(screen_width, screen_height));
        let last = engine.snapshot(CollisionReport::default());
        let settings = config.engine.collision_settings();

        info!(
            width = screen_width,
            height = screen_height,
            timestep = config.timestep,
            "viewer started"
        );

        Ok(MainState {
            engine,
            controls: Controls::new(&settings),
            trail: Trail::new(config.trail_capacity),
            pending: Vec::new(),
            last,
            timestep: config.timestep,
            bob_radius_per_mass: settings.bob_radius_per_mass,
            screen_width,
            screen_height,
        })
    }

    fn queue(&mut self, commands: impl IntoIterator<Item = InputCommand>) {
        self.pending.extend(commands);
    }

    /// Nudges a parameter from its last known value, kept inside `range`.
    fn nudge(&mut self, parameter: Parameter, delta: f64, range: (f64, f64)) {
        let value = nudged(parameter.get(&self.last.state), delta, range);
        self.queue([InputCommand::SetParameter(parameter, value)]);
        if matches!(parameter, Parameter::Length(_)) {
            self.trail.clear();
        }
    }

    /// Cycles a mass upwards, wrapping back to the lightest bob.
    fn cycle_mass(&mut self, bob: Bob) {
        let mut value = self.last.state.mass(bob) + MASS_STEP;
        if value > MASS_RANGE.1 + 1e-9 {
            value = MASS_RANGE.0;
        }
        self.queue([InputCommand::SetParameter(Parameter::Mass(bob), value)]);
    }

    fn hud_lines(&self) -> Vec<String> {
        let state = &self.last.state;
        let mut lines = vec![
            format!("g = {:.1}", state.g),
            format!("l1 = {:.1}  l2 = {:.1}", state.l1, state.l2),
            format!("m1 = {:.1}  m2 = {:.1}", state.m1, state.m2),
            format!(
                "obstacle: {}  size = {:.0}",
                self.last.obstacle.material, self.last.obstacle.size
            ),
        ];
        if state.damping_enabled {
            lines.push(format!("damping = {:.2}", state.damping));
        }
        if let Some(energy) = self.last.energy {
            lines.push(format!("energy = {:.2}", energy));
        }
        lines.push(String::from(
            "0/1/2 material  R reset  D damping  [ ] damping  G/H gravity  arrows lengths  M/N masses  -/= obstacle size",
        ));
        lines
    }
}

impl event::EventHandler<ggez::GameError> for MainState {
    fn update(&mut self, _ctx: &mut Context) -> GameResult {
        let commands = std::mem::take(&mut self.pending);
        let mut snapshot = self.engine.tick(self.timestep, &commands);

        if !snapshot.is_finite() {
            warn!(time = ?snapshot.time, "simulation diverged, resetting");
            self.engine.reset();
            self.trail.clear();
            snapshot = self.engine.snapshot(CollisionReport::default());
        }

        if snapshot.collision.occurred() {
            debug!(
                upper = snapshot.collision.upper,
                lower = snapshot.collision.lower,
                "bounce"
            );
        }

        if !snapshot.mode.is_dragging() {
            self.trail.push(snapshot.lower);
        }
        self.last = snapshot;
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, BACKGROUND);
        canvas.set_screen_coordinates(Rect::new(0.0, 0.0, self.screen_width, self.screen_height));

        let snapshot = &self.last;
        let origin = self.engine.frame().origin;
        let mut builder = MeshBuilder::new();

        // Trail fades towards its oldest point
        let points: Vec<Vec2> = self.trail.iter().copied().collect();
        let count = points.len();
        for (i, pair) in points.windows(2).enumerate() {
            if pair[0] == pair[1] {
                continue;
            }
            let alpha = (i + 1) as f32 / count as f32 * TRAIL_ALPHA;
            builder.line(
                &[to_point(pair[0]), to_point(pair[1])],
                1.0,
                Color::new(1.0, 1.0, 1.0, alpha),
            )?;
        }

        builder.line(
            &[to_point(origin), to_point(snapshot.upper), to_point(snapshot.lower)],
            2.0,
            ROD_COLOR,
        )?;

        let held = match snapshot.mode {
            Mode::Dragging(target) => Some(target.bob),
            Mode::FreeDynamics => None,
        };
        for (bob, center, base) in [
            (Bob::Upper, snapshot.upper, UPPER_BASE),
            (Bob::Lower, snapshot.lower, LOWER_BASE),
        ] {
            let mass = snapshot.state.mass(bob);
            let color = if held == Some(bob) {
                HELD_COLOR
            } else {
                bob_color(mass, base)
            };
            builder.circle(
                DrawMode::fill(),
                to_point(center),
                (mass * self.bob_radius_per_mass) as f32,
                0.1,
                color,
            )?;
        }

        let obstacle = &snapshot.obstacle;
        if obstacle.is_active() {
            let half = obstacle.radius() as f32;
            let rect = Rect::new(
                obstacle.position.x as f32 - half,
                obstacle.position.y as f32 - half,
                half * 2.0,
                half * 2.0,
            );
            builder.rectangle(DrawMode::fill(), rect, obstacle_color(obstacle.material))?;
            builder.rectangle(DrawMode::stroke(2.0), rect, Color::WHITE)?;
        }

        let mesh = Mesh::from_data(ctx, builder.build());
        canvas.draw(&mesh, DrawParam::default());

        let mut y = UI_MARGIN;
        for line in self.hud_lines() {
            let mut text = Text::new(line);
            text.set_scale(16.0);
            canvas.draw(
                &text,
                DrawParam::default()
                    .dest(mint::Point2 { x: UI_MARGIN, y })
                    .color(ROD_COLOR),
            );
            y += 20.0;
        }

        canvas.finish(ctx)?;
        Ok(())
    }

    fn mouse_button_down_event(&mut self, _ctx: &mut Context, button: MouseButton, x: f32, y: f32) -> GameResult {
        if button == MouseButton::Left {
            let commands = self.controls.pointer_down(Vec2::new(x as f64, y as f64), &self.last);
            self.queue(commands);
        }
        Ok(())
    }

    fn mouse_motion_event(&mut self, _ctx: &mut Context, x: f32, y: f32, _dx: f32, _dy: f32) -> GameResult {
        let commands = self.controls.pointer_moved(Vec2::new(x as f64, y as f64), &self.last);
        self.queue(commands);
        Ok(())
    }

    fn mouse_button_up_event(&mut self, _ctx: &mut Context, button: MouseButton, _x: f32, _y: f32) -> GameResult {
        if button == MouseButton::Left {
            let commands = self.controls.pointer_up(&self.last);
            self.queue(commands);
        }
        Ok(())
    }

    fn mouse_enter_or_leave(&mut self, _ctx: &mut Context, entered: bool) -> GameResult {
        if !entered {
            let commands = self.controls.pointer_left(&self.last);
            self.queue(commands);
        }
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        let Some(key) = input.keycode else {
            return Ok(());
        };
        match key {
            KeyCode::Escape => ctx.request_quit(),
            KeyCode::Key0 => self.queue([InputCommand::SetMaterial(ObstacleMaterial::Off)]),
            KeyCode::Key1 => self.queue([InputCommand::SetMaterial(ObstacleMaterial::Concrete)]),
            KeyCode::Key2 => self.queue([InputCommand::SetMaterial(ObstacleMaterial::Rubber)]),
            KeyCode::R => {
                self.queue([InputCommand::Reset]);
                self.trail.clear();
            }
            KeyCode::D => {
                let enabled = !self.last.state.damping_enabled;
                self.queue([InputCommand::SetDampingEnabled(enabled)]);
            }
            KeyCode::LBracket => self.nudge(Parameter::Damping, -DAMPING_STEP, (0.0, 1.0)),
            KeyCode::RBracket => self.nudge(Parameter::Damping, DAMPING_STEP, (0.0, 1.0)),
            KeyCode::G => self.nudge(Parameter::Gravity, -GRAVITY_STEP, GRAVITY_RANGE),
            KeyCode::H => self.nudge(Parameter::Gravity, GRAVITY_STEP, GRAVITY_RANGE),
            KeyCode::Up => self.nudge(Parameter::Length(Bob::Upper), LENGTH_STEP, LENGTH_RANGE),
            KeyCode::Down => self.nudge(Parameter::Length(Bob::Upper), -LENGTH_STEP, LENGTH_RANGE),
            KeyCode::Right => self.nudge(Parameter::Length(Bob::Lower), LENGTH_STEP, LENGTH_RANGE),
            KeyCode::Left => self.nudge(Parameter::Length(Bob::Lower), -LENGTH_STEP, LENGTH_RANGE),
            KeyCode::M => self.cycle_mass(Bob::Upper),
            KeyCode::N => self.cycle_mass(Bob::Lower),
            KeyCode::Minus => {
                let command = resize_obstacle(self.last.obstacle.size, -OBSTACLE_SIZE_STEP);
                self.queue([command]);
            }
            KeyCode::Equals => {
                let command = resize_obstacle(self.last.obstacle.size, OBSTACLE_SIZE_STEP);
                self.queue([command]);
            }
            _ => (),
        }
        Ok(())
    }

    fn resize_event(&mut self, _ctx: &mut Context, width: f32, height: f32) -> GameResult {
        debug!(width, height, "window resized");
        self.screen_width = width;
        self.screen_height = height;
        self.queue([InputCommand::SetOrigin(origin_for(width, height))]);
        self.trail.clear();
        Ok(())
    }
}

pub fn run(config: PendulumConfig) -> GameResult {
    let (width, height) = crate::config::window_size();
    let (mut ctx, event_loop) = ContextBuilder::new("pendulum_viewer", "double_pendulum")
        .window_setup(conf::WindowSetup::default().title("Double Pendulum"))
        .window_mode(conf::WindowMode::default().dimensions(width, height).resizable(true))
        .build()?;

    let state = MainState::new(&mut ctx, config)?;
    event::run(ctx, event_loop, state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_resize_is_clamped() {
        assert_eq!(resize_obstacle(40.0, OBSTACLE_SIZE_STEP), InputCommand::SetObstacleSize(45.0));
        assert_eq!(resize_obstacle(12.0, -OBSTACLE_SIZE_STEP), InputCommand::SetObstacleSize(10.0));
        assert_eq!(resize_obstacle(118.0, OBSTACLE_SIZE_STEP), InputCommand::SetObstacleSize(120.0));
    }

    #[test]
    fn test_obstacle_resize_reaches_engine() {
        let mut engine = Engine::default();
        let command = resize_obstacle(engine.obstacle().size, -OBSTACLE_SIZE_STEP);
        let snapshot = engine.tick(0.016, &[command]);
        assert_eq!(snapshot.obstacle.size, 35.0);
        assert_eq!(snapshot.obstacle.radius(), 17.5);
    }

    #[test]
    fn test_origin_follows_window() {
        let origin = origin_for(1750.0, 900.0);
        assert_eq!(origin, Vec2::new(1000.0, 300.0));
    }
}
