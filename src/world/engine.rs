use std::time::Duration;

use tracing::{debug, info, warn};

use super::commands::{check_position, InputCommand};
use crate::collision::{self, CollisionReport, CollisionSettings, Obstacle};
use crate::config::PendulumConfig;
use crate::constraints::DragTarget;
use crate::diagnostics;
use crate::error::{CommandError, CommandResult};
use crate::integration::integrator;
use crate::math::frame::Frame;
use crate::math::vec2::Vec2;
use crate::objects::SimulationState;

/// Who is driving the pendulum this tick.
///
/// Collisions are only checked under free dynamics; a held bob is moved purely
/// kinematically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    FreeDynamics,
    Dragging(DragTarget),
}

impl Mode {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Mode::Dragging(_))
    }
}

/// Everything the renderer needs after a tick. Reading it never touches the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub state: SimulationState,
    /// Display position of the upper bob.
    pub upper: Vec2,
    /// Display position of the lower bob.
    pub lower: Vec2,
    pub mode: Mode,
    pub obstacle: Obstacle,
    /// Which bobs got a collision response during this tick.
    pub collision: CollisionReport,
    /// Total mechanical energy, reported only while damping is enabled.
    pub energy: Option<f64>,
    /// Simulated time at the end of the tick.
    pub time: Duration,
}

impl Snapshot {
    /// False once the simulation has blown up; the host should reset.
    pub fn is_finite(&self) -> bool {
        self.state.is_finite() && self.upper.is_finite() && self.lower.is_finite()
    }
}

/// Owns the pendulum and advances it one fixed step per tick.
pub struct Engine {
    state: SimulationState,
    mode: Mode,
    obstacle: Obstacle,
    frame: Frame,
    collision: CollisionSettings,
    pointer: Vec2,
    clock: Duration,
}

impl Engine {
    /// Creates an engine at the reset pose with its pivot at `origin`.
    pub fn new(config: &PendulumConfig, origin: Vec2) -> Self {
        Self {
            state: config.params.to_state(),
            mode: Mode::FreeDynamics,
            obstacle: Obstacle::new(config.engine.obstacle_size),
            frame: Frame::new(origin, config.engine.render_scale),
            collision: config.engine.collision_settings(),
            pointer: origin,
            clock: Duration::ZERO,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access to the state. Writes made here skip parameter
    /// validation, so degenerate values will surface as NaN in later ticks.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn obstacle(&self) -> &Obstacle {
        &self.obstacle
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Simulated time: the sum of every `dt` ticked so far, saturating at
    /// `Duration::MAX`.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Back to the reset pose with no bob held. Parameters, the obstacle and
    /// the clock are kept.
    pub fn reset(&mut self) {
        self.state.reset_pose();
        self.mode = Mode::FreeDynamics;
        info!("pendulum reset");
    }

    /// Applies a single input command immediately.
    pub fn apply(&mut self, command: InputCommand) -> CommandResult<()> {
        match command {
            InputCommand::SetParameter(parameter, value) => {
                parameter.set(&mut self.state, value)?;
                debug!(parameter = parameter.name(), value, "parameter changed");
            }
            InputCommand::SetDampingEnabled(enabled) => {
                self.state.damping_enabled = enabled;
                if !enabled {
                    self.state.damping = 0.0;
                }
                self.state.stop();
                debug!(enabled, "damping toggled");
            }
            InputCommand::SetMaterial(material) => {
                self.obstacle.material = material;
                info!(%material, "obstacle material changed");
            }
            InputCommand::MoveObstacle(position) => {
                self.obstacle.position = check_position("obstacle", position)?;
            }
            InputCommand::SetObstacleSize(size) => {
                if !(size.is_finite() && size > 0.0) {
                    return Err(CommandError::DegenerateParameter {
                        name: "obstacle_size",
                        value: size,
                        requirement: "must be finite and > 0",
                    });
                }
                self.obstacle.size = size;
            }
            InputCommand::BeginDrag(bob) => {
                if self.obstacle.is_active() {
                    return Err(CommandError::DragWhileObstacleActive);
                }
                self.mode = Mode::Dragging(DragTarget::new(bob, self.pointer));
                debug!(?bob, "drag started");
            }
            InputCommand::UpdatePointer(position) => {
                self.pointer = check_position("pointer", position)?;
                if let Mode::Dragging(target) = &mut self.mode {
                    target.pointer = self.pointer;
                }
            }
            InputCommand::EndDrag => {
                if self.mode.is_dragging() {
                    self.mode = Mode::FreeDynamics;
                    debug!("drag released");
                }
            }
            InputCommand::Reset => self.reset(),
            InputCommand::SetOrigin(origin) => {
                self.frame.origin = check_position("origin", origin)?;
            }
        }
        Ok(())
    }

    /// Advances the simulation by one step of `dt` seconds.
    ///
    /// Every command is applied, in order, before any physics runs; rejected
    /// commands are logged and skipped. A held bob is then moved kinematically,
    /// otherwise the obstacle is resolved against both bobs and the equations
    /// of motion are integrated. A `dt` that is not strictly positive applies
    /// the commands but leaves the dynamics and the clock alone.
    pub fn tick(&mut self, dt: f64, commands: &[InputCommand]) -> Snapshot {
        for &command in commands {
            if let Err(error) = self.apply(command) {
                warn!(%error, ?command, "input rejected");
            }
        }

        if !(dt > 0.0) {
            return self.snapshot(CollisionReport::default());
        }

        let collision = match self.mode {
            Mode::Dragging(target) => {
                target.apply(&mut self.state, &self.frame);
                CollisionReport::default()
            }
            Mode::FreeDynamics => {
                let report = collision::resolve(
                    &mut self.state,
                    &mut self.obstacle,
                    &self.frame,
                    &self.collision,
                    self.clock,
                );
                integrator::step(&mut self.state, dt);
                report
            }
        };

        self.clock = self
            .clock
            .saturating_add(Duration::try_from_secs_f64(dt).unwrap_or(Duration::MAX));
        self.snapshot(collision)
    }

    /// Current render data without advancing the simulation.
    pub fn snapshot(&self, collision: CollisionReport) -> Snapshot {
        Snapshot {
            state: self.state,
            upper: self.frame.upper_bob(&self.state),
            lower: self.frame.lower_bob(&self.state),
            mode: self.mode,
            obstacle: self.obstacle,
            collision,
            energy: self
                .state
                .damping_enabled
                .then(|| diagnostics::total_energy(&self.state)),
            time: self.clock,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(&PendulumConfig::default(), Vec2::new(400.0, 200.0))
    }
}
