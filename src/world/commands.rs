use serde::{Deserialize, Serialize};

use crate::common::ObstacleMaterial;
use crate::error::{CommandError, CommandResult};
use crate::math::vec2::Vec2;
use crate::objects::{Bob, SimulationState};

/// A tunable physical parameter of the pendulum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Gravity,
    Length(Bob),
    Mass(Bob),
    Damping,
}

impl Parameter {
    pub fn name(self) -> &'static str {
        match self {
            Parameter::Gravity => "g",
            Parameter::Length(Bob::Upper) => "l1",
            Parameter::Length(Bob::Lower) => "l2",
            Parameter::Mass(Bob::Upper) => "m1",
            Parameter::Mass(Bob::Lower) => "m2",
            Parameter::Damping => "damping",
        }
    }

    /// Checks that `value` cannot push the equations of motion into a
    /// division by zero or NaN.
    pub fn validate(self, value: f64) -> CommandResult<f64> {
        let reject = |requirement| {
            Err(CommandError::DegenerateParameter {
                name: self.name(),
                value,
                requirement,
            })
        };

        if !value.is_finite() {
            return reject("must be finite");
        }
        match self {
            Parameter::Length(_) | Parameter::Mass(_) if value <= 0.0 => reject("must be > 0"),
            Parameter::Damping if value < 0.0 => reject("must be >= 0"),
            _ => Ok(value),
        }
    }

    pub fn get(self, state: &SimulationState) -> f64 {
        match self {
            Parameter::Gravity => state.g,
            Parameter::Length(bob) => state.length(bob),
            Parameter::Mass(bob) => state.mass(bob),
            Parameter::Damping => state.damping,
        }
    }

    /// Validates and writes the parameter. Changing a rod length or a mass
    /// stops the pendulum, since the old velocities no longer describe a
    /// consistent motion.
    pub fn set(self, state: &mut SimulationState, value: f64) -> CommandResult<()> {
        let value = self.validate(value)?;
        let slot = match self {
            Parameter::Gravity => &mut state.g,
            Parameter::Length(Bob::Upper) => &mut state.l1,
            Parameter::Length(Bob::Lower) => &mut state.l2,
            Parameter::Mass(Bob::Upper) => &mut state.m1,
            Parameter::Mass(Bob::Lower) => &mut state.m2,
            Parameter::Damping => &mut state.damping,
        };
        *slot = value;

        if matches!(self, Parameter::Length(_) | Parameter::Mass(_)) {
            state.stop();
        }
        Ok(())
    }
}

/// Everything the input layer can ask of the engine between two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputCommand {
    SetParameter(Parameter, f64),
    /// Toggling damping stops the pendulum; switching it off also zeroes the
    /// coefficient.
    SetDampingEnabled(bool),
    SetMaterial(ObstacleMaterial),
    MoveObstacle(Vec2),
    SetObstacleSize(f64),
    /// Grab a bob at the last pointer position.
    BeginDrag(Bob),
    UpdatePointer(Vec2),
    EndDrag,
    Reset,
    /// Move the pivot in display space, e.g. after a window resize.
    SetOrigin(Vec2),
}

pub(crate) fn check_position(name: &'static str, position: Vec2) -> CommandResult<Vec2> {
    if position.is_finite() {
        Ok(position)
    } else {
        Err(CommandError::NonFinitePosition {
            name,
            x: position.x,
            y: position.y,
        })
    }
}
