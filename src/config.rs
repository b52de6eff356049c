//! Startup configuration: initial pendulum parameters and engine tunables.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```json
//! { "params": { "m2": 2.0 }, "engine": { "collision_debounce_ms": 150 } }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::collision::CollisionSettings;
use crate::error::{ConfigError, ConfigResult};
use crate::objects::{Bob, SimulationState};
use crate::world::{Parameter, Trail};

/// Physical parameters the pendulum starts with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumParams {
    pub g: f64,
    pub l1: f64,
    pub l2: f64,
    pub m1: f64,
    pub m2: f64,
    pub damping: f64,
    pub damping_enabled: bool,
}

impl PendulumParams {
    pub fn validate(&self) -> ConfigResult<()> {
        let checks = [
            (Parameter::Gravity, self.g),
            (Parameter::Length(Bob::Upper), self.l1),
            (Parameter::Length(Bob::Lower), self.l2),
            (Parameter::Mass(Bob::Upper), self.m1),
            (Parameter::Mass(Bob::Lower), self.m2),
            (Parameter::Damping, self.damping),
        ];
        for (parameter, value) in checks {
            parameter.validate(value)?;
        }
        Ok(())
    }

    /// A state at the reset pose carrying these parameters.
    pub fn to_state(&self) -> SimulationState {
        SimulationState {
            g: self.g,
            l1: self.l1,
            l2: self.l2,
            m1: self.m1,
            m2: self.m2,
            damping: self.damping,
            damping_enabled: self.damping_enabled,
            ..SimulationState::default()
        }
    }
}

impl Default for PendulumParams {
    fn default() -> Self {
        let state = SimulationState::default();
        Self {
            g: state.g,
            l1: state.l1,
            l2: state.l2,
            m1: state.m1,
            m2: state.m2,
            damping: state.damping,
            damping_enabled: state.damping_enabled,
        }
    }
}

/// Display and collision tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Display units per unit of rod length.
    pub render_scale: f64,
    /// Bob radius in display units per unit of mass.
    pub bob_radius_per_mass: f64,
    /// Minimum time between two collision responses.
    pub collision_debounce_ms: u64,
    /// Share of the overlap converted into a positional correction.
    pub correction_factor: f64,
    /// Side of the obstacle square in display units.
    pub obstacle_size: f64,
}

impl EngineConfig {
    pub fn collision_settings(&self) -> CollisionSettings {
        CollisionSettings {
            bob_radius_per_mass: self.bob_radius_per_mass,
            correction_factor: self.correction_factor,
            debounce: Duration::from_millis(self.collision_debounce_ms),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        positive("render_scale", self.render_scale)?;
        positive("obstacle_size", self.obstacle_size)?;
        non_negative("bob_radius_per_mass", self.bob_radius_per_mass)?;
        non_negative("correction_factor", self.correction_factor)?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let collision = CollisionSettings::default();
        Self {
            render_scale: 200.0,
            bob_radius_per_mass: collision.bob_radius_per_mass,
            collision_debounce_ms: collision.debounce.as_millis() as u64,
            correction_factor: collision.correction_factor,
            obstacle_size: 40.0,
        }
    }
}

/// Top-level configuration for an engine and its host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumConfig {
    pub params: PendulumParams,
    pub engine: EngineConfig,
    /// Nominal seconds advanced per tick.
    pub timestep: f64,
    /// Number of lower-bob positions the host keeps for its trail.
    pub trail_capacity: usize,
}

impl PendulumConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: PendulumConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.params.validate()?;
        self.engine.validate()?;
        positive("timestep", self.timestep)?;
        if self.trail_capacity > Trail::MAX_CAPACITY {
            return Err(ConfigError::OutOfRange {
                name: "trail_capacity",
                value: self.trail_capacity as f64,
                requirement: "must be <= 10000",
            });
        }
        Ok(())
    }
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            params: PendulumParams::default(),
            engine: EngineConfig::default(),
            timestep: 0.016,
            trail_capacity: 150,
        }
    }
}

fn positive(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            requirement: "must be finite and > 0",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            requirement: "must be finite and >= 0",
        })
    }
}
