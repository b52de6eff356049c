//! A planar double pendulum engine.
//!
//! [`Engine::tick`] applies pending [`InputCommand`]s, then either moves a held
//! bob kinematically or resolves the obstacle against both bobs and integrates
//! the equations of motion by one fixed step. The returned [`Snapshot`] is all
//! a renderer needs.

pub mod collision;
pub mod common;
pub mod config;
pub mod constraints;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod integration;
pub mod math;
pub mod objects;
pub mod world;

// Re-export key types for easier use
pub use collision::{CollisionReport, CollisionSettings, Obstacle};
pub use common::ObstacleMaterial;
pub use config::{EngineConfig, PendulumConfig, PendulumParams};
pub use constraints::DragTarget;
pub use error::{CommandError, ConfigError};
pub use input::Controls;
pub use math::{Frame, Vec2};
pub use objects::{Bob, SimulationState};
pub use world::{Engine, InputCommand, Mode, Parameter, Snapshot, Trail};
