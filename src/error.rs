//! Error types for engine input and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons an input command is refused before it reaches the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// A physical parameter that would poison the equations of motion.
    #[error("Invalid value for {name}: {value} ({requirement})")]
    DegenerateParameter {
        /// Parameter that was being set.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// What the value must satisfy.
        requirement: &'static str,
    },

    /// A pointer or obstacle coordinate that is NaN or infinite.
    #[error("Non-finite {name} position ({x}, {y})")]
    NonFinitePosition {
        /// Which position was being set.
        name: &'static str,
        x: f64,
        y: f64,
    },

    /// Drags may only start while the obstacle is switched off.
    #[error("Cannot start dragging while the obstacle is active")]
    DragWhileObstacleActive,
}

/// Result type for command handling.
pub type CommandResult<T> = std::result::Result<T, CommandError>;

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid JSON for the expected shape.
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config parsed but holds a value the engine cannot run with.
    #[error("Invalid config: {0}")]
    Invalid(#[from] CommandError),

    /// A tunable outside its allowed range.
    #[error("Invalid config value for {name}: {value} ({requirement})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
