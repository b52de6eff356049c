use std::{env, path::PathBuf};

use double_pendulum::PendulumConfig;
use tracing::{info, warn};

// Host settings read from the environment.

pub fn config_path() -> Option<PathBuf> {
    env::var("PENDULUM_CONFIG").ok().map(PathBuf::from)
}

pub fn window_size() -> (f32, f32) {
    let read = |key: &str, default: f32| {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    };
    (read("PENDULUM_WIDTH", 1280.0), read("PENDULUM_HEIGHT", 800.0))
}

/// The config named by `PENDULUM_CONFIG`, or the defaults when it is unset or
/// unusable.
pub fn load() -> PendulumConfig {
    let Some(path) = config_path() else {
        return PendulumConfig::default();
    };
    match PendulumConfig::load(&path) {
        Ok(config) => {
            info!(path = %path.display(), "loaded config");
            config
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "falling back to default config");
            PendulumConfig::default()
        }
    }
}
