mod config;
mod watcher;

pub use config::{ClockConfig, Config, CountdownConfig, WeatherConfig, WorldClockConfig};
pub use watcher::ConfigWatcher;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/orbit[-dev]/` based on ORBIT_ENV.
///
/// Set ORBIT_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ORBIT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("orbit-dev")
    } else {
        base_dir.join("orbit")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
