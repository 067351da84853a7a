mod config;

pub use config::{Config, DisplayConfig, ServiceConfig, SessionSettings};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/quizroom[-dev]/` based on QUIZROOM_ENV.
///
/// Set QUIZROOM_ENV=dev to use the development directory, or
/// QUIZROOM_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("QUIZROOM_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::config_dir()
                .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
                .unwrap_or_else(|| PathBuf::from("."));

            let env = std::env::var("QUIZROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("quizroom-dev")
            } else {
                base_dir.join("quizroom")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::NoConfigDir(format!(
        "{}: {e}",
        dir.display()
    )))?;
    Ok(dir)
}
