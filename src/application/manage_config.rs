//! Config management use case

use crate::domain::ExerciseCatalog;
use crate::error::{HiitError, Result};
use crate::infrastructure::config::validate_history_file;
use crate::infrastructure::Config;
use std::path::PathBuf;

/// Keys accepted by `config`
pub const CONFIG_KEYS: [&str; 2] = ["history_file", "exercises"];

/// Service for managing configuration in a data directory
pub struct ConfigService {
    root: PathBuf,
}

impl ConfigService {
    pub fn new(root: PathBuf) -> Self {
        ConfigService { root }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = Config::load_from_dir(&self.root)?;

        match key {
            "history_file" => Ok(config.history_file),
            "exercises" => Ok(config.exercises.join(", ")),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = Config::load_from_dir(&self.root)?;

        match key {
            "history_file" => {
                validate_history_file(value)?;
                config.history_file = value.trim().to_string();
            }
            "exercises" => {
                config.exercises = ExerciseCatalog::parse_list(value)?.names().to_vec();
            }
            _ => return Err(unknown_key(key)),
        }

        config.save_to_dir(&self.root)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }
}

fn unknown_key(key: &str) -> HiitError {
    HiitError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
