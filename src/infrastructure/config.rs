//! Configuration management

use crate::domain::exercise::{ExerciseCatalog, DEFAULT_EXERCISES};
use crate::error::{HiitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the optional config file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "HIITFIT_HOME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history_file: String,
    pub exercises: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            history_file: "history.toml".to_string(),
            exercises: DEFAULT_EXERCISES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load config from config.toml in the given directory, falling back to
    /// defaults when the file does not exist
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %config_path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(HiitError::Io(e)),
        };

        let config: Config = toml::from_str(&contents)
            .map_err(|e| HiitError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| HiitError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Full path of the history file inside `root`
    pub fn history_path(&self, root: &Path) -> PathBuf {
        root.join(&self.history_file)
    }

    pub fn catalog(&self) -> ExerciseCatalog {
        ExerciseCatalog::new(self.exercises.clone())
    }

    fn validate(&self) -> Result<()> {
        validate_history_file(&self.history_file)?;
        if self.exercises.is_empty() {
            return Err(HiitError::Config(
                "Exercise catalog cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// The history file must be a bare file name inside the data directory
pub fn validate_history_file(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed == CONFIG_FILE
        || trimmed.contains(['/', '\\'])
    {
        return Err(HiitError::Config(format!(
            "Invalid history_file '{}': expected a plain file name such as history.toml",
            name
        )));
    }
    Ok(())
}

/// Resolve the data directory.
///
/// An explicit path wins, then HIITFIT_HOME, then the platform data directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::data_dir()
        .map(|dir| dir.join("hiitfit"))
        .ok_or_else(|| {
            HiitError::Config(format!(
                "Could not determine a data directory. Set {} or pass --dir.",
                HOME_ENV
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.history_file, "history.toml");
        assert_eq!(config.exercises.len(), 4);
        assert!(config.exercises.contains(&"Sun Salute".to_string()));
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("data");
        let config = Config {
            history_file: "log.toml".to_string(),
            exercises: vec!["Plank".to_string(), "Lunge".to_string()],
        };

        config.save_to_dir(&root).unwrap();
        assert!(root.join(CONFIG_FILE).exists());

        let loaded = Config::load_from_dir(&root).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.history_path(&root), root.join("log.toml"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "history_file = \"mine.toml\"\n",
        )
        .unwrap();

        let config = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.history_file, "mine.toml");
        assert_eq!(config.exercises, Config::default().exercises);
    }

    #[test]
    fn test_malformed_config_is_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "exercises = 12\n").unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            HiitError::Config(msg) => assert!(msg.contains("config.toml")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_history_file_validation() {
        assert!(validate_history_file("history.toml").is_ok());
        assert!(validate_history_file("").is_err());
        assert!(validate_history_file("../history.toml").is_err());
        assert!(validate_history_file("sub/history.toml").is_err());
        assert!(validate_history_file("config.toml").is_err());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/hiit"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/hiit"));
    }
}
