//! Error types for hiitfit

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hiitfit
#[derive(Debug, Error)]
pub enum HiitError {
    #[error("Failed to load history from {}: {reason}", path.display())]
    LoadFailure { path: PathBuf, reason: String },

    #[error("Failed to save history to {}: {reason}", path.display())]
    SaveFailure { path: PathBuf, reason: String },

    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Invalid time reference: {0}")]
    InvalidTimeReference(String),

    #[error("Cannot record exercises in the future: {0}")]
    FutureDate(NaiveDate),

    #[error("No history recorded on {0}")]
    DayNotFound(NaiveDate),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HiitError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            HiitError::InvalidTimeReference(_) | HiitError::FutureDate(_) => 3,
            HiitError::UnknownExercise(_) => 4,
            HiitError::LoadFailure { .. } => 5,
            HiitError::SaveFailure { .. } => 6,
            HiitError::DayNotFound(_) => 7,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            HiitError::LoadFailure { path, .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that {} is a valid hiitfit history file\n\
                    • Restore the file from a backup, or move it aside to start fresh\n\
                    • Point HIITFIT_HOME at a different data directory",
                    self,
                    path.display()
                )
            }
            HiitError::SaveFailure { .. } => {
                format!(
                    "{}\n\n\
                    The exercise is recorded for this session but was not written to disk.\n\
                    Suggestions:\n\
                    • Check free disk space and directory permissions\n\
                    • Retry the command once the problem is fixed",
                    self
                )
            }
            HiitError::UnknownExercise(name) => {
                format!(
                    "Unknown exercise: '{}'\n\n\
                    Suggestions:\n\
                    • List the catalog: hiitfit config exercises\n\
                    • Exercise names are case-insensitive (e.g., 'step up')\n\
                    • Extend the catalog: hiitfit config exercises 'Burpee,Squat,Plank'",
                    name
                )
            }
            HiitError::InvalidTimeReference(ref_str) => {
                format!(
                    "Invalid time reference: '{}'\n\n\
                    Valid time references:\n\
                    • today, yesterday\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • last monday, last friday, etc.\n\
                    • Specific dates: DD-MM-YYYY or YYYY-MM-DD\n\n\
                    Examples:\n\
                    hiitfit add squat --on yesterday\n\
                    hiitfit add burpee --on 'last monday'\n\
                    hiitfit add 'sun salute' --on 2025-01-15",
                    ref_str
                )
            }
            HiitError::FutureDate(date) => {
                format!(
                    "Cannot record exercises in the future: {}\n\n\
                    Pick today or an earlier date.",
                    date.format("%d-%m-%Y")
                )
            }
            HiitError::DayNotFound(date) => {
                format!(
                    "No history recorded on {}\n\n\
                    Use 'hiitfit history' to see recorded days.",
                    date.format("%d-%m-%Y")
                )
            }
            HiitError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: hiitfit config history_file history.toml",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using HiitError
pub type Result<T> = std::result::Result<T, HiitError>;
