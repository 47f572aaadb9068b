//! Exercise catalog

use crate::error::{HiitError, Result};

/// Exercises offered out of the box
pub const DEFAULT_EXERCISES: [&str; 4] = ["Burpee", "Squat", "Step Up", "Sun Salute"];

/// The set of exercise names that can be recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseCatalog {
    names: Vec<String>,
}

impl ExerciseCatalog {
    pub fn new(names: Vec<String>) -> Self {
        ExerciseCatalog { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Match user input against the catalog (case-insensitive, surrounding
    /// whitespace ignored) and return the catalog spelling
    pub fn resolve(&self, input: &str) -> Result<&str> {
        let wanted = input.trim().to_lowercase();
        self.names
            .iter()
            .find(|name| name.to_lowercase() == wanted)
            .map(String::as_str)
            .ok_or_else(|| HiitError::UnknownExercise(input.to_string()))
    }

    /// Parse a comma-separated list of names, dropping blanks and duplicates
    pub fn parse_list(input: &str) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        for part in input.split(',') {
            let name = part.trim();
            if name.is_empty() {
                continue;
            }
            let folded = name.to_lowercase();
            if !names.iter().any(|n| n.to_lowercase() == folded) {
                names.push(name.to_string());
            }
        }

        if names.is_empty() {
            return Err(HiitError::Config(
                "Exercise catalog cannot be empty".to_string(),
            ));
        }

        Ok(ExerciseCatalog { names })
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        ExerciseCatalog::new(DEFAULT_EXERCISES.iter().map(|s| s.to_string()).collect())
    }
}
