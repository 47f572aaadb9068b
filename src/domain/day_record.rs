//! One calendar day of exercise activity

use chrono::NaiveDate;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Exercises completed on a single calendar day.
///
/// `id` identifies the record for list diffing only; it plays no part in
/// ordering or content comparison.
#[derive(Debug, Clone)]
pub struct DayRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub exercises: Vec<String>,
}

impl DayRecord {
    /// Create a record with a fresh identifier
    pub fn new(date: NaiveDate, exercises: Vec<String>) -> Self {
        DayRecord {
            id: Uuid::new_v4(),
            date,
            exercises,
        }
    }

    /// Create a record holding a single exercise occurrence
    pub fn with_exercise(date: NaiveDate, exercise: &str) -> Self {
        Self::new(date, vec![exercise.to_string()])
    }

    /// Create a record with no exercises (used to fill report gaps)
    pub fn blank(date: NaiveDate) -> Self {
        Self::new(date, Vec::new())
    }

    /// Distinct exercise names, sorted alphabetically
    pub fn unique_exercise_names(&self) -> Vec<String> {
        self.exercises
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of times `exercise` was completed on this day
    pub fn count_of(&self, exercise: &str) -> usize {
        self.exercises.iter().filter(|e| *e == exercise).count()
    }

    /// Total completions on this day
    pub fn total(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}
