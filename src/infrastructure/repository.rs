//! History persistence
//!
//! The history file is TOML with a version tag and one array per day:
//!
//! ```toml
//! version = 1
//! days = [
//!     ["5f0c...", "2024-03-10", ["Squat", "Squat"]],
//!     ["9a1e...", "2024-03-08", ["Burpee"]],
//! ]
//! ```
//!
//! Days are written newest first. On load each day is decoded field by field
//! so one damaged entry degrades to defaults instead of failing the file.

use crate::domain::{DayRecord, History};
use crate::error::{HiitError, Result};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml::Value;
use tracing::debug;
use uuid::Uuid;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a history document could not be used at all
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed history document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unsupported history format version {found} (expected {expected})")]
    UnsupportedVersion { found: i64, expected: u32 },
}

/// Abstract storage for the exercise history
pub trait HistoryRepository {
    /// Where the history lives (used in error messages)
    fn location(&self) -> &Path;

    /// Load the stored history. A missing store yields an empty history.
    fn load(&self) -> Result<History>;

    /// Replace the stored history with `history`
    fn save(&self, history: &History) -> Result<()>;
}

#[derive(Serialize)]
struct StoredHistory<'a> {
    version: u32,
    days: Vec<(String, String, &'a [String])>,
}

#[derive(Deserialize)]
struct RawHistory {
    version: Option<i64>,
    #[serde(default)]
    days: Vec<Value>,
}

/// File system implementation of HistoryRepository
#[derive(Debug, Clone)]
pub struct FileHistoryRepository {
    path: PathBuf,
}

impl FileHistoryRepository {
    pub fn new(path: PathBuf) -> Self {
        FileHistoryRepository { path }
    }

    fn load_failure(&self, reason: impl ToString) -> HiitError {
        HiitError::LoadFailure {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn save_failure(&self, reason: impl ToString) -> HiitError {
        HiitError::SaveFailure {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    /// Write to a temp file in the same directory, sync it, then rename it
    /// over the target so readers never observe a partial file.
    fn write_atomic(&self, contents: &[u8]) -> std::io::Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("history.toml");
        let tmp_path = parent.join(format!(
            ".{}.hiitfit-tmp-{}",
            file_name,
            std::process::id()
        ));

        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        #[cfg(unix)]
        {
            if let Ok(dir) = File::open(&parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

impl HistoryRepository for FileHistoryRepository {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<History> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history file yet");
                return Ok(History::new());
            }
            Err(e) => return Err(self.load_failure(e)),
        };

        let history = decode_history(&contents, Local::now().date_naive())
            .map_err(|reason| self.load_failure(reason))?;

        debug!(
            path = %self.path.display(),
            days = history.len(),
            "loaded history"
        );
        Ok(history)
    }

    fn save(&self, history: &History) -> Result<()> {
        let contents = encode_history(history).map_err(|e| self.save_failure(e))?;

        self.write_atomic(contents.as_bytes())
            .map_err(|e| self.save_failure(e))?;

        debug!(
            path = %self.path.display(),
            days = history.len(),
            "saved history"
        );
        Ok(())
    }
}

/// Serialize a history to the versioned TOML document
pub fn encode_history(history: &History) -> std::result::Result<String, toml::ser::Error> {
    let stored = StoredHistory {
        version: FORMAT_VERSION,
        days: history
            .days()
            .iter()
            .map(|day| {
                (
                    day.id.to_string(),
                    day.date.format(DATE_FORMAT).to_string(),
                    day.exercises.as_slice(),
                )
            })
            .collect(),
    };
    toml::to_string_pretty(&stored)
}

/// Parse a history document.
///
/// Fails only when the document as a whole is unusable; individual days fall
/// back to `today` and an empty exercise list.
pub fn decode_history(
    contents: &str,
    today: NaiveDate,
) -> std::result::Result<History, DecodeError> {
    let raw: RawHistory = toml::from_str(contents)?;

    if let Some(version) = raw.version {
        if version < 1 || version > FORMAT_VERSION as i64 {
            return Err(DecodeError::UnsupportedVersion {
                found: version,
                expected: FORMAT_VERSION,
            });
        }
    }

    let records = raw
        .days
        .iter()
        .map(|entry| decode_record(entry, today))
        .collect();
    Ok(History::from_records(records))
}

/// Decode one `[id, date, exercises]` entry, substituting defaults for
/// missing or malformed fields
pub fn decode_record(entry: &Value, today: NaiveDate) -> DayRecord {
    let fields = entry.as_array().map(Vec::as_slice).unwrap_or(&[]);

    let id = fields
        .first()
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let date = fields.get(1).and_then(decode_date).unwrap_or(today);
    let exercises = fields.get(2).and_then(decode_exercises).unwrap_or_default();

    DayRecord {
        id,
        date,
        exercises,
    }
}

fn decode_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(s.trim())
                    .ok()
                    .map(|dt| dt.date_naive())
            }),
        Value::Datetime(dt) => {
            let date = dt.date?;
            NaiveDate::from_ymd_opt(date.year as i32, date.month as u32, date.day as u32)
        }
        _ => None,
    }
}

fn decode_exercises(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_history() -> History {
        let mut history = History::new();
        history.record_exercise(date(2024, 3, 8), "Burpee");
        history.record_exercise(date(2024, 3, 10), "Squat");
        history.record_exercise(date(2024, 3, 10), "Step Up");
        history.record_exercise(date(2024, 3, 10), "Squat");
        history
    }

    fn summary(history: &History) -> Vec<(NaiveDate, Vec<String>)> {
        history
            .days()
            .iter()
            .map(|day| (day.date, day.exercises.clone()))
            .collect()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let repo = FileHistoryRepository::new(temp.path().join("history.toml"));

        let history = repo.load().unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let repo = FileHistoryRepository::new(temp.path().join("history.toml"));
        let history = sample_history();

        repo.save(&history).unwrap();
        let loaded = repo.load().unwrap();

        assert_eq!(summary(&loaded), summary(&history));
        let ids: Vec<_> = history.days().iter().map(|d| d.id).collect();
        let loaded_ids: Vec<_> = loaded.days().iter().map(|d| d.id).collect();
        assert_eq!(loaded_ids, ids);
    }

    #[test]
    fn test_round_trip_empty_history() {
        let temp = TempDir::new().unwrap();
        let repo = FileHistoryRepository::new(temp.path().join("history.toml"));

        repo.save(&History::new()).unwrap();
        assert!(repo.path.exists());
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_awkward_names() {
        let temp = TempDir::new().unwrap();
        let repo = FileHistoryRepository::new(temp.path().join("history.toml"));
        let mut history = History::new();
        history.record_exercise(date(2024, 1, 1), "Push \"Up\"");
        history.record_exercise(date(2024, 1, 1), "Sit-up, slow\n");

        repo.save(&history).unwrap();
        assert_eq!(summary(&repo.load().unwrap()), summary(&history));
    }

    #[test]
    fn test_saved_document_shape() {
        let encoded = encode_history(&sample_history()).unwrap();
        assert!(encoded.contains("version = 1"));
        assert!(encoded.contains("2024-03-10"));

        let value: toml::Table = toml::from_str(&encoded).unwrap();
        let days = value["days"].as_array().unwrap();
        assert_eq!(days.len(), 2);
        let first = days[0].as_array().unwrap();
        assert_eq!(first.len(), 3);
        assert!(Uuid::parse_str(first[0].as_str().unwrap()).is_ok());
        assert_eq!(first[1].as_str(), Some("2024-03-10"));
        assert_eq!(first[2].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("data");
        let repo = FileHistoryRepository::new(dir.join("history.toml"));

        repo.save(&sample_history()).unwrap();
        repo.save(&sample_history()).unwrap();

        let names: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["history.toml".to_string()]);
    }

    #[test]
    fn test_save_failure_when_directory_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let repo = FileHistoryRepository::new(blocker.join("history.toml"));

        match repo.save(&sample_history()).unwrap_err() {
            HiitError::SaveFailure { path, .. } => assert_eq!(path, blocker.join("history.toml")),
            other => panic!("Expected SaveFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_file_is_load_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("history.toml");
        fs::write(&path, "days = [[[ this is not toml").unwrap();
        let repo = FileHistoryRepository::new(path);

        assert!(matches!(
            repo.load().unwrap_err(),
            HiitError::LoadFailure { .. }
        ));
    }

    #[test]
    fn test_days_not_an_array_is_load_failure() {
        let today = date(2024, 3, 15);
        assert!(matches!(
            decode_history("days = \"yesterday\"\n", today).unwrap_err(),
            DecodeError::Parse(_)
        ));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let today = date(2024, 3, 15);
        let err = decode_history("version = 2\ndays = []\n", today).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedVersion {
                found: 2,
                expected: 1
            }
        ));
        assert!(err.to_string().contains("version 2"));
    }

    #[test]
    fn test_missing_version_is_accepted() {
        let today = date(2024, 3, 15);
        let doc = "days = [[\"x\", \"2024-03-10\", [\"Squat\"]]]\n";
        let history = decode_history(doc, today).unwrap();
        assert_eq!(history.days()[0].exercises, vec!["Squat"]);
    }

    #[test]
    fn test_empty_document_is_empty_history() {
        let history = decode_history("", date(2024, 3, 15)).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_malformed_records_use_defaults() {
        let today = date(2024, 3, 15);
        let doc = r#"
version = 1
days = [
    ["not-a-uuid", "2024-03-10", ["Squat"]],
    ["id", "bogus-date", ["Burpee"]],
    ["id", "2024-03-08", "Step Up"],
    ["id", "2024-03-07", ["Squat", 3]],
    ["id"],
    "not even an array",
]
"#;
        let history = decode_history(doc, today).unwrap();

        // "bogus-date", ["id"] and the bare string all default to today and merge
        let head = &history.days()[0];
        assert_eq!(head.date, today);
        assert_eq!(head.exercises, vec!["Burpee"]);

        let squat_day = history.day_on(date(2024, 3, 10)).unwrap();
        assert_eq!(squat_day.exercises, vec!["Squat"]);

        assert!(history.day_on(date(2024, 3, 8)).unwrap().is_empty());
        assert!(history.day_on(date(2024, 3, 7)).unwrap().is_empty());
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_decode_toml_dates_and_timestamps() {
        let today = date(2024, 3, 15);
        let doc = r#"
days = [
    ["a", 2024-03-10, ["Squat"]],
    ["b", "2024-03-09T23:30:00Z", ["Burpee"]],
    ["c", 2024-03-08T07:00:00, ["Step Up"]],
]
"#;
        let history = decode_history(doc, today).unwrap();
        let dates: Vec<_> = history.days().iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 3, 10), date(2024, 3, 9), date(2024, 3, 8)]
        );
    }

    #[test]
    fn test_decode_record_keeps_valid_id() {
        let id = Uuid::new_v4();
        let entry = Value::Array(vec![
            Value::String(id.to_string()),
            Value::String("2024-03-10".to_string()),
            Value::Array(vec![]),
        ]);
        let record = decode_record(&entry, date(2024, 3, 15));
        assert_eq!(record.id, id);
        assert!(record.is_empty());
    }

    mod properties {
        use super::*;
        use chrono::Duration;
        use proptest::prelude::*;

        fn history_strategy() -> impl Strategy<Value = History> {
            prop::collection::vec((0i64..3650, "\\PC{0,16}"), 0..60).prop_map(|entries| {
                let mut history = History::new();
                for (offset, name) in entries {
                    history.record_exercise(date(2020, 1, 1) + Duration::days(offset), &name);
                }
                history
            })
        }

        proptest! {
            #[test]
            fn prop_encode_then_decode_preserves_history(history in history_strategy()) {
                let encoded = encode_history(&history).unwrap();
                let decoded = decode_history(&encoded, date(2030, 1, 1)).unwrap();

                prop_assert_eq!(summary(&decoded), summary(&history));
                let ids: Vec<_> = history.days().iter().map(|d| d.id).collect();
                let decoded_ids: Vec<_> = decoded.days().iter().map(|d| d.id).collect();
                prop_assert_eq!(decoded_ids, ids);
            }
        }
    }
}
