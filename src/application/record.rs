//! Record and remove exercises from the command line

use crate::application::HistoryStore;
use crate::domain::{DayRecord, ExerciseCatalog, TimeReference};
use crate::error::{HiitError, Result};
use crate::infrastructure::{Config, FileHistoryRepository, HistoryRepository};
use chrono::NaiveDate;
use std::path::Path;

/// Open the history configured for the data directory `root`
pub fn open_store(root: &Path, config: &Config) -> HistoryStore<FileHistoryRepository> {
    HistoryStore::open(FileHistoryRepository::new(config.history_path(root)))
}

/// Refuse to write over a history file that failed to load.
///
/// The store keeps its load error, so every later write is refused too.
fn ensure_writable<R: HistoryRepository>(store: &HistoryStore<R>) -> Result<()> {
    match store.load_error() {
        None => Ok(()),
        Some(HiitError::LoadFailure { path, reason }) => Err(HiitError::LoadFailure {
            path: path.clone(),
            reason: reason.clone(),
        }),
        Some(other) => Err(HiitError::LoadFailure {
            path: store.repository().location().to_path_buf(),
            reason: other.to_string(),
        }),
    }
}

/// Mark `exercise` done today. Returns the catalog name and the date used.
pub fn record_done<R: HistoryRepository>(
    store: &mut HistoryStore<R>,
    catalog: &ExerciseCatalog,
    exercise: &str,
) -> Result<(String, NaiveDate)> {
    let name = catalog.resolve(exercise)?.to_string();
    ensure_writable(store)?;

    let date = store.record_exercise_today(&name)?;
    Ok((name, date))
}

/// Add `exercise` on the day `when` refers to (today when absent)
pub fn record_on<R: HistoryRepository>(
    store: &mut HistoryStore<R>,
    catalog: &ExerciseCatalog,
    exercise: &str,
    when: Option<&str>,
) -> Result<(String, NaiveDate)> {
    let name = catalog.resolve(exercise)?.to_string();
    let date = match when {
        Some(when) => TimeReference::parse(when)?.resolve_past(store.today())?,
        None => store.today(),
    };
    ensure_writable(store)?;

    store.record_exercise(date, &name);
    Ok((name, date))
}

/// Remove the whole day `when` refers to
pub fn remove_on<R: HistoryRepository>(
    store: &mut HistoryStore<R>,
    when: &str,
) -> Result<DayRecord> {
    let date = TimeReference::parse(when)?.resolve(store.today());
    ensure_writable(store)?;

    store.remove_day(date)
}
