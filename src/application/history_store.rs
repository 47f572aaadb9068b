//! Owning handle over the exercise history
//!
//! The store hydrates the history once when opened, writes it back after
//! every mutation and tells subscribers about each change. It takes `&mut self`
//! for all mutations; callers sharing it across threads must wrap it in their
//! own lock.

use crate::domain::{DayRecord, History};
use crate::error::{HiitError, Result};
use crate::infrastructure::HistoryRepository;
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

type Subscriber = Box<dyn FnMut(&[DayRecord])>;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct HistoryStore<R: HistoryRepository> {
    repository: R,
    history: History,
    load_error: Option<HiitError>,
    subscribers: Vec<Subscriber>,
    today: fn() -> NaiveDate,
}

impl<R: HistoryRepository> HistoryStore<R> {
    /// Load the history from `repository`.
    ///
    /// A load failure is not fatal: the store starts empty and reports it
    /// through [`HistoryStore::load_failed`].
    pub fn open(repository: R) -> Self {
        let (history, load_error) = match repository.load() {
            Ok(history) => (history, None),
            Err(e) => {
                debug!(error = %e, "starting with empty history");
                (History::new(), Some(e))
            }
        };

        HistoryStore {
            repository,
            history,
            load_error,
            subscribers: Vec::new(),
            today: local_today,
        }
    }

    /// Replace the clock used by [`HistoryStore::record_exercise_today`]
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn load_failed(&self) -> bool {
        self.load_error.is_some()
    }

    pub fn load_error(&self) -> Option<&HiitError> {
        self.load_error.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn days(&self) -> &[DayRecord] {
        self.history.days()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// Register a callback fired with the full day list after every mutation
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&[DayRecord]) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Record an exercise on any date.
    ///
    /// Persisting is best effort here: a failed save is logged and the
    /// in-memory history keeps the new entry.
    pub fn record_exercise(&mut self, date: NaiveDate, exercise: &str) {
        info!(%date, exercise, "recording exercise");
        self.history.record_exercise(date, exercise);

        if let Err(e) = self.save() {
            warn!(error = %e, %date, exercise, "history not persisted");
        }
        self.notify();
    }

    /// Record an exercise completed just now.
    ///
    /// Unlike [`HistoryStore::record_exercise`], a failed save is returned so
    /// the caller can show it and retry. The in-memory entry is kept.
    pub fn record_exercise_today(&mut self, exercise: &str) -> Result<NaiveDate> {
        let today = self.today();
        info!(date = %today, exercise, "recording exercise for today");
        self.history.record_exercise_today(today, exercise);

        let saved = self.save();
        self.notify();
        saved.map(|_| today)
    }

    /// Delete the whole record for `date`
    pub fn remove_day(&mut self, date: NaiveDate) -> Result<DayRecord> {
        let removed = self
            .history
            .remove_day(date)
            .ok_or(HiitError::DayNotFound(date))?;
        info!(%date, exercises = removed.total(), "removed day");

        let saved = self.save();
        self.notify();
        saved.map(|_| removed)
    }

    /// Write the current history to the repository
    pub fn save(&self) -> Result<()> {
        self.repository.save(&self.history)
    }

    fn notify(&mut self) {
        let days = self.history.days();
        for subscriber in &mut self.subscribers {
            subscriber(days);
        }
    }
}
