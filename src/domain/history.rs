//! The exercise history ledger
//!
//! Days are kept newest first with at most one record per calendar date.
//! Every mutation preserves that ordering; nothing here touches the disk.

use crate::domain::DayRecord;
use chrono::NaiveDate;
use tracing::warn;

/// Ordered collection of day records, most recent first
#[derive(Debug, Clone, Default)]
pub struct History {
    days: Vec<DayRecord>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Build a history from records in arbitrary order.
    ///
    /// Records are sorted newest first and records sharing a date are merged,
    /// keeping the first record's id and concatenating exercises in input order.
    pub fn from_records(records: Vec<DayRecord>) -> Self {
        if Self::is_normalized(&records) {
            return History { days: records };
        }

        warn!(
            records = records.len(),
            "history records out of order or duplicated; normalizing"
        );

        let mut history = History::new();
        for record in records {
            history.merge_record(record);
        }
        history
    }

    /// Record one exercise occurrence on an arbitrary date.
    ///
    /// Scans from the newest end for the first day not after `date`: appends to
    /// it on a match, inserts a new day in front of it otherwise, or appends a
    /// new oldest day when nothing qualifies.
    pub fn record_exercise(&mut self, date: NaiveDate, exercise: &str) {
        match self.days.iter().position(|day| day.date <= date) {
            Some(index) if self.days[index].date == date => {
                self.days[index].exercises.push(exercise.to_string());
            }
            Some(index) => {
                self.days
                    .insert(index, DayRecord::with_exercise(date, exercise));
            }
            None => {
                self.days.push(DayRecord::with_exercise(date, exercise));
            }
        }
    }

    /// Record one exercise occurrence for `today`.
    ///
    /// Only the head record is inspected. A clock that runs behind the newest
    /// record falls through to the scanning insert so ordering still holds.
    pub fn record_exercise_today(&mut self, today: NaiveDate, exercise: &str) {
        match self.days.first().map(|head| head.date) {
            Some(latest) if latest == today => {
                self.days[0].exercises.push(exercise.to_string());
            }
            Some(latest) if latest > today => {
                warn!(%today, %latest, "today is older than the latest recorded day");
                self.record_exercise(today, exercise);
            }
            _ => {
                self.days.insert(0, DayRecord::with_exercise(today, exercise));
            }
        }
    }

    /// Remove the whole record for `date`, returning it if present
    pub fn remove_day(&mut self, date: NaiveDate) -> Option<DayRecord> {
        let index = self.days.iter().position(|day| day.date == date)?;
        Some(self.days.remove(index))
    }

    /// All days, most recent first
    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    /// The most recent day, if any
    pub fn latest(&self) -> Option<&DayRecord> {
        self.days.first()
    }

    /// The record for `date`, if any
    pub fn day_on(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn merge_record(&mut self, record: DayRecord) {
        match self.days.iter().position(|day| day.date <= record.date) {
            Some(index) if self.days[index].date == record.date => {
                self.days[index].exercises.extend(record.exercises);
            }
            Some(index) => self.days.insert(index, record),
            None => self.days.push(record),
        }
    }

    fn is_normalized(records: &[DayRecord]) -> bool {
        records.windows(2).all(|pair| pair[0].date > pair[1].date)
    }
}
