//! Seven-day activity window

use crate::domain::{DayRecord, History};
use chrono::{Duration, NaiveDate};

/// Number of days in a report window
pub const WEEK_LENGTH: i64 = 7;

/// The seven days ending at `end`, oldest first.
///
/// Days without a record are filled with blank records so every calendar
/// day in the window is present.
pub fn week_ending(history: &History, end: NaiveDate) -> Vec<DayRecord> {
    (0..WEEK_LENGTH)
        .rev()
        .map(|offset| end - Duration::days(offset))
        .map(|date| {
            history
                .day_on(date)
                .cloned()
                .unwrap_or_else(|| DayRecord::blank(date))
        })
        .collect()
}

/// Default report end: the most recent recorded day, or `today` when empty
pub fn report_end(history: &History, today: NaiveDate) -> NaiveDate {
    history.latest().map(|day| day.date).unwrap_or(today)
}
