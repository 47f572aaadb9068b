//! Time reference parsing and resolution

use crate::error::{HiitError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A day the user refers to when back-filling history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeReference {
    /// Current day
    Today,
    /// Previous day
    Yesterday,
    /// Current/most recent occurrence of a weekday
    Weekday(Weekday),
    /// Previous occurrence of a weekday (strictly before today)
    LastWeekday(Weekday),
    /// Specific date
    SpecificDate(NaiveDate),
}

impl TimeReference {
    /// Parse a time reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => Ok(TimeReference::Today),
            "yesterday" => Ok(TimeReference::Yesterday),
            _ if normalized.starts_with("last ") => Self::parse_weekday(&normalized[5..])
                .map(TimeReference::LastWeekday)
                .ok_or_else(|| HiitError::InvalidTimeReference(input.to_string())),
            _ => {
                if let Some(weekday) = Self::parse_weekday(&normalized) {
                    return Ok(TimeReference::Weekday(weekday));
                }
                NaiveDate::parse_from_str(&normalized, "%d-%m-%Y")
                    .or_else(|_| NaiveDate::parse_from_str(&normalized, "%Y-%m-%d"))
                    .map(TimeReference::SpecificDate)
                    .map_err(|_| HiitError::InvalidTimeReference(input.to_string()))
            }
        }
    }

    fn parse_weekday(day_str: &str) -> Option<Weekday> {
        match day_str.trim() {
            "monday" => Some(Weekday::Mon),
            "tuesday" => Some(Weekday::Tue),
            "wednesday" => Some(Weekday::Wed),
            "thursday" => Some(Weekday::Thu),
            "friday" => Some(Weekday::Fri),
            "saturday" => Some(Weekday::Sat),
            "sunday" => Some(Weekday::Sun),
            _ => None,
        }
    }

    /// Resolve this time reference to an actual date
    pub fn resolve(&self, base_date: NaiveDate) -> NaiveDate {
        match self {
            TimeReference::Today => base_date,
            TimeReference::Yesterday => base_date - Duration::days(1),
            TimeReference::Weekday(target_day) => {
                base_date - Duration::days(Self::days_back(base_date, *target_day))
            }
            TimeReference::LastWeekday(target_day) => {
                let days_back = match Self::days_back(base_date, *target_day) {
                    0 => 7,
                    days => days,
                };
                base_date - Duration::days(days_back)
            }
            TimeReference::SpecificDate(date) => *date,
        }
    }

    /// Resolve against `today`, rejecting dates after it
    pub fn resolve_past(&self, today: NaiveDate) -> Result<NaiveDate> {
        let date = self.resolve(today);
        if date > today {
            return Err(HiitError::FutureDate(date));
        }
        Ok(date)
    }

    /// Days from the most recent `target_day` (inclusive of today) to `base_date`
    fn days_back(base_date: NaiveDate, target_day: Weekday) -> i64 {
        let current = base_date.weekday().num_days_from_monday();
        let target = target_day.num_days_from_monday();
        ((current + 7 - target) % 7) as i64
    }
}
