//! Domain layer - Exercise history model and its rules

pub mod day_record;
pub mod exercise;
pub mod history;
pub mod time_ref;
pub mod week;

pub use day_record::DayRecord;
pub use exercise::ExerciseCatalog;
pub use history::History;
pub use time_ref::TimeReference;
