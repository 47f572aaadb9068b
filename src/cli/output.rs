//! Output formatting utilities

use crate::domain::DayRecord;

/// Format recorded days, newest first, with per-exercise counts
pub fn format_history(days: &[DayRecord], limit: Option<usize>) -> String {
    if days.is_empty() {
        return "No exercises recorded".to_string();
    }

    let shown = limit.unwrap_or(days.len());
    let mut output = String::new();
    for day in days.iter().take(shown) {
        output.push_str(&format!("{}\n", day.date.format("%-d %b %Y")));
        for name in day.unique_exercise_names() {
            output.push_str(&format!("  {}  x{}\n", name, day.count_of(&name)));
        }
    }
    output
}

/// Format a seven-day window as a table: one row per day, one column per
/// exercise plus a total
pub fn format_week(week: &[DayRecord], exercises: &[String]) -> String {
    let mut output = String::from("Date      ");
    for name in exercises {
        output.push_str(&format!("  {}", name));
    }
    output.push_str("  Total\n");

    for day in week {
        output.push_str(&day.date.format("%a %d %b").to_string());
        for name in exercises {
            output.push_str(&format!(
                "  {:>width$}",
                day.count_of(name),
                width = name.chars().count()
            ));
        }
        output.push_str(&format!("  {:>5}\n", day.total()));
    }
    output
}

/// Format the exercise catalog for display
pub fn format_exercise_list(exercises: &[String]) -> String {
    let mut output = String::new();
    for name in exercises {
        output.push_str(&format!("{}\n", name));
    }
    output
}
