//! Title and body text for the daily Asana task.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use feedback_core::TimeWindow;

use crate::summary::FeedbackSummary;

const WINDOW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// `Daily Feedback Summary - YYYY-MM-DD`, dated by the window's end.
#[must_use]
pub fn format_task_name(window_end: DateTime<Utc>) -> String {
    format!("Daily Feedback Summary - {}", window_end.format("%Y-%m-%d"))
}

/// `YYYY-MM-DD HH:MM to YYYY-MM-DD HH:MM (UTC)`
#[must_use]
pub fn format_window(window: &TimeWindow) -> String {
    format!(
        "{} to {} (UTC)",
        window.start.format(WINDOW_TIME_FORMAT),
        window.end.format(WINDOW_TIME_FORMAT),
    )
}

/// Plain-text task body with the window, both counts with percentages, and
/// the total.
#[must_use]
pub fn format_task_notes(summary: &FeedbackSummary, window: &TimeWindow) -> String {
    let mut notes = String::from("Feedback Summary Report\n\n");
    let _ = writeln!(notes, "Window: {}", format_window(window));
    notes.push('\n');
    let _ = writeln!(
        notes,
        "Positive: {} ({:.1}%)",
        summary.positive_count, summary.positive_percent
    );
    let _ = writeln!(
        notes,
        "Negative: {} ({:.1}%)",
        summary.negative_count, summary.negative_percent
    );
    let _ = writeln!(notes, "Total: {}", summary.total);
    notes.push_str("\nThis report was automatically generated by the feedback analysis job.\n");
    notes
}
