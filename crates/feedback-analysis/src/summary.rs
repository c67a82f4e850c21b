//! Derived totals and percentages for one report window.

use feedback_db::SentimentCounts;

/// Counts plus rounded percentages for one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackSummary {
    pub positive_count: i64,
    pub negative_count: i64,
    pub total: i64,
    /// Rounded to one decimal place. `0.0` when `total` is zero.
    pub positive_percent: f64,
    /// Rounded to one decimal place. `0.0` when `total` is zero.
    pub negative_percent: f64,
}

/// Build the summary for raw per-sentiment counts.
///
/// An empty window reports `0.0` for both percentages rather than dividing
/// by zero.
#[must_use]
pub fn calculate_feedback_summary(counts: SentimentCounts) -> FeedbackSummary {
    let positive_count = counts.positive_count;
    let negative_count = counts.negative_count;
    let total = positive_count.saturating_add(negative_count);

    let (positive_percent, negative_percent) = if total > 0 {
        (
            percent_of(positive_count, total),
            percent_of(negative_count, total),
        )
    } else {
        (0.0, 0.0)
    };

    FeedbackSummary {
        positive_count,
        negative_count,
        total,
        positive_percent,
        negative_percent,
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent_of(part: i64, total: i64) -> f64 {
    round_to_tenth(part as f64 / total as f64 * 100.0)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
