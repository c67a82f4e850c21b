//! Database operations for the `feedback` table.

use chrono::{DateTime, Utc};
use feedback_core::Sentiment;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `feedback` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedbackRow {
    pub id: i64,
    /// Constrained by the schema to `positive` or `negative`.
    pub sentiment: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-sentiment totals for a time window. Both fields are `BIGINT` counts
/// and are never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct SentimentCounts {
    pub positive_count: i64,
    pub negative_count: i64,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Store one submission. `created_at` is assigned by the database.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_feedback(
    pool: &PgPool,
    sentiment: Sentiment,
    message: Option<&str>,
) -> Result<FeedbackRow, DbError> {
    let row = sqlx::query_as::<_, FeedbackRow>(
        "INSERT INTO feedback (sentiment, message) \
         VALUES ($1, $2) \
         RETURNING id, sentiment, message, created_at",
    )
    .bind(sentiment.as_str())
    .bind(message)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Count submissions with `created_at` in the right-open range
/// `[window_start, window_end)`, split by sentiment.
///
/// An empty window yields zero for both sentiments.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_feedback_by_sentiment(
    pool: &PgPool,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<SentimentCounts, DbError> {
    let counts = sqlx::query_as::<_, SentimentCounts>(
        "SELECT \
             COUNT(*) FILTER (WHERE sentiment = 'positive') AS positive_count, \
             COUNT(*) FILTER (WHERE sentiment = 'negative') AS negative_count \
         FROM feedback \
         WHERE created_at >= $1 AND created_at < $2",
    )
    .bind(window_start)
    .bind(window_end)
    .fetch_one(pool)
    .await?;

    Ok(counts)
}
