//! Persistence seam for the aggregation workflow.

use async_trait::async_trait;
use chrono::NaiveDate;
use feedback_core::TimeWindow;
use feedback_db::{DbError, NewReportRun, ReportRunRow, SentimentCounts};
use sqlx::PgPool;

/// The three reads and writes a daily run needs.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn report_exists(&self, report_date: NaiveDate) -> Result<bool, DbError>;

    /// Per-sentiment counts over the right-open `window`.
    async fn count_by_sentiment(&self, window: &TimeWindow) -> Result<SentimentCounts, DbError>;

    /// Must return [`DbError::DuplicateReportRun`] when a row for the same
    /// report date already exists.
    async fn create_report_run(&self, run: &NewReportRun) -> Result<ReportRunRow, DbError>;
}

/// [`ReportStore`] backed by the Postgres pool.
#[derive(Debug, Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn report_exists(&self, report_date: NaiveDate) -> Result<bool, DbError> {
        feedback_db::report_run_exists(&self.pool, report_date).await
    }

    async fn count_by_sentiment(&self, window: &TimeWindow) -> Result<SentimentCounts, DbError> {
        feedback_db::count_feedback_by_sentiment(&self.pool, window.start, window.end).await
    }

    async fn create_report_run(&self, run: &NewReportRun) -> Result<ReportRunRow, DbError> {
        feedback_db::create_report_run(&self.pool, run).await
    }
}
