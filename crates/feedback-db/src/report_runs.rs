//! Database operations for `report_runs`.
//!
//! One row per UTC report date. The `report_runs_report_date_key` unique
//! constraint backs the existence check done by the analysis job, so two
//! overlapping runs cannot both record a report for the same day.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::DbError;

const UNIQUE_VIOLATION: &str = "23505";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `report_runs` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ReportRunRow {
    pub id: i64,
    pub report_date: NaiveDate,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub positive_count: i32,
    pub negative_count: i32,
    pub asana_task_gid: String,
    pub created_at: DateTime<Utc>,
}

/// Input for [`create_report_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReportRun {
    pub report_date: NaiveDate,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub positive_count: i32,
    pub negative_count: i32,
    pub asana_task_gid: String,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns `true` if a report run has been recorded for `report_date`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn report_run_exists(pool: &PgPool, report_date: NaiveDate) -> Result<bool, DbError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM report_runs WHERE report_date = $1)")
            .bind(report_date)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Inserts a report run and returns the stored row, including the
/// database-assigned `id` and `created_at`.
///
/// # Errors
///
/// Returns [`DbError::DuplicateReportRun`] if a row for the same
/// `report_date` already exists, or [`DbError::Sqlx`] if the insert fails
/// for any other reason.
pub async fn create_report_run(pool: &PgPool, run: &NewReportRun) -> Result<ReportRunRow, DbError> {
    let result = sqlx::query_as::<_, ReportRunRow>(
        "INSERT INTO report_runs \
             (report_date, window_start, window_end, positive_count, negative_count, asana_task_gid) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, report_date, window_start, window_end, positive_count, \
                   negative_count, asana_task_gid, created_at",
    )
    .bind(run.report_date)
    .bind(run.window_start)
    .bind(run.window_end)
    .bind(run.positive_count)
    .bind(run.negative_count)
    .bind(&run.asana_task_gid)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(row),
        Err(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
        {
            Err(DbError::DuplicateReportRun {
                report_date: run.report_date,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetches the report run for `report_date`, if one exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_report_run_by_date(
    pool: &PgPool,
    report_date: NaiveDate,
) -> Result<Option<ReportRunRow>, DbError> {
    let row = sqlx::query_as::<_, ReportRunRow>(
        "SELECT id, report_date, window_start, window_end, positive_count, \
                negative_count, asana_task_gid, created_at \
         FROM report_runs \
         WHERE report_date = $1",
    )
    .bind(report_date)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns the most recent `limit` report runs, newest report date first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_report_runs(pool: &PgPool, limit: i64) -> Result<Vec<ReportRunRow>, DbError> {
    let rows = sqlx::query_as::<_, ReportRunRow>(
        "SELECT id, report_date, window_start, window_end, positive_count, \
                negative_count, asana_task_gid, created_at \
         FROM report_runs \
         ORDER BY report_date DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
