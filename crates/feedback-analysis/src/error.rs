use chrono::NaiveDate;
use feedback_asana::AsanaError;
use feedback_db::DbError;
use feedback_core::Sentiment;
use thiserror::Error;

/// Why a single aggregation attempt did not complete.
///
/// None of these leave a `report_runs` row behind, so the next trigger starts
/// over. Use [`AnalysisError::is_cancellation`] to separate "never finished"
/// from "ran and failed".
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to check if report run exists for {report_date}: {source}")]
    ReportLookup {
        report_date: NaiveDate,
        #[source]
        source: DbError,
    },

    #[error("failed to query feedback counts: {0}")]
    CountQuery(#[source] DbError),

    /// The window holds more submissions than the `INTEGER` report columns
    /// can represent. Points at a data problem; retrying will not help.
    #[error("{sentiment} count {value} exceeds i32 range")]
    CountOutOfRange { sentiment: Sentiment, value: i64 },

    #[error("failed to create Asana task: {0}")]
    TaskCreation(#[source] AsanaError),

    /// The Asana task exists but the report row was not written.
    #[error("failed to create report run (Asana task {task_gid} was already created): {source}")]
    Persist {
        task_gid: String,
        #[source]
        source: DbError,
    },

    #[error("aggregation cancelled before completion")]
    Cancelled,

    #[error("aggregation exceeded its {secs}s deadline")]
    DeadlineExceeded { secs: u64 },
}

impl AnalysisError {
    /// `true` when the run was stopped from outside rather than failing.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded { .. })
    }

    /// `true` when another run recorded the same report date between this
    /// run's existence check and its insert.
    #[must_use]
    pub fn is_duplicate_report(&self) -> bool {
        matches!(
            self,
            Self::Persist {
                source: DbError::DuplicateReportRun { .. },
                ..
            }
        )
    }
}
