//! The once-per-day aggregation run.
//!
//! Order matters: the existence check, the counts, and the i32 range check
//! all happen before the Asana call, and the report row is written only
//! after Asana returns a task id. A failure anywhere leaves no row, so the
//! next trigger retries the whole day.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use feedback_asana::{AsanaClient, AsanaError};
use feedback_core::{calculate_time_window, AsanaSettings, Clock, Sentiment, SystemClock};
use feedback_db::{NewReportRun, ReportRunRow};
use sqlx::PgPool;

use crate::error::AnalysisError;
use crate::report::{format_task_name, format_task_notes};
use crate::store::{PgReportStore, ReportStore};
use crate::summary::calculate_feedback_summary;
use crate::tasks::TaskCreator;

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A report for this date was already recorded; nothing was sent.
    AlreadyReported { report_date: NaiveDate },
    /// A task was filed and this row was stored.
    Reported(ReportRunRow),
}

pub struct Aggregator {
    store: Arc<dyn ReportStore>,
    tasks: Arc<dyn TaskCreator>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator").finish_non_exhaustive()
    }
}

impl Aggregator {
    #[must_use]
    pub fn new(store: Arc<dyn ReportStore>, tasks: Arc<dyn TaskCreator>) -> Self {
        Self::with_clock(store, tasks, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(
        store: Arc<dyn ReportStore>,
        tasks: Arc<dyn TaskCreator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            tasks,
            clock,
        }
    }

    /// Production wiring: Postgres store plus a real Asana client.
    ///
    /// # Errors
    ///
    /// Returns [`AsanaError`] if the HTTP client cannot be built or the base
    /// URL is invalid.
    pub fn from_settings(pool: PgPool, settings: &AsanaSettings) -> Result<Self, AsanaError> {
        let client = AsanaClient::with_base_url(
            &settings.token,
            &settings.workspace_gid,
            &settings.project_gid,
            settings.request_timeout_secs,
            &settings.base_url,
        )?;
        Ok(Self::new(
            Arc::new(PgReportStore::new(pool)),
            Arc::new(client),
        ))
    }

    /// Run one aggregation for the current UTC date.
    ///
    /// The clock is read once; the report date and window both derive from
    /// that single instant.
    ///
    /// # Errors
    ///
    /// Returns the [`AnalysisError`] variant for the step that failed. No
    /// report row exists afterwards unless the error is a duplicate insert,
    /// in which case the row belongs to a concurrent run.
    pub async fn run(&self) -> Result<RunOutcome, AnalysisError> {
        let now = self.clock.now();
        let window = calculate_time_window(&now);
        let report_date = window.report_date();

        tracing::info!(%report_date, "starting daily feedback aggregation");

        let exists = self
            .store
            .report_exists(report_date)
            .await
            .map_err(|source| AnalysisError::ReportLookup {
                report_date,
                source,
            })?;
        if exists {
            tracing::info!(%report_date, "report run already exists, skipping aggregation");
            return Ok(RunOutcome::AlreadyReported { report_date });
        }

        let counts = self
            .store
            .count_by_sentiment(&window)
            .await
            .map_err(AnalysisError::CountQuery)?;

        let positive_count = to_report_count(Sentiment::Positive, counts.positive_count)?;
        let negative_count = to_report_count(Sentiment::Negative, counts.negative_count)?;

        let summary = calculate_feedback_summary(counts);
        tracing::debug!(
            %report_date,
            window_start = %window.start,
            window_end = %window.end,
            positive = summary.positive_count,
            negative = summary.negative_count,
            "feedback counted"
        );

        let name = format_task_name(window.end);
        let notes = format_task_notes(&summary, &window);
        let task_gid = self
            .tasks
            .create_task(&name, &notes)
            .await
            .map_err(AnalysisError::TaskCreation)?;

        let new_run = NewReportRun {
            report_date,
            window_start: window.start,
            window_end: window.end,
            positive_count,
            negative_count,
            asana_task_gid: task_gid,
        };
        let row = match self.store.create_report_run(&new_run).await {
            Ok(row) => row,
            Err(source) => {
                tracing::error!(
                    %report_date,
                    task_gid = %new_run.asana_task_gid,
                    error = %source,
                    "asana task created but report run was not stored"
                );
                return Err(AnalysisError::Persist {
                    task_gid: new_run.asana_task_gid,
                    source,
                });
            }
        };

        tracing::info!(
            report_date = %row.report_date,
            positive_count = row.positive_count,
            negative_count = row.negative_count,
            task_gid = %row.asana_task_gid,
            "report created successfully"
        );
        Ok(RunOutcome::Reported(row))
    }

    /// Like [`Aggregator::run`], abandoning the run as soon as `cancel`
    /// completes.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Cancelled`] if `cancel` finishes first, otherwise
    /// whatever [`Aggregator::run`] returns.
    pub async fn run_until<F>(&self, cancel: F) -> Result<RunOutcome, AnalysisError>
    where
        F: Future<Output = ()> + Send,
    {
        tokio::select! {
            biased;
            () = cancel => {
                tracing::warn!("aggregation cancelled");
                Err(AnalysisError::Cancelled)
            }
            result = self.run() => result,
        }
    }

    /// Like [`Aggregator::run`], with an overall deadline.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::DeadlineExceeded`] if `deadline` elapses first.
    pub async fn run_with_timeout(&self, deadline: Duration) -> Result<RunOutcome, AnalysisError> {
        self.run_bounded(std::future::pending(), deadline).await
    }

    /// Both a cancel signal and a deadline; whichever fires first wins.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Cancelled`], [`AnalysisError::DeadlineExceeded`], or
    /// whatever [`Aggregator::run`] returns.
    pub async fn run_bounded<F>(
        &self,
        cancel: F,
        deadline: Duration,
    ) -> Result<RunOutcome, AnalysisError>
    where
        F: Future<Output = ()> + Send,
    {
        if let Ok(result) = tokio::time::timeout(deadline, self.run_until(cancel)).await {
            result
        } else {
            tracing::warn!(secs = deadline.as_secs(), "aggregation deadline exceeded");
            Err(AnalysisError::DeadlineExceeded {
                secs: deadline.as_secs(),
            })
        }
    }
}

fn to_report_count(sentiment: Sentiment, value: i64) -> Result<i32, AnalysisError> {
    i32::try_from(value).map_err(|_| AnalysisError::CountOutOfRange { sentiment, value })
}
