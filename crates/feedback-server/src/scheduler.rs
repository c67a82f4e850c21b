//! Optional in-process trigger for the daily analysis.
//!
//! Only started when `FEEDBACK_ANALYSIS_SCHEDULE` is set. The CLI
//! `feedback analysis` command remains the primary trigger.

use std::sync::Arc;
use std::time::Duration;

use feedback_analysis::{Aggregator, RunOutcome};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts a scheduler running the analysis on `schedule`.
///
/// The returned [`JobScheduler`] must be kept alive for the lifetime of the
/// process; dropping it stops the job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if `schedule` is not a valid cron
/// expression or the scheduler cannot start.
pub async fn build_scheduler(
    schedule: &str,
    aggregator: Arc<Aggregator>,
    deadline: Duration,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    scheduler
        .add(analysis_job(schedule, aggregator, deadline)?)
        .await?;
    scheduler.start().await?;
    tracing::info!(schedule, "scheduler: daily feedback analysis registered");
    Ok(scheduler)
}

/// One aggregation attempt per tick. Failures are logged and left for the
/// next tick.
fn analysis_job(
    schedule: &str,
    aggregator: Arc<Aggregator>,
    deadline: Duration,
) -> Result<Job, JobSchedulerError> {
    Job::new_async(schedule, move |_uuid, _lock| {
        let aggregator = Arc::clone(&aggregator);

        Box::pin(async move {
            tracing::info!("scheduler: starting daily feedback analysis");
            match aggregator.run_with_timeout(deadline).await {
                Ok(RunOutcome::Reported(row)) => tracing::info!(
                    report_date = %row.report_date,
                    task_gid = %row.asana_task_gid,
                    "scheduler: daily feedback analysis complete"
                ),
                Ok(RunOutcome::AlreadyReported { report_date }) => tracing::info!(
                    %report_date,
                    "scheduler: report already exists, nothing to do"
                ),
                Err(e) => tracing::error!(
                    error = %e,
                    cancelled = e.is_cancellation(),
                    "scheduler: daily feedback analysis failed"
                ),
            }
        })
    })
}
