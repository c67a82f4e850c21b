//! `feedback analysis`: one aggregation attempt from the command line.

use std::time::Duration;

use feedback_analysis::{Aggregator, RunOutcome};

/// Run the daily aggregation once. Ctrl-C cancels the run; the deadline
/// comes from `--timeout-secs` or the configured default.
///
/// # Errors
///
/// Returns an error if the Asana settings are missing, the client cannot be
/// built, or the run fails, is cancelled, or exceeds its deadline.
pub(crate) async fn run_analysis(
    pool: sqlx::PgPool,
    config: &feedback_core::AppConfig,
    timeout_secs: Option<u64>,
) -> anyhow::Result<()> {
    let settings = config.asana()?;
    let deadline = Duration::from_secs(timeout_secs.unwrap_or(config.analysis_timeout_secs));

    tracing::info!(
        asana_workspace = %settings.workspace_gid,
        asana_project = %settings.project_gid,
        deadline_secs = deadline.as_secs(),
        "starting feedback analysis job"
    );

    let aggregator = Aggregator::from_settings(pool, &settings)?;
    let outcome = aggregator.run_bounded(ctrl_c(), deadline).await?;

    match outcome {
        RunOutcome::Reported(row) => {
            println!(
                "report {} filed as Asana task {} (positive {}, negative {})",
                row.report_date, row.asana_task_gid, row.positive_count, row.negative_count
            );
        }
        RunOutcome::AlreadyReported { report_date } => {
            println!("report {report_date} already exists; nothing to do");
        }
    }

    tracing::info!("analysis job completed successfully");
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed the run proceeds
/// without it.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
