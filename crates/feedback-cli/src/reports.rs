use chrono::{DateTime, Utc};
use clap::Subcommand;

const DEFAULT_LIST_LIMIT: i64 = 30;
const MAX_LIST_LIMIT: i64 = 365;

/// Sub-commands available under `reports`.
#[derive(Debug, Subcommand)]
pub enum ReportsCommands {
    /// List the most recent report runs, newest first
    List {
        /// Maximum number of runs to show (1-365)
        #[arg(long)]
        limit: Option<i64>,
    },
}

pub(crate) fn normalize_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}

fn fmt_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M").to_string()
}

/// Print recent report runs as a fixed-width table.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn run_reports_list(pool: &sqlx::PgPool, limit: Option<i64>) -> anyhow::Result<()> {
    let runs = feedback_db::list_report_runs(pool, normalize_limit(limit)).await?;

    if runs.is_empty() {
        println!("no report runs found; run `feedback analysis` first");
        return Ok(());
    }

    println!(
        "{:<12}{:<36}{:>10}{:>10}  {:<18}ASANA TASK",
        "DATE", "WINDOW (UTC)", "POSITIVE", "NEGATIVE", "CREATED"
    );
    for run in &runs {
        let window = format!(
            "{} to {}",
            fmt_instant(run.window_start),
            fmt_instant(run.window_end)
        );
        println!(
            "{:<12}{:<36}{:>10}{:>10}  {:<18}{}",
            run.report_date.format("%Y-%m-%d"),
            window,
            run.positive_count,
            run.negative_count,
            fmt_instant(run.created_at),
            run.asana_task_gid
        );
    }

    Ok(())
}
