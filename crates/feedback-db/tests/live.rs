//! Live integration tests for feedback-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/feedback-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use feedback_core::Sentiment;
use feedback_db::{
    count_feedback_by_sentiment, create_report_run, get_report_run_by_date, insert_feedback,
    list_report_runs, report_run_exists, DbError, NewReportRun,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Insert a feedback row with an explicit `created_at`.
async fn insert_feedback_at(pool: &sqlx::PgPool, sentiment: &str, created_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO feedback (sentiment, created_at) VALUES ($1, $2)")
        .bind(sentiment)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("insert_feedback_at failed for {created_at}: {e}"));
}

fn make_report_run(report_date: NaiveDate, gid: &str) -> NewReportRun {
    let window_end = Utc.from_utc_datetime(&report_date.and_hms_opt(0, 0, 0).unwrap());
    NewReportRun {
        report_date,
        window_start: window_end - Duration::hours(24),
        window_end,
        positive_count: 4,
        negative_count: 2,
        asana_task_gid: gid.to_string(),
    }
}

// ---------------------------------------------------------------------------
// feedback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn insert_feedback_returns_stored_row(pool: sqlx::PgPool) {
    let row = insert_feedback(&pool, Sentiment::Positive, Some("great form"))
        .await
        .expect("insert feedback");

    assert!(row.id > 0);
    assert_eq!(row.sentiment, "positive");
    assert_eq!(row.message.as_deref(), Some("great form"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn insert_feedback_accepts_missing_message(pool: sqlx::PgPool) {
    let row = insert_feedback(&pool, Sentiment::Negative, None)
        .await
        .expect("insert feedback");

    assert_eq!(row.sentiment, "negative");
    assert!(row.message.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn schema_rejects_unknown_sentiment(pool: sqlx::PgPool) {
    let result = sqlx::query("INSERT INTO feedback (sentiment) VALUES ('neutral')")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "check constraint should reject 'neutral'");
}

#[sqlx::test(migrations = "../../migrations")]
async fn count_respects_right_open_window(pool: sqlx::PgPool) {
    let start = utc(2024, 6, 14, 0);
    let end = utc(2024, 6, 15, 0);

    // inside
    insert_feedback_at(&pool, "positive", start).await;
    insert_feedback_at(&pool, "positive", utc(2024, 6, 14, 12)).await;
    insert_feedback_at(&pool, "negative", end - Duration::microseconds(1)).await;
    // outside
    insert_feedback_at(&pool, "positive", end).await;
    insert_feedback_at(&pool, "negative", start - Duration::microseconds(1)).await;

    let counts = count_feedback_by_sentiment(&pool, start, end)
        .await
        .expect("count feedback");

    assert_eq!(counts.positive_count, 2);
    assert_eq!(counts.negative_count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn count_of_empty_window_is_zero(pool: sqlx::PgPool) {
    insert_feedback_at(&pool, "positive", utc(2024, 1, 1, 10)).await;

    let counts = count_feedback_by_sentiment(&pool, utc(2024, 6, 14, 0), utc(2024, 6, 15, 0))
        .await
        .expect("count feedback");

    assert_eq!(counts.positive_count, 0);
    assert_eq!(counts.negative_count, 0);
}

// ---------------------------------------------------------------------------
// report_runs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn report_run_exists_tracks_inserted_dates(pool: sqlx::PgPool) {
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    assert!(!report_run_exists(&pool, date).await.expect("exists query"));

    let row = create_report_run(&pool, &make_report_run(date, "gid-1"))
        .await
        .expect("create report run");
    assert_eq!(row.report_date, date);
    assert_eq!(row.positive_count, 4);
    assert_eq!(row.negative_count, 2);
    assert_eq!(row.asana_task_gid, "gid-1");

    assert!(report_run_exists(&pool, date).await.expect("exists query"));
    assert!(!report_run_exists(&pool, date.succ_opt().unwrap())
        .await
        .expect("exists query"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn second_insert_for_same_date_is_rejected(pool: sqlx::PgPool) {
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    create_report_run(&pool, &make_report_run(date, "gid-first"))
        .await
        .expect("first insert");

    let err = create_report_run(&pool, &make_report_run(date, "gid-second"))
        .await
        .expect_err("second insert must fail");
    assert!(
        matches!(err, DbError::DuplicateReportRun { report_date } if report_date == date),
        "expected DuplicateReportRun, got: {err:?}"
    );

    let stored = get_report_run_by_date(&pool, date)
        .await
        .expect("get report run")
        .expect("row exists");
    assert_eq!(stored.asana_task_gid, "gid-first");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM report_runs")
        .fetch_one(&pool)
        .await
        .expect("count rows");
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn concurrent_inserts_leave_exactly_one_row(pool: sqlx::PgPool) {
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let first = make_report_run(date, "gid-a");
    let second = make_report_run(date, "gid-b");

    let (a, b) = tokio::join!(
        create_report_run(&pool, &first),
        create_report_run(&pool, &second),
    );

    assert_eq!(
        usize::from(a.is_ok()) + usize::from(b.is_ok()),
        1,
        "exactly one concurrent insert should win"
    );
    let loser = if a.is_err() { a } else { b };
    assert!(matches!(loser, Err(DbError::DuplicateReportRun { .. })));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM report_runs WHERE report_date = $1")
        .bind(date)
        .fetch_one(&pool)
        .await
        .expect("count rows");
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_report_runs_orders_newest_first(pool: sqlx::PgPool) {
    for day in [13, 15, 14] {
        let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        create_report_run(&pool, &make_report_run(date, &format!("gid-{day}")))
            .await
            .expect("create report run");
    }

    let rows = list_report_runs(&pool, 2).await.expect("list report runs");
    let dates: Vec<u32> = rows
        .iter()
        .map(|r| chrono::Datelike::day(&r.report_date))
        .collect();
    assert_eq!(dates, vec![15, 14]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_report_run_by_date_returns_none_when_missing(pool: sqlx::PgPool) {
    let date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    assert!(get_report_run_by_date(&pool, date)
        .await
        .expect("query")
        .is_none());
}
