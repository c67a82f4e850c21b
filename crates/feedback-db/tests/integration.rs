//! Offline unit tests for feedback-db pool configuration and row types.
//! These tests do not require a live database connection.

use chrono::{NaiveDate, TimeZone, Utc};
use feedback_core::{AppConfig, LogFormat};
use feedback_db::{NewReportRun, PoolConfig, ReportRunRow, SentimentCounts};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080),
        log_level: "info".to_string(),
        log_format: LogFormat::Text,
        static_path: PathBuf::from("./static"),
        max_message_length: 5000,
        submit_rate_limit: 60,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        asana_token: None,
        asana_workspace_gid: None,
        asana_project_gid: None,
        asana_base_url: "https://app.asana.com/api/1.0".to_string(),
        asana_request_timeout_secs: 30,
        analysis_timeout_secs: 120,
        analysis_schedule: None,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn sentiment_counts_default_to_zero() {
    let counts = SentimentCounts::default();
    assert_eq!(counts.positive_count, 0);
    assert_eq!(counts.negative_count, 0);
}

/// Compile-time smoke test: confirm that [`ReportRunRow`] carries the fields
/// the analysis job persists. No database required.
#[test]
fn report_run_row_has_expected_fields() {
    let new_run = NewReportRun {
        report_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        window_start: Utc.with_ymd_and_hms(2024, 6, 14, 0, 0, 0).unwrap(),
        window_end: Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap(),
        positive_count: 3,
        negative_count: 1,
        asana_task_gid: "1234567890".to_string(),
    };

    let row = ReportRunRow {
        id: 1,
        report_date: new_run.report_date,
        window_start: new_run.window_start,
        window_end: new_run.window_end,
        positive_count: new_run.positive_count,
        negative_count: new_run.negative_count,
        asana_task_gid: new_run.asana_task_gid.clone(),
        created_at: Utc::now(),
    };

    assert_eq!(row.report_date, new_run.report_date);
    assert_eq!(row.positive_count, 3);
    assert_eq!(row.negative_count, 1);
    assert_eq!(row.asana_task_gid, "1234567890");
}
