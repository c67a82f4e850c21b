//! Daily feedback aggregation.
//!
//! Counts the previous UTC day's submissions, files a summary task in Asana,
//! and records a `report_runs` row so the job is a no-op for the rest of the
//! day. Storage and task creation sit behind [`ReportStore`] and
//! [`TaskCreator`] so the workflow can run against in-memory fakes.

pub mod aggregator;
pub mod error;
pub mod report;
pub mod store;
pub mod summary;
pub mod tasks;

pub use aggregator::{Aggregator, RunOutcome};
pub use error::AnalysisError;
pub use report::{format_task_name, format_task_notes, format_window};
pub use store::{PgReportStore, ReportStore};
pub use summary::{calculate_feedback_summary, FeedbackSummary};
pub use tasks::TaskCreator;
