//! Shared types for the feedback service: configuration, the sentiment enum,
//! submission validation, and the UTC reporting window.

pub mod app_config;
pub mod config;
pub mod sentiment;
pub mod submission;
pub mod window;

use thiserror::Error;

pub use app_config::{AppConfig, AsanaSettings, LogFormat};
pub use config::{load_app_config, load_app_config_from_env};
pub use sentiment::{ParseSentimentError, Sentiment};
pub use submission::{validate_submission, Submission, SubmissionError, MAX_MESSAGE_LENGTH_LIMIT};
pub use window::{
    calculate_time_window, report_date, Clock, FixedClock, SystemClock, TimeWindow,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
