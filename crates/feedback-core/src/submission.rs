//! Validation for a single form submission.

use thiserror::Error;

use crate::sentiment::Sentiment;

/// Upper bound for the configurable message length. The database has no hard
/// limit; this keeps a single row reasonable for a web form.
pub const MAX_MESSAGE_LENGTH_LIMIT: usize = 10_000;

/// A validated submission ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub sentiment: Sentiment,
    pub message: Option<String>,
}

/// Reasons a submission is rejected. The `Display` text is shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please select a valid sentiment")]
    InvalidSentiment,

    #[error("Message is too long (max {max} characters)")]
    MessageTooLong { max: usize },
}

/// Trim and validate raw form input.
///
/// An empty message after trimming is stored as `None`. Length is measured in
/// characters, not bytes.
///
/// # Errors
///
/// Returns [`SubmissionError::InvalidSentiment`] unless the trimmed sentiment is
/// exactly `positive` or `negative`, or [`SubmissionError::MessageTooLong`]
/// when the trimmed message exceeds `max_message_length` characters.
pub fn validate_submission(
    sentiment: &str,
    message: Option<&str>,
    max_message_length: usize,
) -> Result<Submission, SubmissionError> {
    let sentiment = sentiment
        .trim()
        .parse::<Sentiment>()
        .map_err(|_| SubmissionError::InvalidSentiment)?;

    let message = message.map(str::trim).unwrap_or_default();
    if message.chars().count() > max_message_length {
        return Err(SubmissionError::MessageTooLong {
            max: max_message_length,
        });
    }

    Ok(Submission {
        sentiment,
        message: (!message.is_empty()).then(|| message.to_string()),
    })
}
