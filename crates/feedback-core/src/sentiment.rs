use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Classification of a single feedback submission.
///
/// Stored as lowercase text (`positive` / `negative`) in the `feedback` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sentiment: {0:?}")]
pub struct ParseSentimentError(pub String);

impl FromStr for Sentiment {
    type Err = ParseSentimentError;

    /// Accepts only the exact lowercase values; the form posts nothing else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            other => Err(ParseSentimentError(other.to_string())),
        }
    }
}
