use thiserror::Error;

/// Errors returned by the Asana API client.
#[derive(Debug, Error)]
pub enum AsanaError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Asana answered with a non-2xx status.
    #[error("Asana API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A success response arrived without a task `gid`.
    #[error("Asana response did not include a task gid")]
    MissingGid,

    #[error("invalid Asana base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
