//! HTTP client for the Asana tasks endpoint.
//!
//! Wraps `reqwest` with bearer-token auth and typed request/response bodies.
//! Each call sends exactly one request; there is no retry loop here.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, Url};

use crate::error::AsanaError;
use crate::types::{TaskData, TaskRequest, TaskResponse};

/// Longest slice of an error response body kept in [`AsanaError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Client bound to one workspace and one destination project.
///
/// The base URL comes from configuration, so tests can point it at a mock
/// server.
#[derive(Clone)]
pub struct AsanaClient {
    client: Client,
    token: String,
    workspace_gid: String,
    project_gid: String,
    tasks_url: Url,
}

impl std::fmt::Debug for AsanaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsanaClient")
            .field("token", &"[redacted]")
            .field("workspace_gid", &self.workspace_gid)
            .field("project_gid", &self.project_gid)
            .field("tasks_url", &self.tasks_url.as_str())
            .finish_non_exhaustive()
    }
}

impl AsanaClient {
    /// Creates a client posting to `{base_url}/tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`AsanaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AsanaError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        token: &str,
        workspace_gid: &str,
        project_gid: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AsanaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("feedback/0.1 (daily-summary)")
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment (`/api/1.0`).
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let tasks_url = Url::parse(&normalised)
            .and_then(|u| u.join("tasks"))
            .map_err(|e| AsanaError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            workspace_gid: workspace_gid.to_owned(),
            project_gid: project_gid.to_owned(),
            tasks_url,
        })
    }

    /// Builds the request body for a new, incomplete task in the configured
    /// workspace and project.
    #[must_use]
    pub fn build_task_request(&self, name: &str, notes: &str) -> TaskRequest {
        TaskRequest {
            data: TaskData {
                workspace: self.workspace_gid.clone(),
                name: name.to_owned(),
                notes: notes.to_owned(),
                completed: false,
                projects: vec![self.project_gid.clone()],
            },
        }
    }

    /// Creates one task and returns the `gid` Asana assigned to it.
    ///
    /// # Errors
    ///
    /// - [`AsanaError::Http`] on network failure or timeout.
    /// - [`AsanaError::Status`] on any non-2xx response.
    /// - [`AsanaError::Deserialize`] if the body is not the expected JSON.
    /// - [`AsanaError::MissingGid`] if the body parses but `gid` is empty.
    pub async fn create_task(&self, name: &str, notes: &str) -> Result<String, AsanaError> {
        let request = self.build_task_request(name, notes);
        let response = self.send_request(&request).await?;

        let gid = response.data.gid.trim();
        if gid.is_empty() {
            return Err(AsanaError::MissingGid);
        }

        tracing::debug!(task_gid = gid, "asana task created");
        Ok(gid.to_owned())
    }

    /// Posts `request` to `/tasks` and parses the response envelope.
    async fn send_request(&self, request: &TaskRequest) -> Result<TaskResponse, AsanaError> {
        tracing::debug!(
            url = %self.tasks_url,
            workspace = %self.workspace_gid,
            project = %self.project_gid,
            "sending asana task request"
        );

        let response = self
            .client
            .post(self.tasks_url.clone())
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AsanaError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        serde_json::from_str(&body).map_err(|e| AsanaError::Deserialize {
            context: format!("POST {}", self.tasks_url),
            source: e,
        })
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
