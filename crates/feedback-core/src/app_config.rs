use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ConfigError;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Asana credentials and destination, present only when all three
/// `ASANA_*` identifiers are configured.
#[derive(Clone)]
pub struct AsanaSettings {
    pub token: String,
    pub workspace_gid: String,
    pub project_gid: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for AsanaSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsanaSettings")
            .field("token", &"[redacted]")
            .field("workspace_gid", &self.workspace_gid)
            .field("project_gid", &self.project_gid)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub log_format: LogFormat,
    pub static_path: PathBuf,
    pub max_message_length: usize,
    pub submit_rate_limit: usize,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub asana_token: Option<String>,
    pub asana_workspace_gid: Option<String>,
    pub asana_project_gid: Option<String>,
    pub asana_base_url: String,
    pub asana_request_timeout_secs: u64,
    pub analysis_timeout_secs: u64,
    pub analysis_schedule: Option<String>,
}

impl AppConfig {
    /// Collects the Asana settings needed by the analysis job.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first unset variable
    /// among `ASANA_TOKEN`, `ASANA_WORKSPACE_GID`, `ASANA_PROJECT_GID`.
    pub fn asana(&self) -> Result<AsanaSettings, ConfigError> {
        let require = |value: &Option<String>, var: &str| -> Result<String, ConfigError> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToOwned::to_owned)
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
        };

        Ok(AsanaSettings {
            token: require(&self.asana_token, "ASANA_TOKEN")?,
            workspace_gid: require(&self.asana_workspace_gid, "ASANA_WORKSPACE_GID")?,
            project_gid: require(&self.asana_project_gid, "ASANA_PROJECT_GID")?,
            base_url: self.asana_base_url.clone(),
            request_timeout_secs: self.asana_request_timeout_secs,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("static_path", &self.static_path)
            .field("database_url", &"[redacted]")
            .field("max_message_length", &self.max_message_length)
            .field("submit_rate_limit", &self.submit_rate_limit)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "asana_token",
                &self.asana_token.as_ref().map(|_| "[redacted]"),
            )
            .field("asana_workspace_gid", &self.asana_workspace_gid)
            .field("asana_project_gid", &self.asana_project_gid)
            .field("asana_base_url", &self.asana_base_url)
            .field(
                "asana_request_timeout_secs",
                &self.asana_request_timeout_secs,
            )
            .field("analysis_timeout_secs", &self.analysis_timeout_secs)
            .field("analysis_schedule", &self.analysis_schedule)
            .finish()
    }
}
