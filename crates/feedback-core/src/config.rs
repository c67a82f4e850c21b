use crate::app_config::{AppConfig, LogFormat};
use crate::submission::MAX_MESSAGE_LENGTH_LIMIT;
use crate::ConfigError;

const DEFAULT_ASANA_BASE_URL: &str = "https://app.asana.com/api/1.0";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;

    let bind_addr = parse_addr("FEEDBACK_BIND_ADDR", "127.0.0.1:8080")?;
    let log_level = or_default("FEEDBACK_LOG_LEVEL", "info");
    let log_format = parse_log_format(&or_default("FEEDBACK_LOG_FORMAT", "text"))
        .ok_or_else(|| invalid("FEEDBACK_LOG_FORMAT", "expected 'text' or 'json'".to_string()))?;
    let static_path = PathBuf::from(or_default("FEEDBACK_STATIC_PATH", "./static"));

    let max_message_length = parse_usize("FEEDBACK_MAX_MESSAGE_LENGTH", "5000")?;
    if !(1..=MAX_MESSAGE_LENGTH_LIMIT).contains(&max_message_length) {
        return Err(invalid(
            "FEEDBACK_MAX_MESSAGE_LENGTH",
            format!(
                "must be between 1 and {MAX_MESSAGE_LENGTH_LIMIT}, got {max_message_length}"
            ),
        ));
    }
    let submit_rate_limit = parse_usize("FEEDBACK_SUBMIT_RATE_LIMIT", "60")?;
    if submit_rate_limit == 0 {
        return Err(invalid(
            "FEEDBACK_SUBMIT_RATE_LIMIT",
            "must be greater than zero".to_string(),
        ));
    }

    let db_max_connections = parse_u32("FEEDBACK_DB_MAX_CONNECTIONS", "25")?;
    let db_min_connections = parse_u32("FEEDBACK_DB_MIN_CONNECTIONS", "5")?;
    let db_acquire_timeout_secs = parse_u64("FEEDBACK_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let asana_token = optional("ASANA_TOKEN");
    let asana_workspace_gid = optional("ASANA_WORKSPACE_GID");
    let asana_project_gid = optional("ASANA_PROJECT_GID");
    let asana_base_url = or_default("ASANA_BASE_URL", DEFAULT_ASANA_BASE_URL);
    let asana_request_timeout_secs = parse_u64("ASANA_REQUEST_TIMEOUT_SECS", "30")?;

    let analysis_timeout_secs = parse_u64("FEEDBACK_ANALYSIS_TIMEOUT_SECS", "120")?;
    if analysis_timeout_secs == 0 {
        return Err(invalid(
            "FEEDBACK_ANALYSIS_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let analysis_schedule = optional("FEEDBACK_ANALYSIS_SCHEDULE");

    Ok(AppConfig {
        database_url,
        bind_addr,
        log_level,
        log_format,
        static_path,
        max_message_length,
        submit_rate_limit,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        asana_token,
        asana_workspace_gid,
        asana_project_gid,
        asana_base_url,
        asana_request_timeout_secs,
        analysis_timeout_secs,
        analysis_schedule,
    })
}

fn parse_log_format(s: &str) -> Option<LogFormat> {
    match s.trim().to_ascii_lowercase().as_str() {
        "text" | "pretty" => Some(LogFormat::Text),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
