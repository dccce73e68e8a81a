//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Resolve backend URL, storage path, HTTP timeout and logging settings.
//! - Keep one place that knows the `ESSAYDESK_*` variable names.
//!
//! # Invariants
//! - Blank variables fall back to defaults instead of producing empty values.
//! - `backend_base_url` never ends with `/`.

use crate::logging::default_log_level;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_BACKEND_URL: &str = "ESSAYDESK_BACKEND_URL";
pub const ENV_DB_PATH: &str = "ESSAYDESK_DB_PATH";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "ESSAYDESK_HTTP_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "ESSAYDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ESSAYDESK_LOG_DIR";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DB_FILE_NAME: &str = "essaydesk.sqlite3";
const LOG_DIR_NAME: &str = "essaydesk-logs";

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Base URL of the template/generation backend.
    pub backend_base_url: String,
    /// SQLite file backing the key-value store.
    pub db_path: PathBuf,
    /// Per-request timeout for backend calls.
    pub http_timeout: Duration,
    /// Raw log level; validated by `LogSettings`.
    pub log_level: String,
    /// Directory for rotating log files.
    pub log_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let temp = std::env::temp_dir();
        Self {
            backend_base_url: DEFAULT_BACKEND_URL.to_string(),
            db_path: temp.join(DB_FILE_NAME),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_level: default_log_level().to_string(),
            log_dir: temp.join(LOG_DIR_NAME),
        }
    }
}

impl CoreConfig {
    /// Reads configuration from `ESSAYDESK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    ///
    /// Unparseable timeouts fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let http_timeout = read(ENV_HTTP_TIMEOUT_SECS)
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Self {
            backend_base_url: read(ENV_BACKEND_URL)
                .map(|url| normalize_base_url(&url))
                .unwrap_or(defaults.backend_base_url),
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            http_timeout,
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        }
    }
}

/// Trims whitespace and trailing slashes from a base URL.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
