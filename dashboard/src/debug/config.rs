//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_FILTER: &str = "dashboard=info,warn";

/// Logging setup read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// `EnvFilter` directives (e.g. "dashboard=debug,info")
    pub filter: String,
    /// Directory for the daily-rotated log file; no file output when unset
    pub log_dir: Option<PathBuf>,
    /// JSON lines on stderr instead of the human format
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            log_dir: None,
            json: false,
        }
    }
}

impl LogConfig {
    /// Load from `RUST_LOG`, `DASHBOARD_LOG_DIR` and `DASHBOARD_LOG_FORMAT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            filter: non_empty("RUST_LOG").unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            log_dir: non_empty("DASHBOARD_LOG_DIR").map(PathBuf::from),
            json: non_empty("DASHBOARD_LOG_FORMAT")
                .map(|format| format.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.filter.contains("debug") || self.filter.contains("trace")
    }
}
