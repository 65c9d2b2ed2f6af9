//! # Logging
//!
//! `tracing` subscriber setup for the dashboard binary. Library code only
//! emits events; installing a subscriber is left to the binary (or a test).
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: filter directives (default `dashboard=info,warn`)
//! - `DASHBOARD_LOG_DIR`: also write a daily-rotated `dashboard.log.YYYY-MM-DD` there
//! - `DASHBOARD_LOG_FORMAT`: `json` for JSON lines on stderr
//!
//! ## Usage
//!
//! ```rust,no_run
//! let _guard = dashboard::debug::init().expect("logging");
//! tracing::info!(endpoint = "/me", duration_ms = 12, "API call completed");
//! ```

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::LogGuard;

use crate::core::error::Result;

/// Initialize logging from the environment. Keep the guard alive until exit.
pub fn init() -> Result<LogGuard> {
    logger::init(&LogConfig::from_env())
}
