//! # Common Error Types
//!
//! Consolidated error handling for the dashboard core.
//!
//! API functions themselves never fail with an `Err`: they resolve to a
//! [`shared::ApiResponse`]. The units in [`crate::app`] turn a failed response
//! into [`AppError::Api`] via [`shared::ApiResponse::into_result`] and add their
//! own validation and state errors on top.
//!
//! ## Error Categories
//!
//! - **Api**: Backend said no, or could not be reached
//! - **Validation**: Input rejected before any request was made
//! - **State**: Operation not allowed in the current unit state
//! - **Busy**: The same action is already in flight
//! - **Config**: Bad environment configuration
//!
//! ## Usage Pattern
//!
//! ```rust
//! use dashboard::core::error::{AppError, Result};
//!
//! fn validate_amount(amount: f64) -> Result<f64> {
//!     if amount <= 0.0 {
//!         return Err(AppError::Validation("Amount must be positive".to_string()));
//!     }
//!     Ok(amount)
//! }
//!
//! assert!(validate_amount(0.0).is_err());
//! ```

use thiserror::Error;

/// Application-wide error type.
///
/// ```rust
/// use dashboard::core::error::AppError;
///
/// let api_err = AppError::Api("Order not found".to_string());
/// assert_eq!(api_err.to_string(), "API error: Order not found");
/// assert_eq!(api_err.user_message(), "Order not found");
///
/// let busy = AppError::Busy("refill request");
/// assert_eq!(busy.to_string(), "refill request already in progress");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AppError {
    /// Backend failure: non-2xx status, `success: false` body, transport error
    /// or an undecodable payload.
    #[error("API error: {0}")]
    Api(String),

    /// Input validation failure. No request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid state transition, e.g. checking a refill that was never requested.
    #[error("State error: {0}")]
    State(String),

    /// The action's busy flag is set.
    #[error("{0} already in progress")]
    Busy(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Message without the category prefix, suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(msg)
            | AppError::Validation(msg)
            | AppError::State(msg)
            | AppError::Config(msg) => msg.clone(),
            AppError::Busy(_) => self.to_string(),
        }
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Api(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Api(msg.to_string())
    }
}
