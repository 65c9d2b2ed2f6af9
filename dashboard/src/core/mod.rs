//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and testability.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`service`]**: The `ApiService` trait every unit talks to
//!
//! ## Dependency Injection
//!
//! Units hold an `Arc<dyn ApiService>`:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dashboard::config::Config;
//! use dashboard::core::ApiService;
//! use dashboard::services::api::ApiClient;
//!
//! let client = ApiClient::new(&Config::default()).expect("client");
//! let api: Arc<dyn ApiService> = Arc::new(client);
//! ```

pub mod error;
pub mod service;

#[cfg(test)]
pub(crate) mod mock;

pub use error::{AppError, Result};
pub use service::ApiService;
