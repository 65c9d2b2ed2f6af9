//! # Utility Functions
//!
//! Shared utility functions used across the dashboard.
//!
//! ## Modules
//!
//! - **[`validation`]**: Form input validation (user ids, passwords, amounts, bounds)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Cross-crate display helpers (ids, rupee amounts)
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
