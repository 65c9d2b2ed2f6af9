//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the dashboard client and the SMM
//! reseller backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: `{success, data | message}` response normalization
//!   - **[`dto::auth`]**: Login, session identity and roles
//!   - **[`dto::catalog`]**: Service catalog entries and mutation payloads
//!   - **[`dto::order`]**: Orders, refill tri-state, order status snapshots
//!   - **[`dto::payment`]**: Mock payment gateway payloads and statuses
//!   - **[`dto::account`]**: User management and wallet ledger rows
//! - **[`utils`]**: Display helpers (id truncation, rupee amounts)
//!
//! ## Wire Format
//!
//! The backend speaks camelCase JSON (`serviceId`, `internalName`, `lastStatus`)
//! with a few snake_case leftovers (`start_count`). Field renames are spelled out
//! on each struct rather than applied globally so the odd ones stay visible.
//!
//! Numeric fields are not always numbers on the wire: `min`, `max`,
//! `start_count` and ids arrive as either strings or numbers depending on the
//! endpoint. The [`dto::de`] helpers accept both.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::dto::auth::LoginRequest;
//! use shared::dto::envelope::ApiResponse;
//!
//! let request = LoginRequest {
//!     user_id: "alice".to_string(),
//!     password: "secret".to_string(),
//! };
//! let body = serde_json::to_string(&request).unwrap();
//! assert_eq!(body, r#"{"userId":"alice","password":"secret"}"#);
//!
//! let failed: ApiResponse<()> = ApiResponse::failure("Invalid credentials");
//! assert!(!failed.success);
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
