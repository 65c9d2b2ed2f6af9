//! # Backend API Client Module
//!
//! HTTP client for the SMM backend. Every function resolves to a
//! [`shared::ApiResponse`]; see [`client::decode_response`] for how raw
//! responses are normalized.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs       - Module exports and documentation
//! ├── client.rs    - ApiClient, response normalization, ApiService impl
//! ├── auth.rs      - /login, /me
//! ├── catalog.rs   - /admin/*Service* catalog routes
//! ├── accounts.rs  - user administration and password changes
//! ├── orders.rs    - orders, refills, listings
//! └── payment.rs   - mock PhonePe top-up
//! ```

pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod client;
pub mod orders;
pub mod payment;

pub use client::ApiClient;
