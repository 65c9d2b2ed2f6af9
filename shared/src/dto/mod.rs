//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the dashboard and the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`envelope`] - Normalized `{success, data | message}` responses
//! - [`auth`] - Login, `/me` identity, roles, session
//! - [`catalog`] - Service catalog entries and create/update/delete payloads
//! - [`order`] - Orders, refill state, order/refill status, order placement
//! - [`payment`] - Mock PhonePe gateway payloads
//! - [`account`] - User creation, password changes, balance top-up, ledger
//! - [`de`] - Lenient deserializers for string-or-number fields
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /login
//! Content-Type: application/json
//!
//! { "userId": "alice", "password": "hunter22" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//! Set-Cookie: token=...; HttpOnly
//!
//! { "userId": "alice", "role": "user", "wallet": 250.5 }
//! ```

pub mod account;
pub mod auth;
pub mod catalog;
pub mod de;
pub mod envelope;
pub mod order;
pub mod payment;

pub use account::*;
pub use auth::*;
pub use catalog::*;
pub use envelope::*;
pub use order::*;
pub use payment::*;
