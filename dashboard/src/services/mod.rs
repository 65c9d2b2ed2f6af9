//! # Services
//!
//! Outbound integrations. The backend HTTP API is the only one.

pub mod api;
