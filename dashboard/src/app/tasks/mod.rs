//! # Async Tasks
//!
//! Background tasks spawned by the units.

pub mod payment;
