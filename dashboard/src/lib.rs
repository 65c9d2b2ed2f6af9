//! # OrderHub Dashboard - Library Root
//!
//! Client core for an SMM (social media marketing) reseller dashboard.
//! Customers place orders against a service catalog, request refills and top
//! up their wallet; admins maintain the catalog and user accounts. This crate
//! holds the logic behind those screens; the `dashboard` binary is a thin CLI
//! over it.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              dashboard (this crate)                    │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - units: session, orders, catalog, payment │
//! │  services   - ApiClient (reqwest, cookie session)      │
//! │  core       - AppError, ApiService trait               │
//! │  config     - Config::from_env                         │
//! │  debug      - tracing subscriber setup                 │
//! │  utils      - input validation                         │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP + JSON (shared DTOs)
//!          ▼
//! ┌─────────────────────────┐
//! │  SMM backend            │
//! │  /login /me /admin/*    │
//! │  /user/*                │
//! └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: the units and the [`App`] that owns them
//!   - `orders`: per-order refill request / refill status / order status
//!   - `catalog`: service catalog reconciliation (create, update, delete)
//!   - `payment`: mock PhonePe top-up with a cancellable status poller
//!   - `session`, `accounts`, `order_form`, `pagination`, `notifications`
//! - **services**: `api` endpoint functions and the [`services::api::ApiClient`]
//! - **core**: [`AppError`], [`Result`] and the [`core::ApiService`] seam
//! - **config**: environment configuration
//! - **debug**: logging initialization
//! - **utils**: form validators
//!
//! ## Core Concepts
//!
//! ### Units talk through events
//!
//! Each unit holds an `Arc<dyn ApiService>` and an [`app::EventSink`]. Results
//! that matter elsewhere (toasts, "this order changed, reload it") are sent as
//! [`AppEvent`]s and handled by [`App::process_events`]. Nothing reaches across
//! units directly.
//!
//! ### Responses never throw
//!
//! Every API call returns `shared::ApiResponse<T>`: a 4xx/5xx, a
//! `{"success": false}` body, a transport error and a malformed payload all
//! become `success: false` with a message. Units turn that into
//! [`AppError::Api`] plus an error toast.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p dashboard
//! ```
//!
//! Units are tested against `core::mock::MockApiService`, a scripted
//! `ApiService` that records every call. The payment poller tests run on
//! paused tokio time.

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;

pub use app::{App, AppEvent};
pub use core::{AppError, Result};
