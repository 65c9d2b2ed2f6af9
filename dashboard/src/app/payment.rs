//! # Wallet Top-Up
//!
//! Drives one payment through the mock PhonePe gateway:
//!
//! ```text
//! Idle -> Initiated -> Pending -> Success | Failed
//! ```
//!
//! Once a transaction id comes back, a background task (see
//! [`crate::app::tasks::payment`]) optionally posts a simulated gateway
//! callback and then polls the status endpoint on a fixed interval until the
//! status is terminal. The task is aborted on [`PaymentFlow::reset`] and when
//! the flow is dropped.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{InitiatePaymentRequest, PaymentStatus};
use tokio::task::JoinHandle;

use super::events::{AppEvent, EventSink};
use super::tasks::payment::{check_once, spawn_payment_watch, PollContext};
use crate::config::PaymentSettings;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::utils::validation::parse_positive_amount;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentState {
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
    /// Set while the initiate request is in flight.
    pub loading: bool,
}

pub struct PaymentFlow {
    ctx: PollContext,
    settings: PaymentSettings,
    poller: Option<JoinHandle<()>>,
}

impl PaymentFlow {
    pub fn new(api: Arc<dyn ApiService>, events: EventSink, settings: PaymentSettings) -> Self {
        Self {
            ctx: PollContext {
                state: Arc::new(RwLock::new(PaymentState::default())),
                api,
                events,
            },
            settings,
            poller: None,
        }
    }

    pub fn snapshot(&self) -> PaymentState {
        self.ctx.state.read().clone()
    }

    pub fn status(&self) -> PaymentStatus {
        self.ctx.state.read().status
    }

    pub fn transaction_id(&self) -> Option<String> {
        self.ctx.state.read().transaction_id.clone()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Start a top-up for `amount` (raw user input). Returns the transaction id.
    ///
    /// Only allowed from `Idle`; a settled payment must be [`reset`](Self::reset) first.
    #[tracing::instrument(skip(self))]
    pub async fn initiate(&mut self, amount: &str) -> Result<String> {
        let status = self.status();
        if status.is_in_progress() {
            return Err(AppError::State("A payment is already in progress.".to_string()));
        }
        if status.is_terminal() {
            return Err(AppError::State(
                "Reset the previous payment before starting a new one.".to_string(),
            ));
        }

        let amount = match parse_positive_amount(amount) {
            Ok(amount) => amount,
            Err(err) => {
                self.ctx.events.error(err.user_message());
                return Err(err);
            }
        };

        self.stop_poller();
        *self.ctx.state.write() = PaymentState {
            status: PaymentStatus::Initiated,
            transaction_id: None,
            amount: Some(amount),
            loading: true,
        };
        self.ctx.events.emit(AppEvent::PaymentStatusChanged {
            transaction_id: None,
            status: PaymentStatus::Initiated,
        });

        let response = self
            .ctx
            .api
            .initiate_payment(&InitiatePaymentRequest { amount })
            .await
            .into_result();
        self.ctx.state.write().loading = false;

        let transaction_id = match response {
            Ok(response) => match response.transaction_id.filter(|id| !id.is_empty()) {
                Some(id) => id,
                None => return Err(self.fail("Failed to initiate payment.".to_string())),
            },
            Err(message) => return Err(self.fail(message)),
        };

        {
            let mut state = self.ctx.state.write();
            state.status = PaymentStatus::Pending;
            state.transaction_id = Some(transaction_id.clone());
        }
        self.ctx.events.emit(AppEvent::PaymentStatusChanged {
            transaction_id: Some(transaction_id.clone()),
            status: PaymentStatus::Pending,
        });
        self.ctx
            .events
            .info(format!("Payment initiated! Transaction ID: {}.", transaction_id));
        tracing::info!(%transaction_id, amount, "Payment initiated");

        self.poller = Some(spawn_payment_watch(
            self.ctx.clone(),
            self.settings.clone(),
            transaction_id.clone(),
        ));
        Ok(transaction_id)
    }

    /// Manual status check, same rules as a poll tick.
    pub async fn check_status(&self) -> Result<PaymentStatus> {
        check_once(&self.ctx).await
    }

    /// Wait for the background task to finish (terminal status or callback failure).
    pub async fn wait_for_settlement(&mut self) -> PaymentStatus {
        if let Some(handle) = self.poller.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Payment task ended abnormally");
            }
        }
        self.status()
    }

    /// Stop polling and go back to `Idle`.
    pub fn reset(&mut self) {
        self.stop_poller();
        *self.ctx.state.write() = PaymentState::default();
        self.ctx.events.emit(AppEvent::PaymentStatusChanged {
            transaction_id: None,
            status: PaymentStatus::Idle,
        });
        self.ctx.events.info("Payment flow reset.");
    }

    fn stop_poller(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.abort();
        }
    }

    fn fail(&self, message: String) -> AppError {
        {
            let mut state = self.ctx.state.write();
            state.status = PaymentStatus::Failed;
            state.loading = false;
        }
        self.ctx.events.emit(AppEvent::PaymentStatusChanged {
            transaction_id: None,
            status: PaymentStatus::Failed,
        });
        self.ctx.events.error(message.clone());
        AppError::Api(message)
    }
}

impl Drop for PaymentFlow {
    fn drop(&mut self) {
        self.stop_poller();
    }
}
