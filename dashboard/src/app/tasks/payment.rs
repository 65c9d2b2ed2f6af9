//! # Payment Tasks
//!
//! Background side of [`crate::app::payment::PaymentFlow`]: the mock gateway
//! callback and the status poller. Both run in one spawned task whose
//! `JoinHandle` the flow keeps so it can abort it.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use rand::Rng;
use shared::{PaymentCallbackRequest, PaymentStatus, PaymentStatusRequest};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::app::events::{AppEvent, EventSink};
use crate::app::payment::PaymentState;
use crate::config::PaymentSettings;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

/// What the background task needs from its flow.
#[derive(Clone)]
pub(crate) struct PollContext {
    pub state: Arc<RwLock<PaymentState>>,
    pub api: Arc<dyn ApiService>,
    pub events: EventSink,
}

impl PollContext {
    /// Store `status` if `transaction_id` is still the flow's transaction.
    /// Returns false for a stale result (the flow was reset or restarted).
    pub(crate) fn apply_status(&self, transaction_id: &str, status: PaymentStatus) -> bool {
        {
            let mut state = self.state.write();
            if state.transaction_id.as_deref() != Some(transaction_id) {
                return false;
            }
            state.status = status;
        }
        self.events.emit(AppEvent::PaymentStatusChanged {
            transaction_id: Some(transaction_id.to_string()),
            status,
        });
        true
    }

    fn is_settled(&self, transaction_id: &str) -> bool {
        let state = self.state.read();
        state.transaction_id.as_deref() != Some(transaction_id) || state.status.is_terminal()
    }
}

/// One status check. Makes no request once the payment is settled.
pub(crate) async fn check_once(ctx: &PollContext) -> Result<PaymentStatus> {
    let (transaction_id, current) = {
        let state = ctx.state.read();
        (state.transaction_id.clone(), state.status)
    };
    let Some(transaction_id) = transaction_id else {
        return Err(AppError::State("No payment to check.".to_string()));
    };
    if current.is_terminal() {
        return Ok(current);
    }

    let request = PaymentStatusRequest {
        transaction_id: transaction_id.clone(),
    };
    match ctx.api.payment_status(&request).await.into_result() {
        Ok(response) => {
            let status = response.status;
            if !ctx.apply_status(&transaction_id, status) {
                debug!(%transaction_id, "Discarding status for a replaced payment");
                return Ok(ctx.state.read().status);
            }

            match status {
                PaymentStatus::Success => ctx.events.success(format!(
                    "Payment {}! Transaction ID: {}",
                    status, transaction_id
                )),
                PaymentStatus::Failed => ctx.events.error(format!(
                    "Payment {}! Transaction ID: {}",
                    status, transaction_id
                )),
                _ => ctx.events.info(format!("Payment status: {}", status)),
            }
            Ok(status)
        }
        Err(message) => {
            // Status is left as-is; the next tick tries again.
            ctx.events.error(message.clone());
            Err(AppError::Api(message))
        }
    }
}

/// Spawn the gateway simulation (when enabled) followed by the status poller.
pub(crate) fn spawn_payment_watch(
    ctx: PollContext,
    settings: PaymentSettings,
    transaction_id: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if settings.simulate_gateway && !simulate_gateway(&ctx, &settings, &transaction_id).await {
            return;
        }
        poll_until_settled(&ctx, settings.poll_interval, &transaction_id).await;
    })
}

/// Stand in for the gateway: after `gateway_delay`, post a callback with a
/// random outcome. Returns false if the flow should stop here.
async fn simulate_gateway(ctx: &PollContext, settings: &PaymentSettings, transaction_id: &str) -> bool {
    tokio::time::sleep(settings.gateway_delay).await;
    if ctx.is_settled(transaction_id) {
        return false;
    }

    let success_rate = if settings.gateway_success_rate.is_finite() {
        settings.gateway_success_rate.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let succeeded = rand::rng().random_bool(success_rate);
    let outcome = if succeeded {
        PaymentStatus::Success
    } else {
        PaymentStatus::Failed
    };

    let request = PaymentCallbackRequest {
        transaction_id: transaction_id.to_string(),
        status: outcome,
    };
    match ctx.api.payment_callback(&request).await.into_result() {
        Ok(_) => {
            info!(%transaction_id, %outcome, "Mock gateway callback delivered");
            ctx.events.info(format!(
                "Mock PhonePe gateway processed payment. Status: {}.",
                outcome
            ));
            true
        }
        Err(message) => {
            warn!(%transaction_id, error = %message, "Mock gateway callback failed");
            ctx.events.error("Failed to simulate PhonePe callback.");
            ctx.apply_status(transaction_id, PaymentStatus::Failed);
            false
        }
    }
}

/// Check every `period`, first one `period` from now, until a terminal status.
async fn poll_until_settled(ctx: &PollContext, period: Duration, transaction_id: &str) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if ctx.is_settled(transaction_id) {
            break;
        }
        if let Ok(status) = check_once(ctx).await {
            if status.is_terminal() {
                break;
            }
        }
    }
    debug!(%transaction_id, "Payment polling stopped");
}
