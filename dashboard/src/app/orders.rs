//! # Order Card
//!
//! Per-order unit for refill requests and on-demand status checks.
//!
//! The card never edits the order's `refill` field itself. After a successful
//! refill request (or when a status check shows the server moved on) it emits
//! [`AppEvent::OrderReloadRequested`] and waits for the owner to hand back a
//! server-fresh [`Order`] through [`OrderCard::apply_reload`].
//!
//! Each of the three actions has its own busy flag; a second call to the same
//! action while the first is in flight fails with [`AppError::Busy`] and makes
//! no request, the other two actions stay available.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{Order, OrderStatusDetails, OrderStatusRequest, RefillRequest, RefillState};

use super::events::{AppEvent, EventSink};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

/// Status string that earns a success toast instead of an info one.
const COMPLETED: &str = "Completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    RequestRefill,
    CheckRefill,
    CheckOrder,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::RequestRefill => "Refill request",
            Action::CheckRefill => "Refill status check",
            Action::CheckOrder => "Order status check",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyFlags {
    pub requesting_refill: bool,
    pub checking_refill: bool,
    pub checking_order: bool,
}

impl BusyFlags {
    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::RequestRefill => &mut self.requesting_refill,
            Action::CheckRefill => &mut self.checking_refill,
            Action::CheckOrder => &mut self.checking_order,
        }
    }
}

/// Visibility/enablement of one trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Hidden,
    Enabled,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderActions {
    pub request_refill: ActionState,
    pub check_refill: ActionState,
    pub check_order: ActionState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCardState {
    pub order: Order,
    /// Last fetched refill status, shown separately from the order.
    pub refill_status: Option<String>,
    /// Last fetched order status snapshot.
    pub status_details: Option<OrderStatusDetails>,
    pub busy: BusyFlags,
}

/// Clears its busy flag when the call finishes or is dropped.
struct BusyGuard {
    state: Arc<RwLock<OrderCardState>>,
    action: Action,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        *self.state.write().busy.slot(self.action) = false;
    }
}

#[derive(Clone)]
pub struct OrderCard {
    state: Arc<RwLock<OrderCardState>>,
    api: Arc<dyn ApiService>,
    events: EventSink,
}

impl OrderCard {
    pub fn new(order: Order, api: Arc<dyn ApiService>, events: EventSink) -> Self {
        Self {
            state: Arc::new(RwLock::new(OrderCardState {
                order,
                refill_status: None,
                status_details: None,
                busy: BusyFlags::default(),
            })),
            api,
            events,
        }
    }

    pub fn order_id(&self) -> String {
        self.state.read().order.order_id.clone()
    }

    pub fn order(&self) -> Order {
        self.state.read().order.clone()
    }

    pub fn snapshot(&self) -> OrderCardState {
        self.state.read().clone()
    }

    fn acquire(&self, action: Action) -> Result<BusyGuard> {
        let mut state = self.state.write();
        let flag = state.busy.slot(action);
        if *flag {
            return Err(AppError::Busy(action.label()));
        }
        *flag = true;
        Ok(BusyGuard {
            state: Arc::clone(&self.state),
            action,
        })
    }

    /// Ask the backend to start a refill. Allowed only while the order offers
    /// one that has not been requested yet.
    #[tracing::instrument(skip(self), fields(order_id = %self.order_id()))]
    pub async fn request_refill(&self) -> Result<Option<String>> {
        let order_id = {
            let state = self.state.read();
            if state.order.refill != RefillState::Available {
                drop(state);
                let message = "Refill is not available to be requested for this order.";
                self.events.warning(message);
                return Err(AppError::State(message.to_string()));
            }
            state.order.order_id.clone()
        };
        let _busy = self.acquire(Action::RequestRefill)?;

        let request = RefillRequest {
            order_id: order_id.clone(),
        };
        match self.api.request_refill(&request).await.into_result() {
            Ok(response) => {
                self.events.success(format!(
                    "Refill requested successfully! Refill ID: {}",
                    response.refill.as_deref().unwrap_or("N/A")
                ));
                self.events.emit(AppEvent::OrderReloadRequested(order_id));
                Ok(response.refill)
            }
            Err(message) => {
                self.events.error(message.clone());
                Err(AppError::Api(message))
            }
        }
    }

    /// Look up the status of the in-flight refill. Read-only with respect to
    /// the order; only [`OrderCardState::refill_status`] changes.
    #[tracing::instrument(skip(self), fields(order_id = %self.order_id()))]
    pub async fn check_refill_status(&self) -> Result<String> {
        let refill_id = self.state.read().order.refill.refill_id().map(str::to_string);
        let Some(refill_id) = refill_id else {
            let message = "No active refill request ID available to check status.";
            self.events.info(message);
            return Err(AppError::State(message.to_string()));
        };
        let _busy = self.acquire(Action::CheckRefill)?;

        let request = RefillRequest {
            order_id: refill_id,
        };
        match self.api.refill_status(&request).await.into_result() {
            Ok(response) => {
                self.state.write().refill_status = Some(response.status.clone());

                let message = format!("Refill Status: {}", response.status);
                if response.status == COMPLETED {
                    self.events.success(message);
                } else {
                    self.events.info(message);
                }
                Ok(response.status)
            }
            Err(message) => {
                self.events.error(message.clone());
                Err(AppError::Api(message))
            }
        }
    }

    /// Fetch the detailed order status. Requests a reload when the backend's
    /// status differs from the listing's `lastStatus`.
    #[tracing::instrument(skip(self), fields(order_id = %self.order_id()))]
    pub async fn check_order_status(&self) -> Result<OrderStatusDetails> {
        let _busy = self.acquire(Action::CheckOrder)?;
        let order_id = self.order_id();

        let request = OrderStatusRequest {
            order: order_id.clone(),
        };
        match self.api.order_status(&request).await.into_result() {
            Ok(details) => {
                let stale = {
                    let mut state = self.state.write();
                    state.status_details = Some(details.clone());
                    state.order.last_status != details.status
                };

                let message = format!("Order Status: {}", details.status);
                if details.status == COMPLETED {
                    self.events.success(message);
                } else {
                    self.events.info(message);
                }

                if stale {
                    tracing::debug!(status = %details.status, "Order status moved, requesting reload");
                    self.events.emit(AppEvent::OrderReloadRequested(order_id));
                }
                Ok(details)
            }
            Err(message) => {
                self.events.error(message.clone());
                Err(AppError::Api(message))
            }
        }
    }

    /// Adopt a server-fresh copy of this order. Orders with another id are ignored.
    pub fn apply_reload(&self, order: Order) -> bool {
        let mut state = self.state.write();
        if state.order.order_id != order.order_id {
            return false;
        }
        if state.order.refill != order.refill {
            // A new refill id invalidates the previously shown refill status.
            state.refill_status = None;
        }
        state.order = order;
        true
    }

    pub fn displayed_status(&self) -> String {
        let state = self.state.read();
        state
            .status_details
            .as_ref()
            .map(|details| details.status.clone())
            .filter(|status| !status.is_empty())
            .unwrap_or_else(|| state.order.last_status.clone())
    }

    pub fn displayed_start_count(&self) -> String {
        let state = self.state.read();
        state
            .status_details
            .as_ref()
            .map(|details| details.start_count.clone())
            .filter(|count| !count.is_empty())
            .unwrap_or_else(|| state.order.start_count.clone())
    }

    pub fn refill_label(&self) -> String {
        match &self.state.read().order.refill {
            RefillState::NotOffered => "Not Available".to_string(),
            RefillState::Available => "Available (click to request)".to_string(),
            RefillState::InFlight(id) => format!("Refill in progress (ID: {})", id),
        }
    }

    pub fn actions(&self) -> OrderActions {
        let state = self.state.read();
        let gate = |visible: bool, busy: bool| match (visible, busy) {
            (false, _) => ActionState::Hidden,
            (true, true) => ActionState::Busy,
            (true, false) => ActionState::Enabled,
        };

        OrderActions {
            request_refill: gate(
                state.order.refill == RefillState::Available,
                state.busy.requesting_refill,
            ),
            check_refill: gate(
                matches!(state.order.refill, RefillState::InFlight(_)),
                state.busy.checking_refill,
            ),
            check_order: gate(true, state.busy.checking_order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::testing::notifications;
    use crate::app::events::drain;
    use crate::app::notifications::NotificationLevel;
    use crate::core::mock::MockApiService;
    use serde_json::json;
    use std::time::Duration;

    fn order(refill: RefillState) -> Order {
        Order {
            order_id: "9001".into(),
            service: "SMM-IG-F-STD-001".into(),
            quantity: 500,
            rate: 1.2,
            last_status: "Pending".into(),
            start_count: "37".into(),
            refill,
        }
    }

    fn new_card(api: &Arc<MockApiService>, refill: RefillState) -> (OrderCard, async_channel::Receiver<AppEvent>) {
        let (events, rx) = EventSink::channel();
        (OrderCard::new(order(refill), api.clone(), events), rx)
    }

    #[tokio::test]
    async fn test_request_refill_emits_reload_without_local_write() {
        let api = Arc::new(MockApiService::new());
        api.ok("request_refill", json!({"refill": "R123"}));
        let (card, rx) = new_card(&api, RefillState::Available);

        let refill = card.request_refill().await.unwrap();
        assert_eq!(refill.as_deref(), Some("R123"));
        assert_eq!(api.last_body("request_refill").unwrap(), json!({"orderId": "9001"}));
        // Still Available until the owner reloads.
        assert_eq!(card.order().refill, RefillState::Available);

        let events = drain(&rx);
        assert!(events.contains(&AppEvent::OrderReloadRequested("9001".into())));
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::Notify(n) if n.message == "Refill requested successfully! Refill ID: R123"
        )));
    }

    #[tokio::test]
    async fn test_request_refill_rejected_unless_available() {
        let api = Arc::new(MockApiService::new());
        for refill in [RefillState::NotOffered, RefillState::InFlight("R1".into())] {
            let (card, rx) = new_card(&api, refill);
            assert!(matches!(card.request_refill().await, Err(AppError::State(_))));
            assert_eq!(notifications(&rx)[0].0, NotificationLevel::Warning);
        }
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_check_refill_status_is_idempotent() {
        let api = Arc::new(MockApiService::new());
        api.ok("refill_status", json!({"status": "In progress"}));
        let (card, _rx) = new_card(&api, RefillState::InFlight("R123".into()));

        let first = card.check_refill_status().await.unwrap();
        let after_first = card.snapshot();
        let second = card.check_refill_status().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(card.snapshot(), after_first);
        assert_eq!(after_first.refill_status.as_deref(), Some("In progress"));
        assert_eq!(after_first.order.refill, RefillState::InFlight("R123".into()));
        // The refill id travels in the orderId field.
        assert_eq!(api.last_body("refill_status").unwrap(), json!({"orderId": "R123"}));
    }

    #[tokio::test]
    async fn test_check_refill_status_requires_refill_id() {
        let api = Arc::new(MockApiService::new());
        let (card, rx) = new_card(&api, RefillState::Available);

        assert!(card.check_refill_status().await.is_err());
        assert_eq!(notifications(&rx)[0].0, NotificationLevel::Info);
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_check_order_status_never_touches_refill() {
        let api = Arc::new(MockApiService::new());
        api.ok(
            "order_status",
            json!({"status": "Partial", "start_count": "3572", "charge": "0.27819", "remains": "157", "currency": "USD"}),
        );

        for refill in [
            RefillState::NotOffered,
            RefillState::Available,
            RefillState::InFlight("R7".into()),
        ] {
            let (card, rx) = new_card(&api, refill.clone());
            let details = card.check_order_status().await.unwrap();

            assert_eq!(details.remains, "157");
            assert_eq!(card.order().refill, refill);
            assert_eq!(card.displayed_status(), "Partial");
            assert_eq!(card.displayed_start_count(), "3572");
            // Partial != Pending, so the owner is asked to reload.
            assert!(drain(&rx).contains(&AppEvent::OrderReloadRequested("9001".into())));
        }
        assert_eq!(api.last_body("order_status").unwrap(), json!({"order": "9001"}));
    }

    #[tokio::test]
    async fn test_unchanged_status_does_not_request_reload() {
        let api = Arc::new(MockApiService::new());
        api.ok("order_status", json!({"status": "Pending"}));
        let (card, rx) = new_card(&api, RefillState::NotOffered);

        card.check_order_status().await.unwrap();
        assert!(!drain(&rx)
            .iter()
            .any(|e| matches!(e, AppEvent::OrderReloadRequested(_))));
        // Empty start_count in the snapshot falls back to the listing.
        assert_eq!(card.displayed_start_count(), "37");
    }

    #[tokio::test]
    async fn test_failed_check_keeps_displayed_state() {
        let api = Arc::new(MockApiService::new());
        api.ok("order_status", json!({"status": "In progress", "start_count": "10"}));
        api.fail("order_status", "Order not found");
        let (card, rx) = new_card(&api, RefillState::NotOffered);

        card.check_order_status().await.unwrap();
        drain(&rx);
        let err = card.check_order_status().await.unwrap_err();

        assert_eq!(err, AppError::Api("Order not found".into()));
        assert_eq!(card.displayed_status(), "In progress");
        assert_eq!(
            notifications(&rx),
            vec![(NotificationLevel::Error, "Order not found".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_flag_blocks_only_its_own_action() {
        let api = Arc::new(MockApiService::new());
        api.ok("order_status", json!({"status": "Pending"}))
            .ok("refill_status", json!({"status": "Completed"}))
            .delay("order_status", Duration::from_secs(1));
        let (card, _rx) = new_card(&api, RefillState::InFlight("R9".into()));

        let second = async {
            tokio::task::yield_now().await;
            assert!(card.actions().check_order == ActionState::Busy);
            let blocked = card.check_order_status().await;
            let other = card.check_refill_status().await;
            (blocked, other)
        };
        let (first, (blocked, other)) = tokio::join!(card.check_order_status(), second);

        assert!(first.is_ok());
        assert_eq!(blocked.unwrap_err(), AppError::Busy("Order status check"));
        assert_eq!(other.unwrap(), "Completed");
        assert_eq!(api.calls("order_status"), 1);
        assert_eq!(card.snapshot().busy, BusyFlags::default());
    }

    #[test]
    fn test_apply_reload_and_labels() {
        let api: Arc<dyn ApiService> = Arc::new(MockApiService::new());
        let (events, _rx) = EventSink::channel();
        let card = OrderCard::new(order(RefillState::Available), api, events);

        assert_eq!(card.refill_label(), "Available (click to request)");
        assert_eq!(card.actions().request_refill, ActionState::Enabled);
        assert_eq!(card.actions().check_refill, ActionState::Hidden);

        let mut other = order(RefillState::NotOffered);
        other.order_id = "1".into();
        assert!(!card.apply_reload(other));

        assert!(card.apply_reload(order(RefillState::InFlight("R123".into()))));
        assert_eq!(card.refill_label(), "Refill in progress (ID: R123)");
        assert_eq!(card.actions().request_refill, ActionState::Hidden);
        assert_eq!(card.actions().check_refill, ActionState::Enabled);
        assert_eq!(card.actions().check_order, ActionState::Enabled);
    }
}
