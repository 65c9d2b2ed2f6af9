//! # Application Orchestrator
//!
//! The [`App`] struct owns every unit of the dashboard and routes the events
//! they emit back into shared state.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  App (owner)                                               │
//! │  - session: SessionStore        - catalog: ServiceCatalog  │
//! │  - order_cards: Vec<OrderCard>  - payment: PaymentFlow     │
//! │  - orders / transactions: Paginated<_>                     │
//! │  - process_events() drains the channel                     │
//! └──────────────▲─────────────────────────────┬───────────────┘
//!                │ async_channel (unbounded)   │ Arc<dyn ApiService>
//!                │ AppEvent                    ▼
//! ┌──────────────┴─────────────────┐   ┌──────────────────────┐
//! │  Units + payment poller task   │   │  ApiClient (reqwest) │
//! │  EventSink::notify / emit      │──▶│  or MockApiService   │
//! └────────────────────────────────┘   └──────────────────────┘
//! ```
//!
//! Units never call each other. A card that changed server state emits
//! [`AppEvent::OrderReloadRequested`]; the next [`App::process_events`]
//! refetches the order listing and hands each card its fresh order.
//!
//! ## Key Components
//!
//! - **[`session`]**: signed-in identity, fetched once
//! - **[`orders`]**: per-order refill/status actions
//! - **[`catalog`]**: admin service catalog with create/update/delete
//! - **[`payment`]**: wallet top-up with status polling
//! - **[`accounts`]**: user creation, passwords, balance, assignments
//! - **[`order_form`]**: placing new orders
//! - **[`pagination`]**: paged listings for orders and the wallet ledger
//! - **[`notifications`]**: toast queue fed from [`events`]
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use dashboard::app::App;
//! use dashboard::config::Config;
//!
//! # async fn run() -> dashboard::core::Result<()> {
//! let mut app = App::with_client(Config::from_env()?)?;
//! app.init_session().await;
//! app.login("alice", "secret").await?;
//! app.load_orders().await?;
//!
//! for card in app.order_cards() {
//!     println!("{} {}", card.order_id(), card.displayed_status());
//! }
//! app.process_events().await;
//! for toast in app.notifications.drain() {
//!     println!("[{}] {}", toast.level.as_str(), toast.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod catalog;
pub mod events;
pub mod notifications;
pub mod order_form;
pub mod orders;
pub mod pagination;
pub mod payment;
pub mod session;
mod tasks;

pub use events::{AppEvent, EventSink};

use std::collections::HashMap;
use std::sync::Arc;

use async_channel::Receiver;
use shared::{AddBalanceResponse, Order, PageQuery, Session, Transaction};

use self::accounts::{AccountService, UserAdmin};
use self::catalog::ServiceCatalog;
use self::notifications::NotificationManager;
use self::order_form::OrderForm;
use self::orders::OrderCard;
use self::pagination::Paginated;
use self::payment::PaymentFlow;
use self::session::SessionStore;
use crate::config::Config;
use crate::core::error::Result;
use crate::core::service::ApiService;
use crate::services::api::ApiClient;

#[derive(Debug, Clone, Copy)]
enum PageLoad {
    First,
    More,
    Reload,
}

/// Owner of all dashboard units.
///
/// Every unit gets a clone of the same `Arc<dyn ApiService>` and
/// [`EventSink`]; the receiving end stays here.
pub struct App {
    pub config: Config,
    api: Arc<dyn ApiService>,

    pub session: SessionStore,
    /// Toasts collected by [`App::process_events`].
    pub notifications: NotificationManager,

    pub catalog: ServiceCatalog,
    pub accounts: AccountService,
    pub users: UserAdmin,
    pub order_form: OrderForm,
    pub payment: PaymentFlow,

    orders: Paginated<Order>,
    /// One card per listed order, same order as `orders`.
    order_cards: Vec<OrderCard>,
    transactions: Paginated<Transaction>,

    event_rx: Receiver<AppEvent>,
    events: EventSink,
}

impl App {
    pub fn new(config: Config, api: Arc<dyn ApiService>) -> Self {
        let (events, event_rx) = EventSink::channel();

        let app = Self {
            session: SessionStore::new(events.clone()),
            notifications: NotificationManager::new(),
            catalog: ServiceCatalog::new(api.clone(), events.clone()),
            accounts: AccountService::new(api.clone(), events.clone()),
            users: UserAdmin::new(api.clone(), events.clone()),
            order_form: OrderForm::new(api.clone(), events.clone()),
            payment: PaymentFlow::new(api.clone(), events.clone(), config.payment.clone()),
            orders: Paginated::new(config.page_limit),
            order_cards: Vec::new(),
            transactions: Paginated::new(config.page_limit),
            event_rx,
            events,
            api,
            config,
        };

        tracing::info!(page_limit = app.config.page_limit, "App initialized");
        app
    }

    /// Build the app on top of a real [`ApiClient`].
    pub fn with_client(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        tracing::info!(api_url = client.base_url(), "Using backend");
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn api(&self) -> Arc<dyn ApiService> {
        self.api.clone()
    }

    // ===== Session =====

    pub async fn init_session(&mut self) -> Session {
        let session = self.session.init(self.api.as_ref()).await;
        self.process_events().await;
        session
    }

    pub async fn login(&mut self, user_id: &str, password: &str) -> Result<Session> {
        let result = self.session.login(self.api.as_ref(), user_id, password).await;
        self.process_events().await;
        result
    }

    /// Sign out locally and drop everything loaded for the previous user.
    ///
    /// Session-scoped units are rebuilt so the next sign-in refetches. The old
    /// payment poller is aborted when its flow drops.
    pub fn logout(&mut self) {
        let api = self.api.clone();
        let events = self.events.clone();
        self.payment = PaymentFlow::new(api.clone(), events.clone(), self.config.payment.clone());
        self.catalog = ServiceCatalog::new(api.clone(), events.clone());
        self.users = UserAdmin::new(api.clone(), events.clone());
        self.order_form = OrderForm::new(api, events);
        self.orders = Paginated::new(self.config.page_limit);
        self.order_cards.clear();
        self.transactions = Paginated::new(self.config.page_limit);

        // Toasts queued for the previous user are not shown to the next one.
        let dropped = events::drain(&self.event_rx).len();
        self.notifications.drain();
        tracing::info!(dropped_events = dropped, "Session state cleared");

        self.session.logout();
    }

    // ===== Orders =====

    pub fn orders(&self) -> &Paginated<Order> {
        &self.orders
    }

    pub fn order_cards(&self) -> &[OrderCard] {
        &self.order_cards
    }

    pub fn order_card(&self, order_id: &str) -> Option<&OrderCard> {
        self.order_cards.iter().find(|card| card.order_id() == order_id)
    }

    pub async fn load_orders(&mut self) -> Result<()> {
        self.refresh_orders(PageLoad::First).await
    }

    pub async fn load_more_orders(&mut self) -> Result<()> {
        self.refresh_orders(PageLoad::More).await
    }

    async fn refresh_orders(&mut self, mode: PageLoad) -> Result<()> {
        self.session.require(None)?;

        let api = self.api.clone();
        let fetch = move |query: PageQuery| {
            let api = api.clone();
            async move { api.get_orders(query).await }
        };
        let result = match mode {
            PageLoad::First => self.orders.load_first(fetch).await,
            PageLoad::More => self.orders.load_more(fetch).await,
            PageLoad::Reload => self.orders.reload(fetch).await,
        };

        if let Err(err) = result {
            tracing::warn!(?mode, error = %err, "Order listing fetch failed");
            self.events
                .error(format!("Failed to load orders: {}", err.user_message()));
            return Err(err);
        }

        self.sync_cards();
        Ok(())
    }

    /// Rebuild cards from the listing, keeping existing cards (and their
    /// busy flags and status details) for orders still present.
    fn sync_cards(&mut self) {
        let mut previous: HashMap<String, OrderCard> = self
            .order_cards
            .drain(..)
            .map(|card| (card.order_id(), card))
            .collect();

        let api = &self.api;
        let events = &self.events;
        self.order_cards = self
            .orders
            .items()
            .iter()
            .map(|order| match previous.remove(&order.order_id) {
                Some(card) => {
                    card.apply_reload(order.clone());
                    card
                }
                None => OrderCard::new(order.clone(), api.clone(), events.clone()),
            })
            .collect();
    }

    // ===== Wallet ledger =====

    pub fn transactions(&self) -> &Paginated<Transaction> {
        &self.transactions
    }

    pub async fn load_transactions(&mut self) -> Result<()> {
        self.refresh_transactions(PageLoad::First).await
    }

    pub async fn load_more_transactions(&mut self) -> Result<()> {
        self.refresh_transactions(PageLoad::More).await
    }

    async fn refresh_transactions(&mut self, mode: PageLoad) -> Result<()> {
        self.session.require(None)?;

        let api = self.api.clone();
        let fetch = move |query: PageQuery| {
            let api = api.clone();
            async move { api.get_transactions(query).await }
        };
        let result = match mode {
            PageLoad::First => self.transactions.load_first(fetch).await,
            PageLoad::More => self.transactions.load_more(fetch).await,
            PageLoad::Reload => self.transactions.reload(fetch).await,
        };

        result.inspect_err(|err| {
            self.events
                .error(format!("Failed to load transactions: {}", err.user_message()));
        })
    }

    // ===== Cross-unit admin actions =====

    /// Delete a catalog entry and drop it from the selected user's services.
    pub async fn delete_service(&mut self, service_id: &str) -> Result<Vec<String>> {
        let removed = self.catalog.delete(service_id).await?;
        self.users.forget_service(service_id);
        Ok(removed)
    }

    /// Top up a wallet. Crediting the signed-in account updates its session balance.
    pub async fn add_balance(&mut self, user_id: &str, amount: &str) -> Result<AddBalanceResponse> {
        let credited = self.accounts.add_balance(user_id, amount).await?;

        let session = self.session.current();
        if session.is_authenticated && session.user.id == credited.user_id {
            let wallet = credited
                .wallet
                .unwrap_or(session.user.wallet + credited.amount);
            self.session.set_wallet(wallet);
        }
        Ok(credited)
    }

    // ===== Events =====

    /// Drain pending events. Reload requests are coalesced into one listing
    /// refetch per pass; loops until the channel is empty.
    pub async fn process_events(&mut self) -> usize {
        let mut handled = 0;

        loop {
            let batch = events::drain(&self.event_rx);
            if batch.is_empty() {
                break;
            }
            handled += batch.len();

            let mut reloads = Vec::new();
            for event in batch {
                match event {
                    AppEvent::Notify(notification) => self.notifications.push(notification),
                    AppEvent::OrderReloadRequested(order_id) => {
                        if !reloads.contains(&order_id) {
                            reloads.push(order_id);
                        }
                    }
                    AppEvent::PaymentStatusChanged {
                        transaction_id,
                        status,
                    } => {
                        tracing::debug!(?transaction_id, %status, "Payment status changed");
                    }
                    AppEvent::SessionChanged(session) => {
                        tracing::debug!(
                            authenticated = session.is_authenticated,
                            user_id = %session.user.id,
                            "Session changed"
                        );
                    }
                }
            }

            if reloads.is_empty() {
                continue;
            }
            for order_id in &reloads {
                self.notifications.info(format!("Updating order {}...", order_id));
            }
            if let Err(err) = self.refresh_orders(PageLoad::Reload).await {
                tracing::warn!(?reloads, error = %err, "Order reload failed");
            }
        }

        handled
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::app::orders::ActionState;
    use crate::core::mock::MockApiService;

    fn app(api: &Arc<MockApiService>) -> App {
        App::new(Config::default(), api.clone())
    }

    fn order_json(refill: &str) -> serde_json::Value {
        json!({
            "orderId": 9001,
            "service": "SMM-IG-F-STD-001",
            "quantity": 500,
            "rate": 1.2,
            "lastStatus": "In progress",
            "start_count": "37",
            "refill": refill
        })
    }

    async fn signed_in(api: &Arc<MockApiService>) -> App {
        api.ok("login", json!({"userId": "alice", "role": "user", "wallet": 40}));
        let mut app = app(api);
        app.login("alice", "secret").await.unwrap();
        app
    }

    #[tokio::test]
    async fn test_refill_request_flows_through_listing_reload() {
        let api = Arc::new(MockApiService::new());
        api.ok("get_orders", json!([order_json("")]))
            .ok("get_orders", json!([order_json("R123")]));
        api.ok("request_refill", json!({"refill": "R123"}));
        let mut app = signed_in(&api).await;

        app.load_orders().await.unwrap();
        let card = app.order_card("9001").unwrap().clone();
        assert_eq!(card.actions().request_refill, ActionState::Enabled);

        card.request_refill().await.unwrap();
        // The card itself has not changed yet.
        assert_eq!(card.actions().request_refill, ActionState::Enabled);

        app.process_events().await;
        assert_eq!(api.calls("get_orders"), 2);

        let card = app.order_card("9001").unwrap();
        let actions = card.actions();
        assert_eq!(actions.request_refill, ActionState::Hidden);
        assert_eq!(actions.check_refill, ActionState::Enabled);

        let messages: Vec<String> = app.notifications.iter().map(|n| n.message.clone()).collect();
        assert!(messages.contains(&"Refill requested successfully! Refill ID: R123".to_string()));
        assert!(messages.contains(&"Updating order 9001...".to_string()));
    }

    #[tokio::test]
    async fn test_listing_requires_session() {
        let api = Arc::new(MockApiService::new());
        let mut app = app(&api);
        assert!(app.load_orders().await.is_err());
        assert!(app.load_transactions().await.is_err());
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_cards_survive_reload_by_id() {
        let api = Arc::new(MockApiService::new());
        api.ok("get_orders", json!([order_json("")]));
        api.ok("order_status", json!({"status": "In progress", "charge": "0.6", "remains": 0}));
        let mut app = signed_in(&api).await;

        app.load_orders().await.unwrap();
        app.order_card("9001").unwrap().check_order_status().await.unwrap();
        app.refresh_orders(PageLoad::Reload).await.unwrap();

        assert_eq!(app.order_cards().len(), 1);
        let details = app.order_cards()[0].snapshot().status_details.unwrap();
        assert_eq!(details.charge, "0.6");
    }

    #[tokio::test]
    async fn test_add_balance_to_self_updates_wallet() {
        let api = Arc::new(MockApiService::new());
        api.ok("add_balance", json!({"userId": "alice", "amount": 60}))
            .ok("add_balance", json!({"userId": "bob", "amount": 5, "wallet": 999}));
        let mut app = signed_in(&api).await;

        app.add_balance("alice", "60").await.unwrap();
        assert_eq!(app.session.current().user.wallet, 100.0);

        app.add_balance("bob", "5").await.unwrap();
        assert_eq!(app.session.current().user.wallet, 100.0);
    }

    #[tokio::test]
    async fn test_logout_clears_loaded_state() {
        let api = Arc::new(MockApiService::new());
        api.ok("get_orders", json!([order_json("")]));
        let mut app = signed_in(&api).await;
        app.load_orders().await.unwrap();

        app.logout();
        assert!(app.order_cards().is_empty());
        assert!(app.orders().items().is_empty());
        assert!(!app.session.current().is_authenticated);
    }

    #[tokio::test]
    async fn test_next_user_refetches_after_logout() {
        let api = Arc::new(MockApiService::new());
        api.ok("get_user_services", json!([{"serviceId": 1, "service": "ALICE-ONLY", "rate": 1.0, "min": "1", "max": "10"}]))
            .ok("get_user_services", json!([{"serviceId": 2, "service": "BOB-ONLY", "rate": 1.0, "min": "1", "max": "10"}]));
        api.ok("get_services", json!([{"serviceId": 3, "service": "ADMIN-CAT", "rate": 2.0, "min": "1", "max": "10"}]));
        api.ok("login", json!({"userId": "alice", "role": "user", "wallet": 40}))
            .ok("login", json!({"userId": "bob", "role": "user", "wallet": 5}));
        let mut app = app(&api);
        app.login("alice", "secret").await.unwrap();
        app.order_form.load_services().await.unwrap();
        app.catalog.load().await.unwrap();
        app.process_events().await;

        app.logout();
        assert!(app.order_form.services().is_empty());
        assert!(app.catalog.entries().is_empty());
        assert!(app.users.selected_user().is_none());
        let toasts: Vec<String> = app.notifications.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(toasts, vec!["Logged out.".to_string()]);

        app.login("bob", "secret").await.unwrap();
        app.order_form.load_services().await.unwrap();
        let services: Vec<&str> = app.order_form.services().iter().map(|s| s.service.as_str()).collect();
        assert_eq!(services, vec!["BOB-ONLY"]);
        assert_eq!(api.calls("get_user_services"), 2);
    }
}
