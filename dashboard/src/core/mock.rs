//! Scripted [`ApiService`] for unit tests.
//!
//! Responses are queued per endpoint as raw `ApiResponse` JSON. The last queued
//! response sticks, so a poller can hit the same endpoint repeatedly. Every call
//! is recorded with its request body.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use shared::*;

use super::service::ApiService;

#[derive(Default)]
pub struct MockApiService {
    scripts: Mutex<HashMap<&'static str, VecDeque<Value>>>,
    delays: Mutex<HashMap<&'static str, Duration>>,
    calls: Mutex<Vec<(&'static str, Value)>>,
}

impl MockApiService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response carrying `data`.
    pub fn ok(&self, endpoint: &'static str, data: Value) -> &Self {
        self.script(endpoint, json!({ "success": true, "data": data }))
    }

    /// Queue a failed response.
    pub fn fail(&self, endpoint: &'static str, message: &str) -> &Self {
        self.script(endpoint, json!({ "success": false, "message": message }))
    }

    pub fn script(&self, endpoint: &'static str, response: Value) -> &Self {
        self.scripts
            .lock()
            .entry(endpoint)
            .or_default()
            .push_back(response);
        self
    }

    /// Make `endpoint` sleep before answering (use with paused time).
    pub fn delay(&self, endpoint: &'static str, delay: Duration) -> &Self {
        self.delays.lock().insert(endpoint, delay);
        self
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.lock().iter().filter(|(name, _)| *name == endpoint).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_body(&self, endpoint: &str) -> Option<Value> {
        self.calls
            .lock()
            .iter()
            .rev()
            .find(|(name, _)| *name == endpoint)
            .map(|(_, body)| body.clone())
    }

    async fn respond<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> ApiResponse<T> {
        let body = serde_json::to_value(body).unwrap_or(Value::Null);
        self.calls.lock().push((endpoint, body));

        let delay = self.delays.lock().get(endpoint).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = {
            let mut scripts = self.scripts.lock();
            match scripts.get_mut(endpoint) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match scripted {
            Some(value) => serde_json::from_value(value)
                .unwrap_or_else(|e| panic!("bad script for {endpoint}: {e}")),
            None => ApiResponse::failure(format!("no response scripted for {endpoint}")),
        }
    }
}

#[async_trait]
impl ApiService for MockApiService {
    async fn login(&self, request: &LoginRequest) -> ApiResponse<IdentityResponse> {
        self.respond("login", request).await
    }

    async fn me(&self) -> ApiResponse<IdentityResponse> {
        self.respond("me", &Value::Null).await
    }

    async fn get_services(&self) -> ApiResponse<Vec<ServiceCatalogEntry>> {
        self.respond("get_services", &Value::Null).await
    }

    async fn create_service(&self, entry: &ServiceCatalogEntry) -> ApiResponse<Value> {
        self.respond("create_service", entry).await
    }

    async fn update_service(&self, request: &UpdateServiceRequest) -> ApiResponse<Value> {
        self.respond("update_service", request).await
    }

    async fn get_custom_services(&self) -> ApiResponse<Vec<ServiceCatalogEntry>> {
        self.respond("get_custom_services", &Value::Null).await
    }

    async fn delete_custom_service(&self, request: &DeleteServiceRequest) -> ApiResponse<Value> {
        self.respond("delete_custom_service", request).await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> ApiResponse<CreateUserResponse> {
        self.respond("create_user", request).await
    }

    async fn change_user_password(&self, request: &ChangeUserPasswordRequest) -> ApiResponse<Value> {
        self.respond("change_user_password", request).await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResponse<Value> {
        self.respond("change_password", request).await
    }

    async fn add_balance(&self, request: &AddBalanceRequest) -> ApiResponse<AddBalanceResponse> {
        self.respond("add_balance", request).await
    }

    async fn get_user(&self, request: &GetUserRequest) -> ApiResponse<UserDetails> {
        self.respond("get_user", request).await
    }

    async fn assign_service(&self, request: &ServiceAssignmentRequest) -> ApiResponse<Value> {
        self.respond("assign_service", request).await
    }

    async fn unassign_service(&self, request: &ServiceAssignmentRequest) -> ApiResponse<Value> {
        self.respond("unassign_service", request).await
    }

    async fn get_user_services(&self) -> ApiResponse<Vec<ServiceCatalogEntry>> {
        self.respond("get_user_services", &Value::Null).await
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> ApiResponse<Value> {
        self.respond("place_order", request).await
    }

    async fn get_orders(&self, query: PageQuery) -> ApiResponse<Vec<Order>> {
        self.respond("get_orders", &query).await
    }

    async fn get_transactions(&self, query: PageQuery) -> ApiResponse<Vec<Transaction>> {
        self.respond("get_transactions", &query).await
    }

    async fn request_refill(&self, request: &RefillRequest) -> ApiResponse<RefillResponse> {
        self.respond("request_refill", request).await
    }

    async fn refill_status(&self, request: &RefillRequest) -> ApiResponse<RefillStatusResponse> {
        self.respond("refill_status", request).await
    }

    async fn order_status(&self, request: &OrderStatusRequest) -> ApiResponse<OrderStatusDetails> {
        self.respond("order_status", request).await
    }

    async fn initiate_payment(
        &self,
        request: &InitiatePaymentRequest,
    ) -> ApiResponse<InitiatePaymentResponse> {
        self.respond("initiate_payment", request).await
    }

    async fn payment_callback(&self, request: &PaymentCallbackRequest) -> ApiResponse<Value> {
        self.respond("payment_callback", request).await
    }

    async fn payment_status(&self, request: &PaymentStatusRequest) -> ApiResponse<PaymentStatusResponse> {
        self.respond("payment_status", request).await
    }
}
