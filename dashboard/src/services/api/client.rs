//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! The backend authenticates with an HTTP-only session cookie set by
//! `POST /login`, so the underlying `reqwest::Client` keeps a cookie store and
//! must be shared (it is cheap to clone) rather than rebuilt per call.

use std::time::Instant;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::*;

use crate::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

/// HTTP client for communicating with the SMM backend.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `config.api_url` with the configured request timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET path`, optionally with `page`/`limit` query parameters.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<PageQuery>,
    ) -> ApiResponse<T> {
        let mut request = self.client.get(self.url(path));
        if let Some(query) = query {
            request = request.query(&query);
        }
        self.execute(Method::GET, path, request).await
    }

    /// `POST`/`PUT` a JSON body.
    pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResponse<T> {
        let request = self.client.request(method.clone(), self.url(path)).json(body);
        self.execute(method, path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResponse<T> {
        let start = Instant::now();

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%method, path, error = %e, "Network error");
                return ApiResponse::failure(format!("Network error: {}", e));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(%method, path, error = %e, "Failed to read response body");
                return ApiResponse::failure(format!("Network error: {}", e));
            }
        };

        let result = decode_response(status, &body);
        let duration_ms = start.elapsed().as_millis();

        if result.success {
            tracing::debug!(%method, path, status = status.as_u16(), duration_ms, "Request succeeded");
        } else {
            tracing::warn!(
                %method,
                path,
                status = status.as_u16(),
                duration_ms,
                error = result.message_or_default(),
                "Request failed"
            );
        }

        result
    }
}

/// Normalize a raw HTTP response into an [`ApiResponse`].
///
/// - non-2xx: failure with the body's `message`/`error`, or a status line
/// - 2xx with `{"success": false, ...}`: failure with the body's message
/// - 2xx otherwise: the payload, with or without a `{ "data": ... }` wrapper
pub(crate) fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> ApiResponse<T> {
    if !status.is_success() {
        let reason = serde_json::from_slice::<ErrorResponse>(body)
            .ok()
            .and_then(|error| error.reason().map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        return ApiResponse::failure(reason);
    }

    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => return ApiResponse::failure(format!("Failed to parse response: {}", e)),
        }
    };

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let reason = serde_json::from_value::<ErrorResponse>(value)
            .ok()
            .and_then(|error| error.reason().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
        return ApiResponse::failure(reason);
    }

    match serde_json::from_value::<MaybeWrapped<T>>(value) {
        Ok(payload) => ApiResponse::ok(payload.into_inner()),
        Err(e) => ApiResponse::failure(format!("Failed to parse response: {}", e)),
    }
}

#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn login(&self, request: &LoginRequest) -> ApiResponse<IdentityResponse> {
        super::auth::login(self, request).await
    }

    async fn me(&self) -> ApiResponse<IdentityResponse> {
        super::auth::me(self).await
    }

    async fn get_services(&self) -> ApiResponse<Vec<ServiceCatalogEntry>> {
        super::catalog::get_services(self).await
    }

    async fn create_service(&self, entry: &ServiceCatalogEntry) -> ApiResponse<Value> {
        super::catalog::create_service(self, entry).await
    }

    async fn update_service(&self, request: &UpdateServiceRequest) -> ApiResponse<Value> {
        super::catalog::update_service(self, request).await
    }

    async fn get_custom_services(&self) -> ApiResponse<Vec<ServiceCatalogEntry>> {
        super::catalog::get_custom_services(self).await
    }

    async fn delete_custom_service(&self, request: &DeleteServiceRequest) -> ApiResponse<Value> {
        super::catalog::delete_custom_service(self, request).await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> ApiResponse<CreateUserResponse> {
        super::accounts::create_user(self, request).await
    }

    async fn change_user_password(&self, request: &ChangeUserPasswordRequest) -> ApiResponse<Value> {
        super::accounts::change_user_password(self, request).await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResponse<Value> {
        super::accounts::change_password(self, request).await
    }

    async fn add_balance(&self, request: &AddBalanceRequest) -> ApiResponse<AddBalanceResponse> {
        super::accounts::add_balance(self, request).await
    }

    async fn get_user(&self, request: &GetUserRequest) -> ApiResponse<UserDetails> {
        super::accounts::get_user(self, request).await
    }

    async fn assign_service(&self, request: &ServiceAssignmentRequest) -> ApiResponse<Value> {
        super::accounts::assign_service(self, request).await
    }

    async fn unassign_service(&self, request: &ServiceAssignmentRequest) -> ApiResponse<Value> {
        super::accounts::unassign_service(self, request).await
    }

    async fn get_user_services(&self) -> ApiResponse<Vec<ServiceCatalogEntry>> {
        super::orders::get_user_services(self).await
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> ApiResponse<Value> {
        super::orders::place_order(self, request).await
    }

    async fn get_orders(&self, query: PageQuery) -> ApiResponse<Vec<Order>> {
        super::orders::get_orders(self, query).await
    }

    async fn get_transactions(&self, query: PageQuery) -> ApiResponse<Vec<Transaction>> {
        super::orders::get_transactions(self, query).await
    }

    async fn request_refill(&self, request: &RefillRequest) -> ApiResponse<RefillResponse> {
        super::orders::request_refill(self, request).await
    }

    async fn refill_status(&self, request: &RefillRequest) -> ApiResponse<RefillStatusResponse> {
        super::orders::refill_status(self, request).await
    }

    async fn order_status(&self, request: &OrderStatusRequest) -> ApiResponse<OrderStatusDetails> {
        super::orders::order_status(self, request).await
    }

    async fn initiate_payment(
        &self,
        request: &InitiatePaymentRequest,
    ) -> ApiResponse<InitiatePaymentResponse> {
        super::payment::initiate_payment(self, request).await
    }

    async fn payment_callback(&self, request: &PaymentCallbackRequest) -> ApiResponse<Value> {
        super::payment::payment_callback(self, request).await
    }

    async fn payment_status(&self, request: &PaymentStatusRequest) -> ApiResponse<PaymentStatusResponse> {
        super::payment::payment_status(self, request).await
    }
}
