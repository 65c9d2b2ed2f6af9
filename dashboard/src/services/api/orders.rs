//! # Order Endpoints
//!
//! Order placement, paginated listings and the refill/status lookups.

use reqwest::Method;
use serde_json::Value;
use shared::{
    ApiResponse, Order, OrderStatusDetails, OrderStatusRequest, PageQuery, PlaceOrderRequest,
    RefillRequest, RefillResponse, RefillStatusResponse, ServiceCatalogEntry, Transaction,
};

use super::client::ApiClient;

/// Services assigned to the signed-in user.
#[tracing::instrument(skip(client))]
pub async fn get_user_services(client: &ApiClient) -> ApiResponse<Vec<ServiceCatalogEntry>> {
    client.get("/user/userServices", None).await
}

#[tracing::instrument(skip(client, request), fields(service = %request.service, quantity = request.quantity))]
pub async fn place_order(client: &ApiClient, request: &PlaceOrderRequest) -> ApiResponse<Value> {
    tracing::info!(total = request.total_amount, "Placing order");
    client.send_json(Method::POST, "/user/placeOrder", request).await
}

#[tracing::instrument(skip(client))]
pub async fn get_orders(client: &ApiClient, query: PageQuery) -> ApiResponse<Vec<Order>> {
    client.get("/user/getOrders", Some(query)).await
}

#[tracing::instrument(skip(client))]
pub async fn get_transactions(client: &ApiClient, query: PageQuery) -> ApiResponse<Vec<Transaction>> {
    client.get("/user/getTransactions", Some(query)).await
}

#[tracing::instrument(skip(client, request), fields(order_id = %request.order_id))]
pub async fn request_refill(client: &ApiClient, request: &RefillRequest) -> ApiResponse<RefillResponse> {
    client.send_json(Method::POST, "/user/requestRefill", request).await
}

/// Status of a refill. `request.order_id` holds the refill id.
#[tracing::instrument(skip(client, request), fields(refill_id = %request.order_id))]
pub async fn refill_status(client: &ApiClient, request: &RefillRequest) -> ApiResponse<RefillStatusResponse> {
    client
        .send_json(Method::POST, "/user/requestRefillStatus", request)
        .await
}

#[tracing::instrument(skip(client, request), fields(order_id = %request.order))]
pub async fn order_status(client: &ApiClient, request: &OrderStatusRequest) -> ApiResponse<OrderStatusDetails> {
    client.send_json(Method::POST, "/user/getOrderStatus", request).await
}
