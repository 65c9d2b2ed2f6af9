//! # Payment Endpoints
//!
//! Mock PhonePe wallet top-up: initiate, gateway callback, status check.

use reqwest::Method;
use serde_json::Value;
use shared::{
    ApiResponse, InitiatePaymentRequest, InitiatePaymentResponse, PaymentCallbackRequest,
    PaymentStatusRequest, PaymentStatusResponse,
};

use super::client::ApiClient;

#[tracing::instrument(skip(client, request), fields(amount = request.amount))]
pub async fn initiate_payment(
    client: &ApiClient,
    request: &InitiatePaymentRequest,
) -> ApiResponse<InitiatePaymentResponse> {
    client
        .send_json(Method::POST, "/user/initiatePhonePePayment", request)
        .await
}

#[tracing::instrument(skip(client, request), fields(transaction_id = %request.transaction_id, status = %request.status))]
pub async fn payment_callback(client: &ApiClient, request: &PaymentCallbackRequest) -> ApiResponse<Value> {
    client.send_json(Method::POST, "/user/phonePeCallback", request).await
}

#[tracing::instrument(skip(client, request), fields(transaction_id = %request.transaction_id))]
pub async fn payment_status(
    client: &ApiClient,
    request: &PaymentStatusRequest,
) -> ApiResponse<PaymentStatusResponse> {
    client
        .send_json(Method::POST, "/user/checkPhonePePaymentStatus", request)
        .await
}
