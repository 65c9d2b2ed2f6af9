//! # Account Endpoints
//!
//! User administration (admin routes) and the self-service password change.

use reqwest::Method;
use serde_json::Value;
use shared::{
    AddBalanceRequest, AddBalanceResponse, ApiResponse, ChangePasswordRequest,
    ChangeUserPasswordRequest, CreateUserRequest, CreateUserResponse, GetUserRequest,
    ServiceAssignmentRequest, UserDetails,
};

use super::client::ApiClient;

#[tracing::instrument(skip(client, request), fields(user_id = %request.user_id, role = request.role.as_str()))]
pub async fn create_user(client: &ApiClient, request: &CreateUserRequest) -> ApiResponse<CreateUserResponse> {
    client.send_json(Method::POST, "/admin/createUser", request).await
}

#[tracing::instrument(skip(client, request), fields(user_id = %request.user_id))]
pub async fn change_user_password(
    client: &ApiClient,
    request: &ChangeUserPasswordRequest,
) -> ApiResponse<Value> {
    client
        .send_json(Method::POST, "/admin/changeUserPassword", request)
        .await
}

#[tracing::instrument(skip(client, request))]
pub async fn change_password(client: &ApiClient, request: &ChangePasswordRequest) -> ApiResponse<Value> {
    client.send_json(Method::PUT, "/user/changePassword", request).await
}

#[tracing::instrument(skip(client, request), fields(user_id = %request.user_id, amount = request.amount))]
pub async fn add_balance(client: &ApiClient, request: &AddBalanceRequest) -> ApiResponse<AddBalanceResponse> {
    client.send_json(Method::PUT, "/admin/addBalance", request).await
}

#[tracing::instrument(skip(client, request), fields(user_id = %request.user_id))]
pub async fn get_user(client: &ApiClient, request: &GetUserRequest) -> ApiResponse<UserDetails> {
    client.send_json(Method::POST, "/admin/getUser", request).await
}

#[tracing::instrument(skip(client, request), fields(user_id = %request.user_id, service_id = %request.service_id))]
pub async fn assign_service(client: &ApiClient, request: &ServiceAssignmentRequest) -> ApiResponse<Value> {
    client.send_json(Method::POST, "/admin/addService", request).await
}

#[tracing::instrument(skip(client, request), fields(user_id = %request.user_id, service_id = %request.service_id))]
pub async fn unassign_service(client: &ApiClient, request: &ServiceAssignmentRequest) -> ApiResponse<Value> {
    client.send_json(Method::POST, "/admin/deleteService", request).await
}
