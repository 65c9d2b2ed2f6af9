//! # Authentication Endpoints
//!
//! Cookie-session login and the "who am I" probe used at startup.

use shared::{ApiResponse, IdentityResponse, LoginRequest};
use reqwest::Method;

use super::client::ApiClient;

/// Log in with user id and password. On success the session cookie is kept by
/// the client's cookie store.
#[tracing::instrument(skip(client, request), fields(user_id = %request.user_id))]
pub async fn login(client: &ApiClient, request: &LoginRequest) -> ApiResponse<IdentityResponse> {
    tracing::info!("Attempting login");
    let response: ApiResponse<IdentityResponse> = client.send_json(Method::POST, "/login", request).await;

    if let Some(identity) = &response.data {
        tracing::info!(role = identity.role.as_str(), "Login successful");
    }
    response
}

/// Identity behind the current session cookie, if any.
#[tracing::instrument(skip(client))]
pub async fn me(client: &ApiClient) -> ApiResponse<IdentityResponse> {
    client.get("/me", None).await
}
