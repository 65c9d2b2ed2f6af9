//! # Catalog Endpoints
//!
//! Admin routes for the service catalog and its assignable subset.

use reqwest::Method;
use serde_json::Value;
use shared::{ApiResponse, DeleteServiceRequest, ServiceCatalogEntry, UpdateServiceRequest};

use super::client::ApiClient;

#[tracing::instrument(skip(client))]
pub async fn get_services(client: &ApiClient) -> ApiResponse<Vec<ServiceCatalogEntry>> {
    client.get("/admin/getServices", None).await
}

#[tracing::instrument(skip(client, entry), fields(service = %entry.service))]
pub async fn create_service(client: &ApiClient, entry: &ServiceCatalogEntry) -> ApiResponse<Value> {
    client.send_json(Method::POST, "/admin/createService", entry).await
}

#[tracing::instrument(skip(client, request), fields(service_id = %request.service_id))]
pub async fn update_service(client: &ApiClient, request: &UpdateServiceRequest) -> ApiResponse<Value> {
    client.send_json(Method::PUT, "/admin/updateService", request).await
}

/// Services that may be assigned to individual users.
#[tracing::instrument(skip(client))]
pub async fn get_custom_services(client: &ApiClient) -> ApiResponse<Vec<ServiceCatalogEntry>> {
    client.get("/admin/getCustomServices", None).await
}

#[tracing::instrument(skip(client, request), fields(service_id = %request.service_id))]
pub async fn delete_custom_service(
    client: &ApiClient,
    request: &DeleteServiceRequest,
) -> ApiResponse<Value> {
    client
        .send_json(Method::POST, "/admin/deleteCustomServices", request)
        .await
}
