//! # Service Traits
//!
//! The [`ApiService`] seam between the stateful units in [`crate::app`] and the
//! HTTP client. Production code uses [`crate::services::api::ApiClient`]; tests
//! swap in a scripted mock.
//!
//! Every method resolves to an [`ApiResponse`], never a transport `Err`, so the
//! units only branch on `success`.

use async_trait::async_trait;
use serde_json::Value;
use shared::{
    AddBalanceRequest, AddBalanceResponse, ApiResponse, ChangePasswordRequest,
    ChangeUserPasswordRequest, CreateUserRequest, CreateUserResponse, DeleteServiceRequest,
    GetUserRequest, IdentityResponse, InitiatePaymentRequest, InitiatePaymentResponse,
    LoginRequest, Order, OrderStatusDetails, OrderStatusRequest, PageQuery,
    PaymentCallbackRequest, PaymentStatusRequest, PaymentStatusResponse, PlaceOrderRequest,
    RefillRequest, RefillResponse, RefillStatusResponse, ServiceAssignmentRequest,
    ServiceCatalogEntry, Transaction, UpdateServiceRequest, UserDetails,
};

/// Backend operations used by the dashboard.
#[async_trait]
pub trait ApiService: Send + Sync {
    // Session

    async fn login(&self, request: &LoginRequest) -> ApiResponse<IdentityResponse>;

    /// Identity behind the current session cookie.
    async fn me(&self) -> ApiResponse<IdentityResponse>;

    // Catalog (admin)

    /// Full service catalog.
    async fn get_services(&self) -> ApiResponse<Vec<ServiceCatalogEntry>>;

    /// Create a catalog entry. The backend may echo the created entry.
    async fn create_service(&self, entry: &ServiceCatalogEntry) -> ApiResponse<Value>;

    async fn update_service(&self, request: &UpdateServiceRequest) -> ApiResponse<Value>;

    /// The subset of the catalog that can be assigned to users.
    async fn get_custom_services(&self) -> ApiResponse<Vec<ServiceCatalogEntry>>;

    async fn delete_custom_service(&self, request: &DeleteServiceRequest) -> ApiResponse<Value>;

    // Accounts

    async fn create_user(&self, request: &CreateUserRequest) -> ApiResponse<CreateUserResponse>;

    async fn change_user_password(&self, request: &ChangeUserPasswordRequest) -> ApiResponse<Value>;

    async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResponse<Value>;

    async fn add_balance(&self, request: &AddBalanceRequest) -> ApiResponse<AddBalanceResponse>;

    async fn get_user(&self, request: &GetUserRequest) -> ApiResponse<UserDetails>;

    async fn assign_service(&self, request: &ServiceAssignmentRequest) -> ApiResponse<Value>;

    async fn unassign_service(&self, request: &ServiceAssignmentRequest) -> ApiResponse<Value>;

    // Orders

    /// Services the signed-in user may order.
    async fn get_user_services(&self) -> ApiResponse<Vec<ServiceCatalogEntry>>;

    async fn place_order(&self, request: &PlaceOrderRequest) -> ApiResponse<Value>;

    async fn get_orders(&self, query: PageQuery) -> ApiResponse<Vec<Order>>;

    async fn get_transactions(&self, query: PageQuery) -> ApiResponse<Vec<Transaction>>;

    async fn request_refill(&self, request: &RefillRequest) -> ApiResponse<RefillResponse>;

    /// `request.order_id` carries the refill id here, not the order id.
    async fn refill_status(&self, request: &RefillRequest) -> ApiResponse<RefillStatusResponse>;

    async fn order_status(&self, request: &OrderStatusRequest) -> ApiResponse<OrderStatusDetails>;

    // Payments

    async fn initiate_payment(
        &self,
        request: &InitiatePaymentRequest,
    ) -> ApiResponse<InitiatePaymentResponse>;

    /// Stand-in for the gateway's server-to-server callback.
    async fn payment_callback(&self, request: &PaymentCallbackRequest) -> ApiResponse<Value>;

    async fn payment_status(&self, request: &PaymentStatusRequest) -> ApiResponse<PaymentStatusResponse>;
}
