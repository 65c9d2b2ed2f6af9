//! New-order form for the signed-in user.
//!
//! Services come from `GET /user/userServices` and are selected by
//! `serviceId`. Quantity input is clamped down to the service's `max` as it is
//! typed; the `min` bound is only enforced on submit.

use std::sync::Arc;

use shared::{PlaceOrderRequest, ServiceCatalogEntry};

use super::events::EventSink;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

const FALLBACK_MIN: u64 = 1;
const FALLBACK_MAX: u64 = 100_000;

pub struct OrderForm {
    api: Arc<dyn ApiService>,
    events: EventSink,
    services: Vec<ServiceCatalogEntry>,
    loaded: bool,
    service_id: Option<String>,
    quantity: Option<u64>,
    link: String,
    submitting: bool,
}

impl OrderForm {
    pub fn new(api: Arc<dyn ApiService>, events: EventSink) -> Self {
        Self {
            api,
            events,
            services: Vec::new(),
            loaded: false,
            service_id: None,
            quantity: None,
            link: String::new(),
            submitting: false,
        }
    }

    pub fn services(&self) -> &[ServiceCatalogEntry] {
        &self.services
    }

    /// Fetch the user's services. Only the first successful call hits the network.
    pub async fn load_services(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        match self.api.get_user_services().await.into_result() {
            Ok(services) => {
                tracing::debug!(count = services.len(), "Loaded orderable services");
                self.services = services;
                self.loaded = true;
                Ok(())
            }
            Err(message) => {
                tracing::warn!(error = %message, "Failed to load orderable services");
                self.events.error("Failed to load services. Please try again later.");
                Err(AppError::Api(message))
            }
        }
    }

    pub fn select_service(&mut self, service_id: &str) {
        let service_id = service_id.trim();
        self.service_id = (!service_id.is_empty()).then(|| service_id.to_string());
        // Re-apply the clamp against the new service's max.
        if let Some(quantity) = self.quantity {
            self.quantity = Some(self.clamp(quantity));
        }
    }

    pub fn selected(&self) -> Option<&ServiceCatalogEntry> {
        let service_id = self.service_id.as_deref()?;
        self.services.iter().find(|service| service.service_id == service_id)
    }

    /// Set quantity from raw input. Non-numeric input clears it.
    pub fn set_quantity(&mut self, input: &str) {
        self.quantity = input.trim().parse::<u64>().ok().map(|quantity| self.clamp(quantity));
    }

    pub fn quantity(&self) -> Option<u64> {
        self.quantity
    }

    pub fn set_link(&mut self, link: &str) {
        self.link = link.to_string();
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// Allowed quantity range for the selected service.
    pub fn bounds(&self) -> (u64, u64) {
        match self.selected() {
            Some(service) => (
                parse_bound(&service.min).unwrap_or(FALLBACK_MIN),
                parse_bound(&service.max).unwrap_or(FALLBACK_MAX),
            ),
            None => (FALLBACK_MIN, FALLBACK_MAX),
        }
    }

    fn clamp(&self, quantity: u64) -> u64 {
        match self.selected() {
            Some(_) => quantity.min(self.bounds().1),
            None => quantity.max(FALLBACK_MIN),
        }
    }

    /// `quantity × rate`, zero with no service selected.
    pub fn total_amount(&self) -> f64 {
        match (self.selected(), self.quantity) {
            (Some(service), Some(quantity)) => quantity as f64 * service.rate,
            _ => 0.0,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn reject(&self, message: impl Into<String>) -> AppError {
        let message = message.into();
        self.events.error(message.clone());
        AppError::Validation(message)
    }

    fn build_request(&self) -> Result<PlaceOrderRequest> {
        if self.service_id.is_none() {
            return Err(self.reject("Please select a product/service."));
        }
        let Some(service) = self.selected() else {
            return Err(self.reject("Selected service details are missing. Please re-select."));
        };

        let (min, max) = self.bounds();
        let quantity = match self.quantity {
            Some(quantity) if (min..=max).contains(&quantity) => quantity,
            _ => {
                return Err(self.reject(format!("Quantity must be between {} and {}.", min, max)));
            }
        };

        if self.link.trim().is_empty() {
            return Err(self.reject("Link is required."));
        }

        Ok(PlaceOrderRequest {
            link_input: self.link.trim().to_string(),
            service_id: service.service_id.clone(),
            service: service.service.clone(),
            quantity,
            rate: service.rate,
            total_amount: self.total_amount(),
            refill: service.refill,
        })
    }

    #[tracing::instrument(skip(self), fields(service_id = ?self.service_id))]
    pub async fn submit(&mut self) -> Result<PlaceOrderRequest> {
        if self.submitting {
            return Err(AppError::Busy("Order submission"));
        }
        let request = self.build_request()?;

        self.submitting = true;
        let response = self.api.place_order(&request).await.into_result();
        self.submitting = false;

        match response {
            Ok(_) => {
                tracing::info!(service = %request.service, quantity = request.quantity, "Order placed");
                self.events.success("Order submitted successfully!");
                self.reset();
                Ok(request)
            }
            Err(message) => {
                self.events.error(format!("Order failed: {}", message));
                Err(AppError::Api(message))
            }
        }
    }

    /// Clear the inputs; loaded services stay.
    pub fn reset(&mut self) {
        self.service_id = None;
        self.quantity = None;
        self.link.clear();
    }
}

fn parse_bound(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::app::events::testing::notifications;
    use crate::core::mock::MockApiService;

    async fn loaded(api: &Arc<MockApiService>) -> (OrderForm, async_channel::Receiver<crate::app::events::AppEvent>) {
        api.ok(
            "get_user_services",
            json!([
                {"serviceId": 7, "service": "IG-F", "name": "Followers", "rate": 0.5, "min": "100", "max": "1000", "refill": true},
                {"serviceId": "8", "service": "YT-V", "name": "Views", "rate": 0.25, "min": 50, "max": 500}
            ]),
        );
        let (events, rx) = EventSink::channel();
        let mut form = OrderForm::new(api.clone(), events);
        form.load_services().await.unwrap();
        (form, rx)
    }

    #[tokio::test]
    async fn test_services_load_once() {
        let api = Arc::new(MockApiService::new());
        let (mut form, _rx) = loaded(&api).await;
        form.load_services().await.unwrap();
        assert_eq!(api.calls("get_user_services"), 1);
        assert_eq!(form.services().len(), 2);
    }

    #[tokio::test]
    async fn test_quantity_clamps_to_max_and_total_follows() {
        let api = Arc::new(MockApiService::new());
        let (mut form, _rx) = loaded(&api).await;

        form.select_service("7");
        form.set_quantity("5000");
        assert_eq!(form.quantity(), Some(1000));
        assert_eq!(form.total_amount(), 500.0);

        // Below min is kept as typed and caught on submit.
        form.set_quantity("10");
        assert_eq!(form.quantity(), Some(10));

        form.set_quantity("abc");
        assert_eq!(form.quantity(), None);
        assert_eq!(form.total_amount(), 0.0);

        form.set_quantity("900");
        form.select_service("8");
        assert_eq!(form.quantity(), Some(500));
    }

    #[tokio::test]
    async fn test_submit_validation_order() {
        let api = Arc::new(MockApiService::new());
        let (mut form, rx) = loaded(&api).await;

        assert!(form.submit().await.is_err());
        form.select_service("7");
        form.set_quantity("10");
        assert!(form.submit().await.is_err());
        form.set_quantity("200");
        assert!(form.submit().await.is_err());

        assert_eq!(api.calls("place_order"), 0);
        let messages: Vec<String> = notifications(&rx).into_iter().map(|(_, m)| m).collect();
        assert_eq!(
            messages,
            vec![
                "Please select a product/service.",
                "Quantity must be between 100 and 1000.",
                "Link is required.",
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_payload_and_reset() {
        let api = Arc::new(MockApiService::new());
        api.ok("place_order", json!({"orderId": 991}));
        let (mut form, _rx) = loaded(&api).await;

        form.select_service("7");
        form.set_quantity("200");
        form.set_link(" https://instagram.com/someone ");
        form.submit().await.unwrap();

        assert_eq!(
            api.last_body("place_order").unwrap(),
            json!({
                "linkInput": "https://instagram.com/someone",
                "serviceId": "7",
                "service": "IG-F",
                "quantity": 200,
                "rate": 0.5,
                "totalAmount": 100.0,
                "refill": true
            })
        );
        assert!(form.selected().is_none());
        assert_eq!(form.link(), "");
        assert_eq!(form.services().len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_order_keeps_inputs() {
        let api = Arc::new(MockApiService::new());
        api.fail("place_order", "Insufficient balance");
        let (mut form, rx) = loaded(&api).await;

        form.select_service("8");
        form.set_quantity("100");
        form.set_link("https://youtu.be/x");
        assert_eq!(form.submit().await.unwrap_err(), AppError::Api("Insufficient balance".into()));

        assert_eq!(form.quantity(), Some(100));
        assert!(notifications(&rx).iter().any(|(_, m)| m == "Order failed: Insufficient balance"));
    }
}
