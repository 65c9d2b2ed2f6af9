//! # Service Catalog
//!
//! Admin-side reconciliation of the service catalog.
//!
//! There is one canonical store of [`ServiceCatalogEntry`] keyed by `service`.
//! The assignable ("custom") subset is a set of keys over that store, so a
//! successful update or delete is visible through both views at once.
//!
//! ## Modes
//!
//! ```text
//!             enter_create / duplicate
//!  Dashboard ─────────────────────────▶ CreateNew ──┐
//!      ▲  │                                          │ create ok / cancel / back
//!      │  └──────────────────────────▶ UpdateExisting┤
//!      │          enter_update                       │ update ok / cancel / back
//!      └─────────────────────────────────────────────┘
//! ```
//!
//! Entering update mode fetches the assignable subset the first time it is needed.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use shared::{DeleteServiceRequest, ServiceCatalogEntry, UpdateServiceRequest};

use super::events::EventSink;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::utils::validation::{parse_bound, parse_number};

/// Synthetic category shown first in the filter picker.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogMode {
    #[default]
    Dashboard,
    CreateNew,
    UpdateExisting,
}

/// Editable form mirror of a catalog entry. Numeric fields stay as typed text
/// until submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceForm {
    pub service_id: String,
    pub service: String,
    pub name: String,
    pub internal_name: String,
    pub kind: String,
    pub category: String,
    pub rate: String,
    pub min: String,
    pub max: String,
    pub refill: bool,
    pub cancel: bool,
}

impl ServiceForm {
    pub fn from_entry(entry: &ServiceCatalogEntry) -> Self {
        Self {
            service_id: entry.service_id.clone(),
            service: entry.service.clone(),
            name: entry.name.clone(),
            internal_name: entry.internal_name.clone(),
            kind: entry.kind.clone().unwrap_or_default(),
            category: entry.category.clone().unwrap_or_default(),
            rate: entry.rate.to_string(),
            min: entry.min.clone(),
            max: entry.max.clone(),
            refill: entry.refill,
            cancel: entry.cancel,
        }
    }

    /// Validate and convert into a new catalog entry.
    pub fn to_entry(&self) -> Result<ServiceCatalogEntry> {
        let service_id = self.service_id.trim();
        let service = self.service.trim();
        let name = self.name.trim();
        let rate = self.rate.trim().parse::<f64>().ok().filter(|r| r.is_finite());

        let (Some(rate), false, false, false) =
            (rate, service_id.is_empty(), service.is_empty(), name.is_empty())
        else {
            return Err(AppError::Validation(
                "Service ID, User Defined Unique ID, Name, and Rate are required.".to_string(),
            ));
        };

        let min = parse_bound(&self.min, "Min")?;
        let max = parse_bound(&self.max, "Max")?;
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(AppError::Validation(
                    "Min value cannot be greater than max value.".to_string(),
                ));
            }
        }

        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        Ok(ServiceCatalogEntry {
            service_id: service_id.to_string(),
            service: service.to_string(),
            name: name.to_string(),
            internal_name: self.internal_name.trim().to_string(),
            rate,
            min: self.min.trim().to_string(),
            max: self.max.trim().to_string(),
            refill: self.refill,
            cancel: self.cancel,
            category: optional(&self.category),
            kind: optional(&self.kind),
        })
    }
}

pub struct ServiceCatalog {
    api: Arc<dyn ApiService>,
    events: EventSink,
    entries: Vec<ServiceCatalogEntry>,
    /// Keys (`service`) of entries in the assignable subset.
    assignable: HashSet<String>,
    assignable_loaded: bool,
    mode: CatalogMode,
    form: ServiceForm,
    /// Key of the entry picked in update mode.
    selected: Option<String>,
}

impl ServiceCatalog {
    pub fn new(api: Arc<dyn ApiService>, events: EventSink) -> Self {
        Self {
            api,
            events,
            entries: Vec::new(),
            assignable: HashSet::new(),
            assignable_loaded: false,
            mode: CatalogMode::Dashboard,
            form: ServiceForm::default(),
            selected: None,
        }
    }

    pub fn mode(&self) -> CatalogMode {
        self.mode
    }

    pub fn form(&self) -> &ServiceForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ServiceForm {
        &mut self.form
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Full catalog.
    pub fn entries(&self) -> &[ServiceCatalogEntry] {
        &self.entries
    }

    /// Assignable subset, in catalog order.
    pub fn assignable(&self) -> Vec<&ServiceCatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| self.assignable.contains(&entry.service))
            .collect()
    }

    pub fn get(&self, service: &str) -> Option<&ServiceCatalogEntry> {
        self.entries.iter().find(|entry| entry.service == service)
    }

    fn position(&self, service: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.service == service)
    }

    /// Fetch the full catalog, replacing what is held locally.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) -> Result<usize> {
        match self.api.get_services().await.into_result() {
            Ok(entries) => {
                self.entries = entries;
                let keys: HashSet<&str> = self.entries.iter().map(|e| e.service.as_str()).collect();
                self.assignable.retain(|key| keys.contains(key.as_str()));

                tracing::info!(count = self.entries.len(), "Catalog loaded");
                self.events.success("General services catalog loaded.");
                Ok(self.entries.len())
            }
            Err(message) => {
                self.events
                    .error(format!("Failed to load general services: {}", message));
                Err(AppError::Api(message))
            }
        }
    }

    /// Fetch the assignable subset and merge it into the store. Server data
    /// wins for entries already present.
    #[tracing::instrument(skip(self))]
    pub async fn load_assignable(&mut self) -> Result<usize> {
        match self.api.get_custom_services().await.into_result() {
            Ok(entries) => {
                self.assignable.clear();
                for entry in entries {
                    self.assignable.insert(entry.service.clone());
                    match self.position(&entry.service) {
                        Some(index) => self.entries[index] = entry,
                        None => self.entries.push(entry),
                    }
                }
                self.assignable_loaded = true;

                self.events.success("Custom services for update loaded!");
                Ok(self.assignable.len())
            }
            Err(message) => {
                self.events.error(format!(
                    "Failed to load custom services for update: {}",
                    message
                ));
                Err(AppError::Api(message))
            }
        }
    }

    pub fn enter_create(&mut self) {
        self.clear_form();
        self.mode = CatalogMode::CreateNew;
    }

    /// Switch to update mode, fetching the assignable subset if it is still empty.
    pub async fn enter_update(&mut self) -> Result<()> {
        self.clear_form();
        self.mode = CatalogMode::UpdateExisting;
        if !self.assignable_loaded || self.assignable.is_empty() {
            self.load_assignable().await?;
        }
        Ok(())
    }

    /// Leave create/update mode without saving.
    pub fn cancel(&mut self) {
        self.clear_form();
        self.mode = CatalogMode::Dashboard;
    }

    pub fn back(&mut self) {
        self.cancel();
    }

    pub fn clear_form(&mut self) {
        self.form = ServiceForm::default();
        self.selected = None;
    }

    /// Load an existing entry into the form. An empty key clears the form.
    pub fn select_for_update(&mut self, service: &str) -> Result<()> {
        if service.is_empty() {
            self.clear_form();
            return Ok(());
        }

        let entry = self
            .assignable()
            .into_iter()
            .find(|entry| entry.service == service)
            .or_else(|| self.get(service))
            .cloned();

        match entry {
            Some(entry) => {
                self.form = ServiceForm::from_entry(&entry);
                self.selected = Some(entry.service);
                Ok(())
            }
            None => {
                let message = format!("Service \"{}\" not found.", service);
                self.events.error(message.clone());
                Err(AppError::State(message))
            }
        }
    }

    /// Seed a create form from an existing entry, with both ids cleared.
    pub fn duplicate(&mut self, service: &str) -> Result<()> {
        let Some(source) = self.get(service).cloned() else {
            let message = "Please select an existing service to duplicate.";
            self.events.error(message);
            return Err(AppError::State(message.to_string()));
        };

        self.form = ServiceForm {
            service_id: String::new(),
            service: String::new(),
            ..ServiceForm::from_entry(&source)
        };
        self.selected = None;
        self.mode = CatalogMode::CreateNew;
        self.events
            .info("Ready to duplicate service. Enter new Service ID and User Defined Unique ID.");
        Ok(())
    }

    /// Submit the current form according to the mode.
    pub async fn submit(&mut self) -> Result<ServiceCatalogEntry> {
        let form = self.form.clone();
        match self.mode {
            CatalogMode::CreateNew => self.create(form).await,
            CatalogMode::UpdateExisting => self.update(form).await,
            CatalogMode::Dashboard => Err(AppError::State(
                "Choose create or update before submitting.".to_string(),
            )),
        }
    }

    /// Create a new entry. Ids already present locally are rejected without a request.
    #[tracing::instrument(skip(self, form), fields(service = %form.service))]
    pub async fn create(&mut self, form: ServiceForm) -> Result<ServiceCatalogEntry> {
        let entry = match form.to_entry() {
            Ok(entry) => entry,
            Err(err) => {
                self.events.error(err.user_message());
                return Err(err);
            }
        };

        if self.entries.iter().any(|e| e.service_id == entry.service_id) {
            let message = format!("Service ID \"{}\" already exists.", entry.service_id);
            self.events.error(message.clone());
            return Err(AppError::Validation(message));
        }
        if self.get(&entry.service).is_some() {
            let message = format!("Unique ID \"{}\" already exists.", entry.service);
            self.events.error(message.clone());
            return Err(AppError::Validation(message));
        }

        match self.api.create_service(&entry).await.into_result() {
            Ok(echo) => {
                // Prefer the backend's copy when it echoes one back.
                let created = serde_json::from_value::<ServiceCatalogEntry>(echo)
                    .ok()
                    .filter(|created| created.service == entry.service)
                    .unwrap_or(entry);

                self.events
                    .success(format!("Service \"{}\" added successfully!", created.name));
                self.entries.push(created.clone());
                self.cancel();
                Ok(created)
            }
            Err(message) => {
                self.events.error(format!("Failed to add service: {}", message));
                Err(AppError::Api(message))
            }
        }
    }

    /// Update the mutable fields of an existing entry. The range may only
    /// narrow: `min` cannot drop below and `max` cannot rise above the stored bounds.
    #[tracing::instrument(skip(self, form), fields(service = %form.service))]
    pub async fn update(&mut self, form: ServiceForm) -> Result<ServiceCatalogEntry> {
        let key = self
            .selected
            .clone()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| form.service.trim().to_string());

        let Some(original) = self.get(&key).cloned() else {
            let message = "Please select an existing service to update.";
            self.events.error(message);
            return Err(AppError::State(message.to_string()));
        };

        let request = match Self::build_update(&original, &form) {
            Ok(request) => request,
            Err(err) => {
                self.events.error(err.user_message());
                return Err(err);
            }
        };

        match self.api.update_service(&request).await.into_result() {
            Ok(_) => {
                let updated = match self.position(&original.service) {
                    Some(index) => {
                        self.entries[index].apply_update(&request);
                        self.entries[index].clone()
                    }
                    None => original.clone(),
                };

                self.events.success(format!(
                    "Service \"{}\" (ID: {}, Unique Ref: {}) updated successfully!",
                    original.name, original.service_id, original.service
                ));
                self.cancel();
                Ok(updated)
            }
            Err(message) => {
                self.events.error(format!("Failed to update service: {}", message));
                Err(AppError::Api(message))
            }
        }
    }

    /// Identity comes from the stored entry, never from the form.
    fn build_update(original: &ServiceCatalogEntry, form: &ServiceForm) -> Result<UpdateServiceRequest> {
        let rate = parse_number(&form.rate, "Rate")?;
        let min = parse_bound(&form.min, "Min")?;
        let max = parse_bound(&form.max, "Max")?;

        if let (Some(new_min), Ok(original_min)) = (min, original.min.trim().parse::<f64>()) {
            if new_min < original_min {
                return Err(AppError::Validation(format!(
                    "Min value cannot be smaller than original min ({}).",
                    original.min
                )));
            }
        }
        if let (Some(new_max), Ok(original_max)) = (max, original.max.trim().parse::<f64>()) {
            if new_max > original_max {
                return Err(AppError::Validation(format!(
                    "Max value cannot be greater than original max ({}).",
                    original.max
                )));
            }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(AppError::Validation(
                    "Min value cannot be greater than max value.".to_string(),
                ));
            }
        }

        Ok(UpdateServiceRequest {
            service_id: original.service_id.clone(),
            rate,
            min: form.min.trim().to_string(),
            max: form.max.trim().to_string(),
            refill: form.refill,
            cancel: form.cancel,
        })
    }

    /// Delete by `serviceId`. Returns the removed entries' keys.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&mut self, service_id: &str) -> Result<Vec<String>> {
        let label = self
            .entries
            .iter()
            .find(|e| e.service_id == service_id)
            .map(|e| if e.name.is_empty() { e.internal_name.clone() } else { e.name.clone() })
            .unwrap_or_else(|| service_id.to_string());

        let request = DeleteServiceRequest {
            service_id: service_id.to_string(),
        };
        match self.api.delete_custom_service(&request).await.into_result() {
            Ok(_) => {
                let removed: Vec<String> = self
                    .entries
                    .iter()
                    .filter(|e| e.service_id == service_id)
                    .map(|e| e.service.clone())
                    .collect();

                self.entries.retain(|e| e.service_id != service_id);
                for key in &removed {
                    self.assignable.remove(key);
                }
                if self
                    .selected
                    .as_ref()
                    .is_some_and(|selected| removed.contains(selected))
                {
                    self.clear_form();
                }

                self.events
                    .success(format!("Service \"{}\" deleted successfully!", label));
                Ok(removed)
            }
            Err(message) => {
                self.events.error(format!("Failed to delete service: {}", message));
                Err(AppError::Api(message))
            }
        }
    }

    /// Sorted unique categories, with [`ALL_CATEGORIES`] first.
    pub fn categories(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .entries
            .iter()
            .filter_map(|e| e.category.as_deref())
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
            .collect();

        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(unique.into_iter().map(str::to_string))
            .collect()
    }

    /// Entries matching `category` (or all) whose name or key contains `term`,
    /// case-insensitively.
    pub fn filter(&self, term: &str, category: &str) -> Vec<&ServiceCatalogEntry> {
        let term = term.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| category == ALL_CATEGORIES || e.category.as_deref() == Some(category))
            .filter(|e| {
                term.is_empty()
                    || e.name.to_lowercase().contains(&term)
                    || e.service.to_lowercase().contains(&term)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::testing::notifications;
    use crate::app::events::AppEvent;
    use async_channel::Receiver;
    use crate::app::notifications::NotificationLevel;
    use crate::core::mock::MockApiService;
    use serde_json::{json, Value};

    fn entry_json(service_id: &str, service: &str, min: &str, max: &str) -> Value {
        json!({
            "serviceId": service_id,
            "service": service,
            "name": format!("{service} name"),
            "internalName": format!("{service} internal"),
            "rate": 10.0,
            "min": min,
            "max": max,
            "refill": false,
            "cancel": false,
            "category": "Instagram",
            "type": "Default"
        })
    }

    fn catalog(api: &Arc<MockApiService>) -> (ServiceCatalog, Receiver<AppEvent>) {
        let (events, rx) = EventSink::channel();
        (ServiceCatalog::new(api.clone(), events), rx)
    }

    async fn loaded(api: &Arc<MockApiService>) -> (ServiceCatalog, Receiver<AppEvent>) {
        api.ok(
            "get_services",
            json!([
                entry_json("101", "IG-F", "100", "10000"),
                entry_json("102", "IG-L", "50", "5000"),
            ]),
        );
        let (mut catalog, rx) = catalog(api);
        catalog.load().await.unwrap();
        notifications(&rx);
        (catalog, rx)
    }

    #[tokio::test]
    async fn test_update_mode_lazily_loads_assignable_and_upserts() {
        let api = Arc::new(MockApiService::new());
        let (mut catalog, _rx) = loaded(&api).await;

        let mut fresher = entry_json("102", "IG-L", "50", "4000");
        fresher["rate"] = json!(11.5);
        api.ok("get_custom_services", json!([fresher, entry_json("103", "YT-V", "1", "9")]));

        catalog.enter_update().await.unwrap();
        catalog.enter_update().await.unwrap();

        assert_eq!(api.calls("get_custom_services"), 1);
        assert_eq!(catalog.mode(), CatalogMode::UpdateExisting);
        assert_eq!(catalog.entries().len(), 3);
        assert_eq!(catalog.get("IG-L").unwrap().rate, 11.5);
        let keys: Vec<_> = catalog.assignable().iter().map(|e| e.service.as_str()).collect();
        assert_eq!(keys, vec!["IG-L", "YT-V"]);
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_patches_both_views() {
        let api = Arc::new(MockApiService::new());
        let (mut catalog, _rx) = loaded(&api).await;
        api.ok("get_custom_services", json!([entry_json("101", "IG-F", "100", "10000")]));
        api.ok("update_service", json!({"message": "updated"}));
        catalog.enter_update().await.unwrap();

        catalog.select_for_update("IG-F").unwrap();
        let before = catalog.get("IG-F").unwrap().clone();
        {
            let form = catalog.form_mut();
            form.rate = "12.5".into();
            form.min = "200".into();
            form.max = "9000".into();
            form.refill = true;
            // Identity edits in the form are ignored.
            form.name = "Renamed".into();
            form.service_id = "999".into();
        }
        let updated = catalog.submit().await.unwrap();

        assert_eq!(
            api.last_body("update_service").unwrap(),
            json!({"serviceId": "101", "rate": 12.5, "min": "200", "max": "9000", "refill": true, "cancel": false})
        );
        assert_eq!(updated.service_id, before.service_id);
        assert_eq!(updated.service, before.service);
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.internal_name, before.internal_name);
        assert_eq!(updated.kind, before.kind);
        assert_eq!(updated.category, before.category);
        assert_eq!(updated.rate, 12.5);
        assert_eq!(catalog.assignable()[0], &updated);
        assert_eq!(catalog.mode(), CatalogMode::Dashboard);
        assert_eq!(catalog.form(), &ServiceForm::default());
    }

    #[tokio::test]
    async fn test_update_rejects_widening_range_before_dispatch() {
        let api = Arc::new(MockApiService::new());
        let (mut catalog, rx) = loaded(&api).await;
        api.ok("get_custom_services", json!([entry_json("101", "IG-F", "100", "10000")]));
        catalog.enter_update().await.unwrap();
        notifications(&rx);

        catalog.select_for_update("IG-F").unwrap();
        catalog.form_mut().min = "99".into();
        let err = catalog.submit().await.unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("Min value cannot be smaller than original min (100).".into())
        );

        catalog.form_mut().min = "100".into();
        catalog.form_mut().max = "10001".into();
        assert!(catalog.submit().await.is_err());

        assert_eq!(api.calls("update_service"), 0);
        assert_eq!(notifications(&rx).len(), 2);
        // Failed validation keeps the user in update mode with their input.
        assert_eq!(catalog.mode(), CatalogMode::UpdateExisting);
        assert_eq!(catalog.form().max, "10001");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_ids_without_request() {
        let api = Arc::new(MockApiService::new());
        let (mut catalog, rx) = loaded(&api).await;
        catalog.enter_create();

        let mut form = ServiceForm::from_entry(catalog.get("IG-F").unwrap());
        form.service = "IG-F-NEW".into();
        let err = catalog.create(form.clone()).await.unwrap_err();
        assert_eq!(err, AppError::Validation("Service ID \"101\" already exists.".into()));

        form.service_id = "555".into();
        form.service = "IG-L".into();
        assert!(catalog.create(form).await.is_err());

        assert_eq!(api.calls("create_service"), 0);
        let toasts = notifications(&rx);
        assert_eq!(toasts.len(), 2);
        assert!(toasts.iter().all(|(level, _)| *level == NotificationLevel::Error));
    }

    #[tokio::test]
    async fn test_create_requires_core_fields() {
        let api = Arc::new(MockApiService::new());
        let (mut catalog, _rx) = catalog(&api);
        let form = ServiceForm {
            service_id: "1".into(),
            service: "K".into(),
            name: "Views".into(),
            rate: "abc".into(),
            ..Default::default()
        };

        assert!(matches!(catalog.create(form).await, Err(AppError::Validation(_))));
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_then_create_appends_to_full_catalog_only() {
        let api = Arc::new(MockApiService::new());
        let (mut catalog, _rx) = loaded(&api).await;
        api.ok("create_service", json!({"message": "Service created"}));

        catalog.duplicate("IG-L").unwrap();
        assert_eq!(catalog.mode(), CatalogMode::CreateNew);
        assert_eq!(catalog.form().service_id, "");
        assert_eq!(catalog.form().service, "");
        assert_eq!(catalog.form().name, "IG-L name");
        assert_eq!(api.total_calls(), 1);

        catalog.form_mut().service_id = "201".into();
        catalog.form_mut().service = "IG-L-2".into();
        let created = catalog.submit().await.unwrap();

        assert_eq!(created.service, "IG-L-2");
        assert_eq!(created.min, "50");
        assert_eq!(catalog.entries().len(), 3);
        assert!(catalog.assignable().is_empty());
        assert_eq!(catalog.mode(), CatalogMode::Dashboard);
    }

    #[tokio::test]
    async fn test_delete_removes_from_every_view() {
        let api = Arc::new(MockApiService::new());
        let (mut catalog, _rx) = loaded(&api).await;
        api.ok("get_custom_services", json!([entry_json("101", "IG-F", "100", "10000")]));
        api.ok("delete_custom_service", json!({"message": "deleted"}));
        catalog.enter_update().await.unwrap();
        catalog.select_for_update("IG-F").unwrap();

        let removed = catalog.delete("101").await.unwrap();

        assert_eq!(removed, vec!["IG-F".to_string()]);
        assert_eq!(api.last_body("delete_custom_service").unwrap(), json!({"serviceId": "101"}));
        assert!(catalog.get("IG-F").is_none());
        assert!(catalog.assignable().is_empty());
        assert_eq!(catalog.selected(), None);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entry() {
        let api = Arc::new(MockApiService::new());
        let (mut catalog, rx) = loaded(&api).await;
        api.fail("delete_custom_service", "Service in use");

        assert!(catalog.delete("102").await.is_err());
        assert!(catalog.get("IG-L").is_some());
        assert_eq!(
            notifications(&rx),
            vec![(NotificationLevel::Error, "Failed to delete service: Service in use".to_string())]
        );
    }

    #[tokio::test]
    async fn test_select_for_update_prefers_assignable_then_catalog() {
        let api = Arc::new(MockApiService::new());
        let (mut catalog, _rx) = loaded(&api).await;

        catalog.select_for_update("IG-L").unwrap();
        assert_eq!(catalog.form().service_id, "102");
        assert_eq!(catalog.selected(), Some("IG-L"));

        catalog.select_for_update("").unwrap();
        assert_eq!(catalog.form(), &ServiceForm::default());
        assert!(catalog.select_for_update("nope").is_err());
    }

    #[test]
    fn test_categories_and_filter() {
        let api: Arc<dyn ApiService> = Arc::new(MockApiService::new());
        let (events, _rx) = EventSink::channel();
        let mut catalog = ServiceCatalog::new(api, events);
        catalog.entries = vec![
            ServiceCatalogEntry {
                service: "YT-V".into(),
                name: "YouTube Views".into(),
                category: Some("YouTube".into()),
                ..Default::default()
            },
            ServiceCatalogEntry {
                service: "IG-F".into(),
                name: "Followers".into(),
                category: Some("Instagram".into()),
                ..Default::default()
            },
            ServiceCatalogEntry {
                service: "IG-L".into(),
                name: "Likes".into(),
                category: Some("Instagram".into()),
                ..Default::default()
            },
        ];

        assert_eq!(catalog.categories(), vec!["All", "Instagram", "YouTube"]);
        assert_eq!(catalog.filter("", "Instagram").len(), 2);
        assert_eq!(catalog.filter("views", ALL_CATEGORIES)[0].service, "YT-V");
        assert_eq!(catalog.filter("ig-l", ALL_CATEGORIES).len(), 1);
        assert!(catalog.filter("views", "Instagram").is_empty());
    }
}
