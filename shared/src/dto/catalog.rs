//! Service catalog DTOs.
//!
//! `service` is the operator-chosen unique key (e.g. `SMM-IG-F-STD-001`) and is
//! what the client joins on. `serviceId` is the upstream provider's numeric id
//! and is what the backend expects in update/delete bodies.

use serde::{Deserialize, Serialize};

use super::de;

/// One sellable SMM product definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ServiceCatalogEntry {
    #[serde(rename = "serviceId", deserialize_with = "de::string_or_number")]
    pub service_id: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub service: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "internalName", default)]
    pub internal_name: String,
    #[serde(default, deserialize_with = "de::f64_or_string")]
    pub rate: f64,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub min: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub max: String,
    #[serde(default)]
    pub refill: bool,
    #[serde(default)]
    pub cancel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ServiceCatalogEntry {
    /// Label used in pickers: `internal name (ID: serviceId) - service`.
    pub fn label(&self) -> String {
        let display = if self.internal_name.is_empty() {
            &self.name
        } else {
            &self.internal_name
        };
        format!("{} (ID: {}) - {}", display, self.service_id, self.service)
    }

    /// Applies the mutable half of an update. Identity fields are never touched.
    pub fn apply_update(&mut self, update: &UpdateServiceRequest) {
        self.rate = update.rate;
        self.min = update.min.clone();
        self.max = update.max.clone();
        self.refill = update.refill;
        self.cancel = update.cancel;
    }
}

/// `PUT /admin/updateService` body: lookup key plus the fields that may change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateServiceRequest {
    #[serde(rename = "serviceId")]
    pub service_id: String,
    pub rate: f64,
    pub min: String,
    pub max: String,
    pub refill: bool,
    pub cancel: bool,
}

/// `POST /admin/deleteCustomServices` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteServiceRequest {
    #[serde(rename = "serviceId")]
    pub service_id: String,
}

/// `POST /admin/addService` and `POST /admin/deleteService` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceAssignmentRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "serviceId")]
    pub service_id: String,
}
