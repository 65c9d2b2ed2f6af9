//! Order DTOs and the refill tri-state.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::de;

/// Refill availability for an order.
///
/// On the wire this is `null` (not offered), `""` (offered, not requested) or
/// the refill-tracking id once a refill has been requested.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RefillState {
    #[default]
    NotOffered,
    Available,
    InFlight(String),
}

impl RefillState {
    pub fn refill_id(&self) -> Option<&str> {
        match self {
            RefillState::InFlight(id) => Some(id),
            _ => None,
        }
    }
}

impl Serialize for RefillState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RefillState::NotOffered => serializer.serialize_none(),
            RefillState::Available => serializer.serialize_str(""),
            RefillState::InFlight(id) => serializer.serialize_str(id),
        }
    }
}

impl<'de> Deserialize<'de> for RefillState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Anything that is not a string (null, -1 once refills are exhausted) means no refill.
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) if s.is_empty() => RefillState::Available,
            Value::String(s) => RefillState::InFlight(s),
            _ => RefillState::NotOffered,
        })
    }
}

/// An order as listed by `GET /user/getOrders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Order {
    #[serde(rename = "orderId", deserialize_with = "de::string_or_number")]
    pub order_id: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub service: String,
    #[serde(default, deserialize_with = "de::u64_or_string")]
    pub quantity: u64,
    #[serde(default, deserialize_with = "de::f64_or_string")]
    pub rate: f64,
    #[serde(rename = "lastStatus", default)]
    pub last_status: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub start_count: String,
    #[serde(default)]
    pub refill: RefillState,
}

/// `POST /user/requestRefill` body. The refill-status route reuses the same
/// shape, carrying the refill id in `orderId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefillRequest {
    #[serde(rename = "orderId")]
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RefillResponse {
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub refill: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefillStatusResponse {
    pub status: String,
}

/// `POST /user/getOrderStatus` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderStatusRequest {
    pub order: String,
}

/// Detailed status snapshot for one order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OrderStatusDetails {
    pub status: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub start_count: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub charge: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub remains: String,
    #[serde(default)]
    pub currency: String,
}

/// `POST /user/placeOrder` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceOrderRequest {
    #[serde(rename = "linkInput")]
    pub link_input: String,
    #[serde(rename = "serviceId")]
    pub service_id: String,
    pub service: String,
    pub quantity: u64,
    pub rate: f64,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    pub refill: bool,
}
