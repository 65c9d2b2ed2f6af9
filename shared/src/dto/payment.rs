//! Mock PhonePe gateway DTOs.

use serde::{Deserialize, Serialize};

use super::de;

/// Payment lifecycle. `Idle` is client-only; the gateway reports the rest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Idle,
    Initiated,
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Success | PaymentStatus::Failed)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, PaymentStatus::Initiated | PaymentStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Idle => "IDLE",
            PaymentStatus::Initiated => "INITIATED",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitiatePaymentRequest {
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct InitiatePaymentResponse {
    #[serde(rename = "transactionId", default, deserialize_with = "de::opt_string_or_number")]
    pub transaction_id: Option<String>,
    #[serde(rename = "paymentUrl", default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
}

/// What the gateway would post back to the backend; the dashboard fakes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentCallbackRequest {
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentStatusRequest {
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentStatusResponse {
    pub status: PaymentStatus,
}
