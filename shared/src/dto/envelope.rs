//! # Response Envelope
//!
//! Every API call in the dashboard resolves to an [`ApiResponse`]: either
//! `success: true` with `data`, or `success: false` with a human readable
//! `message`. Transport errors, non-2xx statuses and backend business failures
//! all collapse into the failure shape so callers only branch once.

use serde::{Deserialize, Serialize};

/// Fallback message when the backend fails without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong";

/// Normalized `{success, data | message}` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Failure message, or the generic fallback.
    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_FAILURE_MESSAGE)
    }

    /// Collapse into a `Result`, treating a successful response without data as a failure.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("Empty response from server".to_string()),
            (false, _) => Err(self
                .message
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
        }
    }
}

/// Error body as sent by the backend. Some routes use `message`, others `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn reason(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Payload that may or may not be wrapped in `{ "data": ... }`.
///
/// The catalog routes answer `{ data: [...] }` while others return the object
/// directly; both shapes decode to the inner value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaybeWrapped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            MaybeWrapped::Wrapped { data } => data,
            MaybeWrapped::Bare(data) => data,
        }
    }
}

/// `page`/`limit` query string for the paginated listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert_eq!(ApiResponse::ok(3).into_result(), Ok(3));
        assert_eq!(
            ApiResponse::<i32>::failure("nope").into_result(),
            Err("nope".to_string())
        );

        let empty = ApiResponse::<i32> {
            success: true,
            data: None,
            message: None,
        };
        assert!(empty.into_result().is_err());

        let silent = ApiResponse::<i32> {
            success: false,
            data: None,
            message: None,
        };
        assert_eq!(silent.into_result(), Err(DEFAULT_FAILURE_MESSAGE.to_string()));
    }

    #[test]
    fn test_error_response_prefers_message() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"message":"Insufficient balance","error":"E42"}"#).unwrap();
        assert_eq!(body.reason(), Some("Insufficient balance"));

        let body: ErrorResponse = serde_json::from_str(r#"{"error":"Order not found"}"#).unwrap();
        assert_eq!(body.reason(), Some("Order not found"));

        let body: ErrorResponse = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.reason(), None);
    }

    #[test]
    fn test_maybe_wrapped() {
        let wrapped: MaybeWrapped<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
        assert_eq!(wrapped.into_inner(), vec![1, 2]);

        let bare: MaybeWrapped<Vec<u32>> = serde_json::from_str("[3]").unwrap();
        assert_eq!(bare.into_inner(), vec![3]);
    }
}
