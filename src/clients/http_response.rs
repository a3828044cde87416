//! Response types for the TikTok Shop API SDK.
//!
//! This module provides the [`ApiResponse`] type for accessing the
//! envelope the API host wraps every response in.

use serde::de::DeserializeOwned;

use crate::clients::errors::ApiError;

/// A response from the TikTok Shop API.
///
/// Every API response is a JSON envelope of the form
/// `{"code": 0, "message": "Success", "request_id": "...", "data": {...}}`.
/// The vendor reports failures inside the envelope rather than through the
/// HTTP status, so a `200 OK` can still carry a rejection. Use
/// [`is_success`](Self::is_success) or [`into_data`](Self::into_data) to
/// interpret the outcome.
///
/// # Example
///
/// ```rust
/// use tiktok_shop_api::ApiResponse;
/// use serde_json::json;
///
/// let response = ApiResponse::new(200, json!({
///     "code": 0,
///     "message": "Success",
///     "request_id": "2025082201",
///     "data": {"shops": []},
/// }));
///
/// assert!(response.is_success());
/// assert_eq!(response.request_id(), Some("2025082201"));
/// ```
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Creates a new `ApiResponse` from a status code and parsed body.
    #[must_use]
    pub const fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// Returns the envelope `code` field, if present.
    #[must_use]
    pub fn code(&self) -> Option<i64> {
        self.body.get("code").and_then(serde_json::Value::as_i64)
    }

    /// Returns the envelope `message` field, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(serde_json::Value::as_str)
    }

    /// Returns the envelope `request_id` field, if present.
    ///
    /// This id is the vendor's correlation handle and should be included
    /// in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.body
            .get("request_id")
            .and_then(serde_json::Value::as_str)
    }

    /// Returns a reference to the envelope `data` field, if present.
    #[must_use]
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.body.get("data")
    }

    /// Returns `true` if the envelope message is exactly `"Success"`.
    ///
    /// The API host uses the capitalized form for signed calls; anything
    /// else is a rejection regardless of the HTTP status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.message() == Some("Success")
    }

    /// Consumes the response and deserializes the envelope `data` field.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the envelope message is not
    /// `"Success"`, carrying the vendor's code, message, and request id.
    /// Returns [`ApiError::Parse`] when `data` is missing or does not
    /// match the expected shape.
    pub fn into_data<T: DeserializeOwned>(mut self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Rejected {
                // Fall back to the HTTP status when the envelope has no code
                code: self.code().unwrap_or_else(|| i64::from(self.status)),
                message: self.message().unwrap_or("unknown error").to_string(),
                request_id: self.request_id().map(ToString::to_string),
            });
        }

        let data = self
            .body
            .get_mut("data")
            .map_or(serde_json::Value::Null, serde_json::Value::take);
        serde_json::from_value(data).map_err(|error| ApiError::Parse {
            reason: error.to_string(),
        })
    }
}
