//! [`AppError`] and the JSON body it renders to

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned to API clients. The HTTP status follows from `code`.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Offending field, order number and the like
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// `Missing <field>`, with the field name in details
    pub fn missing_field(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("Missing {field}"))
            .with_detail("field", field)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn not_owner(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotResourceOwner, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }
}

/// JSON body of every failed request
///
/// ```json
/// { "code": 4002, "message": "No longer be able to change order", "details": { "order_no": 7 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Numeric [`ErrorCode`]
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        (self.http_status(), axum::Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Invalid snack list")
            .with_detail("field", "snacks")
            .with_detail("index", 2);

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "snacks");
        assert_eq!(details.get("index").unwrap(), 2);
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let err = AppError::missing_field("order status");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Missing order status");
        assert_eq!(
            err.details.unwrap().get("field").unwrap(),
            "order status"
        );
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::OrderNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::not_owner("not yours").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::new(ErrorCode::OrderLocked).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::database("disk I/O error").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::VendorNotFound, "vendor not found");
        assert_eq!(format!("{}", err), "vendor not found");
    }

    #[test]
    fn test_error_body() {
        let err = AppError::new(ErrorCode::RateBeforePickup).with_detail("order_no", 7);
        let body = ErrorBody::from(&err);

        assert_eq!(body.code, 4003);
        assert_eq!(body.message, "Rate after pick up");
        assert_eq!(body.details.unwrap().get("order_no").unwrap(), 7);
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let json = serde_json::to_value(ErrorBody::from(&AppError::new(ErrorCode::OrderLocked)))
            .unwrap();
        assert_eq!(json["code"], 4002);
        assert!(json.get("details").is_none());
    }
}
