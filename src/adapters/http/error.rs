//! HTTP error mapping shared by the API modules.
//!
//! Converts `CheckoutError` into status codes and the JSON error envelope.
//! 4xx covers client input and payment-state outcomes; 502 marks the
//! payment provider as unavailable, 500 everything internal.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::domain::checkout::CheckoutError;

/// JSON error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error payload carried in the envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// API error type that converts checkout errors to HTTP responses.
pub struct ApiError(CheckoutError);

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            CheckoutError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            CheckoutError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            CheckoutError::PaymentNotConfirmed(_) => StatusCode::PAYMENT_REQUIRED,
            CheckoutError::InvalidWebhookSignature => StatusCode::BAD_REQUEST,
            CheckoutError::PaymentProviderFailed { .. } => StatusCode::BAD_GATEWAY,
            CheckoutError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code(), self.0.message());
        (status, Json(body)).into_response()
    }
}
