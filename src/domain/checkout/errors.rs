//! Checkout-specific error types.
//!
//! Errors raised along the payment-gated issuance flow, from input
//! validation through certificate download.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | SessionNotFound | 404 |
//! | PaymentNotConfirmed | 402 |
//! | InvalidWebhookSignature | 400 |
//! | PaymentProviderFailed | 502 |
//! | Infrastructure | 500 |

/// Errors for the checkout and certificate issuance flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Client-submitted input was rejected before any provider call.
    ValidationFailed { field: String, message: String },

    /// The payment provider has no session under this id.
    SessionNotFound(String),

    /// A certificate was requested for a session whose payment is not
    /// confirmed. Expected gate, not a fault.
    PaymentNotConfirmed(String),

    /// Webhook signature verification failed; the delivery is dropped.
    InvalidWebhookSignature,

    /// Talking to the payment provider failed (network or API error).
    PaymentProviderFailed { reason: String, retryable: bool },

    /// Internal error unrelated to the provider or the client.
    Infrastructure(String),
}

impl CheckoutError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CheckoutError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        CheckoutError::SessionNotFound(session_id.into())
    }

    pub fn payment_not_confirmed(session_id: impl Into<String>) -> Self {
        CheckoutError::PaymentNotConfirmed(session_id.into())
    }

    pub fn invalid_webhook_signature() -> Self {
        CheckoutError::InvalidWebhookSignature
    }

    pub fn provider_failed(reason: impl Into<String>, retryable: bool) -> Self {
        CheckoutError::PaymentProviderFailed {
            reason: reason.into(),
            retryable,
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CheckoutError::Infrastructure(message.into())
    }

    /// Returns the stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::ValidationFailed { .. } => "VALIDATION_FAILED",
            CheckoutError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            CheckoutError::PaymentNotConfirmed(_) => "PAYMENT_NOT_CONFIRMED",
            CheckoutError::InvalidWebhookSignature => "INVALID_WEBHOOK_SIGNATURE",
            CheckoutError::PaymentProviderFailed { .. } => "PAYMENT_PROVIDER_ERROR",
            CheckoutError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            CheckoutError::ValidationFailed { field, message } => {
                format!("Invalid value for '{}': {}", field, message)
            }
            CheckoutError::SessionNotFound(id) => format!("Payment session not found: {}", id),
            CheckoutError::PaymentNotConfirmed(id) => {
                format!("Payment not confirmed for session: {}", id)
            }
            CheckoutError::InvalidWebhookSignature => {
                "Webhook signature verification failed".to_string()
            }
            CheckoutError::PaymentProviderFailed { reason, .. } => {
                format!("Payment provider request failed: {}", reason)
            }
            CheckoutError::Infrastructure(message) => format!("Internal error: {}", message),
        }
    }
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for CheckoutError {}
