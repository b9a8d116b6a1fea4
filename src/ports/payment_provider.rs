//! Payment provider port for external payment processing.
//!
//! Defines the contract for the payment gateway integration (e.g., Stripe
//! Checkout). The provider owns every payment session; this service holds
//! only the session id and a derived confirmation flag, so the port exposes
//! exactly the three capabilities the flow needs: create a hosted checkout
//! session, read a session's live state back, and verify asynchronous
//! webhook deliveries.
//!
//! # Design
//!
//! - **Gateway agnostic**: no Stripe types leak through this interface
//! - **One-shot payments**: a session represents a single fixed-fee charge,
//!   not a subscription
//! - **Not idempotent on create**: repeated `create_checkout_session` calls
//!   with identical input create distinct sessions by design

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the payment provider integration.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session for a validated submission.
    ///
    /// Returns the session reference the client is redirected to. Each call
    /// creates a fresh remote session; failures leave nothing behind to
    /// clean up.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Retrieve a session's live state from the provider.
    ///
    /// Returns `None` when the provider has no session under this id,
    /// distinct from a session that exists but is unpaid.
    async fn retrieve_session(&self, session_id: &str)
        -> Result<Option<PaymentSession>, PaymentError>;

    /// Verify a webhook delivery against the raw request body.
    ///
    /// Returns the parsed event if the signature is valid, an
    /// `InvalidWebhook` error otherwise.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Recipient name (stored in session metadata).
    pub name: String,

    /// Quiz score (stored in session metadata).
    pub score: u32,

    /// Customer email, used by the provider for receipts and pre-fill.
    pub email: String,

    /// Fee in the smallest currency unit.
    pub amount_cents: u32,

    /// ISO 4217 currency code, lowercase.
    pub currency: String,

    /// URL to redirect after successful checkout. The provider substitutes
    /// its session-id placeholder at redirect time.
    pub success_url: String,

    /// URL to redirect after canceled checkout. No side effects.
    pub cancel_url: String,
}

/// Freshly created checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session id.
    pub id: String,

    /// URL for the customer to complete payment.
    pub url: String,
}

/// A payment session's live state as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Provider's session id.
    pub id: String,

    /// Current session status.
    pub status: PaymentSessionStatus,

    /// Recipient name round-tripped through session metadata.
    pub recipient_name: String,

    /// Quiz score round-tripped through session metadata.
    pub score: u32,

    /// Customer email attached to the session.
    pub customer_email: Option<String>,
}

impl PaymentSession {
    /// Whether the provider reports this session's payment as complete.
    pub fn is_paid(&self) -> bool {
        self.status == PaymentSessionStatus::Paid
    }
}

/// Payment session status from the provider.
///
/// Transitions happen exclusively inside the provider; this service only
/// observes them. Once `Paid`, a session never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSessionStatus {
    /// Checkout started, payment not completed.
    Open,

    /// Payment completed.
    Paid,

    /// Session expired or was abandoned.
    Expired,
}

/// Webhook event from the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event id from the provider.
    pub id: String,

    /// Event type.
    pub event_type: WebhookEventType,

    /// Event payload.
    pub data: WebhookEventData,

    /// When the event occurred (Unix timestamp).
    pub created_at: i64,
}

/// Types of webhook events we handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,

    /// Checkout session expired without payment.
    CheckoutSessionExpired,

    /// Unknown event type, acknowledged without processing.
    Unknown(String),
}

/// Webhook event payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEventData {
    /// Checkout session data.
    #[serde(rename = "checkout")]
    Checkout { session_id: String },

    /// Raw/unknown event data.
    #[serde(rename = "raw")]
    Raw { json: String },
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: code.is_retryable(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(PaymentErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Create an invalid webhook error.
    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }

    /// Create a provider API error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Invalid webhook signature.
    InvalidWebhook,

    /// Provider API error.
    ProviderError,

    /// Unknown error.
    Unknown,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError | PaymentErrorCode::RateLimitExceeded
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::InvalidWebhook => "invalid_webhook",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
