//! HTTP DTOs (Data Transfer Objects) for checkout endpoints.
//!
//! These types define the JSON request/response structure for the checkout
//! API. They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::SessionStatusView;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a checkout session for a quiz result.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    /// Recipient name to print on the certificate.
    pub name: String,
    /// Email for the payment receipt.
    pub email: String,
    /// Quiz score; validated as a non-negative integer.
    pub score: i64,
}

/// Query parameters for the session status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStatusParams {
    /// The provider's session id, round-tripped through the redirect URL.
    pub session_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for checkout initiation.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionResponse {
    /// The provider-hosted checkout URL the client redirects to.
    pub url: String,
}

/// Response for a session status poll.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    /// Whether payment has completed.
    pub paid: bool,
    /// Recipient name from session metadata.
    pub name: String,
    /// Quiz score from session metadata.
    pub score: u32,
    /// Customer email attached to the session.
    pub email: String,
}

impl From<SessionStatusView> for SessionStatusResponse {
    fn from(view: SessionStatusView) -> Self {
        Self {
            paid: view.paid,
            name: view.name,
            score: view.score,
            email: view.email,
        }
    }
}
