//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::checkout::{
    CheckoutSettings, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
    GetSessionStatusHandler, GetSessionStatusQuery, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler,
};
use crate::ports::{ConfirmationStore, PaymentProvider};

use super::super::error::ApiError;
use super::dto::{
    CheckoutSessionResponse, CreateCheckoutSessionRequest, SessionStatusParams,
    SessionStatusResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the checkout endpoints.
///
/// Cloned per request; dependencies are Arc-wrapped ports so handlers stay
/// testable with in-process fakes.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub confirmation_store: Arc<dyn ConfirmationStore>,
    pub settings: CheckoutSettings,
    /// Whether webhook signatures are verified. False when no signing
    /// secret is configured (permissive fallback).
    pub verify_webhook_signatures: bool,
}

impl CheckoutAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_session_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(self.payment_provider.clone(), self.settings.clone())
    }

    pub fn session_status_handler(&self) -> GetSessionStatusHandler {
        GetSessionStatusHandler::new(
            self.payment_provider.clone(),
            self.confirmation_store.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.payment_provider.clone(),
            self.confirmation_store.clone(),
            self.verify_webhook_signatures,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /create-checkout-session - Create a payment session for a submission
pub async fn create_checkout_session(
    State(state): State<CheckoutAppState>,
    Json(request): Json<CreateCheckoutSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_session_handler();
    let cmd = CreateCheckoutSessionCommand {
        name: request.name,
        email: request.email,
        score: request.score,
    };

    let result = handler.handle(cmd).await?;

    let response = CheckoutSessionResponse { url: result.url };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /session-status?session_id=... - Poll a session's payment state
pub async fn get_session_status(
    State(state): State<CheckoutAppState>,
    Query(params): Query<SessionStatusParams>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.session_status_handler();
    let query = GetSessionStatusQuery {
        session_id: params.session_id,
    };

    let view = handler.handle(query).await?;

    Ok(Json(SessionStatusResponse::from(view)))
}

/// POST /webhook - Handle provider payment notifications
///
/// Must acknowledge quickly: any 2xx stops the provider's retries, a 400
/// signature rejection drops the delivery, and only unexpected internal
/// errors return 5xx so the provider retries exactly that case.
pub async fn handle_stripe_webhook(
    State(state): State<CheckoutAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    // Signature is verified against the raw, unparsed body
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let handler = state.webhook_handler();
    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    handler.handle(cmd).await?;

    Ok(StatusCode::OK)
}
