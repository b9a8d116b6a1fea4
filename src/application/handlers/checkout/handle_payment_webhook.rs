//! HandlePaymentWebhookHandler - Command handler for asynchronous payment notifications.

use std::sync::Arc;

use crate::domain::checkout::CheckoutError;
use crate::ports::{ConfirmationStore, PaymentProvider, WebhookEventData, WebhookEventType};

/// Command to handle a payment webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload; the signature covers these exact bytes.
    pub payload: Vec<u8>,
    /// Webhook signature header (empty when the provider sent none).
    pub signature: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Payment completion recorded for a session.
    PaymentConfirmed { session_id: String },

    /// No signing secret is configured; the delivery was acknowledged
    /// without verification or processing.
    AcceptedUnverified,

    /// Event verified and acknowledged, no state change needed.
    Acknowledged,

    /// Event type not handled; acknowledged without processing.
    Ignored,
}

/// Handler for provider-initiated payment notifications.
///
/// Deliveries may arrive before, after, or never relative to the client's
/// own status poll; both paths populate the same confirmation store with
/// set semantics, so no ordering between them is assumed. Duplicate
/// deliveries of the same event are harmless.
///
/// When no signing secret is configured the handler acknowledges every
/// delivery immediately, without verifying or recording anything. This is
/// a deliberately permissive fallback for environments without webhook
/// configuration; payment confirmation then relies entirely on the
/// client-side status poll.
pub struct HandlePaymentWebhookHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    confirmation_store: Arc<dyn ConfirmationStore>,
    verify_signatures: bool,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        confirmation_store: Arc<dyn ConfirmationStore>,
        verify_signatures: bool,
    ) -> Self {
        Self {
            payment_provider,
            confirmation_store,
            verify_signatures,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, CheckoutError> {
        if !self.verify_signatures {
            tracing::warn!(
                "Webhook received but no signing secret is configured; \
                 acknowledging without verification"
            );
            return Ok(HandlePaymentWebhookResult::AcceptedUnverified);
        }

        // 1. Verify the signature against the raw body and parse the event
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook rejected");
                CheckoutError::invalid_webhook_signature()
            })?;

        // 2. Process based on event type
        match event.event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                let session_id = match event.data {
                    WebhookEventData::Checkout { session_id } => session_id,
                    _ => {
                        return Err(CheckoutError::infrastructure(
                            "Unexpected webhook data type for checkout.session.completed",
                        ))
                    }
                };

                self.confirmation_store
                    .mark_paid(&session_id)
                    .await
                    .map_err(|e| CheckoutError::infrastructure(e.to_string()))?;

                tracing::info!(
                    event_id = %event.id,
                    session_id = %session_id,
                    "Payment completion recorded from webhook"
                );

                Ok(HandlePaymentWebhookResult::PaymentConfirmed { session_id })
            }
            WebhookEventType::CheckoutSessionExpired => {
                // Nothing to record; an expired session can never be issued
                Ok(HandlePaymentWebhookResult::Acknowledged)
            }
            WebhookEventType::Unknown(event_type) => {
                tracing::debug!(event_type = %event_type, "Ignoring unhandled webhook event");
                Ok(HandlePaymentWebhookResult::Ignored)
            }
        }
    }
}
