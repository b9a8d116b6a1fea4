//! GetSessionStatusHandler - Query handler for polling a session's payment state.

use std::sync::Arc;

use crate::domain::checkout::{CheckoutError, SessionStatusView};
use crate::ports::{ConfirmationStore, PaymentProvider};

/// Query for a session's payment status.
#[derive(Debug, Clone)]
pub struct GetSessionStatusQuery {
    pub session_id: String,
}

/// Handler answering "has this session been paid?".
///
/// Consults the provider's live state and the local confirmation cache;
/// either source confirming payment is sufficient. Safe to poll repeatedly:
/// the only side effect is the idempotent cache back-fill when the provider
/// reports payment complete. The client polls this after returning from the
/// provider redirect, since redirect completion does not guarantee the
/// webhook has already landed.
pub struct GetSessionStatusHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    confirmation_store: Arc<dyn ConfirmationStore>,
}

impl GetSessionStatusHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        confirmation_store: Arc<dyn ConfirmationStore>,
    ) -> Self {
        Self {
            payment_provider,
            confirmation_store,
        }
    }

    pub async fn handle(
        &self,
        query: GetSessionStatusQuery,
    ) -> Result<SessionStatusView, CheckoutError> {
        let session = self
            .payment_provider
            .retrieve_session(&query.session_id)
            .await
            .map_err(|e| CheckoutError::provider_failed(e.to_string(), e.retryable))?
            .ok_or_else(|| CheckoutError::session_not_found(&query.session_id))?;

        let cached = self
            .confirmation_store
            .is_paid(&query.session_id)
            .await
            .map_err(|e| CheckoutError::infrastructure(e.to_string()))?;

        let paid = session.is_paid() || cached;

        if session.is_paid() && !cached {
            self.confirmation_store
                .mark_paid(&query.session_id)
                .await
                .map_err(|e| CheckoutError::infrastructure(e.to_string()))?;
        }

        tracing::debug!(session_id = %query.session_id, paid, "Session status polled");

        Ok(SessionStatusView {
            paid,
            name: session.recipient_name,
            score: session.score,
            email: session.customer_email.unwrap_or_default(),
        })
    }
}
