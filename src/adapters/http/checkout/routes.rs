//! Axum router configuration for checkout endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_checkout_session, get_session_status, handle_stripe_webhook, CheckoutAppState,
};

/// Create the checkout API router.
///
/// # Routes
/// - `POST /create-checkout-session` - Create a payment session
/// - `GET /session-status` - Poll a session's payment state
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/create-checkout-session", post(create_checkout_session))
        .route("/session-status", get(get_session_status))
}

/// Create the webhook router.
///
/// Separate from the checkout routes because webhook deliveries carry no
/// client session; authenticity comes from the provider signature alone.
///
/// # Routes
/// - `POST /webhook` - Handle provider payment notifications
pub fn webhook_routes() -> Router<CheckoutAppState> {
    Router::new().route("/webhook", post(handle_stripe_webhook))
}

/// Create the complete checkout module router.
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new().merge(checkout_routes()).merge(webhook_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::confirmation::InMemoryConfirmationStore;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::application::handlers::checkout::CheckoutSettings;

    fn test_state() -> CheckoutAppState {
        CheckoutAppState {
            payment_provider: Arc::new(MockPaymentProvider::new()),
            confirmation_store: Arc::new(InMemoryConfirmationStore::new()),
            settings: CheckoutSettings {
                amount_cents: 400,
                currency: "brl".to_string(),
                public_base_url: "http://localhost:4242".to_string(),
            },
            verify_webhook_signatures: true,
        }
    }

    #[test]
    fn checkout_routes_create_router() {
        let router = checkout_routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[test]
    fn webhook_routes_create_router() {
        let router = webhook_routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[test]
    fn checkout_router_creates_combined_router() {
        let router = checkout_router();
        let _: Router<()> = router.with_state(test_state());
    }
}
