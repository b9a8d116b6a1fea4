//! Checkout command/query handlers.

mod create_checkout_session;
mod get_session_status;
mod handle_payment_webhook;

pub use create_checkout_session::{
    CheckoutSessionCreated, CheckoutSettings, CreateCheckoutSessionCommand,
    CreateCheckoutSessionHandler,
};
pub use get_session_status::{GetSessionStatusHandler, GetSessionStatusQuery};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
