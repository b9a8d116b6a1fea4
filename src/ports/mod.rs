//! Ports: capability interfaces the application layer depends on.
//!
//! Adapters provide the implementations; nothing in `domain` or
//! `application` touches a concrete provider client, store, or renderer.

mod certificate_renderer;
mod confirmation_store;
mod payment_provider;

pub use certificate_renderer::{CertificateRenderer, RenderError, CERTIFICATE_CONTENT_TYPE};
pub use confirmation_store::{ConfirmationStore, ConfirmationStoreError};
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    PaymentSession, PaymentSessionStatus, WebhookEvent, WebhookEventData, WebhookEventType,
};
