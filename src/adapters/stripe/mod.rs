//! Stripe adapter: `PaymentProvider` implementation, webhook types, and a
//! configurable mock for tests.

mod mock_payment_provider;
mod stripe_adapter;
pub mod webhook_types;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeCheckoutAdapter, StripeConfig};
