//! Checkout HTTP adapter: session creation, status polling, and webhooks.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::CheckoutAppState;
pub use routes::{checkout_router, checkout_routes, webhook_routes};
