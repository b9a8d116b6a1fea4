//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure; `api_router`
//! assembles the complete service surface.

pub mod certificate;
pub mod checkout;
pub mod error;

// Re-export key types for convenience
pub use certificate::CertificateAppState;
pub use checkout::CheckoutAppState;
pub use error::{ApiError, ErrorResponse};

use axum::Router;

/// Assemble the full API router from the per-area states.
pub fn api_router(
    checkout_state: CheckoutAppState,
    certificate_state: CertificateAppState,
) -> Router {
    Router::new()
        .merge(checkout::checkout_router().with_state(checkout_state))
        .merge(certificate::certificate_routes().with_state(certificate_state))
}
