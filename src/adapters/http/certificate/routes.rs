//! Axum router configuration for the certificate endpoint.

use axum::{routing::get, Router};

use super::handlers::{download_certificate, CertificateAppState};

/// Create the certificate API router.
///
/// # Routes
/// - `GET /certificate` - Download the certificate for a paid session
pub fn certificate_routes() -> Router<CertificateAppState> {
    Router::new().route("/certificate", get(download_certificate))
}
