//! Certificate renderer port.
//!
//! The seam between the issuance flow and the PDF backend. Implementations
//! must be deterministic: the same certificate renders to an equivalent
//! document every time, with no randomness and no external calls.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::certificate::Certificate;

/// Port for rendering a certificate into a downloadable document.
#[async_trait]
pub trait CertificateRenderer: Send + Sync {
    /// Render the certificate to PDF bytes.
    ///
    /// The returned bytes are a complete PDF document suitable for
    /// streaming as an HTTP response body.
    async fn render(&self, certificate: &Certificate) -> Result<Vec<u8>, RenderError>;
}

/// MIME content type for rendered certificates.
pub const CERTIFICATE_CONTENT_TYPE: &str = "application/pdf";

/// Errors that can occur during certificate rendering.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Document assembly failed.
    #[error("PDF rendering failed: {0}")]
    RenderingFailed(String),

    /// A required font could not be loaded.
    #[error("Font unavailable: {0}")]
    FontUnavailable(String),
}

impl RenderError {
    pub fn rendering_failed(reason: impl Into<String>) -> Self {
        Self::RenderingFailed(reason.into())
    }

    pub fn font_unavailable(reason: impl Into<String>) -> Self {
        Self::FontUnavailable(reason.into())
    }
}
